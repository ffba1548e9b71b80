use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::ModelError;

/// Controls when the solver restarts its search.
///
/// The `scale` is the base number of failures (or nodes, depending on the solver) after which
/// the search restarts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RestartStrategy {
    /// Restart after every `scale` failures.
    Constant { scale: u32 },
    /// Restart after `i * scale` failures in the i-th run.
    Linear { scale: u32 },
    /// Restart after `base^i * scale` failures in the i-th run.
    Geometric { base: f64, scale: u32 },
    /// Restart after `L(i) * scale` failures, where `L` is the Luby sequence.
    Luby { scale: u32 },
}

impl RestartStrategy {
    pub(crate) fn validate(self) -> Result<RestartStrategy, ModelError> {
        let scale = match self {
            RestartStrategy::Constant { scale }
            | RestartStrategy::Linear { scale }
            | RestartStrategy::Geometric { scale, .. }
            | RestartStrategy::Luby { scale } => scale,
        };
        if scale == 0 {
            return Err(ModelError::InvalidSearchAnnotation(
                "the restart scale has to be positive".to_owned(),
            ));
        }

        if let RestartStrategy::Geometric { base, .. } = self {
            if base.is_nan() || base <= 1.0 {
                return Err(ModelError::InvalidSearchAnnotation(format!(
                    "the geometric restart base {base} has to exceed 1"
                )));
            }
        }

        Ok(self)
    }
}

impl Display for RestartStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RestartStrategy::Constant { scale } => write!(f, "restart_constant({scale})"),
            RestartStrategy::Linear { scale } => write!(f, "restart_linear({scale})"),
            RestartStrategy::Geometric { base, scale } => {
                write!(f, "restart_geometric({base:?}, {scale})")
            }
            RestartStrategy::Luby { scale } => write!(f, "restart_luby({scale})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_annotations() {
        assert_eq!(
            "restart_constant(100)",
            RestartStrategy::Constant { scale: 100 }.to_string()
        );
        assert_eq!(
            "restart_linear(50)",
            RestartStrategy::Linear { scale: 50 }.to_string()
        );
        assert_eq!(
            "restart_geometric(1.5, 100)",
            RestartStrategy::Geometric {
                base: 1.5,
                scale: 100
            }
            .to_string()
        );
        assert_eq!(
            "restart_luby(250)",
            RestartStrategy::Luby { scale: 250 }.to_string()
        );
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(RestartStrategy::Luby { scale: 0 }.validate().is_err());
        assert!(RestartStrategy::Geometric {
            base: 1.0,
            scale: 10
        }
        .validate()
        .is_err());
        assert!(RestartStrategy::Linear { scale: 10 }.validate().is_ok());
    }
}
