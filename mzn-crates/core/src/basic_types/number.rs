use std::fmt::Display;
use std::fmt::Formatter;

/// A host number which can be used directly as an operand or as a bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn is_integral(self) -> bool {
        matches!(self, Number::Int(_))
    }

    pub fn as_float(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value.into())
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Int(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Writes an integer literal; negative values are bracketed so they can be embedded anywhere.
pub(crate) fn write_int(f: &mut Formatter<'_>, value: i64) -> std::fmt::Result {
    if value < 0 {
        write!(f, "({value})")
    } else {
        write!(f, "{value}")
    }
}

/// Writes a float literal which always contains a decimal point.
pub(crate) fn write_float(f: &mut Formatter<'_>, value: f64) -> std::fmt::Result {
    if value < 0.0 {
        write!(f, "({value:?})")
    } else {
        write!(f, "{value:?}")
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(value) => write_int(f, *value),
            Number::Float(value) => write_float(f, *value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_numbers_are_bracketed() {
        assert_eq!("(-3)", Number::Int(-3).to_string());
        assert_eq!("(-1.5)", Number::Float(-1.5).to_string());
    }

    #[test]
    fn floats_keep_their_decimal_point() {
        assert_eq!("2.0", Number::Float(2.0).to_string());
        assert_eq!("7", Number::Int(7).to_string());
    }
}
