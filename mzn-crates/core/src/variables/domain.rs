use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;

use crate::basic_types::Number;
use crate::error::ModelError;
use crate::expressions::ValueType;

/// The domain of an integer or set variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntDomain {
    /// The inclusive range `lower..upper`.
    Bounds { lower: i64, upper: i64 },
    /// An explicit set of values, sorted and without duplicates.
    Values(Vec<i64>),
}

impl Display for IntDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IntDomain::Bounds { lower, upper } => write!(f, "{lower}..{upper}"),
            IntDomain::Values(values) => write!(f, "{{{}}}", values.iter().join(", ")),
        }
    }
}

/// The resolved type and domain of a declared variable.
#[derive(Clone, Debug, PartialEq)]
pub enum VariableKind {
    Int(IntDomain),
    Float { lower: f64, upper: f64 },
    Bool,
    IntSet(IntDomain),
}

impl VariableKind {
    pub fn value_type(&self) -> ValueType {
        match self {
            VariableKind::Int(_) => ValueType::Int,
            VariableKind::Float { .. } => ValueType::Float,
            VariableKind::Bool => ValueType::Bool,
            VariableKind::IntSet(_) => ValueType::IntSet,
        }
    }
}

impl Display for VariableKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableKind::Int(domain) => write!(f, "{domain}"),
            VariableKind::Float { lower, upper } => write!(f, "{lower:?}..{upper:?}"),
            VariableKind::Bool => write!(f, "bool"),
            VariableKind::IntSet(domain) => write!(f, "set of {domain}"),
        }
    }
}

/// Describes a variable which is still to be declared in a model.
///
/// Integer and set variables need either bounds or an explicit domain, float variables need
/// bounds. Boolean variables need neither, but accept the bounds `0..1` or the domain `{0, 1}`.
///
/// ```rust
/// # use mzn_core::variables::VariableDefinition;
/// let queen = VariableDefinition::int().with_bounds(0, 7);
/// let colour = VariableDefinition::int().with_domain([1, 2, 4]);
/// let flag = VariableDefinition::bool();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    value_type: ValueType,
    bounds: Option<(Number, Number)>,
    domain: Option<Vec<i64>>,
}

impl VariableDefinition {
    pub fn new(value_type: ValueType) -> VariableDefinition {
        VariableDefinition {
            value_type,
            bounds: None,
            domain: None,
        }
    }

    pub fn int() -> VariableDefinition {
        VariableDefinition::new(ValueType::Int)
    }

    pub fn float() -> VariableDefinition {
        VariableDefinition::new(ValueType::Float)
    }

    pub fn bool() -> VariableDefinition {
        VariableDefinition::new(ValueType::Bool)
    }

    pub fn int_set() -> VariableDefinition {
        VariableDefinition::new(ValueType::IntSet)
    }

    /// Sets the inclusive bounds of the domain.
    pub fn with_bounds(mut self, lower: impl Into<Number>, upper: impl Into<Number>) -> Self {
        self.bounds = Some((lower.into(), upper.into()));
        self
    }

    /// Sets an explicit finite domain.
    pub fn with_domain(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.domain = Some(values.into_iter().collect());
        self
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub(crate) fn resolve(&self, name: &str) -> Result<VariableKind, ModelError> {
        let invalid = |reason| ModelError::InvalidDomainSpecification {
            name: name.to_owned(),
            reason,
        };

        match self.value_type {
            ValueType::Int => self.resolve_int_domain(name).map(VariableKind::Int),
            ValueType::IntSet => self.resolve_int_domain(name).map(VariableKind::IntSet),
            ValueType::Float => {
                if self.domain.is_some() {
                    return Err(invalid("float variables only accept bounds"));
                }
                let Some((lower, upper)) = self.bounds else {
                    return Err(invalid("float variables require bounds"));
                };
                let (lower, upper) = (lower.as_float(), upper.as_float());
                if !lower.is_finite() || !upper.is_finite() {
                    return Err(invalid("float bounds have to be finite"));
                }
                if lower > upper {
                    return Err(invalid("the lower bound exceeds the upper bound"));
                }
                Ok(VariableKind::Float { lower, upper })
            }
            ValueType::Bool => {
                let valid_bounds = match self.bounds {
                    None => true,
                    Some((lower, upper)) => {
                        lower == Number::Int(0) && upper == Number::Int(1)
                    }
                };
                let valid_domain = match &self.domain {
                    None => true,
                    Some(values) => {
                        values.iter().sorted().dedup().copied().collect::<Vec<_>>() == [0, 1]
                    }
                };
                if !valid_bounds || !valid_domain {
                    return Err(invalid("boolean variables have the domain {0, 1}"));
                }
                if self.bounds.is_some() && self.domain.is_some() {
                    return Err(invalid("both bounds and a domain were given"));
                }
                Ok(VariableKind::Bool)
            }
        }
    }

    fn resolve_int_domain(&self, name: &str) -> Result<IntDomain, ModelError> {
        let invalid = |reason| ModelError::InvalidDomainSpecification {
            name: name.to_owned(),
            reason,
        };

        match (&self.bounds, &self.domain) {
            (Some(_), Some(_)) => Err(invalid("both bounds and a domain were given")),
            (None, None) => Err(invalid("either bounds or a domain is required")),
            (Some((Number::Int(lower), Number::Int(upper))), None) => {
                if lower > upper {
                    return Err(invalid("the lower bound exceeds the upper bound"));
                }
                Ok(IntDomain::Bounds {
                    lower: *lower,
                    upper: *upper,
                })
            }
            (Some(_), None) => Err(invalid("integer bounds are required")),
            (None, Some(values)) => {
                if values.is_empty() {
                    return Err(invalid("the domain is empty"));
                }
                Ok(IntDomain::Values(
                    values.iter().sorted().dedup().copied().collect(),
                ))
            }
        }
    }
}
