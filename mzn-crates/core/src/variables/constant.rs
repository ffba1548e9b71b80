use std::fmt::Display;
use std::fmt::Formatter;
use std::rc::Rc;

use itertools::Itertools;

use crate::error::ModelError;
use crate::expressions;
use crate::expressions::Expression;
use crate::expressions::Node;
use crate::expressions::ValueType;

/// A single constant value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    pub fn value_type(self) -> ValueType {
        match self {
            Scalar::Int(_) => ValueType::Int,
            Scalar::Float(_) => ValueType::Float,
            Scalar::Bool(_) => ValueType::Bool,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value:?}"),
            Scalar::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// The value of a constant: a scalar, or a (possibly nested) rectangular array of scalars.
///
/// Nested vectors and arrays convert directly:
/// ```rust
/// # use mzn_core::variables::ConstantValue;
/// let sizes = ConstantValue::from(vec![6, 6, 5, 4]);
/// let grid = ConstantValue::from([[1, 0], [0, 1]]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Scalar(Scalar),
    Array(Vec<ConstantValue>),
}

impl From<Scalar> for ConstantValue {
    fn from(value: Scalar) -> Self {
        ConstantValue::Scalar(value)
    }
}

impl From<i64> for ConstantValue {
    fn from(value: i64) -> Self {
        ConstantValue::Scalar(Scalar::Int(value))
    }
}

impl From<i32> for ConstantValue {
    fn from(value: i32) -> Self {
        ConstantValue::Scalar(Scalar::Int(value.into()))
    }
}

impl From<f64> for ConstantValue {
    fn from(value: f64) -> Self {
        ConstantValue::Scalar(Scalar::Float(value))
    }
}

impl From<bool> for ConstantValue {
    fn from(value: bool) -> Self {
        ConstantValue::Scalar(Scalar::Bool(value))
    }
}

impl<T: Into<ConstantValue>> From<Vec<T>> for ConstantValue {
    fn from(value: Vec<T>) -> Self {
        ConstantValue::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ConstantValue>, const N: usize> From<[T; N]> for ConstantValue {
    fn from(value: [T; N]) -> Self {
        ConstantValue::Array(value.into_iter().map(Into::into).collect())
    }
}

/// A named constant declared in a model.
#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    declaration: Rc<ConstantDeclaration>,
}

#[derive(Debug, PartialEq)]
struct ConstantDeclaration {
    name: Rc<str>,
    value_type: ValueType,
    /// Empty for scalars.
    dimensions: Vec<usize>,
    /// In row-major order.
    elements: Vec<Scalar>,
}

/// The extent of every dimension, following the first element at each level.
fn dimensions_of(value: &ConstantValue) -> Vec<usize> {
    let mut dimensions = Vec::new();
    let mut current = value;
    while let ConstantValue::Array(elements) = current {
        dimensions.push(elements.len());
        match elements.first() {
            Some(first) => current = first,
            None => break,
        }
    }
    dimensions
}

fn flatten(
    value: &ConstantValue,
    dimensions: &[usize],
    elements: &mut Vec<Scalar>,
) -> Result<(), &'static str> {
    match (value, dimensions.split_first()) {
        (ConstantValue::Scalar(scalar), None) => {
            elements.push(*scalar);
            Ok(())
        }
        (ConstantValue::Array(values), Some((&extent, rest))) if values.len() == extent => values
            .iter()
            .try_for_each(|value| flatten(value, rest, elements)),
        _ => Err("arrays must be rectangular"),
    }
}

impl Constant {
    pub(crate) fn new(name: Rc<str>, value: ConstantValue) -> Result<Constant, ModelError> {
        let invalid = |reason| ModelError::InvalidConstantValue {
            name: name.to_string(),
            reason,
        };

        let dimensions = dimensions_of(&value);
        if dimensions.contains(&0) {
            return Err(invalid("arrays must not be empty"));
        }

        let mut elements = Vec::new();
        flatten(&value, &dimensions, &mut elements).map_err(invalid)?;
        if elements
            .iter()
            .any(|element| matches!(element, Scalar::Float(value) if !value.is_finite()))
        {
            return Err(invalid("floats have to be finite"));
        }

        let kinds = elements
            .iter()
            .map(|element| element.value_type())
            .unique()
            .collect::<Vec<_>>();
        let value_type = match kinds[..] {
            [value_type] => value_type,
            _ if elements.iter().all(|element| !matches!(element, Scalar::Bool(_))) => {
                elements = elements
                    .into_iter()
                    .map(|element| match element {
                        Scalar::Int(value) => Scalar::Float(value as f64),
                        other => other,
                    })
                    .collect();
                ValueType::Float
            }
            _ => return Err(invalid("all elements must have the same kind")),
        };

        Ok(Constant {
            declaration: Rc::new(ConstantDeclaration {
                name,
                value_type,
                dimensions,
                elements,
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    /// The kind of the value, or of the elements of an array.
    pub fn value_type(&self) -> ValueType {
        self.declaration.value_type
    }

    /// The extent of every dimension; empty for a scalar constant.
    pub fn dimensions(&self) -> &[usize] {
        &self.declaration.dimensions
    }

    /// The host value at the zero-based `indices`.
    pub fn value_at(&self, indices: &[usize]) -> Option<Scalar> {
        self.flat_position(indices)
            .ok()
            .map(|position| self.declaration.elements[position])
    }

    /// A reference to a scalar constant.
    pub fn expression(&self) -> Result<Expression, ModelError> {
        if !self.declaration.dimensions.is_empty() {
            return Err(self.invalid_index("an array constant has to be indexed"));
        }
        Ok(Expression::identifier(
            Rc::clone(&self.declaration.name),
            self.declaration.value_type,
        ))
    }

    /// A reference to the element at the zero-based host `indices`, rendered with one-based
    /// indices: `at(&[2])` on `a` gives `a[3]`.
    pub fn at(&self, indices: &[usize]) -> Result<Expression, ModelError> {
        self.check_indexable()?;
        let _ = self.flat_position(indices)?;
        let indices = indices
            .iter()
            .map(|&index| Expression::int(index as i64 + 1))
            .collect();
        Ok(self.access(indices))
    }

    /// A reference to the element at the zero-based symbolic `indices`, rendered with
    /// one-based indices: indexing `a` by `i` gives `a[(i + 1)]`.
    pub fn index<I: Into<Expression>>(
        &self,
        indices: impl IntoIterator<Item = I>,
    ) -> Result<Expression, ModelError> {
        self.check_indexable()?;
        let indices = indices
            .into_iter()
            .map(|index| {
                let index = index.into();
                if !matches!(index.value_type(), ValueType::Int | ValueType::Bool) {
                    return Err(ModelError::InvalidOperandKind {
                        argument: "indices",
                        found: index.value_type(),
                    });
                }
                expressions::add(index, 1)
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.check_arity(indices.len())?;
        Ok(self.access(indices))
    }

    fn access(&self, indices: Vec<Expression>) -> Expression {
        Expression::new(
            self.declaration.value_type,
            Node::Access {
                array: Rc::clone(&self.declaration.name),
                indices,
            },
        )
    }

    fn check_indexable(&self) -> Result<(), ModelError> {
        if self.declaration.dimensions.is_empty() {
            return Err(self.invalid_index("a scalar constant cannot be indexed"));
        }
        Ok(())
    }

    fn check_arity(&self, count: usize) -> Result<(), ModelError> {
        let expected = self.declaration.dimensions.len();
        if count != expected {
            return Err(self.invalid_index(format!("expected {expected} indices, got {count}")));
        }
        Ok(())
    }

    fn flat_position(&self, indices: &[usize]) -> Result<usize, ModelError> {
        self.check_arity(indices.len())?;

        let mut position = 0;
        for (&index, &extent) in indices.iter().zip(&self.declaration.dimensions) {
            if index >= extent {
                return Err(self.invalid_index(format!(
                    "index {index} is out of bounds for a dimension of size {extent}"
                )));
            }
            position = position * extent + index;
        }
        Ok(position)
    }

    fn invalid_index(&self, reason: impl Into<String>) -> ModelError {
        ModelError::InvalidIndex {
            name: self.declaration.name.to_string(),
            reason: reason.into(),
        }
    }

    /// The declaration item of this constant.
    pub(crate) fn declaration(&self) -> String {
        let ConstantDeclaration {
            name,
            value_type,
            dimensions,
            elements,
        } = self.declaration.as_ref();

        if dimensions.is_empty() {
            return format!("{value_type}: {name} = {};", elements[0]);
        }

        let ranges = dimensions
            .iter()
            .map(|extent| format!("1..{extent}"))
            .join(", ");
        let values = format!("[{}]", elements.iter().join(", "));

        if dimensions.len() == 1 {
            format!("array[{ranges}] of {value_type}: {name} = {values};")
        } else {
            format!(
                "array[{ranges}] of {value_type}: {name} = array{}d({ranges}, {values});",
                dimensions.len()
            )
        }
    }
}
