use std::fmt::Debug;
use std::hash::Hash;

use itertools::Itertools;

use super::Variable;
use crate::basic_types::sanitize_identifier;
use crate::basic_types::HashMap;
use crate::error::ModelError;
use crate::expressions;
use crate::expressions::BoolExpression;
use crate::expressions::Expression;

/// A value which can be used to index an [`IndexedVariables`] collection.
///
/// The components of an index become part of the name of the variable created for it; e.g. the
/// index `(0, 1)` under the base name `bin_item` gives the variable `bin_item_0_1`.
pub trait IndexKey: Clone + Debug + Eq + Hash {
    /// Appends the textual components of this index.
    fn components(&self, components: &mut Vec<String>);
}

macro_rules! impl_index_key_for_display {
    ($($type:ty),*) => {
        $(
            impl IndexKey for $type {
                fn components(&self, components: &mut Vec<String>) {
                    components.push(self.to_string());
                }
            }
        )*
    };
}

impl_index_key_for_display!(i32, i64, u32, u64, usize, char, String, &str);

macro_rules! impl_index_key_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: IndexKey),+> IndexKey for ($($name,)+) {
            #[allow(non_snake_case, reason = "the type parameters name the tuple fields")]
            fn components(&self, components: &mut Vec<String>) {
                let ($($name,)+) = self;
                $($name.components(components);)+
            }
        }
    };
}

impl_index_key_for_tuple!(A);
impl_index_key_for_tuple!(A, B);
impl_index_key_for_tuple!(A, B, C);
impl_index_key_for_tuple!(A, B, C, D);

impl<T: IndexKey, const N: usize> IndexKey for [T; N] {
    fn components(&self, components: &mut Vec<String>) {
        self.iter().for_each(|element| element.components(components));
    }
}

/// The name of the variable created for `index` under `base`.
pub(crate) fn indexed_name(base: &str, index: &impl IndexKey) -> String {
    let mut components = vec![base.to_owned()];
    index.components(&mut components);
    sanitize_identifier(&components.iter().join("_"))
}

/// An ordered collection of variables keyed by an index.
///
/// Iteration yields the variables in the order in which they were created.
#[derive(Clone, Debug)]
pub struct IndexedVariables<Index> {
    entries: Vec<(Index, Variable)>,
    positions: HashMap<Index, usize>,
}

impl<Index> Default for IndexedVariables<Index> {
    fn default() -> Self {
        IndexedVariables {
            entries: Vec::new(),
            positions: HashMap::default(),
        }
    }
}

impl<Index: IndexKey> IndexedVariables<Index> {
    /// Inserts `variable` under `index`, replacing an existing entry in place.
    pub(crate) fn insert(&mut self, index: Index, variable: Variable) {
        if let Some(&position) = self.positions.get(&index) {
            self.entries[position].1 = variable;
        } else {
            let _ = self.positions.insert(index.clone(), self.entries.len());
            self.entries.push((index, variable));
        }
    }

    pub fn get(&self, index: &Index) -> Option<&Variable> {
        self.positions
            .get(index)
            .map(|&position| &self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.entries.iter().map(|(_, variable)| variable)
    }

    pub fn indices(&self) -> impl Iterator<Item = &Index> + '_ {
        self.entries.iter().map(|(index, _)| index)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Index, &Variable)> + '_ {
        self.entries.iter().map(|(index, variable)| (index, variable))
    }

    /// References to all variables, in creation order.
    pub fn expressions(&self) -> Vec<Expression> {
        self.iter().map(Variable::expression).collect()
    }

    /// The union of both collections; entries of `other` replace entries of `self` with the
    /// same index.
    pub fn merge(mut self, other: IndexedVariables<Index>) -> IndexedVariables<Index> {
        for (index, variable) in other.entries {
            self.insert(index, variable);
        }
        self
    }

    fn broadcast(
        &self,
        rhs: impl Into<Expression>,
        compare: fn(Expression, Expression) -> Result<BoolExpression, ModelError>,
    ) -> Result<Vec<BoolExpression>, ModelError> {
        let rhs = rhs.into();
        self.iter()
            .map(|variable| compare(variable.expression(), rhs.clone()))
            .collect()
    }

    /// `(v = rhs)` for every variable `v` in the collection.
    pub fn equals(&self, rhs: impl Into<Expression>) -> Result<Vec<BoolExpression>, ModelError> {
        self.broadcast(rhs, |lhs, rhs| expressions::equals(lhs, rhs))
    }

    /// `(v != rhs)` for every variable `v` in the collection.
    pub fn not_equals(
        &self,
        rhs: impl Into<Expression>,
    ) -> Result<Vec<BoolExpression>, ModelError> {
        self.broadcast(rhs, |lhs, rhs| expressions::not_equals(lhs, rhs))
    }

    /// `(v < rhs)` for every variable `v` in the collection.
    pub fn less_than(
        &self,
        rhs: impl Into<Expression>,
    ) -> Result<Vec<BoolExpression>, ModelError> {
        self.broadcast(rhs, |lhs, rhs| expressions::less_than(lhs, rhs))
    }

    /// `(v <= rhs)` for every variable `v` in the collection.
    pub fn less_than_or_equals(
        &self,
        rhs: impl Into<Expression>,
    ) -> Result<Vec<BoolExpression>, ModelError> {
        self.broadcast(rhs, |lhs, rhs| expressions::less_than_or_equals(lhs, rhs))
    }

    /// `(v > rhs)` for every variable `v` in the collection.
    pub fn greater_than(
        &self,
        rhs: impl Into<Expression>,
    ) -> Result<Vec<BoolExpression>, ModelError> {
        self.broadcast(rhs, |lhs, rhs| expressions::greater_than(lhs, rhs))
    }

    /// `(v >= rhs)` for every variable `v` in the collection.
    pub fn greater_than_or_equals(
        &self,
        rhs: impl Into<Expression>,
    ) -> Result<Vec<BoolExpression>, ModelError> {
        self.broadcast(rhs, |lhs, rhs| {
            expressions::greater_than_or_equals(lhs, rhs)
        })
    }
}

impl<Index: IndexKey> std::ops::Index<&Index> for IndexedVariables<Index> {
    type Output = Variable;

    fn index(&self, index: &Index) -> &Variable {
        match self.get(index) {
            Some(variable) => variable,
            None => panic!("no variable with index {index:?}"),
        }
    }
}

impl<'a, Index> IntoIterator for &'a IndexedVariables<Index> {
    type Item = &'a Variable;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (Index, Variable)>,
        fn(&'a (Index, Variable)) -> &'a Variable,
    >;

    fn into_iter(self) -> Self::IntoIter {
        let variable: fn(&'a (Index, Variable)) -> &'a Variable = |(_, variable)| variable;
        self.entries.iter().map(variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::VariableDefinition;

    fn collection(base: &str, indices: &[(i32, i32)]) -> IndexedVariables<(i32, i32)> {
        let mut collection = IndexedVariables::default();
        for index in indices {
            let name = indexed_name(base, index);
            let kind = VariableDefinition::int()
                .with_bounds(0, 9)
                .resolve(&name)
                .unwrap();
            collection.insert(*index, Variable::new(name.into(), kind));
        }
        collection
    }

    #[test]
    fn names_are_sanitized_identifiers() {
        assert_eq!("q_3", indexed_name("q", &3));
        assert_eq!("bin_item_0_1", indexed_name("bin_item", &(0, 1)));
        assert_eq!("x__1_a_b", indexed_name("x", &(-1, "a b")));
        assert_eq!("grid_1_2_3", indexed_name("grid", &[1, 2, 3]));
    }

    #[test]
    fn iteration_follows_creation_order() {
        let collection = collection("bin_item", &[(1, 0), (0, 0), (0, 1)]);

        let names = collection.iter().map(Variable::name).collect::<Vec<_>>();
        assert_eq!(vec!["bin_item_1_0", "bin_item_0_0", "bin_item_0_1"], names);
        assert_eq!("bin_item_0_1", collection[&(0, 1)].name());
        assert!(collection.get(&(2, 2)).is_none());
    }

    #[test]
    fn merge_prefers_the_right_hand_side() {
        let left = collection("a", &[(0, 0), (0, 1)]);
        let right = collection("b", &[(0, 1), (1, 1)]);

        let merged = left.merge(right);

        let names = merged.iter().map(Variable::name).collect::<Vec<_>>();
        assert_eq!(vec!["a_0_0", "b_0_1", "b_1_1"], names);
    }

    #[test]
    fn comparisons_are_broadcast() {
        let collection = collection("x", &[(0, 0), (0, 1)]);

        let conditions = collection
            .greater_than(2)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        assert_eq!(vec!["(x_0_0 > 2)", "(x_0_1 > 2)"], conditions);
        assert!(collection.equals(Expression::int_set([1])).is_err());
    }
}
