//! Definition of the variable module
//!
//! A `Variable` represents a discrete random variable in a Bayesian network. `Variable`s are
//! lightweight handles (an identifier and a cardinality); their names and value labels are owned
//! by the model that declares them.

use indexmap::IndexMap;
use itertools::Itertools;

use std::fmt;
use std::iter;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A discrete random variable with domain `0..cardinality`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    /// Process-unique identifier
    id: usize,

    /// The number of values in the domain
    cardinality: usize,
}

impl Variable {

    /// Construct a new binary `Variable`
    pub fn binary() -> Self {
        Variable::discrete(2)
    }

    /// Construct a new `Variable` taking the values `0..cardinality`
    ///
    /// # Panics
    /// if `cardinality` is zero
    pub fn discrete(cardinality: usize) -> Self {
        assert!(cardinality > 0, "a Variable requires a non-empty domain");
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Variable { id, cardinality }
    }

    /// The number of values this `Variable` can take
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// The domain of the `Variable`
    pub fn domain(&self) -> std::ops::Range<usize> {
        0..self.cardinality
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "X{}", self.id)
    }
}


/// A (partial) assignment of values to `Variable`s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    values: IndexMap<Variable, usize>,
}

impl Assignment {

    pub fn new() -> Self {
        Assignment { values: IndexMap::new() }
    }

    /// Assign `value` to `var`, replacing any previous value
    pub fn set(&mut self, var: &Variable, value: usize) {
        self.values.insert(*var, value);
    }

    pub fn get(&self, var: &Variable) -> Option<&usize> {
        self.values.get(var)
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.values.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The assigned `Variable`s, in assignment order
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &usize)> {
        self.values.iter()
    }

    /// Check that every value in `other` agrees with this `Assignment`
    pub fn agrees_with(&self, other: &Assignment) -> bool {
        other.iter().all(|(v, val)| self.get(v) == Some(val))
    }
}

impl iter::FromIterator<(Variable, usize)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Variable, usize)>>(iter: I) -> Self {
        Assignment { values: iter.into_iter().collect() }
    }
}


/// Enumerate every joint assignment to `scope`, with the last `Variable` changing fastest.
pub fn all_assignments(scope: &[Variable]) -> Box<dyn Iterator<Item = Assignment>> {
    if scope.is_empty() {
        return Box::new(iter::once(Assignment::new()));
    }

    let domains: Vec<_> = scope.iter().map(|v| v.domain()).collect();
    let scope = scope.to_vec();
    Box::new(
        domains.into_iter()
               .multi_cartesian_product()
               .map(move |vals| scope.iter().cloned().zip(vals).collect())
    )
}
