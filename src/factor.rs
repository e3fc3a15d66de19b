//! Definition of the factor module
//!
//! A `Factor` represents a relationship between some set of `Variable`s: a non-negative function
//! of a joint assignment to its scope. Conditional probability tables, intermediate results of
//! variable elimination and posteriors are all `Factor`s.
//!
//! # Representation
//! The table is a dense `ndarray` with one axis per scope `Variable`, in scope order. Tables are
//! kept in standard (row-major) layout, so the flat offset of an assignment is the mixed-radix
//! number formed by the assigned values with the last scope `Variable` as the fastest digit.

use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};

use itertools::Itertools;
use ndarray::{ArrayD, Axis, Dimension, IxDyn};
use rand::Rng;

/// Alias f64 ndarray::Array as Table
pub type Table = ArrayD<f64>;

/// Tolerance used when checking that each row of a CPD sums to one
pub const CPD_TOLERANCE: f64 = 1e-3;


#[derive(Clone, Debug, PartialEq)]
pub struct Factor {
    /// The scope of the `Factor`. Empty for a scalar `Factor`.
    scope: Vec<Variable>,

    /// The values of the `Factor` table, one axis per scope `Variable`
    table: Table,
}


impl Factor {

    /// The multiplicative identity: a scalar `Factor` with value 1
    pub fn identity() -> Self {
        Factor::scalar(1.0)
    }

    /// A `Factor` with empty scope and the given value
    pub fn scalar(value: f64) -> Self {
        Factor {
            scope: Vec::new(),
            table: Table::from_elem(IxDyn(&[]), value),
        }
    }

    /// Create a new `Factor`
    ///
    /// # Errors
    /// * `PearlError::DuplicateVariable` if a `Variable` appears twice in `scope`
    /// * `PearlError::Shape` if the table does not have one axis per scope `Variable`, with
    ///   matching lengths
    /// * `PearlError::NegativeProbability` if any value is negative (or NaN)
    pub fn new(scope: Vec<Variable>, table: Table) -> Result<Self> {
        if let Some(dup) = scope.iter().duplicates().next() {
            return Err(PearlError::DuplicateVariable(dup.to_string()));
        }

        if scope.len() != table.ndim() {
            return Err(PearlError::Shape(format!(
                "scope has {} variables but the table has {} dimensions",
                scope.len(),
                table.ndim()
            )));
        }

        for (v, &len) in scope.iter().zip(table.shape().iter()) {
            if v.cardinality() != len {
                return Err(PearlError::Shape(format!(
                    "{} has cardinality {} but its axis has length {}",
                    v,
                    v.cardinality(),
                    len
                )));
            }
        }

        // factors may not have negative values
        if table.iter().any(|&v| !(v >= 0.0)) {
            return Err(PearlError::NegativeProbability);
        }

        Ok(Factor { scope, table })
    }

    /// Create a conditional probability distribution ```P(var | parents)```.
    ///
    /// The table has one axis per parent, in the given order, followed by the axis of `var`. Each
    /// lane along the last axis must sum to one.
    pub fn cpd(var: Variable, parents: Vec<Variable>, table: Table) -> Result<Self> {
        let mut scope = parents;
        scope.push(var);

        let factor = Factor::new(scope, table)?;
        let ax = Axis(factor.table.ndim() - 1);
        if let Some(lane) = factor.table.lanes(ax).into_iter()
                                  .find(|lane| (lane.sum() - 1.0).abs() > CPD_TOLERANCE)
        {
            return Err(PearlError::NotACpd(format!(
                "a row of the table for {} sums to {}",
                var,
                lane.sum()
            )));
        }

        Ok(factor)
    }

    /// Retrieve the scope of the `Factor`.
    pub fn scope(&self) -> &[Variable] {
        &self.scope
    }

    /// Check if `var` is in the scope of this `Factor`
    pub fn contains(&self, var: &Variable) -> bool {
        self.scope.contains(var)
    }

    /// The underlying table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The number of entries in the table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The value of a scalar `Factor`, `None` if the scope is not empty
    pub fn scalar_value(&self) -> Option<f64> {
        if self.scope.is_empty() {
            self.table.iter().next().cloned()
        } else {
            None
        }
    }

    /// The sum of every entry in the table
    pub fn total(&self) -> f64 {
        self.table.sum()
    }

    /// Retrieve the value for a complete assignment over the scope of this `Factor`
    ///
    /// # Args
    /// * `assignment`: a full assignment to the scope of the `Factor`. The assignment's scope may
    ///   be a superset of the `Factor`s scope.
    ///
    /// # Errors
    /// * `PearlError::IncompleteAssignment`, if assignment is not a complete assignment to the
    ///   scope of the `Factor`
    /// * `PearlError::InvalidValue`, if an assigned value is outside a `Variable`'s domain
    pub fn value(&self, assignment: &Assignment) -> Result<f64> {
        let idx = self.scope.iter()
                            .map(|v| match assignment.get(v) {
                                Some(&val) => check_value(v, val),
                                None => Err(PearlError::IncompleteAssignment),
                            })
                            .collect::<Result<Vec<usize>>>()?;

        Ok(self.table[IxDyn(&idx)])
    }

    /// Product of this `Factor` and another `Factor`.
    ///
    /// Defined in Koller & Friedman Section 4.2.1
    ///
    /// # Returns
    /// A new `Factor` over union(self.scope(), other.scope()). The scope keeps the order of
    /// `self`, followed by the `Variable`s of `other` not already present. Disjoint scopes give the
    /// outer product.
    pub fn product(&self, other: &Self) -> Self {
        // We are computing a new factor Psi(X, Y, Z) = phi1(X, Y) * phi2(Y, Z).
        let mut scope = self.scope.clone();
        let rhs: Vec<usize> = other.scope
                                   .iter()
                                   .map(|v| match scope.iter().position(|u| u == v) {
                                       Some(i) => i,
                                       None => {
                                           scope.push(*v);
                                           scope.len() - 1
                                       }
                                   })
                                   .collect();

        let shape: Vec<usize> = scope.iter().map(|v| v.cardinality()).collect();
        let lhs_len = self.scope.len();
        let mut rhs_idx = vec![0; rhs.len()];

        // the left operand's axes are a prefix of the new table's axes
        let table = Table::from_shape_fn(IxDyn(&shape), |idx| {
            for (k, &axis) in rhs.iter().enumerate() {
                rhs_idx[k] = idx[axis];
            }

            self.table[IxDyn(&idx.slice()[..lhs_len])] * other.table[IxDyn(&rhs_idx)]
        });

        Factor { scope, table }
    }

    /// Restrict the `Factor` to ```var = value```.
    ///
    /// Defined in Koller & Friedman 4.2.3
    ///
    /// # Returns
    /// A new `Factor` over ```self.scope() - {var}```
    ///
    /// # Errors
    /// * `PearlError::InvalidScope` if `var` is not in the scope of the `Factor`
    /// * `PearlError::InvalidValue` if `value` is outside the domain of `var`
    pub fn restrict(&self, var: &Variable, value: usize) -> Result<Self> {
        if !self.contains(var) {
            return Err(PearlError::InvalidScope(format!("cannot restrict {} outside the scope", var)));
        }

        let mut assignment = Assignment::new();
        assignment.set(var, value);
        self.reduce(&assignment)
    }

    /// Reduce the `Factor` by the given partial assignment.
    ///
    /// `Variable`s of `assignment` outside the scope of the `Factor` are ignored.
    ///
    /// # Returns
    /// A new `Factor` over the scope minus the assigned `Variable`s
    pub fn reduce(&self, assignment: &Assignment) -> Result<Self> {
        let mut view = self.table.view();
        let mut scope = Vec::with_capacity(self.scope.len());
        let mut removed = 0;

        for (i, v) in self.scope.iter().enumerate() {
            if let Some(&val) = assignment.get(v) {
                let val = check_value(v, val)?;
                view = view.index_axis_move(Axis(i - removed), val);
                removed += 1;
            } else {
                scope.push(*v);
            }
        }

        Ok(Factor { scope, table: view.to_owned() })
    }

    /// Sum the `Factor` over the given `Variable`
    ///
    /// Defined in Koller & Friedman 9.3.1
    ///
    /// # Errors
    /// * `PearlError::InvalidScope` if `var` is not in the scope of the `Factor`
    pub fn sum_out(&self, var: &Variable) -> Result<Self> {
        let idx = self.scope
                      .iter()
                      .position(|v| v == var)
                      .ok_or_else(|| PearlError::InvalidScope(format!("cannot sum out {} outside the scope", var)))?;

        let mut scope = self.scope.clone();
        scope.remove(idx);

        Ok(Factor { scope, table: self.table.sum_axis(Axis(idx)) })
    }

    /// Normalize the values of the `Factor` so they sum to one.
    ///
    /// # Errors
    /// * `PearlError::DivideByZero` if every value of the `Factor` is zero
    pub fn normalize(&self) -> Result<Self> {
        let z = self.total();
        if z == 0.0 {
            return Err(PearlError::DivideByZero);
        }

        Ok(Factor { scope: self.scope.clone(), table: self.table.mapv(|v| v / z) })
    }

    /// Sample a value of `var` from this CPD given an assignment to the rest of its scope.
    ///
    /// The lane of `var` selected by the assignment is used as a (possibly unnormalized)
    /// distribution; the sample is the first value whose cumulative mass exceeds a uniform draw.
    ///
    /// # Errors
    /// * `PearlError::InvalidScope` if `var` is not in the scope of the `Factor`
    /// * `PearlError::IncompleteAssignment` if any other scope `Variable` is unassigned
    /// * `PearlError::NotACpd` if the selected lane has no mass
    pub fn sample_cpd<R: Rng + ?Sized>(
        &self,
        var: &Variable,
        assignment: &Assignment,
        rng: &mut R,
    ) -> Result<usize> {
        let pos = self.scope
                      .iter()
                      .position(|v| v == var)
                      .ok_or_else(|| PearlError::InvalidScope(format!("cannot sample {} outside the scope", var)))?;

        // slice every other axis away, leaving a view of the lane of var
        let mut lane = self.table.view();
        let mut removed = 0;
        for (i, v) in self.scope.iter().enumerate() {
            if i == pos {
                continue;
            }

            let val = match assignment.get(v) {
                Some(&val) => check_value(v, val)?,
                None => return Err(PearlError::IncompleteAssignment),
            };
            lane = lane.index_axis_move(Axis(i - removed), val);
            removed += 1;
        }

        let total = lane.sum();
        if !(total > 0.0) {
            return Err(PearlError::NotACpd(format!("no probability mass to sample {}", var)));
        }

        let u = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        let mut last = 0;
        for (k, &p) in lane.iter().enumerate() {
            if p > 0.0 {
                last = k;
            }
            cumulative += p;
            if u < cumulative {
                return Ok(k);
            }
        }

        // rounding left u just above the cumulative total
        Ok(last)
    }
}


fn check_value(var: &Variable, value: usize) -> Result<usize> {
    if value < var.cardinality() {
        Ok(value)
    } else {
        Err(PearlError::InvalidValue {
            variable: var.to_string(),
            value,
            cardinality: var.cardinality(),
        })
    }
}


// Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::all_assignments;

    use itertools::iproduct;
    use ndarray::{array, Array};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    const TOL: f64 = 1e-12;

    /// The product from Koller & Friedman Figure 4.3
    fn figure_4_3() -> (Variable, Variable, Variable, Factor) {
        let a = Variable::discrete(3);
        let b = Variable::binary();
        let c = Variable::binary();

        let table = Array::from_shape_vec(
            (3, 2, 2),
            vec![ 0.25, 0.35, 0.08, 0.16, 0.05, 0.07, 0., 0., 0.15, 0.21, 0.09, 0.18 ]
        ).expect("Unexpected error").into_dyn();

        let phi = Factor::new(vec![a, b, c], table).expect("Unexpected error");
        (a, b, c, phi)
    }

    fn assign(pairs: &[(Variable, usize)]) -> Assignment {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn table_factor() {
        let vars = vec![ Variable::binary(), Variable::discrete(5), Variable::discrete(3) ];
        let mut table = Table::ones(vec![2, 5, 3]);
        table[IxDyn(&[1, 1, 1])] = 5.;

        let f = Factor::new(vars.clone(), table).unwrap();

        for (x, y, z) in iproduct!(0..2, 0..5, 0..3) {
            let val = f.value(&assign(&[(vars[0], x), (vars[1], y), (vars[2], z)])).unwrap();
            if x == 1 && y == 1 && z == 1 {
                assert_eq!(5., val);
            } else {
                assert_eq!(1., val);
            }
        }
        assert_eq!(30, f.len());
        assert_eq!(None, f.scalar_value());
    }

    #[test]
    fn table_factor_errs() {
        // mismatched number of dimensions
        let vars = vec![ Variable::binary(), Variable::binary() ];
        match Factor::new(vars.clone(), Table::ones(vec![2, 2, 2])) {
            Err(PearlError::Shape(_)) => (),
            other => panic!("wrong result {:?}", other),
        };

        // wrong cardinality
        match Factor::new(vars.clone(), Table::ones(vec![2, 3])) {
            Err(PearlError::Shape(_)) => (),
            other => panic!("wrong result {:?}", other),
        };

        // negative entry
        let table = array![[1., -1.], [0., 1.]].into_dyn();
        match Factor::new(vars.clone(), table) {
            Err(PearlError::NegativeProbability) => (),
            other => panic!("wrong result {:?}", other),
        };

        // repeated variable
        match Factor::new(vec![vars[0], vars[0]], Table::ones(vec![2, 2])) {
            Err(PearlError::DuplicateVariable(_)) => (),
            other => panic!("wrong result {:?}", other),
        };
    }

    #[test]
    fn cpd() {
        let a = Variable::binary();
        let b = Variable::binary();

        let f = Factor::cpd(b, vec![a], array![[0.95, 0.05], [0.2, 0.8]].into_dyn()).unwrap();
        assert_eq!(&[a, b], f.scope());

        // rows must be normalized, not the whole table
        let err = Factor::cpd(b, vec![a], (Table::ones(vec![2, 2]) / 4.).into_dyn());
        match err {
            Err(PearlError::NotACpd(_)) => (),
            other => panic!("wrong result {:?}", other),
        };
    }

    #[test]
    fn value() {
        let a = Variable::binary();
        let b = Variable::binary();
        let f = Factor::new(vec![a, b], array![[0., 1.], [2., 3.]].into_dyn()).unwrap();

        for (i, (x, y)) in iproduct!(0..2, 0..2).enumerate() {
            assert_eq!(i as f64, f.value(&assign(&[(a, x), (b, y)])).unwrap());
        }

        // out of scope values are ignored
        let c = Variable::binary();
        assert_eq!(3., f.value(&assign(&[(c, 0), (a, 1), (b, 1)])).unwrap());

        match f.value(&assign(&[(a, 0), (c, 0)])) {
            Err(PearlError::IncompleteAssignment) => (),
            other => panic!("incorrect result {:?}", other),
        };

        match f.value(&assign(&[(a, 0), (b, 2)])) {
            Err(PearlError::InvalidValue { value: 2, .. }) => (),
            other => panic!("incorrect result {:?}", other),
        };
    }

    #[test]
    /// Example taken from Koller & Friedman Figure 4.3
    fn product() {
        let a = Variable::discrete(3);
        let b = Variable::binary();
        let c = Variable::binary();

        let tbl1 = Array::from_shape_vec((3, 2), vec![ 0.5, 0.8, 0.1, 0., 0.3, 0.9 ]).unwrap().into_dyn();
        let phi1 = Factor::new(vec![ a, b ], tbl1).unwrap();

        let tbl2 = Array::from_shape_vec((2, 2), vec![ 0.5, 0.7, 0.1, 0.2 ]).unwrap().into_dyn();
        let phi2 = Factor::new(vec![ b, c ], tbl2).unwrap();

        let phi = phi1.product(&phi2);
        assert_eq!(&[a, b, c], phi.scope());

        let (_, _, _, expected) = figure_4_3();
        for (x, y, z) in iproduct!(0..3, 0..2, 0..2) {
            let expected = expected.table()[IxDyn(&[x, y, z])];
            let actual = phi.value(&assign(&[(a, x), (b, y), (c, z)])).unwrap();
            assert!((expected - actual).abs() < TOL);
        }
    }

    #[test]
    fn product_scope_order() {
        let a = Variable::binary();
        let b = Variable::discrete(3);
        let c = Variable::binary();

        let phi1 = Factor::new(vec![ b, a ], Table::ones(vec![3, 2])).unwrap();
        let phi2 = Factor::new(vec![ c, a ], Table::ones(vec![2, 2])).unwrap();

        // first-seen order: the left scope, then the new right variables
        assert_eq!(&[b, a, c], phi1.product(&phi2).scope());
        assert_eq!(&[c, a, b], phi2.product(&phi1).scope());
    }

    #[test]
    fn product_disjoint_and_identity() {
        let a = Variable::binary();
        let b = Variable::discrete(3);

        let phi1 = Factor::new(vec![a], array![0.25, 0.75].into_dyn()).unwrap();
        let phi2 = Factor::new(vec![b], array![1., 2., 3.].into_dyn()).unwrap();

        let outer = phi1.product(&phi2);
        assert_eq!(&[a, b], outer.scope());
        assert!((outer.value(&assign(&[(a, 1), (b, 2)])).unwrap() - 2.25).abs() < TOL);

        assert_eq!(phi1, phi1.product(&Factor::identity()));
        assert_eq!(phi1, Factor::identity().product(&phi1));

        let scaled = Factor::scalar(2.).product(&phi1);
        assert_eq!(&[a], scaled.scope());
        assert!((scaled.value(&assign(&[(a, 0)])).unwrap() - 0.5).abs() < TOL);

        assert_eq!(Some(6.), Factor::scalar(2.).product(&Factor::scalar(3.)).scalar_value());
    }

    #[test]
    /// Example take from Koller & Friedman Figure 4.5
    fn restrict() {
        let (a, b, c, phi) = figure_4_3();

        let expected = array![[0.25, 0.08], [0.05, 0.], [0.15, 0.09]];

        let reduced = phi.restrict(&c, 0).unwrap();
        assert_eq!(&[a, b], reduced.scope());
        for (x, y) in iproduct!(0..3, 0..2) {
            assert_eq!(expected[[x, y]], reduced.value(&assign(&[(a, x), (b, y)])).unwrap());
        }
    }

    #[test]
    fn restrict_errs() {
        let (_, b, _, phi) = figure_4_3();
        let d = Variable::binary();

        match phi.restrict(&d, 0) {
            Err(PearlError::InvalidScope(_)) => (),
            other => panic!("wrong result {:?}", other),
        };

        match phi.restrict(&b, 2) {
            Err(PearlError::InvalidValue { .. }) => (),
            other => panic!("wrong result {:?}", other),
        };
    }

    #[test]
    fn reduce_empty() {
        let (_, _, _, phi) = figure_4_3();
        let d = Variable::binary();

        let reduced = phi.reduce(&assign(&[(d, 1)])).unwrap();
        assert_eq!(phi, reduced);
    }

    #[test]
    fn reduce_full() {
        let (a, b, c, phi) = figure_4_3();

        let reduced = phi.reduce(&assign(&[(a, 2), (b, 0), (c, 1)])).unwrap();
        assert!(reduced.scope().is_empty());
        assert_eq!(Some(0.21), reduced.scalar_value());
    }

    #[test]
    fn reduce_multiple() {
        let (a, b, c, phi) = figure_4_3();

        let reduced = phi.reduce(&assign(&[(c, 0), (a, 2)])).unwrap();
        assert_eq!(&[b], reduced.scope());
        assert_eq!(0.15, reduced.value(&assign(&[(b, 0)])).unwrap());
        assert_eq!(0.09, reduced.value(&assign(&[(b, 1)])).unwrap());
    }

    #[test]
    /// Example taken from Koller & Friedman Figure 9.7
    fn sum_out() {
        let (a, b, c, phi) = figure_4_3();

        let marginalized = phi.sum_out(&b).unwrap();
        assert_eq!(&[a, c], marginalized.scope());

        let expected = array![[0.33, 0.51], [0.05, 0.07], [0.24, 0.39]];
        for (x, y) in iproduct!(0..3, 0..2) {
            let actual = marginalized.value(&assign(&[(a, x), (c, y)])).unwrap();
            assert!((expected[[x, y]] - actual).abs() < TOL);
        }

        match marginalized.sum_out(&b) {
            Err(PearlError::InvalidScope(_)) => (),
            other => panic!("wrong result {:?}", other),
        };
    }

    #[test]
    fn sum_out_matches_enumeration() {
        let a = Variable::discrete(3);
        let b = Variable::binary();
        let c = Variable::discrete(4);

        let f = Factor::new(
            vec![a, b],
            Array::from_shape_fn((3, 2), |(i, j)| (i * 2 + j) as f64 + 0.5).into_dyn()
        ).unwrap();
        let g = Factor::new(
            vec![c, b],
            Array::from_shape_fn((4, 2), |(i, j)| 1.0 / ((i + 1) * (j + 2)) as f64).into_dyn()
        ).unwrap();

        let psi = f.product(&g);
        let scalar = psi.sum_out(&a).and_then(|p| p.sum_out(&c)).and_then(|p| p.sum_out(&b)).unwrap();

        let scope = [a, b, c];
        let enumerated: f64 = all_assignments(&scope)
            .map(|x| f.value(&x).unwrap() * g.value(&x).unwrap())
            .sum();

        assert!((scalar.scalar_value().unwrap() - enumerated).abs() < 1e-9);
        assert!((psi.total() - enumerated).abs() < 1e-9);
    }

    #[test]
    fn normalize() {
        let a = Variable::binary();
        let f = Factor::new(vec![a], array![1., 3.].into_dyn()).unwrap();

        let n = f.normalize().unwrap();
        assert_eq!(0.25, n.value(&assign(&[(a, 0)])).unwrap());
        assert_eq!(0.75, n.value(&assign(&[(a, 1)])).unwrap());

        let zero = Factor::new(vec![a], array![0., 0.].into_dyn()).unwrap();
        match zero.normalize() {
            Err(PearlError::DivideByZero) => (),
            other => panic!("wrong result {:?}", other),
        };
    }

    #[test]
    fn sample_cpd() {
        let a = Variable::binary();
        let b = Variable::discrete(3);
        let f = Factor::cpd(b, vec![a], array![[0., 1., 0.], [0.5, 0., 0.5]].into_dyn()).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(1, f.sample_cpd(&b, &assign(&[(a, 0)]), &mut rng).unwrap());
            assert_ne!(1, f.sample_cpd(&b, &assign(&[(a, 1)]), &mut rng).unwrap());
        }

        let mut counts = [0usize; 3];
        for _ in 0..4000 {
            counts[f.sample_cpd(&b, &assign(&[(a, 1)]), &mut rng).unwrap()] += 1;
        }
        assert!((counts[0] as f64 / 4000. - 0.5).abs() < 0.05);

        match f.sample_cpd(&b, &Assignment::new(), &mut rng) {
            Err(PearlError::IncompleteAssignment) => (),
            other => panic!("wrong result {:?}", other),
        };
    }

    /// Always produces the largest possible word, so every uniform draw is just below one
    struct MaxRng;

    impl RngCore for MaxRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for b in dest.iter_mut() {
                *b = u8::MAX;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn sample_cpd_top_of_range() {
        let a = Variable::binary();
        let b = Variable::discrete(4);

        // trailing values without mass are never drawn, even at the very top of the range
        let f = Factor::cpd(
            b,
            vec![a],
            array![[0.1, 0.2, 0.7, 0.], [0.5, 0., 0.5, 0.]].into_dyn()
        ).unwrap();

        let mut rng = MaxRng;
        assert_eq!(2, f.sample_cpd(&b, &assign(&[(a, 0)]), &mut rng).unwrap());
        assert_eq!(2, f.sample_cpd(&b, &assign(&[(a, 1)]), &mut rng).unwrap());

        // unnormalized lanes behave the same way
        let g = Factor::new(vec![b], array![3., 0., 1e-9, 0.].into_dyn()).unwrap();
        assert_eq!(2, g.sample_cpd(&b, &Assignment::new(), &mut rng).unwrap());
    }
}
