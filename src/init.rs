//! Module containing initialization routines for the parameters of a model.

use crate::factor::{Factor, Table, CPD_TOLERANCE};
use crate::util::{PearlError, Result};
use crate::variable::Variable;

use ndarray::{Array, Axis, IxDyn};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Defines possible ways to initialize a `Variable`s CPD.
pub enum Initialization<'a> {
    /// A uniform distribution over all possibilities
    Uniform,

    /// Randomly initialize the weights of the CPD.
    Random,

    /// Randomly initialize the weights of the CPD from a seeded generator.
    Seeded(u64),

    /// Initialize the CPD as a Binomial distribution with parameter ```p```.
    /// Note that this `Initialization` is valid only to a `Variable` with no parents.
    Binomial(f64),

    /// Initialize the CPD as a Multinomial distribution with parameters ```p_0, p_1...```.
    /// Note that this `Initialization` is valid only to a `Variable` with no parents.
    Multinomial(&'a [f64]),

    /// A flat list of probabilities. The outermost loop runs over the parent values in the order
    /// the parents are given, the innermost over the values of the `Variable`.
    Flat(&'a [f64]),

    /// User defined CPD
    Table(Factor)
}


impl<'a> Initialization<'a> {

    /// Construct a CPD, initialized based on ```self```
    ///
    /// # Args
    /// * `var`: the `Variable` the CPD is for
    /// * `parents`: the parents of `var`
    ///
    /// # Returns
    /// a `Factor` over ```parents ++ [var]```, or the user provided `Factor` (whose scope may be
    /// in any order).
    pub fn build_cpd(self, var: Variable, parents: &[Variable]) -> Result<Factor> {
        ///////////////////////////////////////////////////////////////////////////////
        // Trivial cases

        // if this is a user defined factor, it just needs to be verified and returned
        if let Initialization::Table(f) = self {
            let s = f.scope();
            if !(parents.iter().all(|v| s.contains(v)) && s.len() == parents.len() + 1 && s.contains(&var)) {
                return Err(PearlError::InvalidScope(format!("the table for {} does not cover its family", var)));
            }

            // every conditional distribution over var must be normalized
            let z = f.sum_out(&var)?;
            if z.table().iter().any(|&t| (t - 1.0).abs() > CPD_TOLERANCE) {
                return Err(PearlError::NotACpd(format!("the table for {} is not normalized", var)));
            }

            return Ok(f);
        }

        ///////////////////////////////////////////////////////////////////////////////
        // Check for errors
        match self {
            // A binomial distribution on a non-binary variable
            Initialization::Binomial(_) if var.cardinality() != 2 => {
                return Err(PearlError::InvalidInitialization);
            },

            // A multinomial distribution with an incorrect number of parameters
            Initialization::Multinomial(ps) if ps.len() != var.cardinality() => {
                return Err(PearlError::InvalidInitialization);
            },

            // A binomial/multinomial on a non-unit scope
            Initialization::Binomial(_) | Initialization::Multinomial(_) if !parents.is_empty() => {
                return Err(PearlError::InvalidInitialization);
            },

            _ => ()
        }

        ///////////////////////////////////////////////////////////////////////////////
        // now, build CPD
        let mut shape: Vec<usize> = parents.iter().map(|v| v.cardinality()).collect();
        shape.push(var.cardinality());
        let ax = Axis(shape.len() - 1);

        let tbl: Table = match self {
            Initialization::Uniform => {
                // normalizing constant is just the number of values of var
                let val = 1. / (var.cardinality() as f64);
                Array::from_elem(IxDyn(&shape), val)
            },
            Initialization::Random => {
                let tbl = Array::random(IxDyn(&shape), Uniform::new(1.0, 100.0));
                normalize_lanes(tbl, ax)
            },
            Initialization::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                let tbl = Array::random_using(IxDyn(&shape), Uniform::new(1.0, 100.0), &mut rng);
                normalize_lanes(tbl, ax)
            },
            Initialization::Binomial(p) => {
                Array::from_shape_vec(IxDyn(&shape), vec![p, 1.0 - p])
                    .map_err(|e| PearlError::Shape(e.to_string()))?
            },
            Initialization::Multinomial(ps) | Initialization::Flat(ps) => {
                let expected: usize = shape.iter().product();
                if ps.len() != expected {
                    return Err(PearlError::TableSizeMismatch {
                        variable: var.to_string(),
                        expected,
                        actual: ps.len(),
                    });
                }

                Array::from_shape_vec(IxDyn(&shape), ps.to_vec())
                    .map_err(|e| PearlError::Shape(e.to_string()))?
            },
            Initialization::Table(_) => unreachable!("user tables are returned above"),
        };

        Factor::cpd(var, parents.to_vec(), tbl)
    }
}


/// Scale every lane along `ax` to sum to one
fn normalize_lanes(mut tbl: Table, ax: Axis) -> Table {
    for mut lane in tbl.lanes_mut(ax) {
        let z = lane.sum();
        lane.mapv_inplace(|e| e / z);
    }
    tbl
}
