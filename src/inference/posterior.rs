//! The result of a conditional probability query ```P(Q | E = e)```.

use crate::factor::Factor;
use crate::util::{PearlError, Result};
use crate::variable::Variable;

use std::ops::Index;


/// A distribution over the domain of a single query `Variable`.
///
/// Probabilities are non-negative and sum to one. Degenerate outcomes (evidence of probability
/// zero, no accepted samples) are reported as errors instead of as a `Posterior`.
#[derive(Clone, Debug, PartialEq)]
pub struct Posterior {
    variable: Variable,
    probabilities: Vec<f64>,
}

impl Posterior {

    /// Normalize an unnormalized `Factor` over exactly ```[variable]```.
    ///
    /// # Errors
    /// * `PearlError::InvalidScope` if the scope of `factor` is not ```[variable]```
    /// * `PearlError::ZeroProbabilityEvidence` if every entry of `factor` is zero
    pub fn from_factor(variable: Variable, factor: &Factor) -> Result<Self> {
        if factor.scope() != [variable] {
            return Err(PearlError::InvalidScope(format!(
                "expected a factor over {} alone, found {} variables",
                variable,
                factor.scope().len()
            )));
        }

        let z = factor.total();
        if !(z > 0.0) {
            return Err(PearlError::ZeroProbabilityEvidence);
        }

        Ok(Posterior {
            variable,
            probabilities: factor.table().iter().map(|&v| v / z).collect(),
        })
    }

    /// Normalize a histogram of accepted samples.
    ///
    /// # Errors
    /// * `PearlError::NoAcceptedSamples` if every count is zero
    pub fn from_counts(variable: Variable, counts: &[u64], drawn: u64) -> Result<Self> {
        if counts.len() != variable.cardinality() {
            return Err(PearlError::InvalidScope(format!(
                "{} counts for {} with cardinality {}",
                counts.len(),
                variable,
                variable.cardinality()
            )));
        }

        let accepted: u64 = counts.iter().sum();
        if accepted == 0 {
            return Err(PearlError::NoAcceptedSamples { drawn });
        }

        Ok(Posterior {
            variable,
            probabilities: counts.iter().map(|&c| c as f64 / accepted as f64).collect(),
        })
    }

    /// The query `Variable`
    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// ```P(Q = value | E = e)```, `None` outside the domain
    pub fn probability(&self, value: usize) -> Option<f64> {
        self.probabilities.get(value).cloned()
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// ```(value, probability)``` pairs in domain order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.probabilities.iter().cloned().enumerate()
    }

    /// The most probable value; the lowest value wins ties
    pub fn most_likely(&self) -> usize {
        self.iter()
            .fold((0, f64::NEG_INFINITY), |best, (v, p)| if p > best.1 { (v, p) } else { best })
            .0
    }

    /// Mean over the domain of the squared difference to `other`
    ///
    /// # Errors
    /// * `PearlError::InvalidScope` if `other` is a distribution over a different `Variable`
    pub fn mean_squared_error(&self, other: &Posterior) -> Result<f64> {
        self.check_same_variable(other)?;

        let sse: f64 = self.probabilities
                           .iter()
                           .zip(other.probabilities.iter())
                           .map(|(p, q)| (p - q) * (p - q))
                           .sum();
        Ok(sse / self.probabilities.len() as f64)
    }

    /// Largest absolute difference to `other` over the domain
    pub fn max_abs_difference(&self, other: &Posterior) -> Result<f64> {
        self.check_same_variable(other)?;

        Ok(self.probabilities
               .iter()
               .zip(other.probabilities.iter())
               .map(|(p, q)| (p - q).abs())
               .fold(0.0, f64::max))
    }

    fn check_same_variable(&self, other: &Posterior) -> Result<()> {
        if self.variable != other.variable {
            return Err(PearlError::InvalidScope(format!(
                "cannot compare distributions over {} and {}",
                self.variable,
                other.variable
            )));
        }
        Ok(())
    }
}

impl Index<usize> for Posterior {
    type Output = f64;

    fn index(&self, value: usize) -> &f64 {
        &self.probabilities[value]
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn from_factor() {
        let a = Variable::discrete(3);
        let f = Factor::new(vec![a], array![1., 2., 1.].into_dyn()).unwrap();

        let p = Posterior::from_factor(a, &f).unwrap();
        assert_eq!(a, p.variable());
        assert_eq!(&[0.25, 0.5, 0.25], p.probabilities());
        assert_eq!(Some(0.5), p.probability(1));
        assert_eq!(None, p.probability(3));
        assert_eq!(0.25, p[2]);
        assert_eq!(1, p.most_likely());
    }

    #[test]
    fn from_factor_errors() {
        let a = Variable::binary();
        let b = Variable::binary();

        let zero = Factor::new(vec![a], array![0., 0.].into_dyn()).unwrap();
        match Posterior::from_factor(a, &zero) {
            Err(PearlError::ZeroProbabilityEvidence) => (),
            other => panic!("wrong result {:?}", other),
        };

        let wide = Factor::new(vec![a, b], array![[1., 0.], [0., 1.]].into_dyn()).unwrap();
        match Posterior::from_factor(a, &wide) {
            Err(PearlError::InvalidScope(_)) => (),
            other => panic!("wrong result {:?}", other),
        };
    }

    #[test]
    fn from_counts() {
        let a = Variable::discrete(4);

        let p = Posterior::from_counts(a, &[1, 0, 3, 0], 10).unwrap();
        assert_eq!(&[0.25, 0., 0.75, 0.], p.probabilities());

        match Posterior::from_counts(a, &[0, 0, 0, 0], 10) {
            Err(PearlError::NoAcceptedSamples { drawn: 10 }) => (),
            other => panic!("wrong result {:?}", other),
        };
    }

    #[test]
    fn errors_between_posteriors() {
        let a = Variable::binary();
        let p = Posterior::from_counts(a, &[1, 1], 2).unwrap();
        let q = Posterior::from_counts(a, &[3, 1], 4).unwrap();

        assert!((p.mean_squared_error(&q).unwrap() - 0.0625).abs() < 1e-12);
        assert!((p.max_abs_difference(&q).unwrap() - 0.25).abs() < 1e-12);
        assert_eq!(0.0, p.mean_squared_error(&p).unwrap());

        let other = Posterior::from_counts(Variable::binary(), &[1, 1], 2).unwrap();
        assert!(p.mean_squared_error(&other).is_err());
    }
}
