//! Number of forward samples needed for rejection sampling to reach a given accuracy.
//!
//! Rejection sampling estimates ```P(Q = q | E = e)``` from the accepted samples only. By the
//! Hoeffding bound, ```ln(2 / delta) / (2 * epsilon^2)``` accepted samples give an absolute error
//! of at most `epsilon` with probability at least ```1 - delta``` (Koller & Friedman 12.1.2.2).
//! Samples are accepted at rate ```P(E = e)```, so the number of draws is scaled by a lower bound
//! on the probability of the evidence.

use crate::util::{PearlError, Result};

use serde::{Deserialize, Serialize};


/// Minimum number of forward samples so that, with probability at least ```1 - delta```, the
/// rejection sampling estimate is within `epsilon` of the exact posterior, given that the
/// evidence has probability at least `p_evidence`.
///
/// # Errors
/// * `PearlError::InvalidAccuracy` unless ```0 < epsilon < 1```, ```0 < delta < 1``` and
///   ```0 < p_evidence <= 1```, or if the bound does not fit in a `u64`
pub fn minimum_samples(epsilon: f64, delta: f64, p_evidence: f64) -> Result<u64> {
    check_accuracy(epsilon, delta)?;
    if !(p_evidence > 0.0 && p_evidence <= 1.0) {
        return Err(PearlError::InvalidAccuracy(format!(
            "evidence probability must be in (0, 1], found {}",
            p_evidence
        )));
    }

    let n = ((2.0 / delta).ln() / (2.0 * epsilon * epsilon * p_evidence)).ceil();
    if !n.is_finite() || n >= u64::MAX as f64 {
        return Err(PearlError::InvalidAccuracy(format!(
            "the bound needs more than {} samples (epsilon {}, delta {}, evidence probability {})",
            u64::MAX,
            epsilon,
            delta,
            p_evidence
        )));
    }

    Ok(n as u64)
}

fn check_accuracy(epsilon: f64, delta: f64) -> Result<()> {
    if !(epsilon > 0.0 && epsilon < 1.0) {
        return Err(PearlError::InvalidAccuracy(format!("epsilon must be in (0, 1), found {}", epsilon)));
    }
    if !(delta > 0.0 && delta < 1.0) {
        return Err(PearlError::InvalidAccuracy(format!("delta must be in (0, 1), found {}", delta)));
    }
    Ok(())
}


/// A Probably Approximately Correct accuracy target: error at most `epsilon` with probability at
/// least ```1 - delta```.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PacBound {
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    #[serde(default = "default_delta")]
    pub delta: f64,
}

fn default_epsilon() -> f64 {
    0.01
}

fn default_delta() -> f64 {
    0.05
}

impl Default for PacBound {
    fn default() -> Self {
        PacBound {
            epsilon: default_epsilon(),
            delta: default_delta(),
        }
    }
}

impl PacBound {

    pub fn new(epsilon: f64, delta: f64) -> Result<Self> {
        check_accuracy(epsilon, delta)?;
        Ok(PacBound { epsilon, delta })
    }

    /// Accepted samples needed to meet the bound
    pub fn hoeffding_samples(&self) -> Result<u64> {
        minimum_samples(self.epsilon, self.delta, 1.0)
    }

    /// Forward samples to draw when the evidence has probability at least `p_evidence`
    pub fn samples_for_evidence(&self, p_evidence: f64) -> Result<u64> {
        minimum_samples(self.epsilon, self.delta, p_evidence)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_values() {
        // ln(40) / (2 * 1e-4) = 18444.4
        assert_eq!(18445, minimum_samples(0.01, 0.05, 1.0).unwrap());
        assert_eq!(36889, minimum_samples(0.01, 0.05, 0.5).unwrap());
        // ln(20) / (2 * 0.01) = 149.8
        assert_eq!(150, minimum_samples(0.1, 0.1, 1.0).unwrap());
    }

    #[test]
    fn pac_bound() {
        let pac = PacBound::default();
        assert_eq!(0.01, pac.epsilon);
        assert_eq!(0.05, pac.delta);
        assert_eq!(18445, pac.hoeffding_samples().unwrap());
        assert_eq!(minimum_samples(0.01, 0.05, 0.25).unwrap(), pac.samples_for_evidence(0.25).unwrap());

        assert!(PacBound::new(0.0, 0.05).is_err());
        assert!(PacBound::new(0.1, 1.0).is_err());
    }

    #[test]
    fn pac_bound_from_json() {
        let pac: PacBound = serde_json::from_str(r#"{ "epsilon": 0.05 }"#).unwrap();
        assert_eq!(PacBound { epsilon: 0.05, delta: 0.05 }, pac);
    }

    #[test]
    fn invalid_accuracy() {
        for &(e, d, p) in &[(0.0, 0.05, 0.5), (1.0, 0.05, 0.5), (0.1, 0.0, 0.5), (0.1, 1.0, 0.5),
                            (0.1, 0.05, 0.0), (0.1, 0.05, 1.5), (f64::NAN, 0.05, 0.5), (0.1, 0.05, -0.1)] {
            match minimum_samples(e, d, p) {
                Err(PearlError::InvalidAccuracy(_)) => (),
                other => panic!("wrong result {:?} for {:?}", other, (e, d, p)),
            };
        }
    }

    #[test]
    fn unrepresentable_bound() {
        match minimum_samples(0.01, 0.05, 1e-300) {
            Err(PearlError::InvalidAccuracy(_)) => (),
            other => panic!("wrong result {:?}", other),
        };

        match PacBound::new(1e-10, 1e-10).unwrap().samples_for_evidence(f64::MIN_POSITIVE) {
            Err(PearlError::InvalidAccuracy(_)) => (),
            other => panic!("wrong result {:?}", other),
        };

        // large but representable
        assert!(minimum_samples(1e-6, 0.05, 1e-3).unwrap() > 1_000_000_000_000_000);
    }

    proptest! {
        #[test]
        fn monotone(e1 in 0.001f64..0.999, e2 in 0.001f64..0.999,
                    d1 in 0.001f64..0.999, d2 in 0.001f64..0.999,
                    p1 in 0.001f64..=1.0, p2 in 0.001f64..=1.0) {
            let (e_lo, e_hi) = if e1 <= e2 { (e1, e2) } else { (e2, e1) };
            let (d_lo, d_hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            let (p_lo, p_hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };

            // larger epsilon never needs more samples
            prop_assert!(minimum_samples(e_hi, d1, p1).unwrap() <= minimum_samples(e_lo, d1, p1).unwrap());
            // smaller delta never needs fewer
            prop_assert!(minimum_samples(e1, d_lo, p1).unwrap() >= minimum_samples(e1, d_hi, p1).unwrap());
            // more likely evidence never needs more
            prop_assert!(minimum_samples(e1, d1, p_hi).unwrap() <= minimum_samples(e1, d1, p_lo).unwrap());
        }
    }
}
