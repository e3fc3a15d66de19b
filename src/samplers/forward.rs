//! Defines a simple forward sampler for Bayesian `Model`s
//!
//! Implementation of Koller & Friedman Algorithm 12.1 (pp 489)

use crate::model::DirectedModel;
use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};

use rand::Rng;

/// A simple, stateless sampler for Bayesian Models. The random number generator is supplied on
/// every call so that independent streams can share one sampler.
pub struct ForwardSampler<'a> {

    /// The `DirectedModel` to sample
    model: &'a DirectedModel
}


impl<'a> ForwardSampler<'a> {

    pub fn new(model: &'a DirectedModel) -> Self {
        ForwardSampler { model }
    }

    /// Draw a full `Assignment` from the joint distribution of the model.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Assignment> {
        let mut a = Assignment::new();

        for var in self.model.variables_in_order() {
            // we iterate in topological order so every parent is already assigned
            let value = self.draw(var, &a, rng)?;
            a.set(var, value);
        }

        Ok(a)
    }

    /// Draw a full `Assignment` and keep it only if it agrees with `evidence`.
    ///
    /// Sampling stops at the first observed `Variable` whose drawn value disagrees, which
    /// rejects exactly the samples a complete draw would reject.
    pub fn sample_consistent<R: Rng + ?Sized>(
        &self,
        evidence: &Assignment,
        rng: &mut R,
    ) -> Result<Option<Assignment>> {
        let mut a = Assignment::new();

        for var in self.model.variables_in_order() {
            let value = self.draw(var, &a, rng)?;
            if let Some(&observed) = evidence.get(var) {
                if observed != value {
                    return Ok(None);
                }
            }
            a.set(var, value);
        }

        Ok(Some(a))
    }

    fn draw<R: Rng + ?Sized>(
        &self,
        var: &Variable,
        partial: &Assignment,
        rng: &mut R,
    ) -> Result<usize> {
        let cpd = self.model
                      .cpd(var)
                      .ok_or_else(|| PearlError::MissingCpd(self.model.name(var)))?;
        cpd.sample_cpd(var, partial, rng)
    }
}
