//! Defines a `ConditionalInferenceEngine` that approximates conditional queries by rejection
//! sampling: forward samples disagreeing with the evidence are discarded and the query
//! `Variable` is counted over the rest (Koller & Friedman 12.1.2).

use crate::model::DirectedModel;
use crate::samplers::ForwardSampler;
use crate::util::Result;
use crate::variable::{Assignment, Variable};
use super::ConditionalInferenceEngine;
use super::posterior::Posterior;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;


/// The histogram of the query `Variable` over the accepted samples of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleCounts {
    /// The query `Variable`
    pub variable: Variable,

    /// Accepted samples per value of the query `Variable`
    pub counts: Vec<u64>,

    /// Total number of forward samples drawn, accepted or not
    pub drawn: u64,
}

impl SampleCounts {

    pub fn accepted(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Fraction of the drawn samples that agreed with the evidence
    pub fn acceptance_rate(&self) -> f64 {
        if self.drawn == 0 {
            0.0
        } else {
            self.accepted() as f64 / self.drawn as f64
        }
    }

    /// Normalize the counts.
    ///
    /// # Errors
    /// * `PearlError::NoAcceptedSamples` if no sample agreed with the evidence
    pub fn into_posterior(self) -> Result<Posterior> {
        Posterior::from_counts(self.variable, &self.counts, self.drawn)
    }
}


/// Draw `n_samples` forward samples and count the query value of those agreeing with `evidence`.
///
/// # Errors
/// * `PearlError::UnknownVariable`, `PearlError::QueryInEvidence`, `PearlError::InvalidValue` if
///   the query is malformed
pub fn rejection_counts<R: Rng + ?Sized>(
    model: &DirectedModel,
    query: &Variable,
    evidence: &Assignment,
    n_samples: u64,
    rng: &mut R,
) -> Result<SampleCounts> {
    model.check_query(query, evidence)?;

    let sampler = ForwardSampler::new(model);
    let mut counts = vec![0u64; query.cardinality()];

    for _ in 0..n_samples {
        if let Some(sample) = sampler.sample_consistent(evidence, rng)? {
            if let Some(&value) = sample.get(query) {
                counts[value] += 1;
            }
        }
    }

    let counts = SampleCounts { variable: *query, counts, drawn: n_samples };
    debug!(
        query = %model.name(query),
        drawn = counts.drawn,
        accepted = counts.accepted(),
        "rejection sampling finished"
    );

    Ok(counts)
}


/// Approximate ```P(query | evidence)``` from `n_samples` forward samples.
///
/// # Errors
/// * `PearlError::UnknownVariable`, `PearlError::QueryInEvidence`, `PearlError::InvalidValue` if
///   the query is malformed
/// * `PearlError::NoAcceptedSamples` if no sample agreed with the evidence, including when
///   `n_samples` is zero
pub fn rejection_sampling<R: Rng + ?Sized>(
    model: &DirectedModel,
    query: &Variable,
    evidence: &Assignment,
    n_samples: u64,
    rng: &mut R,
) -> Result<Posterior> {
    rejection_counts(model, query, evidence, n_samples, rng)?.into_posterior()
}


/// A `ConditionalInferenceEngine` answering every query with a fixed number of forward samples.
/// The engine owns its random number generator, so consecutive queries draw fresh samples.
pub struct RejectionSamplingEngine<'a, R: Rng> {

    /// The `DirectedModel` to sample
    model: &'a DirectedModel,

    /// Forward samples drawn per query
    n_samples: u64,

    rng: R,

}

impl<'a, R: Rng> RejectionSamplingEngine<'a, R> {

    pub fn new(model: &'a DirectedModel, n_samples: u64, rng: R) -> Self {
        RejectionSamplingEngine { model, n_samples, rng }
    }

    pub fn n_samples(&self) -> u64 {
        self.n_samples
    }

    /// Run a query and return the raw counts instead of the normalized `Posterior`
    pub fn counts(&mut self, query: &Variable, evidence: &Assignment) -> Result<SampleCounts> {
        rejection_counts(self.model, query, evidence, self.n_samples, &mut self.rng)
    }
}

impl<'a> RejectionSamplingEngine<'a, StdRng> {

    /// An engine whose samples are reproducible from `seed`
    pub fn seeded(model: &'a DirectedModel, n_samples: u64, seed: u64) -> Self {
        RejectionSamplingEngine::new(model, n_samples, StdRng::seed_from_u64(seed))
    }
}

impl<'a, R: Rng> ConditionalInferenceEngine for RejectionSamplingEngine<'a, R> {

    fn infer(&mut self, query: &Variable, evidence: &Assignment) -> Result<Posterior> {
        self.counts(query, evidence)?.into_posterior()
    }

}
