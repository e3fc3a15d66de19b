//! Compare approximate inference against exact inference over repeated, timed trials.

use crate::config::InferenceConfig;
use crate::inference::{evidence_probability, ConditionalInferenceEngine, EliminationOrder, Posterior,
                       RejectionSamplingEngine, VariableEliminationEngine};
use crate::model::DirectedModel;
use crate::sample_size::PacBound;
use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};

use tracing::info;

use std::fmt;
use std::time::{Duration, Instant};


/// Mean over the query domain of the squared difference between `approx` and `exact`
///
/// # Errors
/// * `PearlError::InvalidScope` if the two `Posterior`s are over different `Variable`s
pub fn mean_squared_error(approx: &Posterior, exact: &Posterior) -> Result<f64> {
    approx.mean_squared_error(exact)
}

/// Run `f`, returning its value and how long it took
pub fn timed<T, F: FnOnce() -> T>(f: F) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}


/// Aggregate of repeated trials of one inference method.
///
/// Degenerate trials (no accepted sample) are counted as failures and left out of the mean error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrialSummary {
    pub trials: usize,
    pub failures: usize,

    /// Mean squared error over the successful trials, `None` if every trial failed
    pub mean_error: Option<f64>,

    /// Mean time per trial, failed trials included
    pub mean_elapsed: Duration,

    error_sum: f64,
    elapsed_sum: Duration,
}

impl TrialSummary {

    pub fn new() -> Self {
        TrialSummary::default()
    }

    /// Record a trial: its error against the exact `Posterior`, or `None` if it failed
    pub fn record(&mut self, error: Option<f64>, elapsed: Duration) {
        self.trials += 1;
        self.elapsed_sum += elapsed;

        match error {
            Some(e) => self.error_sum += e,
            None => self.failures += 1,
        }

        let successes = self.trials - self.failures;
        self.mean_error = if successes > 0 { Some(self.error_sum / successes as f64) } else { None };
        self.mean_elapsed = self.elapsed_sum / self.trials as u32;
    }

    pub fn successes(&self) -> usize {
        self.trials - self.failures
    }
}


/// An inference method evaluated by an `Experiment`
#[derive(Clone, Debug, PartialEq)]
pub enum Method {
    /// Variable elimination with the given ordering strategy
    Exact(EliminationOrder),

    /// Rejection sampling with a fixed number of forward samples
    Sampling(u64),

    /// Rejection sampling with the number of forward samples derived from a `PacBound`
    Pac(u64),
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Method::Exact(EliminationOrder::Given(_)) => write!(f, "exact (given order)"),
            Method::Exact(EliminationOrder::ByName) => write!(f, "exact (by name)"),
            Method::Exact(EliminationOrder::MinWeight) => write!(f, "exact (min weight)"),
            Method::Exact(EliminationOrder::MaxCardinality) => write!(f, "exact (max cardinality)"),
            Method::Sampling(n) => write!(f, "rejection ({} samples)", n),
            Method::Pac(n) => write!(f, "rejection (PAC, {} samples)", n),
        }
    }
}


/// The outcome of one `Method` in an `Experiment`
#[derive(Clone, Debug, PartialEq)]
pub struct MethodSummary {
    pub method: Method,

    /// The result of the last successful trial
    pub posterior: Option<Posterior>,

    pub summary: TrialSummary,
}


/// Answers one query with exact and approximate methods and compares them.
///
/// The exact answer of the first ordering is the reference every method is measured against.
/// Sampling trial `t` is seeded with ```seed + t```, so an experiment is reproducible.
pub struct Experiment<'a> {
    model: &'a DirectedModel,
    query: Variable,
    evidence: Assignment,

    orders: Vec<EliminationOrder>,
    tiers: Vec<u64>,
    pac: Option<PacBound>,
    evidence_probability_floor: Option<f64>,
    trials: usize,
    seed: u64,
}

impl<'a> Experiment<'a> {

    pub fn new(model: &'a DirectedModel, query: Variable, evidence: Assignment) -> Self {
        Experiment::from_config(model, query, evidence, &InferenceConfig::default())
    }

    pub fn from_config(
        model: &'a DirectedModel,
        query: Variable,
        evidence: Assignment,
        config: &InferenceConfig,
    ) -> Self {
        Experiment {
            model,
            query,
            evidence,
            orders: vec![EliminationOrder::MinWeight],
            tiers: config.sample_tiers.clone(),
            pac: Some(config.pac),
            evidence_probability_floor: config.evidence_probability_floor,
            trials: config.trials,
            seed: config.seed,
        }
    }

    ///////////////////////////////////////////////////////////////////////////////
    // Builder methods

    pub fn with_orders(mut self, orders: Vec<EliminationOrder>) -> Self {
        self.orders = orders;
        self
    }

    pub fn with_tiers(mut self, tiers: Vec<u64>) -> Self {
        self.tiers = tiers;
        self
    }

    /// Size a final sampling tier by `pac`, or skip it with `None`
    pub fn with_pac(mut self, pac: Option<PacBound>) -> Self {
        self.pac = pac;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    ///////////////////////////////////////////////////////////////////////////////
    // Running

    /// Number of forward samples of the PAC tier, `None` if the experiment has no PAC tier
    pub fn pac_samples(&self) -> Result<Option<u64>> {
        let pac = match self.pac {
            Some(pac) => pac,
            None => return Ok(None),
        };

        let p = match self.evidence_probability_floor {
            Some(p) => p,
            None => evidence_probability(self.model, &self.evidence)?,
        };

        pac.samples_for_evidence(p).map(Some)
    }

    /// Run every method `trials` times.
    ///
    /// # Errors
    /// * any error of the exact query, e.g. `PearlError::ZeroProbabilityEvidence`
    /// * `PearlError::InvalidAccuracy` if the PAC tier cannot be sized
    pub fn run(&self) -> Result<Vec<MethodSummary>> {
        let orders = if self.orders.is_empty() { vec![EliminationOrder::default()] } else { self.orders.clone() };

        let reference = VariableEliminationEngine::new(self.model, orders[0].clone())
                            .infer(&self.query, &self.evidence)?;

        let mut results = Vec::with_capacity(orders.len() + self.tiers.len() + 1);

        for order in orders {
            let engine = |_: usize| VariableEliminationEngine::new(self.model, order.clone());
            let result = self.repeat(Method::Exact(order.clone()), &reference, engine)?;
            results.push(result);
        }

        let mut tiers: Vec<Method> = self.tiers.iter().map(|&n| Method::Sampling(n)).collect();
        if let Some(n) = self.pac_samples()? {
            tiers.push(Method::Pac(n));
        }

        for method in tiers {
            let n = match method {
                Method::Sampling(n) | Method::Pac(n) => n,
                Method::Exact(_) => continue,
            };

            let engine = |t: usize| RejectionSamplingEngine::seeded(self.model, n, self.seed.wrapping_add(t as u64));
            let result = self.repeat(method, &reference, engine)?;
            results.push(result);
        }

        Ok(results)
    }

    /// Time `trials` queries, each with a fresh engine for its trial number
    fn repeat<E, F>(&self, method: Method, reference: &Posterior, engine: F) -> Result<MethodSummary>
    where
        E: ConditionalInferenceEngine,
        F: Fn(usize) -> E,
    {
        let mut summary = TrialSummary::new();
        let mut posterior = None;

        for t in 0..self.trials {
            let mut engine = engine(t);
            let (result, elapsed) = timed(|| engine.infer(&self.query, &self.evidence));

            match result {
                Ok(p) => {
                    summary.record(Some(mean_squared_error(&p, reference)?), elapsed);
                    posterior = Some(p);
                },
                Err(PearlError::NoAcceptedSamples { .. }) => summary.record(None, elapsed),
                Err(e) => return Err(e),
            }
        }

        info!(
            method = %method,
            trials = summary.trials,
            failures = summary.failures,
            mean_error = ?summary.mean_error,
            mean_elapsed = ?summary.mean_elapsed,
            "trials finished"
        );

        Ok(MethodSummary { method, posterior, summary })
    }
}
