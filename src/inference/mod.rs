//! Defines the interface to inference engines

use crate::util::Result;
use crate::variable::{Assignment, Variable};

pub mod ordering;
pub mod posterior;
pub mod rejection_sampling;
pub mod variable_elimination;

pub use self::ordering::EliminationOrder;
pub use self::posterior::Posterior;
pub use self::rejection_sampling::{rejection_sampling, RejectionSamplingEngine, SampleCounts};
pub use self::variable_elimination::{evidence_probability, variable_elimination, VariableEliminationEngine};


/// A `ConditionalInferenceEngine` is capable of answering Conditional Probability Queries of the form:
///   ```P(Q | E = e)```
///
/// The query must not be observed, and the evidence may only mention `Variable`s of the model
/// with values in their domains. Engines never modify the model they query.
pub trait ConditionalInferenceEngine {

    /// Infer the distribution ```P(query | evidence)```
    fn infer(&mut self, query: &Variable, evidence: &Assignment) -> Result<Posterior>;

}
