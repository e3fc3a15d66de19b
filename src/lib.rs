//! Exact and approximate posterior queries ```P(Q | E = e)``` over discrete Bayesian networks.
//!
//! Exact answers come from variable elimination, approximate ones from rejection sampling with a
//! sample count chosen by a PAC bound.

pub mod config;
pub mod evaluation;
pub mod factor;
pub mod inference;
pub mod init;
pub mod model;
pub mod sample_size;
pub mod samplers;
pub mod util;
pub mod variable;

pub use crate::factor::Factor;
pub use crate::inference::{ConditionalInferenceEngine, EliminationOrder, Posterior,
                           RejectionSamplingEngine, VariableEliminationEngine};
pub use crate::model::{DirectedModel, DirectedModelBuilder, NetworkDefinition};
pub use crate::sample_size::{minimum_samples, PacBound};
pub use crate::util::{PearlError, Result};
pub use crate::variable::{all_assignments, Assignment, Variable};
