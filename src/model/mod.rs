//! Defines the Bayesian network model: the `DirectedModel` itself, its builder, and the
//! declarative `NetworkDefinition` it can be loaded from.

pub mod definition;
pub mod directed;

pub use self::definition::{NetworkDefinition, TableDecl, VariableDecl};
pub use self::directed::{DirectedModel, DirectedModelBuilder};
