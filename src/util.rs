//! Defines the `Error` type for the pearl library

use std::io;
use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, PearlError>;

#[derive(Debug, Error)]
pub enum PearlError {

    /// Represents an incomplete assignment where a complete assignment was required.
    #[error("Missing assignments to the required Variables")]
    IncompleteAssignment,

    /// Represents an error where a certain constraint on a scope was not satisfied
    #[error("Provided scope did not satisfy constraints: {0}")]
    InvalidScope(String),

    /// A value outside of the domain of a variable
    #[error("Value {value} is outside the domain of {variable} (cardinality {cardinality})")]
    InvalidValue { variable: String, value: usize, cardinality: usize },

    /// Exactly what it sounds like
    #[error("Encountered division by zero")]
    DivideByZero,

    /// Represents an error where there was a parent variable expected, but not found
    #[error("Missing a parent from the model")]
    MissingParent,

    /// Represents a variable that was present multiple times in a situation where it should only
    /// have been present once
    #[error("Variable `{0}` was encountered twice")]
    DuplicateVariable(String),

    /// A reference to a variable that was never declared
    #[error("Reference to undeclared variable `{0}`")]
    UndeclaredVariable(String),

    /// A variable that is not part of the model was used in a query
    #[error("Variable `{0}` is not part of the model")]
    UnknownVariable(String),

    /// A declared variable without a conditional probability table
    #[error("No conditional probability table declared for `{0}`")]
    MissingCpd(String),

    /// More than one conditional probability table for the same variable
    #[error("More than one conditional probability table declared for `{0}`")]
    DuplicateCpd(String),

    /// The flat list of table values has the wrong length
    #[error("Table for `{variable}` has {actual} values, expected {expected}")]
    TableSizeMismatch { variable: String, expected: usize, actual: usize },

    /// A declared domain that is not `0..k-1`
    #[error("Domain of `{0}` must be the value indices 0..k-1")]
    InvalidDomain(String),

    /// The parent relation does not form a DAG
    #[error("The network contains a cycle through: {0:?}")]
    Cycle(Vec<String>),

    /// Represents the situation when we expected a CPD but did not receive one
    #[error("Requires a Conditional Probability Distribution: {0}")]
    NotACpd(String),

    /// Represents an attempt to initialize a variable with an incompatible Initialization
    #[error("An invalid initialization was provided")]
    InvalidInitialization,

    /// Represents a situation in which there was a negative probability provided
    #[error("Encountered a negative probability")]
    NegativeProbability,

    /// The table of a factor does not match its scope
    #[error("Table shape does not match scope: {0}")]
    Shape(String),

    /// The query variable was also assigned by the evidence
    #[error("Query variable `{0}` is assigned by the evidence")]
    QueryInEvidence(String),

    /// An elimination ordering that is not a permutation of the hidden variables
    #[error("Invalid elimination ordering: {reason} {variables:?}")]
    InvalidOrdering { reason: &'static str, variables: Vec<String> },

    /// The evidence has probability zero under the model
    #[error("The evidence has zero probability under the model")]
    ZeroProbabilityEvidence,

    /// Every drawn sample was rejected
    #[error("No samples were accepted ({drawn} drawn)")]
    NoAcceptedSamples { drawn: u64 },

    /// Accuracy parameters outside of their valid range
    #[error("Invalid accuracy parameter: {0}")]
    InvalidAccuracy(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed network definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed configuration: {0}")]
    Config(#[from] toml::de::Error),
}
