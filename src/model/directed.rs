//! Defines a `DirectedModel`, which is a Bayesian model that represents the factorization of
//! a probability distribution P

use crate::factor::Factor;
use crate::init::Initialization;
use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};

use bidir_map::BidirMap;
use indexmap::IndexMap;
use tracing::debug;

use std::collections::{HashMap, HashSet};


/// Represents a Bayesian Network - a Directed Probabilistic Graphical Model.
///
/// # Representation
/// The network is represented as a Directed Acyclic Graph (DAG). A traditional graph data
/// structure is not used for the simple representation of a `DirectedModel`; instead, the
/// Conditional Probability Distribution (CPD) of each `Variable` implicitly defines the edges of
/// the graph. The `Variable`s are held in their topological order to faciliate efficient
/// computations over the graph.
///
/// A `DirectedModel` is immutable once built, so it may be shared freely between threads running
/// independent queries.
pub struct DirectedModel {

    /// The `Variable`s comprising the scope of the `DirectedModel` and their associated CPDs. Note
    /// that the `Factor` associated with a `Variable` ```X``` has scope ```X U Pa(X)```, where
    /// ```Pa(X)``` are the parent's of ```X```. Therefore, in the DAG represented by this map,
    /// there are edges ```P -> X forall P in X.scope() where P != X```
    graph: IndexMap<Variable, Factor>,

    /// The user-defined names of each `Variable`. This is a two way lookup ```(`Variable`->Name)```
    /// and ```(Name->`Variable`)```
    names: BidirMap<Variable, String>,

    /// Optional human readable labels for the values of each `Variable`
    labels: HashMap<Variable, Vec<String>>,

}

impl DirectedModel {

    /// Get the `Factor` for the given variable in this model.
    pub fn cpd(&self, v: &Variable) -> Option<&Factor> {
        self.graph.get(v)
    }

    /// Iterate over every CPD in the model, in topological order
    pub fn cpds(&self) -> impl Iterator<Item = &Factor> {
        self.graph.values()
    }

    /// Iterate over the `Variable`s in topological order without collecting them
    pub fn variables_in_order(&self) -> impl Iterator<Item = &Variable> {
        self.graph.keys()
    }

    /// Get a topological order of the `DirectedModel`
    pub fn topological_order(&self) -> Vec<Variable> {
        self.graph.keys().cloned().collect()
    }

    /// The position of `v` in the topological order
    pub fn topological_index(&self, v: &Variable) -> Option<usize> {
        self.graph.get_index_of(v)
    }

    /// The parents of `v`, in the order of its CPD's scope
    pub fn parents(&self, v: &Variable) -> Option<Vec<Variable>> {
        self.graph.get(v).map(|f| f.scope().iter().filter(|&p| p != v).cloned().collect())
    }

    /// Lookup a `Variable` in the `DirectedModel` based on the name
    pub fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.names.get_by_second(&String::from(name))
    }

    /// Lookup a `Variable`'s name in the `DirectedModel`.
    pub fn lookup_name(&self, var: &Variable) -> Option<&String> {
        self.names.get_by_first(var)
    }

    /// The name of `var`, or its anonymous display form when it is not part of the model
    pub fn name(&self, var: &Variable) -> String {
        self.lookup_name(var).cloned().unwrap_or_else(|| var.to_string())
    }

    /// The label of value `value` of `var`, if labels were declared
    pub fn label(&self, var: &Variable, value: usize) -> Option<&str> {
        self.labels.get(var).and_then(|l| l.get(value)).map(|s| s.as_str())
    }

    /// Get all `Variable`s in the model.
    pub fn variables(&self) -> HashSet<Variable> {
        self.graph.keys().cloned().collect()
    }

    /// Check if `var` is part of the model
    pub fn contains(&self, var: &Variable) -> bool {
        self.graph.contains_key(var)
    }

    /// Get the number of `Variable`s in the the `DirectedModel`
    pub fn num_variables(&self) -> usize {
        self.graph.len()
    }

    /// Determine the probability of a full `Assignment` to the `Variable`s in the `DirectedModel`.
    ///
    /// Specifically, this computes ```P(zeta)```, where ```zeta``` is a full assignment.
    pub fn probability(&self, assignment: &Assignment) -> Result<f64> {
        // multiply the probability of each family by the chain rule
        self.graph.values().try_fold(1.0, |p, cpt| cpt.value(assignment).map(|v| p * v))
    }

    /// Build evidence from ```(name, value)``` pairs.
    ///
    /// # Errors
    /// * `PearlError::UnknownVariable` if a name is not part of the model
    /// * `PearlError::InvalidValue` if a value is outside its `Variable`'s domain
    pub fn evidence_by_name(&self, pairs: &[(&str, usize)]) -> Result<Assignment> {
        let mut evidence = Assignment::new();
        for &(name, value) in pairs {
            let var = self.lookup_variable(name)
                          .ok_or_else(|| PearlError::UnknownVariable(String::from(name)))?;
            evidence.set(var, value);
        }

        self.check_evidence(&evidence)?;
        Ok(evidence)
    }

    /// Verify that every `Variable` of `evidence` belongs to the model and that every value is in
    /// its domain.
    pub fn check_evidence(&self, evidence: &Assignment) -> Result<()> {
        for (var, &value) in evidence.iter() {
            if !self.contains(var) {
                return Err(PearlError::UnknownVariable(self.name(var)));
            }

            if value >= var.cardinality() {
                return Err(PearlError::InvalidValue {
                    variable: self.name(var),
                    value,
                    cardinality: var.cardinality(),
                });
            }
        }

        Ok(())
    }

    /// Verify the contract of a query ```P(query | evidence)``` against this model.
    pub fn check_query(&self, query: &Variable, evidence: &Assignment) -> Result<()> {
        if !self.contains(query) {
            return Err(PearlError::UnknownVariable(self.name(query)));
        }

        if evidence.contains(query) {
            return Err(PearlError::QueryInEvidence(self.name(query)));
        }

        self.check_evidence(evidence)
    }

    /// The `Variable`s that are neither the query nor observed, in topological order
    pub fn hidden_variables(&self, query: &Variable, evidence: &Assignment) -> Vec<Variable> {
        self.graph.keys()
                  .filter(|&v| v != query && !evidence.contains(v))
                  .cloned()
                  .collect()
    }
}


/// An implementation of the [builder pattern] for creating a `DirectedModel`.
///
/// Models must be assembled in topological order: a `Variable`'s parents must already have been
/// added. `NetworkDefinition` sorts declarations before feeding them to the builder.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
pub struct DirectedModelBuilder {

    /// The `Variable`s and their associated CPDs
    factors: IndexMap<Variable, Factor>,

    /// The names of each `Variable`
    names: BidirMap<Variable, String>,

    /// The value labels of each `Variable`
    labels: HashMap<Variable, Vec<String>>,

    /// The error state of the builder
    err: Option<PearlError>

}


impl Default for DirectedModelBuilder {
    fn default() -> Self {
        DirectedModelBuilder::new()
    }
}


impl DirectedModelBuilder {

    /// Construct a new `DirectedModelBuilder` representing an empty `DirectedModel`
    pub fn new() -> Self {
        DirectedModelBuilder {
            factors: IndexMap::new(),
            names: BidirMap::new(),
            labels: HashMap::new(),
            err: None
        }
    }


    /// Add an anonymous `Variable` to the `DirectedModel`.
    ///
    /// # Args
    /// * `var`: the variable to add to the model
    /// * `parents`: the parent variables. The parents must already be in the model.
    /// * `init`: the initialization mechanism for the CPD of `var` in the model.
    pub fn with_variable(
        self,
        var: &Variable,
        parents: &[Variable],
        init: Initialization,
    ) -> Self {
        self.add_variable(var, var.to_string(), parents, init)
    }


    /// Add a named `Variable` to the `DirectedModel`.
    ///
    /// # Args
    /// * `var`: the variable to add to the model
    /// * `name`: the name for the variable.
    /// * `parents`: the parent variables. The parents must already be in the model.
    /// * `init`: the initialization mechanism for the CPD of `var` in the model.
    pub fn with_named_variable(
        self,
        var: &Variable,
        name: &str,
        parents: &[Variable],
        init: Initialization,
    ) -> Self {
        self.add_variable(var, String::from(name), parents, init)
    }


    /// Attach human readable labels to the values of a `Variable` already in the model.
    pub fn with_labels(mut self, var: &Variable, labels: Vec<String>) -> Self {
        if self.err.is_some() {
            return self;
        }

        if !self.factors.contains_key(var) {
            self.err = Some(PearlError::UnknownVariable(var.to_string()));
        } else if labels.len() != var.cardinality() {
            let name = self.names.get_by_first(var).cloned().unwrap_or_else(|| var.to_string());
            self.err = Some(PearlError::InvalidDomain(name));
        } else {
            self.labels.insert(*var, labels);
        }

        self
    }


    /// Complete building the model.
    ///
    /// # Returns
    /// the `DirectedModel`, or an error if one was generated during the building process
    ///
    /// # Postcondition
    /// This call consumes the `DirectedModelBuilder`
    pub fn build(self) -> Result<DirectedModel> {
        if let Some(e) = self.err {
            Err(e)
        } else {
            debug!(variables = self.factors.len(), "built directed model");
            Ok(self.to_model())
        }
    }

    /// Internal function that constructs the model
    fn to_model(self) -> DirectedModel {
        DirectedModel { graph: self.factors, names: self.names, labels: self.labels }
    }

    /// Internal function that acutally does the variable addition to the model
    fn add_variable(
        mut self,
        var: &Variable,
        name: String,
        parents: &[Variable],
        init: Initialization,
    ) -> Self {
        ///////////////////////////////////////////////////////////////////////
        // 1) if we are in an error state, do nothing
        if self.err.is_some() {
            return self;
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) Check for error conditions
        if parents.iter().any(|v| !self.factors.contains_key(v)) {
            self.err = Some(PearlError::MissingParent);
            return self;
        }

        if self.factors.contains_key(var) || self.names.get_by_second(&name).is_some() {
            self.err = Some(PearlError::DuplicateVariable(name));
            return self;
        }

        ///////////////////////////////////////////////////////////////////////
        // 3) Build the factor based on the initialization
        let factor = match init.build_cpd(*var, parents) {
            Ok(f) => f,
            Err(e) => {
                self.err = Some(e);
                return self;
            }
        };

        ///////////////////////////////////////////////////////////////////////
        // 4) Add to current model
        self.factors.insert(*var, factor);
        self.names.insert(*var, name);

        self
    }
}
