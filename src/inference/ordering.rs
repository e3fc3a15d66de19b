//! Elimination orderings for variable elimination.
//!
//! The ordering never changes the result of a query, only the size of the intermediate factors
//! and therefore the cost of the elimination (Koller & Friedman 9.4).

use crate::model::DirectedModel;
use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};

use indexmap::IndexMap;
use itertools::Itertools;

use std::collections::HashSet;


/// The strategy used to order the hidden (non-query, non-evidence) `Variable`s of a query.
#[derive(Clone, Debug, PartialEq)]
pub enum EliminationOrder {
    /// A caller-provided permutation of the hidden `Variable`s
    Given(Vec<Variable>),

    /// Hidden `Variable`s in ascending order of their names
    ByName,

    /// Greedily eliminate the `Variable` creating the smallest intermediate table
    MinWeight,

    /// Reverse of a maximum-cardinality search over the interaction graph
    MaxCardinality,
}

impl Default for EliminationOrder {
    fn default() -> Self {
        EliminationOrder::MinWeight
    }
}

impl EliminationOrder {

    /// Compute the elimination ordering for ```P(query | evidence)```.
    ///
    /// # Errors
    /// * `PearlError::InvalidOrdering` if a `Given` ordering is not a permutation of the hidden
    ///   `Variable`s
    pub fn resolve(
        &self,
        model: &DirectedModel,
        query: &Variable,
        evidence: &Assignment,
    ) -> Result<Vec<Variable>> {
        let hidden = model.hidden_variables(query, evidence);

        let order = match self {
            EliminationOrder::Given(order) => order.clone(),
            EliminationOrder::ByName => {
                hidden.into_iter().sorted_by_key(|v| model.name(v)).collect()
            },
            EliminationOrder::MinWeight => min_weight(model, evidence, &hidden),
            EliminationOrder::MaxCardinality => {
                let hidden: HashSet<Variable> = hidden.into_iter().collect();
                max_cardinality(model, evidence)
                    .into_iter()
                    .filter(|v| hidden.contains(v))
                    .collect()
            },
        };

        validate(model, query, evidence, &order)?;
        Ok(order)
    }
}


/// Verify that `order` is a permutation of the hidden `Variable`s of ```P(query | evidence)```.
pub fn validate(
    model: &DirectedModel,
    query: &Variable,
    evidence: &Assignment,
    order: &[Variable],
) -> Result<()> {
    let names = |vars: Vec<&Variable>| -> Vec<String> {
        vars.into_iter().map(|v| model.name(v)).collect()
    };

    let unknown: Vec<&Variable> = order.iter().filter(|v| !model.contains(v)).collect();
    if !unknown.is_empty() {
        return Err(invalid("contains variables outside the model", names(unknown)));
    }

    if order.contains(query) {
        return Err(invalid("contains the query variable", names(vec![query])));
    }

    let observed: Vec<&Variable> = order.iter().filter(|v| evidence.contains(v)).collect();
    if !observed.is_empty() {
        return Err(invalid("contains observed variables", names(observed)));
    }

    let repeated: Vec<&Variable> = order.iter().duplicates().collect();
    if !repeated.is_empty() {
        return Err(invalid("repeats variables", names(repeated)));
    }

    let present: HashSet<&Variable> = order.iter().collect();
    let hidden = model.hidden_variables(query, evidence);
    let missing: Vec<&Variable> = hidden.iter().filter(|v| !present.contains(v)).collect();
    if !missing.is_empty() {
        return Err(invalid("is missing hidden variables", names(missing)));
    }

    Ok(())
}

fn invalid(reason: &'static str, variables: Vec<String>) -> PearlError {
    PearlError::InvalidOrdering { reason, variables }
}


/// The moralized interaction graph of the model once the evidence is applied: every pair of
/// unobserved `Variable`s sharing a CPD is connected. Keys are in topological order.
fn interaction_graph(model: &DirectedModel, evidence: &Assignment) -> IndexMap<Variable, HashSet<Variable>> {
    let mut neighbors: IndexMap<Variable, HashSet<Variable>> = model.topological_order()
                                                                    .into_iter()
                                                                    .filter(|v| !evidence.contains(v))
                                                                    .map(|v| (v, HashSet::new()))
                                                                    .collect();

    for f in model.cpds() {
        let scope: Vec<Variable> = f.scope().iter().filter(|v| !evidence.contains(v)).cloned().collect();
        for (vi, vj) in scope.iter().tuple_combinations() {
            if let Some(n) = neighbors.get_mut(vi) {
                n.insert(*vj);
            }
            if let Some(n) = neighbors.get_mut(vj) {
                n.insert(*vi);
            }
        }
    }

    neighbors
}


/// Greedy min-weight ordering of `hidden` (Koller & Friedman 9.4.3.2). The weight of a
/// `Variable` is the size of the table created by eliminating it next; ties go to the
/// `Variable` that comes first in `hidden`.
pub fn min_weight(model: &DirectedModel, evidence: &Assignment, hidden: &[Variable]) -> Vec<Variable> {
    let mut graph = interaction_graph(model, evidence);
    let mut remaining: Vec<Variable> = hidden.to_vec();
    let mut order = Vec::with_capacity(hidden.len());

    let weight = |graph: &IndexMap<Variable, HashSet<Variable>>, v: &Variable| -> f64 {
        graph.get(v)
             .map(|n| n.iter().map(|u| u.cardinality() as f64).product::<f64>())
             .unwrap_or(1.0) * v.cardinality() as f64
    };

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_weight = weight(&graph, &remaining[0]);
        for (i, v) in remaining.iter().enumerate().skip(1) {
            let w = weight(&graph, v);
            if w < best_weight {
                best = i;
                best_weight = w;
            }
        }

        let var = remaining.remove(best);
        let nbrs = graph.remove(&var).unwrap_or_default();

        // eliminating var connects all of its neighbors
        for a in nbrs.iter() {
            if let Some(n) = graph.get_mut(a) {
                n.remove(&var);
                n.extend(nbrs.iter().filter(|&b| b != a).cloned());
            }
        }

        order.push(var);
    }

    order
}


/// Compute the preferred elimination order by the max-cardinality heuristic
/// (Koller & Friedman Algorithm 9.3) over every unobserved `Variable`.
fn max_cardinality(model: &DirectedModel, evidence: &Assignment) -> Vec<Variable> {
    let neighbors = interaction_graph(model, evidence);

    // set of marked variables
    let mut marked = HashSet::new();
    // the (reverse) elimination order
    let mut elimination = Vec::with_capacity(neighbors.len());

    for _ in 0..neighbors.len() {
        let mut idx: Option<(Variable, usize)> = None;

        for (v, nbrs) in neighbors.iter() {
            // if we have already marked this variable, it is already in the elimination order
            if marked.contains(v) {
                continue;
            }

            // otherwise, count the number of marked neighbors
            let ct = nbrs.iter().filter(|&n| marked.contains(n)).count();
            match idx {
                Some((_, max)) if ct <= max => (),
                _ => idx = Some((*v, ct)),
            }
        }

        if let Some((v, _)) = idx {
            elimination.push(v);
            marked.insert(v);
        }
    }

    // we need to reverse the elimination order before returning
    elimination.reverse();
    elimination
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::Initialization;
    use crate::model::DirectedModelBuilder;

    /// Koller & Friedman Example 9.3 (the extended student network)
    fn extended_student() -> (DirectedModel, Vec<Variable>) {
        let vars: Vec<Variable> = (0..8).map(|_| Variable::binary()).collect();
        let (c, d, i, g, s, l, j, h) = (vars[0], vars[1], vars[2], vars[3], vars[4], vars[5], vars[6], vars[7]);

        let model = DirectedModelBuilder::new()
                        .with_named_variable(&c, "Coherence", &[], Initialization::Uniform)
                        .with_named_variable(&d, "Difficulty", &[c], Initialization::Uniform)
                        .with_named_variable(&i, "Intelligence", &[], Initialization::Uniform)
                        .with_named_variable(&g, "Grade", &[d, i], Initialization::Uniform)
                        .with_named_variable(&s, "SAT", &[i], Initialization::Uniform)
                        .with_named_variable(&l, "Letter", &[g], Initialization::Uniform)
                        .with_named_variable(&j, "Job", &[l, s], Initialization::Uniform)
                        .with_named_variable(&h, "Happy", &[g, j], Initialization::Uniform)
                        .build()
                        .unwrap();

        (model, vars)
    }

    #[test]
    fn by_name() {
        let (model, vars) = extended_student();
        let (c, d, i, g, s, l, j, h) = (vars[0], vars[1], vars[2], vars[3], vars[4], vars[5], vars[6], vars[7]);

        let mut evidence = Assignment::new();
        evidence.set(&i, 1);

        let order = EliminationOrder::ByName.resolve(&model, &j, &evidence).unwrap();
        assert_eq!(vec![c, d, g, h, l, s], order);
    }

    #[test]
    fn heuristics_are_permutations() {
        let (model, vars) = extended_student();
        let (j, h) = (vars[6], vars[7]);

        let mut evidence = Assignment::new();
        evidence.set(&h, 0);

        let hidden: HashSet<Variable> = model.hidden_variables(&j, &evidence).into_iter().collect();
        for strategy in vec![EliminationOrder::ByName, EliminationOrder::MinWeight, EliminationOrder::MaxCardinality] {
            let order = strategy.resolve(&model, &j, &evidence).unwrap();
            assert_eq!(hidden.len(), order.len());
            assert_eq!(hidden, order.into_iter().collect::<HashSet<_>>());
        }
    }

    #[test]
    fn min_weight_prefers_leaves() {
        let (model, vars) = extended_student();
        let (c, d, j) = (vars[0], vars[1], vars[6]);

        // Coherence only touches Difficulty, so it is the cheapest first elimination
        let order = EliminationOrder::MinWeight.resolve(&model, &j, &Assignment::new()).unwrap();
        assert_eq!(c, order[0]);
        assert!(order.contains(&d));
    }

    #[test]
    fn invalid_orderings() {
        let (model, vars) = extended_student();
        let (c, d, i, g, s, l, j, h) = (vars[0], vars[1], vars[2], vars[3], vars[4], vars[5], vars[6], vars[7]);

        let mut evidence = Assignment::new();
        evidence.set(&i, 1);

        let reason = |order: Vec<Variable>| match EliminationOrder::Given(order).resolve(&model, &j, &evidence) {
            Err(PearlError::InvalidOrdering { reason, variables }) => (reason, variables),
            other => panic!("wrong result {:?}", other),
        };

        let (r, names) = reason(vec![c, d, g, s, l]);
        assert_eq!("is missing hidden variables", r);
        assert_eq!(vec![String::from("Happy")], names);

        let (r, _) = reason(vec![c, d, g, s, l, h, j]);
        assert_eq!("contains the query variable", r);

        let (r, names) = reason(vec![c, d, g, s, l, h, i]);
        assert_eq!("contains observed variables", r);
        assert_eq!(vec![String::from("Intelligence")], names);

        let (r, names) = reason(vec![c, d, g, s, l, h, c]);
        assert_eq!("repeats variables", r);
        assert_eq!(vec![String::from("Coherence")], names);

        let (r, _) = reason(vec![c, d, g, s, l, h, Variable::binary()]);
        assert_eq!("contains variables outside the model", r);

        assert!(EliminationOrder::Given(vec![h, l, s, g, d, c]).resolve(&model, &j, &evidence).is_ok());
    }
}
