//! Defines a `ConditionalInferenceEngine` that uses exact inference by variable elimination to
//! answer conditional inference queries.
//!
//! Implementation of Koller & Friedman Algorithm 9.1 - Sum-Product-VE

use crate::factor::Factor;
use crate::model::DirectedModel;
use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};
use super::ConditionalInferenceEngine;
use super::ordering::{self, EliminationOrder};
use super::posterior::Posterior;

use tracing::{debug, warn};

/// Number of entries above which an intermediate table is reported as unusually large
pub const LARGE_FACTOR_ENTRIES: usize = 1 << 24;


/// Answer ```P(query | evidence)``` exactly, eliminating the hidden `Variable`s in `order`.
///
/// The `order` must be a permutation of the hidden `Variable`s. It only affects the cost of the
/// computation, never the result.
///
/// # Errors
/// * `PearlError::UnknownVariable`, `PearlError::QueryInEvidence`, `PearlError::InvalidValue` if
///   the query is malformed
/// * `PearlError::InvalidOrdering` if `order` is not a permutation of the hidden `Variable`s
/// * `PearlError::ZeroProbabilityEvidence` if ```P(evidence) = 0```
pub fn variable_elimination(
    model: &DirectedModel,
    query: &Variable,
    evidence: &Assignment,
    order: &[Variable],
) -> Result<Posterior> {
    model.check_query(query, evidence)?;
    ordering::validate(model, query, evidence, order)?;

    let phis = reduced_cpds(model, evidence)?;
    let phis = eliminate(model, phis, order)?;

    // multiply together remaining phis: a factor over the query and the scalars left behind by
    // fully observed families
    let phi_star = phis.into_iter().fold(Factor::identity(), |acc, phi| acc.product(&phi));

    // now we have an unnormalized distribution, the partition function is P(evidence)
    Posterior::from_factor(*query, &phi_star)
}


/// Compute ```P(evidence)``` by eliminating every unobserved `Variable`.
///
/// # Errors
/// * `PearlError::UnknownVariable`, `PearlError::InvalidValue` if the evidence is malformed
pub fn evidence_probability(model: &DirectedModel, evidence: &Assignment) -> Result<f64> {
    model.check_evidence(evidence)?;

    let unobserved: Vec<Variable> = model.topological_order()
                                         .into_iter()
                                         .filter(|v| !evidence.contains(v))
                                         .collect();
    let order = ordering::min_weight(model, evidence, &unobserved);

    let phis = reduced_cpds(model, evidence)?;
    let phis = eliminate(model, phis, &order)?;

    let z = phis.into_iter().fold(Factor::identity(), |acc, phi| acc.product(&phi));
    z.scalar_value()
     .ok_or_else(|| PearlError::InvalidScope(String::from("variables left after full elimination")))
}


/// Every CPD of the model with the evidence applied
fn reduced_cpds(model: &DirectedModel, evidence: &Assignment) -> Result<Vec<Factor>> {
    model.cpds().map(|cpd| cpd.reduce(evidence)).collect()
}


/// Sum each `Variable` of `order` out of the product of `phis`, one at a time.
fn eliminate(model: &DirectedModel, mut phis: Vec<Factor>, order: &[Variable]) -> Result<Vec<Factor>> {
    for var in order.iter() {
        // time to get rid of var
        let (phi_1prime, phi_2prime): (Vec<Factor>, Vec<Factor>) = phis.into_iter()
                                                                       .partition(|f| f.contains(var));
        let joined = phi_1prime.len();

        // product step - multiply factors with var
        let psi = phi_1prime.into_iter().fold(Factor::identity(), |acc, phi| acc.product(&phi));

        if psi.len() > LARGE_FACTOR_ENTRIES {
            warn!(
                variable = %model.name(var),
                entries = psi.len(),
                "large intermediate factor during elimination"
            );
        }

        // sum step - marginalize psi over var. a variable no factor mentions leaves nothing
        // behind.
        phis = phi_2prime;
        if psi.contains(var) {
            let tau = psi.sum_out(var)?;
            debug!(
                variable = %model.name(var),
                joined,
                width = tau.scope().len(),
                "eliminated"
            );
            phis.push(tau);
        }
    }

    Ok(phis)
}


/// A stateless `ConditionalInferenceEngine` running variable elimination over a `DirectedModel`.
/// The ordering strategy is resolved for every query.
pub struct VariableEliminationEngine<'a> {

    /// The `DirectedModel` to query
    model: &'a DirectedModel,

    /// How to order the hidden `Variable`s of each query
    order: EliminationOrder,

}

impl<'a> VariableEliminationEngine<'a> {

    pub fn new(model: &'a DirectedModel, order: EliminationOrder) -> Self {
        VariableEliminationEngine { model, order }
    }

    pub fn order(&self) -> &EliminationOrder {
        &self.order
    }
}

impl<'a> ConditionalInferenceEngine for VariableEliminationEngine<'a> {

    fn infer(&mut self, query: &Variable, evidence: &Assignment) -> Result<Posterior> {
        self.model.check_query(query, evidence)?;
        let order = self.order.resolve(self.model, query, evidence)?;
        variable_elimination(self.model, query, evidence, &order)
    }

}
