//! Declarative description of a `DirectedModel`, as read from a network definition directory.
//!
//! A definition directory holds two JSON documents:
//!
//! * `variables.json`: a list of ```{ "name", "values", "value_names" }``` declarations, where
//!   `values` are the value indices ```0..k-1```;
//! * `tables.json`: a list of ```{ "variable", "parents", "values" }``` conditional probability
//!   tables. `values` is flat: the outermost loop runs over the parent values in the declared
//!   parent order, the innermost over the values of `variable`.
//!
//! Tables may be listed in any order; `NetworkDefinition::build` sorts them topologically.

use super::directed::{DirectedModel, DirectedModelBuilder};
use crate::init::Initialization;
use crate::util::{PearlError, Result};
use crate::variable::Variable;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

pub const VARIABLES_FILE: &str = "variables.json";
pub const TABLES_FILE: &str = "tables.json";


/// Declaration of a discrete variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,

    /// The value indices of the domain, ```0..k-1```
    pub values: Vec<usize>,

    /// Human readable labels, one per value
    #[serde(default)]
    pub value_names: Option<Vec<String>>,
}

/// Declaration of a conditional probability table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDecl {
    pub variable: String,

    #[serde(default)]
    pub parents: Vec<String>,

    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDefinition {
    pub variables: Vec<VariableDecl>,
    pub tables: Vec<TableDecl>,
}


impl NetworkDefinition {

    /// Read `variables.json` and `tables.json` from `dir`
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let variables = fs::read_to_string(dir.join(VARIABLES_FILE))?;
        let tables = fs::read_to_string(dir.join(TABLES_FILE))?;

        NetworkDefinition::from_json(&variables, &tables)
    }

    /// Parse the two JSON documents of a definition
    pub fn from_json(variables: &str, tables: &str) -> Result<Self> {
        Ok(NetworkDefinition {
            variables: serde_json::from_str(variables)?,
            tables: serde_json::from_str(tables)?,
        })
    }

    /// Build the `DirectedModel`: one `Variable` per declaration and one CPD per table.
    ///
    /// # Errors
    /// * `PearlError::InvalidDomain` if a domain is not ```0..k-1``` or has the wrong number of
    ///   labels
    /// * `PearlError::DuplicateVariable` if two declarations share a name, or a table lists the
    ///   same parent twice
    /// * `PearlError::UndeclaredVariable` if a table references an undeclared variable or parent
    /// * `PearlError::DuplicateCpd` / `PearlError::MissingCpd` unless there is exactly one table
    ///   per variable
    /// * `PearlError::TableSizeMismatch` if a flat table has the wrong length
    /// * `PearlError::Cycle` if the parent relation is not acyclic
    /// * any error raised while validating the CPDs themselves
    pub fn build(&self) -> Result<DirectedModel> {
        ///////////////////////////////////////////////////////////////////////
        // 1) Declare the variables
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut vars = Vec::with_capacity(self.variables.len());

        for (i, decl) in self.variables.iter().enumerate() {
            let k = decl.values.len();
            let ordered = decl.values.iter().enumerate().all(|(j, &v)| j == v);
            let labelled = decl.value_names.as_ref().map_or(true, |l| l.len() == k);
            if k == 0 || !ordered || !labelled {
                return Err(PearlError::InvalidDomain(decl.name.clone()));
            }

            if index.insert(decl.name.as_str(), i).is_some() {
                return Err(PearlError::DuplicateVariable(decl.name.clone()));
            }

            vars.push(Variable::discrete(k));
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) Attach exactly one table to each variable
        let lookup = |name: &str| -> Result<usize> {
            index.get(name)
                 .cloned()
                 .ok_or_else(|| PearlError::UndeclaredVariable(String::from(name)))
        };

        let mut tables: Vec<Option<&TableDecl>> = vec![None; vars.len()];
        let mut parents: Vec<Vec<usize>> = vec![Vec::new(); vars.len()];

        for table in self.tables.iter() {
            let i = lookup(table.variable.as_str())?;
            if tables[i].is_some() {
                return Err(PearlError::DuplicateCpd(table.variable.clone()));
            }

            if let Some(dup) = table.parents.iter().duplicates().next() {
                return Err(PearlError::DuplicateVariable(dup.clone()));
            }

            let pa = table.parents.iter().map(|p| lookup(p.as_str())).collect::<Result<Vec<usize>>>()?;
            if pa.contains(&i) {
                return Err(PearlError::Cycle(vec![table.variable.clone()]));
            }

            let expected = pa.iter().map(|&p| vars[p].cardinality()).product::<usize>() * vars[i].cardinality();
            if table.values.len() != expected {
                return Err(PearlError::TableSizeMismatch {
                    variable: table.variable.clone(),
                    expected,
                    actual: table.values.len(),
                });
            }

            tables[i] = Some(table);
            parents[i] = pa;
        }

        if let Some(i) = tables.iter().position(|t| t.is_none()) {
            return Err(PearlError::MissingCpd(self.variables[i].name.clone()));
        }

        ///////////////////////////////////////////////////////////////////////
        // 3) Sort topologically and feed the builder
        let order = self.topological_sort(&parents)?;

        let mut builder = DirectedModelBuilder::new();
        for i in order {
            let decl = &self.variables[i];
            let pa: Vec<Variable> = parents[i].iter().map(|&p| vars[p]).collect();
            let values = tables[i].map(|t| t.values.as_slice()).unwrap_or_default();

            builder = builder.with_named_variable(&vars[i], &decl.name, &pa, Initialization::Flat(values));
            if let Some(labels) = &decl.value_names {
                builder = builder.with_labels(&vars[i], labels.clone());
            }
        }

        debug!(variables = self.variables.len(), tables = self.tables.len(), "loaded network definition");
        builder.build()
    }

    /// Kahn's algorithm over declaration indices; ties go to the earliest declaration.
    fn topological_sort(&self, parents: &[Vec<usize>]) -> Result<Vec<usize>> {
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); parents.len()];
        for (child, pa) in parents.iter().enumerate() {
            for &p in pa {
                children[p].push(child);
            }
        }

        let mut indegree: Vec<usize> = parents.iter().map(|pa| pa.len()).collect();
        let mut ready: BTreeSet<usize> = (0..parents.len()).filter(|&i| indegree[i] == 0).collect();
        let mut order = Vec::with_capacity(parents.len());

        while let Some(next) = ready.pop_first() {
            order.push(next);

            for &child in &children[next] {
                indegree[child] -= 1;
                if indegree[child] == 0 {
                    ready.insert(child);
                }
            }
        }

        if order.len() < parents.len() {
            let stuck = (0..parents.len()).filter(|&i| indegree[i] > 0)
                                          .map(|i| self.variables[i].name.clone())
                                          .collect();
            return Err(PearlError::Cycle(stuck));
        }

        Ok(order)
    }
}
