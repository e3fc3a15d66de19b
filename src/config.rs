//! Settings of an evaluation run, read from TOML.
//!
//! ```toml
//! trials = 10
//! sample_tiers = [10, 100]
//! seed = 0
//! evidence_probability_floor = 0.05
//!
//! [pac]
//! epsilon = 0.01
//! delta = 0.05
//! ```
//!
//! Every field is optional.

use crate::sample_size::PacBound;
use crate::util::{PearlError, Result};

use serde::{Deserialize, Serialize};

use std::fs;
use std::path::Path;


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Accuracy target of the PAC sample tier
    pub pac: PacBound,

    /// Fixed sample counts to compare against the PAC tier
    pub sample_tiers: Vec<u64>,

    /// Repetitions of every method
    pub trials: usize,

    /// Trial `t` of a sampling method is seeded with ```seed + t```
    pub seed: u64,

    /// Lower bound on ```P(evidence)``` used to size the PAC tier. When absent, the exact
    /// probability of the evidence is computed.
    pub evidence_probability_floor: Option<f64>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            pac: PacBound::default(),
            sample_tiers: vec![10, 100],
            trials: 10,
            seed: 0,
            evidence_probability_floor: None,
        }
    }
}

impl InferenceConfig {

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: InferenceConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        InferenceConfig::from_toml_str(&s)
    }

    /// Check the accuracy target and the evidence probability floor
    pub fn validate(&self) -> Result<()> {
        PacBound::new(self.pac.epsilon, self.pac.delta)?;

        if let Some(p) = self.evidence_probability_floor {
            if !(p > 0.0 && p <= 1.0) {
                return Err(PearlError::InvalidAccuracy(format!(
                    "evidence probability floor must be in (0, 1], found {}",
                    p
                )));
            }
        }

        Ok(())
    }
}
