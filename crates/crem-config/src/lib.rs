//! Model parameters for crem.
//!
//! Parameters carry the bounds a catchment model validates against, the
//! seed for its random source, and the budget for random seeding. They load
//! from TOML or YAML and are validated on load.
//!
//! # Examples
//!
//! ```
//! use crem_config::{Parameters, SeedingStrategy};
//!
//! let parameters = Parameters::from_toml_str(r#"
//!     maximum_implementation_cost = 65000.0
//!     random_seed = 42
//! "#).unwrap();
//!
//! assert_eq!(parameters.maximum_implementation_cost, Some(65000.0));
//! assert_eq!(
//!     SeedingStrategy::for_parameters(&parameters),
//!     SeedingStrategy::ActivateFromAllInactive
//! );
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A decision variable that parameters may place an upper bound on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableLimit {
    ImplementationCost,
    SedimentProduction,
    ParticulateNitrogen,
    OpportunityCost,
}

impl VariableLimit {
    pub const ALL: [VariableLimit; 4] = [
        VariableLimit::ImplementationCost,
        VariableLimit::SedimentProduction,
        VariableLimit::ParticulateNitrogen,
        VariableLimit::OpportunityCost,
    ];

    /// Name of the decision variable the limit applies to.
    pub fn variable_name(self) -> &'static str {
        match self {
            VariableLimit::ImplementationCost => "ImplementationCost",
            VariableLimit::SedimentProduction => "SedimentProduction",
            VariableLimit::ParticulateNitrogen => "ParticulateNitrogen",
            VariableLimit::OpportunityCost => "OpportunityCost",
        }
    }

    /// Parameter key the limit is read from.
    pub fn parameter_key(self) -> &'static str {
        match self {
            VariableLimit::ImplementationCost => "maximum_implementation_cost",
            VariableLimit::SedimentProduction => "maximum_sediment_production",
            VariableLimit::ParticulateNitrogen => "maximum_particulate_nitrogen_production",
            VariableLimit::OpportunityCost => "maximum_opportunity_cost",
        }
    }
}

impl fmt::Display for VariableLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.parameter_key())
    }
}

/// Parameters of a catchment model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Parameters {
    /// Upper bound on total implementation cost, in dollars.
    #[serde(default)]
    pub maximum_implementation_cost: Option<f64>,

    /// Upper bound on total sediment production, in tonnes per year.
    #[serde(default)]
    pub maximum_sediment_production: Option<f64>,

    /// Upper bound on total particulate nitrogen production, in tonnes per year.
    #[serde(default)]
    pub maximum_particulate_nitrogen_production: Option<f64>,

    /// Upper bound on total opportunity cost, in dollars.
    #[serde(default)]
    pub maximum_opportunity_cost: Option<f64>,

    /// Random seed for reproducible runs. Unset means seeded from the OS.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Attempt budget for random seeding. Unset means one per action.
    #[serde(default)]
    pub seeding_attempt_limit: Option<usize>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates parameters from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let parameters: Parameters = toml::from_str(s)?;
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let parameters: Parameters = serde_yaml::from_str(s)?;
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn with_maximum_implementation_cost(mut self, limit: f64) -> Self {
        self.maximum_implementation_cost = Some(limit);
        self
    }

    pub fn with_maximum_sediment_production(mut self, limit: f64) -> Self {
        self.maximum_sediment_production = Some(limit);
        self
    }

    pub fn with_maximum_particulate_nitrogen_production(mut self, limit: f64) -> Self {
        self.maximum_particulate_nitrogen_production = Some(limit);
        self
    }

    pub fn with_maximum_opportunity_cost(mut self, limit: f64) -> Self {
        self.maximum_opportunity_cost = Some(limit);
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_seeding_attempt_limit(mut self, limit: usize) -> Self {
        self.seeding_attempt_limit = Some(limit);
        self
    }

    /// Returns the configured upper bound for `limit`, if any.
    pub fn limit(&self, limit: VariableLimit) -> Option<f64> {
        match limit {
            VariableLimit::ImplementationCost => self.maximum_implementation_cost,
            VariableLimit::SedimentProduction => self.maximum_sediment_production,
            VariableLimit::ParticulateNitrogen => self.maximum_particulate_nitrogen_production,
            VariableLimit::OpportunityCost => self.maximum_opportunity_cost,
        }
    }

    /// Every configured upper bound, in [`VariableLimit::ALL`] order.
    pub fn limits(&self) -> impl Iterator<Item = (VariableLimit, f64)> + '_ {
        VariableLimit::ALL
            .into_iter()
            .filter_map(move |limit| self.limit(limit).map(|value| (limit, value)))
    }

    /// Seeding budget for a model with `action_count` actions.
    pub fn seeding_attempt_limit_for(&self, action_count: usize) -> usize {
        self.seeding_attempt_limit.unwrap_or(action_count)
    }

    /// Checks the parameters for consistency.
    ///
    /// At most one of the cost, sediment and particulate nitrogen limits may
    /// be set, as each selects a different seeding walk. Limits must be
    /// finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (limit, value) in self.limits() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite, non-negative number, got {}",
                    limit, value
                )));
            }
        }

        let exclusive = [
            VariableLimit::ImplementationCost,
            VariableLimit::SedimentProduction,
            VariableLimit::ParticulateNitrogen,
        ];
        let configured = exclusive
            .iter()
            .filter(|limit| self.limit(**limit).is_some())
            .count();
        if configured > 1 {
            let keys: Vec<&str> = exclusive.iter().map(|limit| limit.parameter_key()).collect();
            return Err(ConfigError::Invalid(format!(
                "Only one of [{}] allowed as variable limit.",
                keys.join(", ")
            )));
        }

        if self.seeding_attempt_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "seeding_attempt_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// How a model picks its initial set of active actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingStrategy {
    /// Start with every action inactive, then randomly activate while the
    /// state stays valid. Suits upper bounds that activation increases.
    ActivateFromAllInactive,
    /// Start with every action active, then randomly deactivate while the
    /// state stays valid. Suits upper bounds that activation decreases.
    DeactivateFromAllActive,
    /// Coin flip per action, no validation.
    Unbounded,
}

impl SeedingStrategy {
    pub fn for_parameters(parameters: &Parameters) -> Self {
        if parameters.maximum_implementation_cost.is_some() {
            SeedingStrategy::ActivateFromAllInactive
        } else if parameters.maximum_sediment_production.is_some()
            || parameters.maximum_particulate_nitrogen_production.is_some()
        {
            SeedingStrategy::DeactivateFromAllActive
        } else {
            SeedingStrategy::Unbounded
        }
    }
}

impl fmt::Display for SeedingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SeedingStrategy::ActivateFromAllInactive => "activate from all inactive",
            SeedingStrategy::DeactivateFromAllActive => "deactivate from all active",
            SeedingStrategy::Unbounded => "unbounded",
        };
        f.write_str(text)
    }
}
