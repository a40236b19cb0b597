use std::path::Path;

use opsmath_models::{Component, InventoryParams, SingleServerQueue};
use opsmath_solver::{Constraint, Objective};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid scenario {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A set of model inputs read from a JSON file. Every section is optional;
/// only the models present are run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub production: Option<ProductionScenario>,
    pub inventory: Option<InventoryParams>,
    pub queue: Option<SingleServerQueue>,
    pub reliability: Option<Vec<Component>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductionScenario {
    #[serde(default = "default_x_label")]
    pub x_label: String,
    #[serde(default = "default_y_label")]
    pub y_label: String,
    pub constraints: [Constraint; 2],
    pub objective: Objective,
    /// Number of frontier samples to include for charting
    #[serde(default)]
    pub frontier: Option<usize>,
}

pub fn default_x_label() -> String {
    "tables".to_string()
}

pub fn default_y_label() -> String {
    "chairs".to_string()
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let source = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&source).map_err(|source| ScenarioError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn is_empty(&self) -> bool {
        self.production.is_none() && self.inventory.is_none() && self.queue.is_none() && self.reliability.is_none()
    }
}
