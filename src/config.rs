//! Lineage configuration
//!
//! One serde document with a section per stage. Every section has defaults, so
//! a partial document only overrides the fields it names:
//!
//! ```json
//! { "layout": { "node_width": 240.0 }, "flow": { "marker_count": 5 } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::layout::{GroupingConfig, LayoutConfig};
use crate::projections::FlowConfig;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be at least {min} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: u64,
        value: u64,
    },

    #[error("{field} must be at most {max} (got {value})")]
    TooLarge {
        field: &'static str,
        max: u64,
        value: u64,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails this comparison too.
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub(crate) fn require_at_least(field: &'static str, value: u64, min: u64) -> Result<(), ConfigError> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, min, value })
    }
}

pub(crate) fn require_at_most(field: &'static str, value: u64, max: u64) -> Result<(), ConfigError> {
    if value <= max {
        Ok(())
    } else {
        Err(ConfigError::TooLarge { field, max, value })
    }
}

/// Configuration for the whole traversal + layout pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    pub layout: LayoutConfig,
    pub grouping: GroupingConfig,
    pub flow: FlowConfig,
}

impl LineageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.grouping.validate()?;
        self.flow.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LineageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
