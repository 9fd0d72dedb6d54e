//! Layout and grouping configuration

use serde::{Deserialize, Serialize};

use crate::config::{require_at_least, require_non_negative, require_positive, ConfigError};
use crate::value_objects::Size;

/// Spacing used by the layered layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Horizontal gap between the boxes of adjacent layers
    pub layer_separation: f64,
    /// Vertical gap between the boxes of siblings in one layer
    pub sibling_separation: f64,
    /// Distance from the origin to the first node center on each axis
    pub margin: f64,
    /// Upper bound on crossing-reduction sweeps
    pub ordering_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 64.0,
            layer_separation: 120.0,
            sibling_separation: 32.0,
            margin: 40.0,
            ordering_passes: 4,
        }
    }
}

impl LayoutConfig {
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    /// Distance between the centers of adjacent layers
    pub fn layer_step(&self) -> f64 {
        self.node_width + self.layer_separation
    }

    /// Distance between the centers of adjacent siblings
    pub fn sibling_step(&self) -> f64 {
        self.node_height + self.sibling_separation
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("layout.node_width", self.node_width)?;
        require_positive("layout.node_height", self.node_height)?;
        require_non_negative("layout.layer_separation", self.layer_separation)?;
        require_non_negative("layout.sibling_separation", self.sibling_separation)?;
        require_non_negative("layout.margin", self.margin)?;
        require_at_least("layout.ordering_passes", self.ordering_passes as u64, 1)?;
        Ok(())
    }
}

/// Domain region padding and palette
///
/// The top padding is larger so a region label fits above its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    pub padding_x: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    /// Number of palette slots the color index cycles through
    pub palette_size: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            padding_x: 16.0,
            padding_top: 36.0,
            padding_bottom: 16.0,
            palette_size: 8,
        }
    }
}

impl GroupingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("grouping.padding_x", self.padding_x)?;
        require_non_negative("grouping.padding_top", self.padding_top)?;
        require_non_negative("grouping.padding_bottom", self.padding_bottom)?;
        require_at_least("grouping.palette_size", self.palette_size as u64, 1)?;
        Ok(())
    }
}
