//! Lineage value objects
//!
//! Value objects are immutable types that represent concepts in the lineage domain.
//! They are compared by value rather than identity and encapsulate domain validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::queries::LineageError;

/// Stable identifier of a data product in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of the port through which two products are connected
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(String);

impl PortId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a lineage edge, derived from its endpoints and port
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

/// Percent-encode the characters `EdgeId` uses as separators
fn escape_id_part(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for c in part.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '>' => escaped.push_str("%3E"),
            '@' => escaped.push_str("%40"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl EdgeId {
    /// Derive the id of the edge `source -> target`, qualified by the port when present
    ///
    /// Separator characters inside the parts are percent-encoded, so distinct
    /// `(source, target, port)` triples never share an id.
    pub fn between(source: &NodeId, target: &NodeId, port: Option<&PortId>) -> Self {
        let (source, target) = (escape_id_part(source.as_str()), escape_id_part(target.as_str()));
        match port {
            Some(port) => Self(format!("{source}->{target}@{}", escape_id_part(port.as_str()))),
            None => Self(format!("{source}->{target}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents the position of a node center in 2D layout space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Get the distance to another position
    pub fn distance_to(&self, other: &Position2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation towards `other`, `t = 0` is `self` and `t = 1` is `other`
    pub fn lerp(&self, other: &Position2D, t: f64) -> Position2D {
        Position2D::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl Default for Position2D {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents the size of a node box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

}

/// Axis-aligned rectangle in layout space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// The box of the given size centered on `center`
    pub fn around(center: Position2D, size: Size) -> Self {
        let half_w = size.width / 2.0;
        let half_h = size.height / 2.0;
        Self {
            min_x: center.x - half_w,
            max_x: center.x + half_w,
            min_y: center.y - half_h,
            max_y: center.y + half_h,
        }
    }

    /// Smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grow each side by its own amount
    pub fn expand(&self, left: f64, right: f64, top: f64, bottom: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - left,
            max_x: self.max_x + right,
            min_y: self.min_y - top,
            max_y: self.max_y + bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, point: &Position2D) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }

    /// True when `other` lies entirely inside `self`
    pub fn encloses(&self, other: &Bounds) -> bool {
        self.min_x <= other.min_x
            && self.max_x >= other.max_x
            && self.min_y <= other.min_y
            && self.max_y >= other.max_y
    }
}

/// Direction in which lineage is traced from the focal product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineageDirection {
    /// Sources feeding the focal product
    Upstream,
    /// Consumers of the focal product
    Downstream,
    /// Both legs, merged by node id
    #[default]
    Full,
}

impl LineageDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineageDirection::Upstream => "upstream",
            LineageDirection::Downstream => "downstream",
            LineageDirection::Full => "full",
        }
    }

    pub fn includes_upstream(&self) -> bool {
        matches!(self, LineageDirection::Upstream | LineageDirection::Full)
    }

    pub fn includes_downstream(&self) -> bool {
        matches!(self, LineageDirection::Downstream | LineageDirection::Full)
    }
}

impl FromStr for LineageDirection {
    type Err = LineageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upstream" => Ok(LineageDirection::Upstream),
            "downstream" => Ok(LineageDirection::Downstream),
            "full" => Ok(LineageDirection::Full),
            other => Err(LineageError::InvalidArgument(format!(
                "direction must be one of upstream, downstream, full (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for LineageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traversal depth limit, always within `[MaxDepth::MIN, MaxDepth::MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MaxDepth(u8);

impl MaxDepth {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 5;

    pub fn new(depth: u32) -> Result<Self, LineageError> {
        if !(Self::MIN..=Self::MAX).contains(&depth) {
            return Err(LineageError::InvalidArgument(format!(
                "max depth must be between {} and {} (got {depth})",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(depth as u8))
    }

    pub fn get(&self) -> u32 {
        u32::from(self.0)
    }
}

impl Default for MaxDepth {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u32> for MaxDepth {
    type Error = LineageError;

    fn try_from(depth: u32) -> Result<Self, Self::Error> {
        Self::new(depth)
    }
}

impl From<MaxDepth> for u32 {
    fn from(depth: MaxDepth) -> Self {
        depth.get()
    }
}

impl fmt::Display for MaxDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
