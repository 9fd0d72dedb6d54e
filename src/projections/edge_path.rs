//! Edge connector geometry
//!
//! Edges leave the source box at the middle of its trailing (right) side and
//! enter the target box at the middle of its leading (left) side. The connector
//! is one cubic Bézier split at its midpoint into two segments; the joint is the
//! label anchor. Edges that run backwards (merged legs, self-loops) arc above
//! the row so they do not cut through their own nodes.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::value_objects::{Position2D, Size};

/// Minimum horizontal distance from an anchor to its control point
pub const MIN_CONTROL_OFFSET: f64 = 40.0;

/// One cubic Bézier piece of a connector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub from: Position2D,
    pub control1: Position2D,
    pub control2: Position2D,
    pub to: Position2D,
}

impl CubicSegment {
    pub fn point_at(&self, t: f64) -> Position2D {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Position2D::new(
            a * self.from.x + b * self.control1.x + c * self.control2.x + d * self.to.x,
            a * self.from.y + b * self.control1.y + c * self.control2.y + d * self.to.y,
        )
    }

    /// de Casteljau subdivision at `t`
    pub fn split(&self, t: f64) -> (CubicSegment, CubicSegment) {
        let p01 = self.from.lerp(&self.control1, t);
        let p12 = self.control1.lerp(&self.control2, t);
        let p23 = self.control2.lerp(&self.to, t);
        let p012 = p01.lerp(&p12, t);
        let p123 = p12.lerp(&p23, t);
        let mid = p012.lerp(&p123, t);
        (
            CubicSegment {
                from: self.from,
                control1: p01,
                control2: p012,
                to: mid,
            },
            CubicSegment {
                from: mid,
                control1: p123,
                control2: p23,
                to: self.to,
            },
        )
    }
}

/// Connector between two laid-out nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgePath {
    pub source_anchor: Position2D,
    pub target_anchor: Position2D,
    pub segments: Vec<CubicSegment>,
    pub label_anchor: Position2D,
}

impl EdgePath {
    /// Route from the node centered at `source` to the node centered at `target`
    pub fn between(source: Position2D, target: Position2D, node_size: Size) -> Self {
        let half_w = node_size.width / 2.0;
        let start = Position2D::new(source.x + half_w, source.y);
        let end = Position2D::new(target.x - half_w, target.y);

        let dx = end.x - start.x;
        let offset = (dx.abs() / 2.0).max(MIN_CONTROL_OFFSET);
        let lift = if dx <= 0.0 { node_size.height } else { 0.0 };
        let curve = CubicSegment {
            from: start,
            control1: Position2D::new(start.x + offset, start.y - lift),
            control2: Position2D::new(end.x - offset, end.y - lift),
            to: end,
        };

        let (head, tail) = curve.split(0.5);
        Self {
            source_anchor: start,
            target_anchor: end,
            label_anchor: head.to,
            segments: vec![head, tail],
        }
    }

    /// Point at `t` in `[0, 1]` along the whole connector, segments sharing `t` evenly
    pub fn point_at(&self, t: f64) -> Position2D {
        if self.segments.is_empty() {
            return self.source_anchor.lerp(&self.target_anchor, t.clamp(0.0, 1.0));
        }
        let scaled = t.clamp(0.0, 1.0) * self.segments.len() as f64;
        let index = (scaled.floor() as usize).min(self.segments.len() - 1);
        self.segments[index].point_at(scaled - index as f64)
    }

    /// SVG path data (`M ... C ... C ...`)
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        let _ = write!(d, "M {:.2},{:.2}", self.source_anchor.x, self.source_anchor.y);
        for s in &self.segments {
            let _ = write!(
                d,
                " C {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                s.control1.x, s.control1.y, s.control2.x, s.control2.y, s.to.x, s.to.y
            );
        }
        d
    }
}
