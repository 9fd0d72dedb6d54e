//! Depth classification
//!
//! Signed depth is clamped to `[-5, 5]` and mapped onto eleven ordered buckets.
//! The buckets are categories only; what they look like is up to the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation bucket for a node's distance from the focal product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthBucket {
    /// Five or more hops upstream
    FarUpstream,
    Upstream4,
    Upstream3,
    Upstream2,
    /// Directly feeds the focal product
    DirectUpstream,
    Focal,
    /// Directly consumes the focal product
    DirectDownstream,
    Downstream2,
    Downstream3,
    Downstream4,
    /// Five or more hops downstream
    FarDownstream,
}

impl DepthBucket {
    pub const MIN_DEPTH: i32 = -5;
    pub const MAX_DEPTH: i32 = 5;

    /// All buckets from far upstream to far downstream
    pub const ALL: [DepthBucket; 11] = [
        DepthBucket::FarUpstream,
        DepthBucket::Upstream4,
        DepthBucket::Upstream3,
        DepthBucket::Upstream2,
        DepthBucket::DirectUpstream,
        DepthBucket::Focal,
        DepthBucket::DirectDownstream,
        DepthBucket::Downstream2,
        DepthBucket::Downstream3,
        DepthBucket::Downstream4,
        DepthBucket::FarDownstream,
    ];

    pub fn from_depth(depth: i32) -> Self {
        let clamped = depth.clamp(Self::MIN_DEPTH, Self::MAX_DEPTH);
        Self::ALL[(clamped - Self::MIN_DEPTH) as usize]
    }

    /// Position in [`Self::ALL`], 0 for far upstream through 10 for far downstream
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The clamped depth this bucket stands for
    pub fn depth(&self) -> i32 {
        self.index() as i32 + Self::MIN_DEPTH
    }

    pub fn is_upstream(&self) -> bool {
        self.depth() < 0
    }

    pub fn is_downstream(&self) -> bool {
        self.depth() > 0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DepthBucket::FarUpstream => "far-upstream",
            DepthBucket::Upstream4 => "upstream4",
            DepthBucket::Upstream3 => "upstream3",
            DepthBucket::Upstream2 => "upstream2",
            DepthBucket::DirectUpstream => "direct-upstream",
            DepthBucket::Focal => "focal",
            DepthBucket::DirectDownstream => "direct-downstream",
            DepthBucket::Downstream2 => "downstream2",
            DepthBucket::Downstream3 => "downstream3",
            DepthBucket::Downstream4 => "downstream4",
            DepthBucket::FarDownstream => "far-downstream",
        }
    }
}

impl fmt::Display for DepthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_maps_to_bucket() {
        assert_eq!(DepthBucket::from_depth(0), DepthBucket::Focal);
        assert_eq!(DepthBucket::from_depth(-1), DepthBucket::DirectUpstream);
        assert_eq!(DepthBucket::from_depth(1), DepthBucket::DirectDownstream);
        assert_eq!(DepthBucket::from_depth(-5), DepthBucket::FarUpstream);
        assert_eq!(DepthBucket::from_depth(5), DepthBucket::FarDownstream);
    }

    #[test]
    fn test_out_of_range_depths_are_clamped() {
        assert_eq!(DepthBucket::from_depth(-40), DepthBucket::FarUpstream);
        assert_eq!(DepthBucket::from_depth(12), DepthBucket::FarDownstream);
    }

    #[test]
    fn test_buckets_are_ordered_and_round_trip_depth() {
        for (i, bucket) in DepthBucket::ALL.iter().enumerate() {
            assert_eq!(bucket.index(), i);
            assert_eq!(DepthBucket::from_depth(bucket.depth()), *bucket);
        }
        assert!(DepthBucket::FarUpstream < DepthBucket::Focal);
        assert!(DepthBucket::Focal < DepthBucket::FarDownstream);
        assert!(DepthBucket::Upstream3.is_upstream());
        assert!(!DepthBucket::Focal.is_downstream());
    }

    #[test]
    fn test_serialized_name_matches_display() {
        for bucket in DepthBucket::ALL {
            let json = serde_json::to_string(&bucket).unwrap();
            assert_eq!(json, format!("\"{}\"", bucket));
        }
    }
}
