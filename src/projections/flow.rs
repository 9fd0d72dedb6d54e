//! Particle-flow animation contract
//!
//! A renderer shows `marker_count` markers travelling every connector from
//! source to target. Markers are evenly staggered across one loop, so at any
//! instant they sit at evenly spaced fractions of the path.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{require_at_least, require_at_most, ConfigError};

/// Upper bound on markers per connector
pub const MAX_MARKERS: u32 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub marker_count: u32,
    pub loop_duration_ms: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            marker_count: 3,
            loop_duration_ms: 2500,
        }
    }
}

impl FlowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_at_least("flow.marker_count", u64::from(self.marker_count), 1)?;
        require_at_most("flow.marker_count", u64::from(self.marker_count), u64::from(MAX_MARKERS))?;
        require_at_least("flow.loop_duration_ms", self.loop_duration_ms, 1)?;
        Ok(())
    }
}

/// Timing every edge animation must honor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowAnimation {
    pub marker_count: u32,
    pub loop_duration_ms: u64,
    /// Delay between consecutive markers
    pub stagger_ms: f64,
}

impl FlowAnimation {
    pub fn new(config: &FlowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            marker_count: config.marker_count,
            loop_duration_ms: config.loop_duration_ms,
            stagger_ms: config.loop_duration_ms as f64 / f64::from(config.marker_count),
        })
    }

    pub fn loop_duration(&self) -> Duration {
        Duration::from_millis(self.loop_duration_ms)
    }

    pub fn stagger(&self) -> Duration {
        self.loop_duration() / self.marker_count.max(1)
    }

    /// Start delay of each marker within the loop
    pub fn marker_delays(&self) -> Vec<Duration> {
        (0..self.marker_count).map(|i| self.stagger() * i).collect()
    }

    /// Fraction of the path, in `[0, 1)`, each marker has covered after `elapsed`
    ///
    /// Marker `i` trails marker 0 by `i` staggers; the loop repeats forever, so
    /// a delayed marker is already in flight at `elapsed = 0`.
    pub fn marker_progress(&self, elapsed: Duration) -> Vec<f64> {
        let period = self.loop_duration_ms as f64;
        let now = elapsed.as_secs_f64() * 1000.0;
        (0..self.marker_count)
            .map(|i| (now - f64::from(i) * self.stagger_ms).rem_euclid(period) / period)
            .collect()
    }
}

impl Default for FlowAnimation {
    fn default() -> Self {
        let config = FlowConfig::default();
        Self {
            marker_count: config.marker_count,
            loop_duration_ms: config.loop_duration_ms,
            stagger_ms: config.loop_duration_ms as f64 / f64::from(config.marker_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contract() {
        let flow = FlowAnimation::default();
        assert_eq!(flow.marker_count, 3);
        assert_eq!(flow.loop_duration(), Duration::from_millis(2500));
        assert_eq!(flow.marker_delays().len(), 3);
        assert_eq!(flow.marker_delays()[0], Duration::ZERO);
        assert!((flow.stagger_ms - 833.333).abs() < 0.001);
    }

    #[test]
    fn test_markers_are_evenly_spaced() {
        let flow = FlowAnimation::new(&FlowConfig {
            marker_count: 4,
            loop_duration_ms: 2000,
        })
        .unwrap();
        let progress = flow.marker_progress(Duration::from_millis(500));
        let expected = [0.25, 0.0, 0.75, 0.5];
        for (p, e) in progress.iter().zip(expected) {
            assert!((p - e).abs() < 1e-9, "{p} != {e}");
        }
    }

    #[test]
    fn test_progress_wraps_each_loop() {
        let flow = FlowAnimation::default();
        let first = flow.marker_progress(Duration::from_millis(300));
        let later = flow.marker_progress(Duration::from_millis(300 + 2500 * 3));
        for (a, b) in first.iter().zip(&later) {
            assert!((a - b).abs() < 1e-9);
        }
        assert!(later.iter().all(|p| (0.0..1.0).contains(p)));
    }

    #[test]
    fn test_oversized_marker_count_is_rejected() {
        let config: FlowConfig = serde_json::from_str(r#"{"marker_count": 100000}"#).unwrap();
        assert!(matches!(
            FlowAnimation::new(&config),
            Err(ConfigError::TooLarge { field: "flow.marker_count", .. })
        ));
        assert!(serde_json::from_str::<FlowConfig>(r#"{"marker_count": 4294967296}"#).is_err());

        let at_cap = FlowConfig {
            marker_count: MAX_MARKERS,
            ..FlowConfig::default()
        };
        assert_eq!(FlowAnimation::new(&at_cap).unwrap().marker_delays().len(), MAX_MARKERS as usize);
    }

    #[test]
    fn test_zero_markers_is_invalid() {
        let config = FlowConfig {
            marker_count: 0,
            ..FlowConfig::default()
        };
        assert!(FlowAnimation::new(&config).is_err());
    }
}
