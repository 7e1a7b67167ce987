#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use anyhow::{Result, ensure};
use tracing::debug;

use crate::{constants::*, obstacles::unit_chance};

// ============================================================================
// Maze Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    pub fake_wall_chance: f64,
    pub invis_wall_chance: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            fake_wall_chance: DEFAULT_FAKE_WALL_CHANCE,
            invis_wall_chance: DEFAULT_INVIS_WALL_CHANCE,
        }
    }
}

// Round up to odd, then floor at the minimum size. Never fails.
#[must_use]
pub const fn normalize_dimension(n: usize) -> usize {
    let odd = if n % 2 == 0 { n.saturating_add(1) } else { n };
    if odd < MIN_GRID_DIM { MIN_GRID_DIM } else { odd }
}

impl MazeConfig {
    // Silently corrects anything the generator can't use. Dimensions become odd and
    // at least MIN_GRID_DIM; chances are clamped to [0, 1].
    #[must_use]
    pub fn normalized(self) -> Self {
        let normalized = Self {
            rows: normalize_dimension(self.rows),
            cols: normalize_dimension(self.cols),
            fake_wall_chance: unit_chance(self.fake_wall_chance),
            invis_wall_chance: unit_chance(self.invis_wall_chance),
        };

        if normalized.rows != self.rows || normalized.cols != self.cols {
            debug!(
                "grid {}x{} normalized to {}x{}",
                self.rows, self.cols, normalized.rows, normalized.cols
            );
        }
        if !in_range(normalized.fake_wall_chance, FAKE_WALL_CHANCE_RANGE) {
            debug!("fake wall chance {} is outside the tuned range", normalized.fake_wall_chance);
        }
        if !in_range(normalized.invis_wall_chance, INVIS_WALL_CHANCE_RANGE) {
            debug!("invisible wall chance {} is outside the tuned range", normalized.invis_wall_chance);
        }

        normalized
    }
}

fn in_range(value: f64, (lo, hi): (f64, f64)) -> bool {
    (lo..=hi).contains(&value)
}

// ============================================================================
// Perception Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct PerceptionConfig {
    // Seconds of vision on a full meter at drain rate 1
    pub max_meter: f32,
    pub drain_rate: f32,
    pub recharge_rate: f32,
    // Fraction of max_meter needed to leave the post-depletion lockout
    pub recharge_threshold: f32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            max_meter: DEFAULT_MAX_METER,
            drain_rate: DEFAULT_DRAIN_RATE,
            recharge_rate: DEFAULT_RECHARGE_RATE,
            recharge_threshold: DEFAULT_RECHARGE_THRESHOLD,
        }
    }
}

impl PerceptionConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.max_meter.is_finite() && self.max_meter > 0.0,
            "max meter must be positive, got {}",
            self.max_meter
        );
        ensure!(
            self.drain_rate.is_finite() && self.drain_rate >= 0.0,
            "drain rate must be non-negative, got {}",
            self.drain_rate
        );
        ensure!(
            self.recharge_rate.is_finite() && self.recharge_rate >= 0.0,
            "recharge rate must be non-negative, got {}",
            self.recharge_rate
        );
        ensure!(
            self.recharge_threshold > 0.0 && self.recharge_threshold < 1.0,
            "recharge threshold must be in (0, 1), got {}",
            self.recharge_threshold
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_are_rounded_up_to_odd_and_floored_at_minimum() {
        // Silent correction: none of these are rejected
        assert_eq!(normalize_dimension(0), 11);
        assert_eq!(normalize_dimension(4), 11);
        assert_eq!(normalize_dimension(10), 11);
        assert_eq!(normalize_dimension(11), 11);
        assert_eq!(normalize_dimension(12), 13);
        assert_eq!(normalize_dimension(15), 15);
        assert_eq!(normalize_dimension(40), 41);
    }

    #[test]
    fn normalized_config_clamps_chances() {
        let config = MazeConfig {
            rows: 8,
            cols: 20,
            fake_wall_chance: 1.5,
            invis_wall_chance: f64::NAN,
        }
        .normalized();

        assert_eq!((config.rows, config.cols), (11, 21));
        assert!((config.fake_wall_chance - 1.0).abs() < f64::EPSILON);
        assert!(config.invis_wall_chance.abs() < f64::EPSILON);
    }

    #[test]
    fn default_configs_are_valid() {
        assert_eq!(MazeConfig::default().normalized(), MazeConfig::default());
        assert!(PerceptionConfig::default().validate().is_ok());
    }

    #[test]
    fn invalid_perception_configs_are_rejected() {
        let base = PerceptionConfig::default();
        let cases = [
            PerceptionConfig { max_meter: 0.0, ..base },
            PerceptionConfig { drain_rate: -1.0, ..base },
            PerceptionConfig { recharge_rate: f32::INFINITY, ..base },
            PerceptionConfig { recharge_threshold: 0.0, ..base },
            PerceptionConfig { recharge_threshold: 1.0, ..base },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }
}
