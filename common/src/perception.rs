use bevy_ecs::prelude::Resource;
use std::fmt;

use crate::{
    config::PerceptionConfig,
    constants::{METER_BAR_WIDTH, METER_EPSILON, METER_LOW_RATIO},
};

// ============================================================================
// Perception Meter
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerceptionState {
    // Not held, meter full
    Idle,
    // Held and revealing
    Draining,
    // Emptied while held; waits for the recharge threshold
    Locked,
    // Released and refilling
    Recharging,
}

// Time-limited reveal resource. Draining while held, refilling while released, with a
// lockout after running dry that lifts at `recharge_threshold` rather than at full.
#[derive(Resource, Debug, Clone)]
pub struct PerceptionMeter {
    config: PerceptionConfig,
    current: f32,
    active: bool,
    locked: bool,
}

impl PerceptionMeter {
    // Starts full. Expects a config that passed `PerceptionConfig::validate`.
    #[must_use]
    pub const fn new(config: PerceptionConfig) -> Self {
        Self {
            config,
            current: config.max_meter,
            active: false,
            locked: false,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    #[must_use]
    pub const fn current_meter(&self) -> f32 {
        self.current
    }

    #[must_use]
    pub fn meter_ratio(&self) -> f32 {
        // An unvalidated config may carry a zero or NaN max
        if self.config.max_meter.is_nan() || self.config.max_meter <= 0.0 {
            return 0.0;
        }
        (self.current / self.config.max_meter).clamp(0.0, 1.0)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn state(&self) -> PerceptionState {
        if self.active {
            PerceptionState::Draining
        } else if self.locked {
            PerceptionState::Locked
        } else if self.current < self.config.max_meter {
            PerceptionState::Recharging
        } else {
            PerceptionState::Idle
        }
    }

    // Advance by `dt` seconds with the hold input sampled this tick. `on_reveal` is called
    // with true when vision switches on and false when it switches off; both can happen in
    // one tick if a single step empties the meter.
    pub fn tick(&mut self, held: bool, dt: f32, mut on_reveal: impl FnMut(bool)) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let max = self.config.max_meter;

        if held && !self.locked && self.current > 0.0 {
            if !self.active {
                self.active = true;
                on_reveal(true);
            }

            self.current = (self.current - self.config.drain_rate * dt).min(max);
            // Summed f32 steps leave a residue just above 0 (3.0 - 30 * 0.1); that counts as empty
            if self.current <= METER_EPSILON {
                self.current = 0.0;
                self.active = false;
                self.locked = true;
                on_reveal(false);
            }
        } else {
            if self.active {
                self.active = false;
                on_reveal(false);
            }

            self.current = (self.current + self.config.recharge_rate * dt).clamp(0.0, max);
            if self.current >= max {
                self.locked = false;
            }
            if self.locked && self.current + METER_EPSILON >= max * self.config.recharge_threshold {
                self.locked = false;
            }
        }
    }

    #[must_use]
    pub fn readout(&self) -> MeterReadout {
        MeterReadout {
            current: self.current,
            ratio: self.meter_ratio(),
            state: self.state(),
        }
    }
}

impl Default for PerceptionMeter {
    fn default() -> Self {
        Self::new(PerceptionConfig::default())
    }
}

// ============================================================================
// Meter Readout
// ============================================================================

// Snapshot for presentation layers; nothing in the meter reads it back
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterReadout {
    pub current: f32,
    pub ratio: f32,
    pub state: PerceptionState,
}

impl MeterReadout {
    // Seconds left, rounded up to a tenth
    #[must_use]
    pub fn seconds_label(&self) -> f32 {
        (self.current * 10.0).ceil() / 10.0
    }

    #[must_use]
    pub fn is_low(&self) -> bool {
        self.ratio <= METER_LOW_RATIO
    }
}

impl fmt::Display for MeterReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = ((self.ratio * METER_BAR_WIDTH as f32).round() as usize).min(METER_BAR_WIDTH);
        write!(
            f,
            "mask vision {:.1}s [{}{}] {:?}{}",
            self.seconds_label(),
            "#".repeat(filled),
            "-".repeat(METER_BAR_WIDTH - filled),
            self.state,
            if self.is_low() { " (low)" } else { "" },
        )
    }
}
