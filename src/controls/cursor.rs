//! Time-selection cursor readouts.
//!
//! A measured interval turns into four labels: the interval itself, its
//! frequency, and the per-bit period and frequency for the configured bit
//! count. Labels are only produced while cursors are enabled and are cleared
//! when they get disabled.

use super::format::format_with_unit;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::trace;

pub const BIT_DIVISOR_RANGE: RangeInclusive<i32> = 1..=9999;
pub const DEFAULT_BIT_DIVISOR: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    #[default]
    Disabled,
    Enabled,
}

impl CursorMode {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

/// Derived quantities for one interval. Zero intervals give infinite
/// frequencies rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorMeasurement {
    pub interval_secs: f64,
    pub frequency_hz: f64,
    pub bit_period_secs: f64,
    pub bit_frequency_hz: f64,
}

impl CursorMeasurement {
    pub fn compute(interval_secs: f64, bits: u32) -> Self {
        let bits = f64::from(bits);
        Self {
            interval_secs,
            frequency_hz: 1.0 / interval_secs,
            bit_period_secs: interval_secs / bits,
            bit_frequency_hz: bits / interval_secs,
        }
    }
}

/// The four readouts as shown next to the controls. Empty strings mean
/// "nothing measured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorLabels {
    pub period: String,
    pub frequency: String,
    pub bit_period: String,
    pub bit_frequency: String,
}

impl CursorLabels {
    pub fn cleared() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_cleared(&self) -> bool {
        self.period.is_empty()
            && self.frequency.is_empty()
            && self.bit_period.is_empty()
            && self.bit_frequency.is_empty()
    }
}

impl From<&CursorMeasurement> for CursorLabels {
    fn from(m: &CursorMeasurement) -> Self {
        Self {
            period: format_with_unit(m.interval_secs, "s"),
            frequency: format_with_unit(m.frequency_hz, "Hz"),
            bit_period: format_with_unit(m.bit_period_secs, "s"),
            bit_frequency: format_with_unit(m.bit_frequency_hz, "Hz"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CursorState {
    mode: CursorMode,
    bits: u32,
    labels: CursorLabels,
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new(CursorMode::Disabled, DEFAULT_BIT_DIVISOR)
    }
}

impl CursorState {
    pub fn new(mode: CursorMode, bits: u32) -> Self {
        Self {
            mode,
            bits,
            labels: CursorLabels::cleared(),
        }
    }

    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn labels(&self) -> &CursorLabels {
        &self.labels
    }

    /// Applies a toggle of the enable control. Returns the cleared labels on
    /// the Enabled -> Disabled edge and `None` otherwise.
    pub fn set_mode(&mut self, mode: CursorMode) -> Option<CursorLabels> {
        let previous = std::mem::replace(&mut self.mode, mode);
        match (previous, mode) {
            (CursorMode::Enabled, CursorMode::Disabled) => {
                self.labels = CursorLabels::cleared();
                Some(self.labels.clone())
            }
            _ => None,
        }
    }

    /// Takes effect from the next measurement; the current labels stay as
    /// they are.
    pub fn set_bits(&mut self, bits: u32) {
        debug_assert!(bits >= 1, "bit divisor must be positive");
        self.bits = bits;
    }

    /// Recomputes all four labels while enabled. Measurements arriving while
    /// disabled are dropped.
    pub fn on_interval(&mut self, interval_secs: f64) -> Option<CursorLabels> {
        if !self.mode.is_enabled() {
            trace!("[cursor] dropping interval {interval_secs}s, cursors disabled");
            return None;
        }
        let measurement = CursorMeasurement::compute(interval_secs, self.bits);
        self.labels = CursorLabels::from(&measurement);
        Some(self.labels.clone())
    }
}
