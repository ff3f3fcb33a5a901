//! Startup defaults for the control panel.
//!
//! The defaults file is only ever read. Control changes made during a session
//! are not written back.

use crate::controls::cursor::{BIT_DIVISOR_RANGE, DEFAULT_BIT_DIVISOR};
use crate::controls::params::{
    DEFAULT_FFT_EXPONENT, DEFAULT_POWER_MAX_DB, DEFAULT_POWER_MIN_DB, DEFAULT_ZOOM_EXPONENT,
    FFT_EXPONENT_RANGE, POWER_RANGE_DB, ZOOM_EXPONENT_RANGE, clamp_to_control,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub const DEFAULT_SAMPLE_RATE: u32 = 8_000_000;
const DEFAULTS_FILE: &str = "defaults.json";

fn config_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spectrogram-controls")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelDefaults {
    pub sample_rate: u32,
    pub fft_exponent: i32,
    pub zoom_exponent: i32,
    pub power_max: i32,
    pub power_min: i32,
    pub cursors_enabled: bool,
    pub bit_divisor: u32,
}

impl Default for PanelDefaults {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            fft_exponent: DEFAULT_FFT_EXPONENT,
            zoom_exponent: DEFAULT_ZOOM_EXPONENT,
            power_max: DEFAULT_POWER_MAX_DB,
            power_min: DEFAULT_POWER_MIN_DB,
            cursors_enabled: false,
            bit_divisor: DEFAULT_BIT_DIVISOR,
        }
    }
}

impl PanelDefaults {
    /// Reads defaults from `path`. Fields missing from the file keep their
    /// built-in values.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading defaults from {}", path.display()))?;
        let mut defaults: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing defaults in {}", path.display()))?;
        defaults.sanitize();
        info!("[config] loaded defaults from {}", path.display());
        Ok(defaults)
    }

    /// Uses the per-user defaults file when present, built-ins otherwise.
    pub fn load_or_default() -> Self {
        let path = config_dir().join(DEFAULTS_FILE);
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path)
            .map_err(|err| warn!("[config] ignoring {path:?}: {err:#}"))
            .unwrap_or_default()
    }

    /// Pulls every value into its control's range.
    pub fn sanitize(&mut self) {
        self.fft_exponent = clamp_to_control(self.fft_exponent, &FFT_EXPONENT_RANGE);
        self.zoom_exponent = clamp_to_control(self.zoom_exponent, &ZOOM_EXPONENT_RANGE);
        self.power_max = clamp_to_control(self.power_max, &POWER_RANGE_DB);
        self.power_min = clamp_to_control(self.power_min, &POWER_RANGE_DB);
        self.bit_divisor = self
            .bit_divisor
            .clamp(*BIT_DIVISOR_RANGE.start() as u32, *BIT_DIVISOR_RANGE.end() as u32);
        if self.sample_rate == 0 {
            warn!("[config] sample rate of zero replaced by {DEFAULT_SAMPLE_RATE}");
            self.sample_rate = DEFAULT_SAMPLE_RATE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let file = write_temp(r#"{ "fft_exponent": 11, "cursors_enabled": true }"#);
        let d = PanelDefaults::load(file.path()).expect("load");
        assert_eq!(d.fft_exponent, 11);
        assert!(d.cursors_enabled);
        assert_eq!(d.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(d.power_min, -50);
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let file = write_temp(
            r#"{ "fft_exponent": 20, "zoom_exponent": -4, "power_max": 50,
                 "power_min": -500, "bit_divisor": 0, "sample_rate": 0 }"#,
        );
        let d = PanelDefaults::load(file.path()).expect("load");
        assert_eq!(d.fft_exponent, 13);
        assert_eq!(d.zoom_exponent, 0);
        assert_eq!(d.power_max, 20);
        assert_eq!(d.power_min, -100);
        assert_eq!(d.bit_divisor, 1);
        assert_eq!(d.sample_rate, DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let file = write_temp("{ not json");
        let err = PanelDefaults::load(file.path()).expect_err("malformed");
        assert!(format!("{err:#}").contains("parsing defaults"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(PanelDefaults::load(&dir.path().join("absent.json")).is_err());
    }
}
