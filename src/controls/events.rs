use super::cursor::{CursorLabels, CursorMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input from the host's widgets, already translated into typed values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ControlEvent {
    SampleRateEdited { text: String },
    FftExponentChanged { exponent: i32 },
    ZoomExponentChanged { exponent: i32 },
    ZoomIn,
    ZoomOut,
    PowerMaxChanged { db: i32 },
    PowerMinChanged { db: i32 },
    CursorsToggled { enabled: bool },
    BitDivisorChanged { bits: i32 },
    IntervalMeasured { seconds: f64 },
    /// Result of the open-file dialog; `None` or an empty path means the
    /// user cancelled.
    FileChosen { path: Option<PathBuf> },
    ResetDefaults,
}

/// Output consumed by the spectrogram engine and the readout labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "notification", rename_all = "snake_case")]
pub enum Notification {
    ParametersChanged { fft_size: u32, zoom_size: u32 },
    PowerMaxChanged { db: i32 },
    PowerMinChanged { db: i32 },
    SampleRateChanged { rate: u32 },
    OpenFile { path: PathBuf },
    CursorLabels(CursorLabels),
}

/// Point-in-time copy of every control value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub sample_rate: u32,
    pub fft_exponent: i32,
    pub zoom_exponent: i32,
    pub fft_size: u32,
    pub zoom_size: u32,
    pub power_max: i32,
    pub power_min: i32,
    pub cursor_mode: CursorMode,
    pub bit_divisor: u32,
    pub cursor_labels: CursorLabels,
}
