//! Parameter and cursor controller behind the spectrogram control panel.

pub mod cursor;
pub mod events;
pub mod format;
pub mod panel;
pub mod params;

pub use events::{ControlEvent, Notification};
pub use panel::ControlPanel;
