#[cfg(any(test, feature = "gui"))]
use super::cursor::CursorLabels;
use super::cursor::{BIT_DIVISOR_RANGE, CursorMode, CursorState};
use super::events::{ControlEvent, Notification, PanelSnapshot};
use super::params::{
    DerivedSizes, FFT_EXPONENT_RANGE, POWER_RANGE_DB, ParameterDeriver, PowerRange,
    ZOOM_EXPONENT_RANGE, clamp_to_control,
};
use crate::config::PanelDefaults;
use anyhow::{Context, Result, bail};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Parses the sample-rate field. Only positive integers are accepted.
pub fn parse_sample_rate(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let rate: u32 = trimmed
        .parse()
        .with_context(|| format!("sample rate {trimmed:?} is not a positive integer"))?;
    if rate == 0 {
        bail!("sample rate must be greater than zero");
    }
    Ok(rate)
}

/// Owns every control value and turns control events into notifications.
///
/// Values arriving here are first clamped to the issuing control's range,
/// standing in for the slider/spin-box bounds of the host widgets.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    defaults: PanelDefaults,
    sample_rate: u32,
    params: ParameterDeriver,
    power: PowerRange,
    cursor: CursorState,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(PanelDefaults::default())
    }
}

impl ControlPanel {
    pub fn new(defaults: PanelDefaults) -> Self {
        let mut defaults = defaults;
        defaults.sanitize();
        Self {
            sample_rate: defaults.sample_rate,
            params: ParameterDeriver::new(defaults.fft_exponent, defaults.zoom_exponent),
            power: PowerRange {
                max: defaults.power_max,
                min: defaults.power_min,
            },
            cursor: CursorState::new(
                CursorMode::from_enabled(defaults.cursors_enabled),
                defaults.bit_divisor,
            ),
            defaults,
        }
    }

    #[cfg(any(test, feature = "gui"))]
    pub fn cursor_labels(&self) -> &CursorLabels {
        self.cursor.labels()
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        let sizes = self.params.sizes();
        PanelSnapshot {
            sample_rate: self.sample_rate,
            fft_exponent: self.params.fft_exponent(),
            zoom_exponent: self.params.zoom_exponent(),
            fft_size: sizes.fft_size,
            zoom_size: sizes.zoom_size,
            power_max: self.power.max,
            power_min: self.power.min,
            cursor_mode: self.cursor.mode(),
            bit_divisor: self.cursor.bits(),
            cursor_labels: self.cursor.labels().clone(),
        }
    }

    /// Current values a freshly attached consumer needs to get in sync.
    pub fn announce(&self) -> Vec<Notification> {
        vec![
            Notification::SampleRateChanged {
                rate: self.sample_rate,
            },
            parameters(self.params.sizes()),
            Notification::PowerMaxChanged { db: self.power.max },
            Notification::PowerMinChanged { db: self.power.min },
        ]
    }

    pub fn handle(&mut self, event: ControlEvent) -> Vec<Notification> {
        let out = match event {
            ControlEvent::SampleRateEdited { text } => match parse_sample_rate(&text) {
                Ok(rate) => {
                    self.sample_rate = rate;
                    vec![Notification::SampleRateChanged { rate }]
                }
                Err(err) => {
                    warn!("[panel] rejected sample rate input: {err:#}");
                    Vec::new()
                }
            },
            ControlEvent::FftExponentChanged { exponent } => {
                let exponent = control_value("fft exponent", exponent, &FFT_EXPONENT_RANGE);
                vec![parameters(self.params.set_fft_exponent(exponent))]
            }
            ControlEvent::ZoomExponentChanged { exponent } => {
                let exponent = control_value("zoom exponent", exponent, &ZOOM_EXPONENT_RANGE);
                vec![parameters(self.params.set_zoom_exponent(exponent))]
            }
            ControlEvent::ZoomIn => self.params.zoom_in().map(parameters).into_iter().collect(),
            ControlEvent::ZoomOut => self.params.zoom_out().map(parameters).into_iter().collect(),
            ControlEvent::PowerMaxChanged { db } => {
                self.power.max = control_value("power max", db, &POWER_RANGE_DB);
                vec![Notification::PowerMaxChanged { db: self.power.max }]
            }
            ControlEvent::PowerMinChanged { db } => {
                self.power.min = control_value("power min", db, &POWER_RANGE_DB);
                vec![Notification::PowerMinChanged { db: self.power.min }]
            }
            ControlEvent::CursorsToggled { enabled } => self
                .cursor
                .set_mode(CursorMode::from_enabled(enabled))
                .map(Notification::CursorLabels)
                .into_iter()
                .collect(),
            ControlEvent::BitDivisorChanged { bits } => {
                let bits = control_value("bit divisor", bits, &BIT_DIVISOR_RANGE);
                self.cursor.set_bits(bits.unsigned_abs());
                Vec::new()
            }
            ControlEvent::IntervalMeasured { seconds } => self
                .cursor
                .on_interval(seconds)
                .map(Notification::CursorLabels)
                .into_iter()
                .collect(),
            ControlEvent::FileChosen { path } => chosen_file(path)
                .map(|path| Notification::OpenFile { path })
                .into_iter()
                .collect(),
            ControlEvent::ResetDefaults => self.reset(),
        };

        for notification in &out {
            debug!("[panel] -> {notification:?}");
        }
        out
    }

    fn reset(&mut self) -> Vec<Notification> {
        let cleared = self.cursor.set_mode(CursorMode::Disabled);
        let restored = Self::new(self.defaults.clone());
        *self = restored;

        let mut out = self.announce();
        out.extend(cleared.map(Notification::CursorLabels));
        out
    }
}

fn parameters(sizes: DerivedSizes) -> Notification {
    Notification::ParametersChanged {
        fft_size: sizes.fft_size,
        zoom_size: sizes.zoom_size,
    }
}

fn control_value(name: &str, value: i32, range: &RangeInclusive<i32>) -> i32 {
    let clamped = clamp_to_control(value, range);
    if clamped != value {
        warn!("[panel] {name} {value} outside {range:?}, using {clamped}");
    }
    clamped
}

fn chosen_file(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}
