use super::widgets::{form_row, labeled_slider, readout, section_title};
use crate::config::PanelDefaults;
use crate::controls::params::{FFT_EXPONENT_RANGE, POWER_RANGE_DB, ZOOM_EXPONENT_RANGE};
use crate::controls::cursor::CursorMode;
use crate::controls::{ControlEvent, ControlPanel, Notification};

use iced::widget::{button, checkbox, column, container, row, scrollable, text, text_input};
use iced::{Element, Length, Size, Task};
use std::path::PathBuf;
use tracing::info;

const APP_PADDING: f32 = 16.0;

/// Filters offered by the open dialog, as (description, extensions).
pub const FILE_FILTERS: [(&str, &[&str]); 4] = [
    ("complex<float> file", &["cfile", "cf32"]),
    ("complex<int8> HackRF file", &["cs8"]),
    ("complex<uint8> RTL-SDR file", &["cu8"]),
    ("All files", &["*"]),
];

pub fn run(defaults: PanelDefaults) -> iced::Result {
    iced::application(
        move || ControlsApp::new(defaults.clone()),
        ControlsApp::update,
        ControlsApp::view,
    )
    .title(title)
    .window_size(Size::new(320.0, 640.0))
    .run()
}

fn title(_app: &ControlsApp) -> String {
    String::from("Spectrogram controls")
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenFile,
    FileChosen(Option<PathBuf>),
    SampleRate(String),
    FftExponent(i32),
    ZoomExponent(i32),
    ZoomIn,
    ZoomOut,
    PowerMax(i32),
    PowerMin(i32),
    Cursors(bool),
    Bits(String),
    Reset,
}

#[derive(Debug)]
struct ControlsApp {
    panel: ControlPanel,
    sample_rate_text: String,
    bits_text: String,
}

impl ControlsApp {
    fn new(defaults: PanelDefaults) -> (Self, Task<Message>) {
        let panel = ControlPanel::new(defaults);
        publish(&panel.announce());
        let snapshot = panel.snapshot();
        (
            Self {
                panel,
                sample_rate_text: snapshot.sample_rate.to_string(),
                bits_text: snapshot.bit_divisor.to_string(),
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let is_reset = matches!(message, Message::Reset);
        let event = match message {
            Message::OpenFile => return pick_file(),
            Message::FileChosen(path) => ControlEvent::FileChosen { path },
            Message::SampleRate(value) => {
                self.sample_rate_text = value.clone();
                ControlEvent::SampleRateEdited { text: value }
            }
            Message::FftExponent(exponent) => ControlEvent::FftExponentChanged { exponent },
            Message::ZoomExponent(exponent) => ControlEvent::ZoomExponentChanged { exponent },
            Message::ZoomIn => ControlEvent::ZoomIn,
            Message::ZoomOut => ControlEvent::ZoomOut,
            Message::PowerMax(db) => ControlEvent::PowerMaxChanged { db },
            Message::PowerMin(db) => ControlEvent::PowerMinChanged { db },
            Message::Cursors(enabled) => ControlEvent::CursorsToggled { enabled },
            Message::Bits(value) => {
                // Digits only, like a spin box editor.
                if !value.chars().all(|c| c.is_ascii_digit()) {
                    return Task::none();
                }
                match value.parse() {
                    Ok(bits) => ControlEvent::BitDivisorChanged { bits },
                    Err(_) => {
                        self.bits_text = self.panel.snapshot().bit_divisor.to_string();
                        return Task::none();
                    }
                }
            }
            Message::Reset => ControlEvent::ResetDefaults,
        };

        publish(&self.panel.handle(event));
        let snapshot = self.panel.snapshot();
        // The bits field never shows a value the divisor doesn't hold.
        self.bits_text = snapshot.bit_divisor.to_string();
        if is_reset {
            self.sample_rate_text = snapshot.sample_rate.to_string();
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let s = self.panel.snapshot();
        let labels = self.panel.cursor_labels();

        let file = column![
            button(text("Open file...")).on_press(Message::OpenFile),
            form_row(
                "Sample rate",
                text_input("8000000", &self.sample_rate_text).on_input(Message::SampleRate),
            ),
        ]
        .spacing(8);

        let spectrogram = column![
            section_title("Spectrogram"),
            labeled_slider(
                "FFT size",
                FFT_EXPONENT_RANGE,
                s.fft_exponent,
                format!("{}", s.fft_size),
                Message::FftExponent,
            ),
            labeled_slider(
                "Zoom",
                ZOOM_EXPONENT_RANGE,
                s.zoom_exponent,
                format!("{}", s.zoom_size),
                Message::ZoomExponent,
            ),
            row![
                button(text("-")).on_press(Message::ZoomOut),
                button(text("+")).on_press(Message::ZoomIn),
            ]
            .spacing(8),
            labeled_slider(
                "Power max",
                POWER_RANGE_DB,
                s.power_max,
                format!("{} dB", s.power_max),
                Message::PowerMax,
            ),
            labeled_slider(
                "Power min",
                POWER_RANGE_DB,
                s.power_min,
                format!("{} dB", s.power_min),
                Message::PowerMin,
            ),
        ]
        .spacing(10);

        let selection = column![
            section_title("Time selection"),
            form_row(
                "Enable cursors",
                checkbox(s.cursor_mode == CursorMode::Enabled).on_toggle(Message::Cursors),
            ),
            form_row(
                "Bits",
                text_input("1", &self.bits_text).on_input(Message::Bits),
            ),
            readout("Frequency", &labels.frequency),
            readout("Time", &labels.period),
            readout("Bit frequency", &labels.bit_frequency),
            readout("Bit time", &labels.bit_period),
        ]
        .spacing(8);

        let layout = column![
            file,
            spectrogram,
            selection,
            button(text("Reset")).on_press(Message::Reset),
        ]
        .spacing(16);

        container(scrollable(layout))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(APP_PADDING)
            .into()
    }
}

fn pick_file() -> Task<Message> {
    Task::perform(
        async {
            let dialog = FILE_FILTERS
                .iter()
                .fold(rfd::AsyncFileDialog::new().set_title("Open File"), |d, (name, exts)| {
                    d.add_filter(*name, *exts)
                });
            dialog.pick_file().await.map(|f| f.path().to_path_buf())
        },
        Message::FileChosen,
    )
}

fn publish(notifications: &[Notification]) {
    for notification in notifications {
        info!("[ui] {notification:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> ControlsApp {
        ControlsApp::new(PanelDefaults::default()).0
    }

    #[test]
    fn bits_field_follows_the_clamped_divisor() {
        let mut app = app();
        let _ = app.update(Message::Bits("0".into()));
        assert_eq!(app.bits_text, "1");

        let _ = app.update(Message::Bits("123456".into()));
        assert_eq!(app.bits_text, "9999");
        assert_eq!(app.panel.snapshot().bit_divisor, 9999);
    }

    #[test]
    fn unparsable_bits_restore_the_current_divisor() {
        let mut app = app();
        let _ = app.update(Message::Bits("8".into()));
        let _ = app.update(Message::Bits(String::new()));
        assert_eq!(app.bits_text, "8");

        let _ = app.update(Message::Bits("99999999999".into()));
        assert_eq!(app.bits_text, "8");
    }
}
