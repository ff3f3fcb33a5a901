//! iced front end for the control panel.

mod app;
mod widgets;

pub use app::run;
