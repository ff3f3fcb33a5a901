// Small layout helpers shared by the panel view

use iced::Length;
use iced::alignment::Vertical;
use iced::widget::text::Wrapping;
use iced::widget::{column, container, row, slider, text};
use std::ops::RangeInclusive;

const LABEL_WIDTH: f32 = 110.0;

pub fn labeled_slider<'a, M: Clone + 'a>(
    label: &'static str,
    range: RangeInclusive<i32>,
    value: i32,
    formatted: String,
    on_change: impl Fn(i32) -> M + 'a,
) -> iced::widget::Column<'a, M> {
    column![
        row![
            container(text(label).size(12).wrapping(Wrapping::None)).clip(true),
            container(text(formatted).size(11).wrapping(Wrapping::None)).clip(true),
        ]
        .spacing(6.0),
        slider::Slider::new(range, value, on_change).step(1),
    ]
    .spacing(8.0)
}

/// A form row: fixed-width caption on the left, arbitrary content on the right.
pub fn form_row<'a, M: 'a>(
    label: &'static str,
    content: impl Into<iced::Element<'a, M>>,
) -> iced::widget::Row<'a, M> {
    row![
        container(text(label).size(12).wrapping(Wrapping::None))
            .width(Length::Fixed(LABEL_WIDTH))
            .clip(true),
        content.into(),
    ]
    .spacing(8.0)
    .align_y(Vertical::Center)
}

pub fn readout<'a, M: 'a>(label: &'static str, value: &'a str) -> iced::widget::Row<'a, M> {
    form_row(label, text(value).size(12))
}

pub fn section_title<'a, M: 'a>(label: &'static str) -> container::Container<'a, M> {
    container(text(label).size(14).wrapping(Wrapping::None)).clip(true)
}
