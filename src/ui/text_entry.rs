// SPDX-License-Identifier: MPL-2.0
//! Caption entry screen.
//!
//! Collects the caption text and its color. Saving with blank text does
//! nothing; cancelling returns to the viewer without a caption.

use crate::i18n::fluent::I18n;
use crate::media::TextColor;
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use iced::widget::{button, container, slider, text, text_input, Column, Container, Row, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    Background, Border, Color, Element, Length, Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    text: String,
    color: TextColor,
}

impl State {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn color(&self) -> TextColor {
        self.color
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    TextChanged(String),
    SwatchSelected(TextColor),
    ChannelChanged(Channel, u8),
    Save,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    Completed { text: String, color: TextColor },
    Cancelled,
}

pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::TextChanged(text) => {
            state.text = text;
            Event::None
        }
        Message::SwatchSelected(color) => {
            state.color = color;
            Event::None
        }
        Message::ChannelChanged(channel, value) => {
            match channel {
                Channel::Red => state.color.r = value,
                Channel::Green => state.color.g = value,
                Channel::Blue => state.color.b = value,
            }
            Event::None
        }
        Message::Save => {
            if state.text.trim().is_empty() {
                return Event::None;
            }
            let text = std::mem::take(&mut state.text);
            Event::Completed {
                text,
                color: state.color,
            }
        }
        Message::Cancel => {
            state.text.clear();
            Event::Cancelled
        }
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let state = ctx.state;

    let input = text_input(&i18n.tr("text-placeholder"), &state.text)
        .on_input(Message::TextChanged)
        .on_submit(Message::Save)
        .size(typography::TITLE_MD);

    let swatches = [
        (TextColor::RED, "text-red"),
        (TextColor::GREEN, "text-green"),
        (TextColor::BLUE, "text-blue"),
    ]
    .into_iter()
    .fold(Row::new().spacing(spacing::XS), |row, (color, key)| {
        row.push(swatch(color, i18n.tr(key), color == state.color))
    });

    let sliders = [
        (Channel::Red, state.color.r),
        (Channel::Green, state.color.g),
        (Channel::Blue, state.color.b),
    ]
    .into_iter()
    .fold(Column::new().spacing(spacing::XS), |column, (channel, value)| {
        column.push(
            Row::new()
                .spacing(spacing::SM)
                .align_y(Vertical::Center)
                .push(Text::new(value.to_string()).size(typography::CAPTION).width(Length::Fixed(28.0)))
                .push(slider(0..=255, value, move |value| {
                    Message::ChannelChanged(channel, value)
                })),
        )
    });

    let preview_label = if state.text.is_empty() {
        i18n.tr("text-placeholder")
    } else {
        state.text.clone()
    };
    let preview = Text::new(preview_label)
        .size(typography::TITLE_LG)
        .color(Color::from(state.color));

    let save = button(text(i18n.tr("text-save"))).style(button::primary);
    let save = if state.text.trim().is_empty() {
        save
    } else {
        save.on_press(Message::Save)
    };
    let actions = Row::new()
        .spacing(spacing::SM)
        .push(button(text(i18n.tr("text-cancel"))).style(button::secondary).on_press(Message::Cancel))
        .push(save);

    let content = Column::new()
        .spacing(spacing::MD)
        .width(Length::Fixed(sizing::TEXT_ENTRY_WIDTH))
        .push(Text::new(i18n.tr("text-title")).size(typography::TITLE_MD))
        .push(input)
        .push(Text::new(i18n.tr("text-color")).size(typography::BODY))
        .push(swatches)
        .push(sliders)
        .push(preview)
        .push(actions);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn swatch<'a>(color: TextColor, label: String, selected: bool) -> Element<'a, Message> {
    let fill = Color::from(color);
    let chip = container(Text::new(""))
        .width(Length::Fixed(sizing::SWATCH))
        .height(Length::Fixed(sizing::SWATCH))
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(fill)),
            border: Border {
                radius: radius::MD.into(),
                width: if selected { 2.0 } else { 0.0 },
                color: palette::WHITE,
            },
            ..Default::default()
        });

    button(
        Row::new()
            .spacing(spacing::XS)
            .align_y(Vertical::Center)
            .push(chip)
            .push(Text::new(label).size(typography::BODY)),
    )
    .style(button::text)
    .on_press(Message::SwatchSelected(color))
    .into()
}
