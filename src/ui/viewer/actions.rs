// SPDX-License-Identifier: MPL-2.0
//! Edit menu shown over the photo.

use super::component::{Action, Message, UploadStatus};
use crate::i18n::fluent::I18n;
use crate::media::FilterPreset;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use iced::widget::{button, container, text, Column, Text};
use iced::{Background, Border, Color, Element, Length, Theme};

/// Every menu entry in display order.
pub fn entries() -> Vec<Action> {
    FilterPreset::ALL
        .into_iter()
        .map(Action::Filter)
        .chain([Action::AddText, Action::ClearFilters, Action::Save, Action::Cancel])
        .collect()
}

fn label_key(action: Action) -> &'static str {
    match action {
        Action::Filter(preset) => preset.label_key(),
        Action::AddText => "action-add-text",
        Action::ClearFilters => "action-clear",
        Action::Save => "action-save",
        Action::Cancel => "action-cancel",
    }
}

pub fn view<'a>(i18n: &I18n, upload_status: Option<UploadStatus>) -> Element<'a, Message> {
    let uploading = upload_status == Some(UploadStatus::InProgress);

    let menu = entries().into_iter().fold(
        Column::new()
            .spacing(spacing::XXS)
            .push(Text::new(i18n.tr("actions-title")).size(typography::TITLE_MD)),
        |column, action| {
            let style: fn(&Theme, button::Status) -> button::Style = match action {
                Action::Cancel => button::secondary,
                Action::Save => button::success,
                _ => button::primary,
            };
            let entry = button(text(i18n.tr(label_key(action))).size(typography::BODY))
                .width(Length::Fill)
                .style(style);
            let entry = if action == Action::Save && uploading {
                entry
            } else {
                entry.on_press(Message::Action(action))
            };
            column.push(entry)
        },
    );

    container(menu)
        .width(Length::Fixed(sizing::ACTION_SHEET_WIDTH))
        .padding(spacing::MD)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            })),
            border: Border {
                radius: radius::MD.into(),
                ..Default::default()
            },
            text_color: Some(palette::WHITE),
            ..Default::default()
        })
        .into()
}
