// SPDX-License-Identifier: MPL-2.0
//! Viewer layout: toolbar, zoomable photo, navigation arrows, edit menu and
//! upload status line.

use super::actions;
use super::component::{Message, State, UploadStatus, SCROLLABLE_ID};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use crate::ui::state::zoom::aspect_fit;
use crate::ui::theming::VIEWER_BACKGROUND;
use iced::widget::scrollable::{Direction, Scrollbar, Viewport};
use iced::widget::{
    button, container, image, mouse_area, responsive, text, Column, Container, Row, Scrollable,
    Stack, Text,
};
use iced::{
    alignment::{Horizontal, Vertical},
    mouse, Background, Border, Color, ContentFit, Element, Length, Size, Theme,
};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let ViewContext { i18n, state } = ctx;

    let position = match state.current_index() {
        Some(index) => i18n.tr_with_args(
            "viewer-position",
            &[
                ("current", (index + 1).to_string().as_str()),
                ("total", state.len().to_string().as_str()),
            ],
        ),
        None => String::new(),
    };

    let edit = button(text(i18n.tr("viewer-edit")));
    let edit = if state.display().is_some() {
        edit.on_press(Message::ToggleActions)
    } else {
        edit
    };

    let toolbar = Row::new()
        .spacing(spacing::SM)
        .padding(spacing::XS)
        .height(Length::Fixed(sizing::TOOLBAR_HEIGHT))
        .align_y(Vertical::Center)
        .push(button(text(format!("← {}", i18n.tr("viewer-back")))).on_press(Message::Back))
        .push(
            Container::new(Text::new(position).size(typography::BODY))
                .width(Length::Fill)
                .align_x(Horizontal::Center),
        )
        .push(edit);

    let mut stack = Stack::new().push(photo_surface(i18n, state));

    if state.len() > 1 {
        stack = stack
            .push(arrow(i18n.tr("viewer-previous"), Message::NavigatePrevious, Horizontal::Left))
            .push(arrow(i18n.tr("viewer-next"), Message::NavigateNext, Horizontal::Right));
    }

    if state.actions_open() {
        stack = stack.push(
            Container::new(actions::view(i18n, state.upload_status()))
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(spacing::MD)
                .align_x(Horizontal::Right)
                .align_y(Vertical::Center),
        );
    }

    if let Some(status) = state.upload_status() {
        stack = stack.push(status_line(i18n, status));
    }

    Column::new().push(toolbar).push(stack).into()
}

fn photo_surface<'a>(i18n: &I18n, state: &'a State) -> Element<'a, Message> {
    let content: Element<'a, Message> = if state.display().is_some() {
        responsive(move |viewport: Size| zoomable(state, viewport)).into()
    } else {
        Container::new(Text::new(i18n.tr("viewer-no-image")).color(palette::GRAY_200))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into()
    };

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(VIEWER_BACKGROUND)),
            ..Default::default()
        })
        .into()
}

/// Scrollable canvas `scale` times the viewport with the photo fitted inside.
fn zoomable(state: &State, viewport: Size) -> Element<'_, Message> {
    let Some(data) = state.display() else {
        return Text::new("").into();
    };
    let canvas = state.zoom().content_size(viewport);
    let fitted = aspect_fit(data.width, data.height, canvas);

    let photo = image(data.handle.clone())
        .content_fit(ContentFit::Fill)
        .width(Length::Fixed(fitted.width.max(1.0)))
        .height(Length::Fixed(fitted.height.max(1.0)));
    let photo = Container::new(photo)
        .width(Length::Fixed(canvas.width.max(1.0)))
        .height(Length::Fixed(canvas.height.max(1.0)))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center);

    let scrollable = Scrollable::new(photo)
        .id(iced::widget::Id::new(SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .direction(Direction::Both {
            vertical: Scrollbar::hidden(),
            horizontal: Scrollbar::hidden(),
        })
        .on_scroll(|scrolled: Viewport| Message::Scrolled {
            offset: scrolled.absolute_offset(),
            viewport: scrolled.bounds().size(),
        });

    let interaction = if state.is_dragging() && state.zoom().is_zoomed() {
        mouse::Interaction::Grabbing
    } else if state.zoom().is_zoomed() {
        mouse::Interaction::Grab
    } else {
        mouse::Interaction::default()
    };

    mouse_area(scrollable)
        .on_press(Message::Pressed)
        .on_release(Message::Released)
        .on_double_click(Message::DoubleClicked { viewport })
        .on_move(move |position| Message::CursorMoved { position, viewport })
        .interaction(interaction)
        .into()
}

fn arrow<'a>(glyph: String, message: Message, side: Horizontal) -> Element<'a, Message> {
    let control = button(Text::new(glyph).size(typography::TITLE_LG).color(palette::WHITE))
        .padding(spacing::SM)
        .style(|_theme: &Theme, status| button::Style {
            background: Some(Background::Color(Color {
                a: if matches!(status, button::Status::Hovered) {
                    opacity::OVERLAY_MEDIUM
                } else {
                    opacity::OVERLAY_SUBTLE
                },
                ..palette::BLACK
            })),
            text_color: palette::WHITE,
            border: Border {
                radius: radius::MD.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .on_press(message);

    Container::new(control)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_x(side)
        .align_y(Vertical::Center)
        .into()
}

fn status_line<'a>(i18n: &I18n, status: UploadStatus) -> Element<'a, Message> {
    let (key, color) = match status {
        UploadStatus::InProgress => ("upload-in-progress", palette::WHITE),
        UploadStatus::Succeeded => ("upload-success", palette::SUCCESS_500),
        UploadStatus::Failed => ("upload-failed", palette::ERROR_500),
    };

    let badge = container(Text::new(i18n.tr(key)).size(typography::BODY).color(color))
        .padding(spacing::XS)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            })),
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            ..Default::default()
        });

    Container::new(badge)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::LG)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Bottom)
        .into()
}
