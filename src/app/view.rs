// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{Message, Screen};
use crate::i18n::fluent::I18n;
use crate::ui::{gallery, text_entry, viewer};
use iced::{widget::Container, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub gallery: &'a gallery::State,
    pub viewer: Option<&'a viewer::State>,
    pub text_entry: &'a text_entry::State,
}

/// Renders the active screen.
///
/// The viewer screen falls back to the gallery when no viewer state exists.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let current: Element<'_, Message> = match (ctx.screen, ctx.viewer) {
        (Screen::Viewer, Some(state)) => viewer::view(viewer::ViewContext {
            i18n: ctx.i18n,
            state,
        })
        .map(Message::Viewer),
        (Screen::TextEntry, _) => text_entry::view(text_entry::ViewContext {
            i18n: ctx.i18n,
            state: ctx.text_entry,
        })
        .map(Message::TextEntry),
        _ => gallery::view(gallery::ViewContext {
            i18n: ctx.i18n,
            state: ctx.gallery,
        })
        .map(Message::Gallery),
    };

    Container::new(current)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
