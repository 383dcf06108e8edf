// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Only the viewer listens to native events: keyboard navigation, modifier
//! tracking for Ctrl+wheel zoom, wheel swipes and the cursor leaving the
//! window.

use super::{Message, Screen};
use crate::ui::viewer;
use iced::{event, keyboard, mouse, Subscription};

/// Creates the event subscription for the current screen.
pub fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Viewer => event::listen_with(|event, status, _window_id| {
            let forward = match &event {
                event::Event::Keyboard(keyboard::Event::KeyPressed { .. }) => {
                    status == event::Status::Ignored
                }
                event::Event::Keyboard(keyboard::Event::ModifiersChanged(_))
                | event::Event::Mouse(mouse::Event::WheelScrolled { .. } | mouse::Event::CursorLeft) => {
                    true
                }
                _ => false,
            };

            forward.then(|| Message::Viewer(viewer::Message::RawEvent(event)))
        }),
        Screen::Gallery | Screen::TextEntry => Subscription::none(),
    }
}
