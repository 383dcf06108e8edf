// SPDX-License-Identifier: MPL-2.0
//! Full-screen photo viewer with zoom, swipe navigation and the edit menu.

pub mod actions;
pub mod component;
pub mod pane;

pub use component::{Action, Event, Message, State, UploadOptions, UploadStatus, SCROLLABLE_ID};
pub use pane::{view, ViewContext};
