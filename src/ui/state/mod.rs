// SPDX-License-Identifier: MPL-2.0
//! Viewer interaction state kept outside the widgets.

pub mod drag;
pub mod zoom;

pub use drag::DragState;
pub use zoom::{zoom_rect_for_scale, ZoomState};
