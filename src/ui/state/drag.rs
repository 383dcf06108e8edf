// SPDX-License-Identifier: MPL-2.0
//! Grab-and-drag panning of a zoomed image.

use iced::widget::scrollable::AbsoluteOffset;
use iced::{Point, Vector};

/// Cursor position and scroll offset captured when the button went down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    anchor: Option<(Point, AbsoluteOffset)>,
}

impl DragState {
    pub fn begin(&mut self, cursor: Point, offset: AbsoluteOffset) {
        self.anchor = Some((cursor, offset));
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Cursor travel since [`begin`](Self::begin).
    #[must_use]
    pub fn displacement(&self, cursor: Point) -> Option<Vector> {
        let (start, _) = self.anchor?;
        Some(cursor - start)
    }

    /// Offset that keeps the grabbed point under `cursor`.
    ///
    /// Moving the cursor right scrolls the content left. The result is not
    /// clamped; callers clamp against the content size.
    #[must_use]
    pub fn offset_for(&self, cursor: Point) -> Option<AbsoluteOffset> {
        let (start, offset) = self.anchor?;
        Some(AbsoluteOffset {
            x: offset.x - (cursor.x - start.x),
            y: offset.y - (cursor.y - start.y),
        })
    }
}
