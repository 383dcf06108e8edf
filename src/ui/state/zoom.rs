// SPDX-License-Identifier: MPL-2.0
//! Zoom and scroll offset of the viewer.
//!
//! The scrollable content is a canvas the size of the viewport multiplied by
//! the scale; the photo is laid out "aspect fit" inside it. At scale 1 the
//! canvas equals the viewport and nothing scrolls.

use crate::app::config::{MAX_ZOOM_SCALE, MIN_ZOOM_SCALE};
use iced::widget::scrollable::AbsoluteOffset;
use iced::{Point, Rectangle, Size};

/// Rectangle of content coordinates (at scale 1) that fills the viewport
/// when zoomed to `scale` around `center`.
#[must_use]
pub fn zoom_rect_for_scale(scale: f32, center: Point, view_size: Size) -> Rectangle {
    let width = view_size.width / scale;
    let height = view_size.height / scale;
    Rectangle {
        x: center.x - width / 2.0,
        y: center.y - height / 2.0,
        width,
        height,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    scale: f32,
    offset: AbsoluteOffset,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            scale: MIN_ZOOM_SCALE,
            offset: AbsoluteOffset { x: 0.0, y: 0.0 },
        }
    }
}

impl ZoomState {
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> AbsoluteOffset {
        self.offset
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.scale > MIN_ZOOM_SCALE + f32::EPSILON
    }

    /// Size of the scrollable canvas for a viewport of `viewport`.
    #[must_use]
    pub fn content_size(&self, viewport: Size) -> Size {
        Size::new(viewport.width * self.scale, viewport.height * self.scale)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records an offset reported by the scrollable.
    pub fn sync_offset(&mut self, offset: AbsoluteOffset) {
        self.offset = offset;
    }

    /// Moves the view to `offset`, clamped to the canvas. Returns the applied offset.
    pub fn pan_to(&mut self, offset: AbsoluteOffset, viewport: Size) -> AbsoluteOffset {
        self.offset = self.clamp(offset, viewport);
        self.offset
    }

    /// Double-click behavior: zoom fully in around `cursor` from the fitted
    /// view, otherwise return to the fitted view.
    ///
    /// `cursor` is relative to the viewport. Returns the new scroll offset.
    pub fn toggle_at(&mut self, cursor: Point, viewport: Size) -> AbsoluteOffset {
        if self.is_zoomed() {
            self.reset();
            return self.offset;
        }

        self.scale = MAX_ZOOM_SCALE;
        let rect = zoom_rect_for_scale(self.scale, cursor, viewport);
        let target = AbsoluteOffset {
            x: rect.x * self.scale,
            y: rect.y * self.scale,
        };
        self.offset = self.clamp(target, viewport);
        self.offset
    }

    /// Multiplies the scale by `factor` (clamped) keeping the content point
    /// under `cursor` fixed. Returns the new scroll offset.
    pub fn zoom_by(&mut self, factor: f32, cursor: Point, viewport: Size) -> AbsoluteOffset {
        if !factor.is_finite() || factor <= 0.0 {
            return self.offset;
        }

        let old_scale = self.scale;
        let new_scale = (old_scale * factor).clamp(MIN_ZOOM_SCALE, MAX_ZOOM_SCALE);
        let focus_x = (self.offset.x + cursor.x) / old_scale;
        let focus_y = (self.offset.y + cursor.y) / old_scale;

        self.scale = new_scale;
        let target = AbsoluteOffset {
            x: focus_x * new_scale - cursor.x,
            y: focus_y * new_scale - cursor.y,
        };
        self.offset = self.clamp(target, viewport);
        self.offset
    }

    fn clamp(&self, offset: AbsoluteOffset, viewport: Size) -> AbsoluteOffset {
        let content = self.content_size(viewport);
        let max_x = (content.width - viewport.width).max(0.0);
        let max_y = (content.height - viewport.height).max(0.0);
        AbsoluteOffset {
            x: offset.x.clamp(0.0, max_x),
            y: offset.y.clamp(0.0, max_y),
        }
    }
}

/// Largest size with the image's aspect ratio that fits inside `bounds`.
#[must_use]
pub fn aspect_fit(image_width: u32, image_height: u32, bounds: Size) -> Size {
    if image_width == 0 || image_height == 0 {
        return Size::ZERO;
    }
    #[allow(clippy::cast_precision_loss)]
    let (width, height) = (image_width as f32, image_height as f32);
    let ratio = (bounds.width / width).min(bounds.height / height);
    Size::new(width * ratio, height * ratio)
}
