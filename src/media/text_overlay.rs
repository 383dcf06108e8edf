// SPDX-License-Identifier: MPL-2.0
//! Burning a caption into an image.
//!
//! The caption is laid out as an SVG `<text>` element the size of the target
//! image, rasterized with resvg and alpha-composited over the pixels. Text
//! starts at [`TEXT_OVERLAY_ORIGIN`] (top-left of the first line) in a large
//! semibold sans-serif face.

use crate::app::config::{TEXT_OVERLAY_FONT_SIZE, TEXT_OVERLAY_FONT_WEIGHT, TEXT_OVERLAY_ORIGIN};
use crate::error::{Error, Result};
use image_rs::{imageops, DynamicImage, GenericImageView, RgbaImage};
use resvg::usvg;
use std::fmt::Write as _;
use std::sync::{Arc, OnceLock};

/// Distance from the top of a line to its baseline, relative to font size.
const ASCENT_RATIO: f32 = 0.8;
const LINE_HEIGHT_RATIO: f32 = 1.2;
const FONT_FAMILIES: &str = "'DejaVu Sans', 'Noto Sans', 'Liberation Sans', Helvetica, Arial, sans-serif";

/// Caption color as 8-bit RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextColor {
    pub const RED: TextColor = TextColor::rgb(255, 0, 0);
    pub const GREEN: TextColor = TextColor::rgb(0, 255, 0);
    pub const BLUE: TextColor = TextColor::rgb(0, 0, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb` form used as the SVG fill.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[must_use]
    pub fn opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::RED
    }
}

impl From<TextColor> for iced::Color {
    fn from(color: TextColor) -> Self {
        iced::Color::from_rgba8(color.r, color.g, color.b, color.opacity())
    }
}

/// Returns a copy of `image` with `text` drawn on top in `color`.
///
/// Blank text leaves the image untouched.
pub fn draw_text(image: &DynamicImage, text: &str, color: TextColor) -> Result<DynamicImage> {
    if text.trim().is_empty() {
        return Ok(image.clone());
    }

    let (width, height) = image.dimensions();
    let svg = overlay_svg(text, color, width, height);
    let layer = rasterize(&svg, width, height)?;
    Ok(composite(image, &layer))
}

/// Builds the SVG document holding the caption.
#[must_use]
pub fn overlay_svg(text: &str, color: TextColor, width: u32, height: u32) -> String {
    let (x, y) = TEXT_OVERLAY_ORIGIN;
    let baseline = y + TEXT_OVERLAY_FONT_SIZE * ASCENT_RATIO;
    let line_height = TEXT_OVERLAY_FONT_SIZE * LINE_HEIGHT_RATIO;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{baseline}" font-family="{FONT_FAMILIES}" font-size="{TEXT_OVERLAY_FONT_SIZE}" font-weight="{TEXT_OVERLAY_FONT_WEIGHT}" fill="{}" fill-opacity="{}" xml:space="preserve">"#,
        color.to_hex(),
        color.opacity(),
    );
    for (index, line) in text.lines().enumerate() {
        let dy = if index == 0 { 0.0 } else { line_height };
        let _ = write!(
            svg,
            r#"<tspan x="{x}" dy="{dy}">{}</tspan>"#,
            escape_xml(line)
        );
    }
    svg.push_str("</text></svg>");
    svg
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// System fonts are scanned once per process.
fn font_database() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "Loaded system fonts for text overlay");
            Arc::new(db)
        })
        .clone()
}

fn rasterize(svg: &str, width: u32, height: u32) -> Result<RgbaImage> {
    let mut options = usvg::Options::default();
    options.fontdb = font_database();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| Error::Image(e.to_string()))?;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Image("Failed to allocate text overlay pixmap".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let pixels: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| Error::Image("Text overlay buffer has unexpected size".into()))
}

/// Alpha-blends `layer` over `base`, anchored at the top-left corner.
fn composite(base: &DynamicImage, layer: &RgbaImage) -> DynamicImage {
    let mut canvas = base.to_rgba8();
    imageops::overlay(&mut canvas, layer, 0, 0);
    DynamicImage::ImageRgba8(canvas)
}
