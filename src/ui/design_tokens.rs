// SPDX-License-Identifier: MPL-2.0
//! Shared colors, spacing and sizes for all screens.
//!
//! ```
//! use gallery_editor::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let scrim = Color { a: opacity::OVERLAY_STRONG, ..palette::BLACK };
//! assert_eq!(spacing::MD, spacing::XS * 2.0);
//! # let _ = scrim;
//! ```

pub mod palette {
    use iced::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
}

pub mod opacity {
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
}

/// 8px baseline grid.
pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

pub mod sizing {
    pub const TOOLBAR_HEIGHT: f32 = 52.0;
    pub const ACTION_SHEET_WIDTH: f32 = 280.0;
    pub const SWATCH: f32 = 32.0;
    pub const TEXT_ENTRY_WIDTH: f32 = 420.0;
}

pub mod typography {
    pub const TITLE_LG: f32 = 30.0;
    pub const TITLE_MD: f32 = 20.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_increasing() {
        let scale = [spacing::XXS, spacing::XS, spacing::SM, spacing::MD, spacing::LG];
        assert!(scale.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn opacity_levels_are_fractions() {
        for level in [opacity::OVERLAY_SUBTLE, opacity::OVERLAY_MEDIUM, opacity::OVERLAY_STRONG] {
            assert!((0.0..=1.0).contains(&level));
        }
    }
}
