// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Api**: Remote endpoints and request headers
//! - **Upload**: Multipart form values and JPEG compression
//! - **Zoom**: Viewer zoom bounds
//! - **Gallery**: Grid layout
//! - **Editing**: Filter presets and text overlay
//! - **Window**: Initial and minimum window size

// ==========================================================================
// Api Defaults
// ==========================================================================

/// Endpoint returning the JSON array of image records.
pub const DEFAULT_IMAGES_URL: &str = "https://eulerity-hackathon.appspot.com/image";

/// Endpoint returning `{ "url": ... }`, the target for uploads.
pub const DEFAULT_UPLOAD_URL_ENDPOINT: &str = "https://eulerity-hackathon.appspot.com/upload";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("GalleryEditor/", env!("CARGO_PKG_VERSION"));

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Value of the `appid` multipart field.
pub const DEFAULT_APP_ID: &str = "andresliu22";

/// Value of the `Authorization` header attached to uploads.
pub const DEFAULT_AUTHORIZATION: &str = "Client-ID f65203f7020dddc";

/// JPEG quality used when encoding the edited image (0.7 compression ratio).
pub const DEFAULT_JPEG_QUALITY: u8 = 70;

/// Minimum accepted JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum accepted JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Multipart field name carrying the image file.
pub const UPLOAD_FILE_FIELD: &str = "image";

/// MIME type of the uploaded attachment.
pub const UPLOAD_MIME_TYPE: &str = "image/jpeg";

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Viewer scale when an image is opened (aspect fit).
pub const MIN_ZOOM_SCALE: f32 = 1.0;

/// Maximum viewer scale, also the double-click target.
pub const MAX_ZOOM_SCALE: f32 = 6.0;

/// Multiplicative scale change per wheel notch.
pub const WHEEL_ZOOM_FACTOR: f32 = 1.1;

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Number of columns in the gallery grid.
pub const DEFAULT_GRID_COLUMNS: u16 = 3;

/// Minimum number of gallery columns.
pub const MIN_GRID_COLUMNS: u16 = 1;

/// Maximum number of gallery columns.
pub const MAX_GRID_COLUMNS: u16 = 8;

/// Edge length of a gallery cell in logical pixels.
pub const GRID_CELL_SIZE: f32 = 180.0;

// ==========================================================================
// Editing Defaults
// ==========================================================================

/// Intensity passed to the sepia preset.
pub const SEPIA_INTENSITY: f32 = 0.95;

/// Radius passed to the blur preset.
pub const BLUR_RADIUS: f32 = 8.0;

/// Top-left corner of the text overlay, in image pixels.
pub const TEXT_OVERLAY_ORIGIN: (f32, f32) = (20.0, 20.0);

/// Font size of the text overlay, in image pixels.
pub const TEXT_OVERLAY_FONT_SIZE: f32 = 120.0;

/// CSS font weight of the text overlay (semibold).
pub const TEXT_OVERLAY_FONT_WEIGHT: u16 = 600;

// ==========================================================================
// Window Defaults
// ==========================================================================

/// Initial window size in logical pixels.
pub const WINDOW_DEFAULT_SIZE: (f32, f32) = (1024.0, 768.0);

/// Smallest window that still fits the toolbar and edit menu.
pub const WINDOW_MIN_SIZE: (f32, f32) = (480.0, 360.0);
