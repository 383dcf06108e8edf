// SPDX-License-Identifier: MPL-2.0
//! Float assertion helpers shared by unit tests.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

/// Tolerance for geometry computed in f32 (offsets, rectangles).
pub const GEOMETRY_EPSILON: f32 = 1e-3;
