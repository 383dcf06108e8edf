// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! exposes `update` returning an `Event` for the parent and a `view` taking a
//! `ViewContext`.
//!
//! # Screens
//!
//! - [`gallery`] - Grid of remote photos
//! - [`viewer`] - Full-screen photo with zoom, swipe navigation and the edit menu
//! - [`text_entry`] - Caption text and color picker
//!
//! # Shared Infrastructure
//!
//! - [`state`] - Zoom and drag state
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod gallery;
pub mod state;
pub mod text_entry;
pub mod theming;
pub mod viewer;
