// SPDX-License-Identifier: MPL-2.0
//! Screens the user moves between.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Gallery,
    Viewer,
    TextEntry,
}
