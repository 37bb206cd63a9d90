// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared palette and type scale. Both sheets use the same colour for the
// same meaning: warning always marks an outstanding balance, success a
// settled one.

use crate::pdf::canvas::{RgbColor, TextStyle};

/// Named colours used across every document kind.
pub struct Palette;

impl Palette {
    /// Brand accent: title banner border, section titles.
    pub const BRAND: RgbColor = RgbColor::new(0.55, 0.27, 0.07);
    /// Table header bar fill.
    pub const TABLE_HEADER: RgbColor = RgbColor::new(0.20, 0.24, 0.33);
    /// Text drawn on the table header bar.
    pub const HEADER_TEXT: RgbColor = RgbColor::new(1.0, 1.0, 1.0);
    pub const BODY_TEXT: RgbColor = RgbColor::new(0.13, 0.13, 0.13);
    pub const MUTED_TEXT: RgbColor = RgbColor::new(0.45, 0.45, 0.45);
    pub const DIVIDER: RgbColor = RgbColor::new(0.82, 0.82, 0.82);
    pub const BORDER: RgbColor = RgbColor::new(0.65, 0.65, 0.65);
    pub const SUCCESS: RgbColor = RgbColor::new(0.13, 0.55, 0.13);
    pub const WARNING: RgbColor = RgbColor::new(0.85, 0.33, 0.10);
    /// Alternate-row background.
    pub const ZEBRA: RgbColor = RgbColor::new(0.96, 0.96, 0.97);
    /// Payment ledger total row background.
    pub const TOTAL_ROW: RgbColor = RgbColor::new(0.91, 0.93, 0.96);
    /// Watermark fill, faint enough to sit under everything else.
    pub const WATERMARK: RgbColor = RgbColor::new(0.94, 0.92, 0.90);
    /// Placeholder box background.
    pub const PLACEHOLDER: RgbColor = RgbColor::new(0.97, 0.97, 0.97);
}

// -- Type scale ---------------------------------------------------------------

pub const TITLE_SIZE: f32 = 16.0;
pub const SECTION_SIZE: f32 = 10.0;
pub const BODY_SIZE: f32 = 9.0;
pub const TABLE_SIZE: f32 = 8.5;
pub const SMALL_SIZE: f32 = 7.5;
pub const WATERMARK_SIZE: f32 = 60.0;

pub fn body() -> TextStyle {
    TextStyle::regular(BODY_SIZE, Palette::BODY_TEXT)
}

pub fn body_bold() -> TextStyle {
    TextStyle::bold(BODY_SIZE, Palette::BODY_TEXT)
}

pub fn label() -> TextStyle {
    TextStyle::bold(BODY_SIZE, Palette::MUTED_TEXT)
}

pub fn small() -> TextStyle {
    TextStyle::regular(SMALL_SIZE, Palette::MUTED_TEXT)
}

pub fn section_title() -> TextStyle {
    TextStyle::bold(SECTION_SIZE, Palette::BRAND)
}
