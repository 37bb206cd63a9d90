// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Advance widths for the PDF base-14 faces the engine draws with.
//
// Values are the AFM widths (1/1000 em) for WinAnsi codes 32..=126. Layout
// centres titles and right-aligns money from these numbers, so they must
// match what the viewer draws.

use couture_core::config::FontFamily;
use printpdf::BuiltinFont;

/// Regular or bold face of the active family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Regular,
    Bold,
}

/// Width used for characters outside printable ASCII. The viewer draws
/// `.notdef` for most of them, which has no reliable advance.
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Both faces of the configured family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSet {
    family: FontFamily,
}

impl FontSet {
    pub fn new(family: FontFamily) -> Self {
        Self { family }
    }

    pub fn family(&self) -> FontFamily {
        self.family
    }

    /// The printpdf built-in face for a role.
    pub fn builtin(&self, role: FontRole) -> BuiltinFont {
        match (self.family, role) {
            (FontFamily::Helvetica, FontRole::Regular) => BuiltinFont::Helvetica,
            (FontFamily::Helvetica, FontRole::Bold) => BuiltinFont::HelveticaBold,
            (FontFamily::Courier, FontRole::Regular) => BuiltinFont::Courier,
            (FontFamily::Courier, FontRole::Bold) => BuiltinFont::CourierBold,
        }
    }

    /// Advance width of one character in 1/1000 em.
    pub fn char_width(&self, role: FontRole, ch: char) -> u16 {
        if self.family == FontFamily::Courier {
            return 600;
        }
        let table = match role {
            FontRole::Regular => &HELVETICA,
            FontRole::Bold => &HELVETICA_BOLD,
        };
        match ch as u32 {
            code @ 32..=126 => table[(code - 32) as usize],
            _ => FALLBACK_WIDTH,
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(&self, role: FontRole, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| self.char_width(role, ch) as u32).sum();
        units as f32 * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_widths_match_afm() {
        let fonts = FontSet::new(FontFamily::Helvetica);
        assert_eq!(fonts.char_width(FontRole::Regular, ' '), 278);
        assert_eq!(fonts.char_width(FontRole::Regular, 'W'), 944);
        assert_eq!(fonts.char_width(FontRole::Regular, 'i'), 222);
        assert_eq!(fonts.char_width(FontRole::Regular, '~'), 584);
        assert_eq!(fonts.char_width(FontRole::Bold, 'i'), 278);
        assert_eq!(fonts.char_width(FontRole::Bold, 'm'), 889);
    }

    #[test]
    fn text_width_scales_with_size() {
        let fonts = FontSet::new(FontFamily::Helvetica);
        // "AB" = 667 + 667 units.
        let w10 = fonts.text_width(FontRole::Regular, "AB", 10.0);
        let w20 = fonts.text_width(FontRole::Regular, "AB", 20.0);
        assert!((w10 - 13.34).abs() < 1e-4);
        assert!((w20 - 2.0 * w10).abs() < 1e-4);
    }

    #[test]
    fn courier_is_monospaced() {
        let fonts = FontSet::new(FontFamily::Courier);
        let w = fonts.text_width(FontRole::Bold, "iiii", 10.0);
        assert!((w - 24.0).abs() < 1e-4);
        assert!(matches!(fonts.builtin(FontRole::Bold), BuiltinFont::CourierBold));
    }

    #[test]
    fn non_ascii_uses_fallback_width() {
        let fonts = FontSet::new(FontFamily::Helvetica);
        assert_eq!(fonts.char_width(FontRole::Regular, 'ß'), FALLBACK_WIDTH);
    }
}
