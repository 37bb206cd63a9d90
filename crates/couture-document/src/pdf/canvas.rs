// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canvas — absolute-positioned drawing on a fixed-size page.
//
// Coordinates are PDF points with the origin at the bottom-left corner and
// `y` growing upward. The canvas records a display list per page; the
// `PdfWriter` turns it into PDF operators. Text must already be sanitized,
// and nothing here clips or reflows content that runs off the page.

use couture_core::error::{CoutureError, Result};

use crate::image::DecodedImage;
use crate::pdf::metrics::{FontRole, FontSet};

/// A4 width in points.
pub const A4_WIDTH_PT: f32 = 595.28;
/// A4 height in points.
pub const A4_HEIGHT_PT: f32 = 841.89;
/// Uniform inset for page content.
pub const CONTENT_MARGIN_PT: f32 = 40.0;
/// Distance from the top edge to the title band.
pub const TITLE_OFFSET_PT: f32 = 25.0;

// -- Geometry and style values ------------------------------------------------

/// RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Fixed page geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Page {
    /// Validate and build a page.
    pub fn new(width: f32, height: f32, margin: f32) -> Result<Self> {
        let finite = width.is_finite() && height.is_finite() && margin.is_finite();
        if !finite || width <= 0.0 || height <= 0.0 {
            return Err(CoutureError::PageConstruction(format!(
                "invalid page size {width} x {height}"
            )));
        }
        if margin < 0.0 || 2.0 * margin >= width || 2.0 * margin >= height {
            return Err(CoutureError::PageConstruction(format!(
                "margin {margin} leaves no content area on a {width} x {height} page"
            )));
        }
        Ok(Self {
            width,
            height,
            margin,
        })
    }

    /// The A4 page both sheets use.
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH_PT,
            height: A4_HEIGHT_PT,
            margin: CONTENT_MARGIN_PT,
        }
    }

    /// Width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn left(&self) -> f32 {
        self.margin
    }

    pub fn right(&self) -> f32 {
        self.width - self.margin
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// Running vertical position on the page.
///
/// Sections take a cursor and return the cursor below what they drew. It
/// only ever moves down; boxes drawn side by side share one cursor value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    y: f32,
}

impl Cursor {
    pub fn at(y: f32) -> Self {
        Self { y }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// A cursor `dy` points lower.
    pub fn down(self, dy: f32) -> Self {
        debug_assert!(dy >= 0.0, "cursor cannot move up (dy = {dy})");
        Self {
            y: self.y - dy.max(0.0),
        }
    }
}

/// Font, size and colour for one run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub role: FontRole,
    pub size: f32,
    pub color: RgbColor,
}

impl TextStyle {
    pub fn regular(size: f32, color: RgbColor) -> Self {
        Self {
            role: FontRole::Regular,
            size,
            color,
        }
    }

    pub fn bold(size: f32, color: RgbColor) -> Self {
        Self {
            role: FontRole::Bold,
            size,
            color,
        }
    }
}

/// Border and fill for a rectangle. Both are optional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectStyle {
    pub border_color: Option<RgbColor>,
    pub border_width: Option<f32>,
    pub fill_color: Option<RgbColor>,
}

impl RectStyle {
    pub fn filled(color: RgbColor) -> Self {
        Self {
            fill_color: Some(color),
            ..Self::default()
        }
    }

    pub fn bordered(color: RgbColor, width: f32) -> Self {
        Self {
            border_color: Some(color),
            border_width: Some(width),
            fill_color: None,
        }
    }

    pub fn with_fill(mut self, color: RgbColor) -> Self {
        self.fill_color = Some(color);
        self
    }
}

// -- Display list -------------------------------------------------------------

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
        /// Counter-clockwise rotation in degrees about `(x, y)`.
        rotation: Option<f32>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: RgbColor,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        style: RectStyle,
    },
    Image {
        /// Index into [`Canvas::images`].
        image: usize,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

/// Drawing surface bound to one page size.
pub struct Canvas {
    page: Page,
    fonts: FontSet,
    pages: Vec<Vec<DrawOp>>,
    images: Vec<DecodedImage>,
}

impl Canvas {
    /// A canvas with one blank page.
    pub fn new(page: Page, fonts: FontSet) -> Self {
        Self {
            page,
            fonts,
            pages: vec![Vec::new()],
            images: Vec::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Open a new page; later draw calls land on it.
    pub fn start_page(&mut self) {
        self.pages.push(Vec::new());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Recorded operations, one list per page.
    pub fn pages(&self) -> &[Vec<DrawOp>] {
        &self.pages
    }

    /// Images referenced by [`DrawOp::Image`].
    pub fn images(&self) -> &[DecodedImage] {
        &self.images
    }

    fn push(&mut self, op: DrawOp) {
        // `pages` is never empty: `new` seeds one page and nothing removes them.
        if let Some(ops) = self.pages.last_mut() {
            ops.push(op);
        }
    }

    // -- Primitives -----------------------------------------------------------

    /// Draw text with its baseline starting at `(x, y)`.
    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            style,
            rotation: None,
        });
    }

    /// Draw text rotated counter-clockwise by `degrees` about `(x, y)`.
    pub fn draw_text_rotated(&mut self, text: &str, x: f32, y: f32, degrees: f32, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            style,
            rotation: Some(degrees),
        });
    }

    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32, color: RgbColor) {
        self.push(DrawOp::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    /// Rectangle with its bottom-left corner at `(x, y)`.
    pub fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, style: RectStyle) {
        if style.border_color.is_none() && style.fill_color.is_none() {
            return;
        }
        self.push(DrawOp::Rect { x, y, w, h, style });
    }

    /// Place a decoded image scaled into the `w` x `h` box at `(x, y)`.
    pub fn draw_image(&mut self, image: &DecodedImage, x: f32, y: f32, w: f32, h: f32) {
        self.images.push(image.clone());
        let index = self.images.len() - 1;
        self.push(DrawOp::Image {
            image: index,
            x,
            y,
            w,
            h,
        });
    }

    // -- Measurement ----------------------------------------------------------

    /// Exact advance width of `text` in points for the active font metrics.
    pub fn measure_text_width(&self, text: &str, style: TextStyle) -> f32 {
        self.fonts.text_width(style.role, text, style.size)
    }

    /// Draw `text` horizontally centred on `center_x`.
    pub fn draw_text_centered(&mut self, text: &str, center_x: f32, y: f32, style: TextStyle) {
        let width = self.measure_text_width(text, style);
        self.draw_text(text, center_x - width / 2.0, y, style);
    }

    /// Draw `text` so that it ends at `right_x`.
    pub fn draw_text_right(&mut self, text: &str, right_x: f32, y: f32, style: TextStyle) {
        let width = self.measure_text_width(text, style);
        self.draw_text(text, right_x - width, y, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use couture_core::config::FontFamily;

    const BLACK: RgbColor = RgbColor::new(0.0, 0.0, 0.0);

    fn canvas() -> Canvas {
        Canvas::new(Page::a4(), FontSet::new(FontFamily::Helvetica))
    }

    #[test]
    fn a4_content_width() {
        let page = Page::a4();
        assert!((page.content_width() - 515.28).abs() < 1e-3);
        assert_eq!(page.left(), 40.0);
    }

    #[test]
    fn page_rejects_bad_geometry() {
        assert!(Page::new(f32::NAN, 800.0, 40.0).is_err());
        assert!(Page::new(595.28, -1.0, 40.0).is_err());
        assert!(Page::new(100.0, 800.0, 60.0).is_err());
        assert!(Page::new(595.28, 841.89, 40.0).is_ok());
    }

    #[test]
    fn cursor_moves_down_only() {
        let cursor = Cursor::at(800.0).down(25.0).down(0.0);
        assert_eq!(cursor.y(), 775.0);
    }

    #[test]
    fn centered_text_uses_measured_width() {
        let mut canvas = canvas();
        let style = TextStyle::bold(10.0, BLACK);
        let width = canvas.measure_text_width("ORDER", style);
        canvas.draw_text_centered("ORDER", 300.0, 500.0, style);

        match &canvas.pages()[0][0] {
            DrawOp::Text { x, .. } => assert!((x - (300.0 - width / 2.0)).abs() < 1e-4),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn empty_text_and_invisible_rects_are_skipped() {
        let mut canvas = canvas();
        canvas.draw_text("", 10.0, 10.0, TextStyle::regular(9.0, BLACK));
        canvas.draw_rect(0.0, 0.0, 10.0, 10.0, RectStyle::default());
        assert!(canvas.pages()[0].is_empty());
    }

    #[test]
    fn drawing_below_the_page_is_allowed() {
        let mut canvas = canvas();
        canvas.draw_line((40.0, -20.0), (100.0, -20.0), 1.0, BLACK);
        assert_eq!(canvas.pages()[0].len(), 1);
    }

    #[test]
    fn start_page_routes_later_ops() {
        let mut canvas = canvas();
        canvas.draw_text("one", 40.0, 40.0, TextStyle::regular(9.0, BLACK));
        canvas.start_page();
        canvas.draw_text("two", 40.0, 40.0, TextStyle::regular(9.0, BLACK));
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.pages()[1].len(), 1);
    }
}
