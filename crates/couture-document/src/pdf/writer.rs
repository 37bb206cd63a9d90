// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — serialise a canvas display list with `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. printpdf rounds page boxes to whole points, so the
// saved bytes are reopened with `lopdf` and the boxes rewritten exactly.

use couture_core::error::{CoutureError, Result};
use lopdf::{Document, Object};
use printpdf::{
    Color, Line, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg,
    Point, Polygon, PolygonRing, Pt, RawImage, RawImageData, RawImageFormat, Rgb, TextItem,
    TextMatrix, WindingOrder, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument};

use crate::pdf::canvas::{Canvas, DrawOp, RectStyle, RgbColor, TextStyle};
use crate::pdf::metrics::FontSet;

/// Millimetres per PDF point.
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Serialises a finished [`Canvas`] into PDF bytes.
pub struct PdfWriter {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

impl PdfWriter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Encode every page of `canvas`.
    #[instrument(skip_all, fields(title = %self.title, pages = canvas.page_count()))]
    pub fn encode(&self, canvas: &Canvas) -> Result<Vec<u8>> {
        let page = canvas.page();
        let page_w = Mm(page.width * MM_PER_PT);
        let page_h = Mm(page.height * MM_PER_PT);

        let mut doc = PdfDocument::new(&self.title);

        let image_ids: Vec<XObjectId> = canvas
            .images()
            .iter()
            .map(|image| {
                let raw = RawImage {
                    pixels: RawImageData::U8(image.rgb.clone()),
                    width: image.width as usize,
                    height: image.height as usize,
                    data_format: RawImageFormat::RGB8,
                    tag: Vec::new(),
                };
                doc.add_image(&raw)
            })
            .collect();

        let fonts = canvas.fonts();
        let pages: Vec<PdfPage> = canvas
            .pages()
            .iter()
            .map(|draw_ops| {
                let mut ops = Vec::with_capacity(draw_ops.len() * 6);
                for op in draw_ops {
                    emit(&mut ops, op, fonts, canvas, &image_ids);
                }
                PdfPage::new(page_w, page_h, ops)
            })
            .collect();

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        debug!(warnings = warnings.len(), "printpdf save finished");

        let output = set_page_boxes(&output, page.width, page.height)?;
        info!(bytes = output.len(), "PDF encoded");
        Ok(output)
    }
}

/// Rewrite `/MediaBox`, `/CropBox` and `/TrimBox` on every page as
/// `[0 0 width height]` in real numbers.
fn set_page_boxes(bytes: &[u8], width: f32, height: f32) -> Result<Vec<u8>> {
    let pdf_err = |what: &str, err: lopdf::Error| CoutureError::Pdf(format!("{what}: {err}"));

    let mut doc = Document::load_mem(bytes).map_err(|e| pdf_err("failed to reopen PDF", e))?;
    let page_ids: Vec<_> = doc.get_pages().into_values().collect();
    for id in page_ids {
        let dict = doc
            .get_object_mut(id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| pdf_err("page is not a dictionary", e))?;
        for key in ["MediaBox", "CropBox", "TrimBox"] {
            dict.set(
                key,
                Object::Array(vec![
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(width),
                    Object::Real(height),
                ]),
            );
        }
    }

    let mut out = Vec::with_capacity(bytes.len());
    doc.save_to(&mut out)
        .map_err(|e| CoutureError::Pdf(format!("failed to write PDF: {e}")))?;
    Ok(out)
}

fn color(c: RgbColor) -> Color {
    Color::Rgb(Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
        icc_profile: None,
    })
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn emit(ops: &mut Vec<Op>, op: &DrawOp, fonts: &FontSet, canvas: &Canvas, image_ids: &[XObjectId]) {
    match op {
        DrawOp::Text {
            text,
            x,
            y,
            style,
            rotation,
        } => emit_text(ops, text, *x, *y, *style, *rotation, fonts),

        DrawOp::Line {
            from,
            to,
            thickness,
            color: c,
        } => {
            ops.push(Op::SaveGraphicsState);
            ops.push(Op::SetOutlineColor { col: color(*c) });
            ops.push(Op::SetOutlineThickness { pt: Pt(*thickness) });
            ops.push(Op::DrawLine {
                line: Line {
                    points: vec![point(from.0, from.1), point(to.0, to.1)],
                    is_closed: false,
                },
            });
            ops.push(Op::RestoreGraphicsState);
        }

        DrawOp::Rect { x, y, w, h, style } => emit_rect(ops, *x, *y, *w, *h, style),

        DrawOp::Image { image, x, y, w, h } => {
            let (Some(id), Some(decoded)) = (image_ids.get(*image), canvas.images().get(*image))
            else {
                return;
            };
            if decoded.width == 0 || decoded.height == 0 {
                return;
            }
            // At 72 dpi one pixel is one point, so the scale maps pixels to the box.
            ops.push(Op::UseXobject {
                id: id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(*x)),
                    translate_y: Some(Pt(*y)),
                    scale_x: Some(*w / decoded.width as f32),
                    scale_y: Some(*h / decoded.height as f32),
                    dpi: Some(72.0),
                    rotate: None,
                },
            });
        }
    }
}

fn emit_text(
    ops: &mut Vec<Op>,
    text: &str,
    x: f32,
    y: f32,
    style: TextStyle,
    rotation: Option<f32>,
    fonts: &FontSet,
) {
    let font = fonts.builtin(style.role);
    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetFillColor {
        col: color(style.color),
    });
    ops.push(Op::StartTextSection);
    match rotation {
        Some(degrees) => ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::TranslateRotate(Pt(x), Pt(y), degrees),
        }),
        None => ops.push(Op::SetTextCursor {
            pos: Point { x: Pt(x), y: Pt(y) },
        }),
    }
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(style.size),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font,
    });
    ops.push(Op::EndTextSection);
    ops.push(Op::RestoreGraphicsState);
}

fn emit_rect(ops: &mut Vec<Op>, x: f32, y: f32, w: f32, h: f32, style: &RectStyle) {
    let mode = match (style.fill_color, style.border_color) {
        (Some(_), Some(_)) => PaintMode::FillStroke,
        (Some(_), None) => PaintMode::Fill,
        (None, Some(_)) => PaintMode::Stroke,
        (None, None) => return,
    };

    ops.push(Op::SaveGraphicsState);
    if let Some(fill) = style.fill_color {
        ops.push(Op::SetFillColor { col: color(fill) });
    }
    if let Some(border) = style.border_color {
        ops.push(Op::SetOutlineColor { col: color(border) });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(style.border_width.unwrap_or(1.0)),
        });
    }
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    point(x, y),
                    point(x + w, y),
                    point(x + w, y + h),
                    point(x, y + h),
                ],
            }],
            mode,
            winding_order: WindingOrder::NonZero,
        },
    });
    ops.push(Op::RestoreGraphicsState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::DecodedImage;
    use crate::pdf::canvas::Page;
    use crate::pdf::reader::PdfInspector;
    use couture_core::config::FontFamily;

    const INK: RgbColor = RgbColor::new(0.1, 0.1, 0.1);

    #[test]
    fn encodes_single_a4_page() {
        let mut canvas = Canvas::new(Page::a4(), FontSet::new(FontFamily::Helvetica));
        canvas.draw_text("Hello", 40.0, 800.0, TextStyle::regular(12.0, INK));
        canvas.draw_rect(40.0, 700.0, 100.0, 50.0, RectStyle::bordered(INK, 1.0).with_fill(INK));
        canvas.draw_line((40.0, 690.0), (140.0, 690.0), 0.5, INK);
        canvas.draw_text_rotated("MARK", 200.0, 300.0, 45.0, TextStyle::bold(60.0, INK));

        let bytes = PdfWriter::new("test").encode(&canvas).expect("encode");
        assert!(bytes.starts_with(b"%PDF"));

        let inspector = PdfInspector::from_bytes(&bytes).expect("valid pdf");
        assert_eq!(inspector.page_count(), 1);
        let (w, h) = inspector.media_box(1).expect("media box");
        assert!((w - 595.28).abs() < 0.01, "width {w}");
        assert!((h - 841.89).abs() < 0.01, "height {h}");
    }

    #[test]
    fn every_page_box_is_exact_a4() {
        let mut canvas = Canvas::new(Page::a4(), FontSet::new(FontFamily::Helvetica));
        canvas.draw_text("one", 40.0, 800.0, TextStyle::regular(10.0, INK));
        canvas.start_page();
        canvas.draw_text("two", 40.0, 800.0, TextStyle::regular(10.0, INK));

        let bytes = PdfWriter::new("boxes").encode(&canvas).expect("encode");
        let doc = Document::load_mem(&bytes).expect("lopdf parse");
        for (number, id) in doc.get_pages() {
            let page = doc.get_dictionary(id).expect("page dict");
            for key in [&b"MediaBox"[..], b"CropBox", b"TrimBox"] {
                let values = page.get(key).and_then(Object::as_array).expect("box array");
                let nums: Vec<f32> = values.iter().filter_map(|v| v.as_float().ok()).collect();
                assert_eq!(nums.len(), 4, "page {number}");
                assert!((nums[2] - 595.28).abs() < 0.01, "page {number} width {}", nums[2]);
                assert!((nums[3] - 841.89).abs() < 0.01, "page {number} height {}", nums[3]);
            }
        }
    }

    #[test]
    fn encodes_images_and_extra_pages() {
        let mut canvas = Canvas::new(Page::a4(), FontSet::new(FontFamily::Helvetica));
        let image = DecodedImage {
            width: 2,
            height: 2,
            rgb: vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255],
        };
        canvas.draw_image(&image, 40.0, 700.0, 90.0, 100.0);
        canvas.start_page();
        canvas.draw_text("page two", 40.0, 800.0, TextStyle::regular(10.0, INK));

        let bytes = PdfWriter::new("test").encode(&canvas).expect("encode");
        let inspector = PdfInspector::from_bytes(&bytes).expect("valid pdf");
        assert_eq!(inspector.page_count(), 2);
    }
}
