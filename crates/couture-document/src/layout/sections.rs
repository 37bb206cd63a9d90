// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Section composer — the fixed blocks shared by every sheet: watermark,
// title banner, header row, info boxes, card rows, notes, and footer.
//
// Each block takes the current cursor and returns the cursor below itself.
// Images arrive already resolved; a missing one is replaced here by a text
// label (logo) or a labelled placeholder box (photo).

use chrono::NaiveDateTime;
use couture_core::config::OverflowPolicy;
use tracing::debug;

use crate::image::DecodedImage;
use crate::layout::style::{self, Palette, BODY_SIZE, TITLE_SIZE, WATERMARK_SIZE};
use crate::pdf::canvas::{Canvas, Cursor, Page, RectStyle, RgbColor, TextStyle, TITLE_OFFSET_PT};
use crate::text::format::{char_budget, truncate_chars, wrap_to_width};

/// Horizontal padding either side of the title text.
pub const TITLE_PADDING: f32 = 20.0;
pub const TITLE_BOX_HEIGHT: f32 = 24.0;
/// Height of the logo/photo header row.
pub const HEADER_ROW_HEIGHT: f32 = 100.0;
pub const LOGO_BOX: (f32, f32) = (140.0, 60.0);
pub const PHOTO_BOX: (f32, f32) = (90.0, 100.0);
pub const INFO_BOX_WIDTH: f32 = 200.0;
/// Gap left between neighbouring boxes and after each section.
pub const BOX_GAP: f32 = 8.0;
/// Height of a section title band inside a box.
pub const BOX_TITLE_HEIGHT: f32 = 14.0;
/// Height of one label/value line inside an info box.
pub const INFO_LINE_HEIGHT: f32 = 14.0;
pub const CARD_HEIGHT: f32 = 38.0;
/// Height of one wrapped notes line.
pub const NOTES_LINE_HEIGHT: f32 = 12.0;
/// Footer lines sit inside the bottom margin, this far apart.
pub const FOOTER_LINE_GAP: f32 = 12.0;
/// Space kept clear above the footer divider.
pub const FOOTER_CLEARANCE: f32 = 4.0;

const INNER_PADDING: f32 = 4.0;

/// Whether an asset slot shows the real image or its fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPlacement {
    Image,
    Fallback,
}

/// Draw `image` scaled to fit inside the box, centred, keeping its aspect.
fn draw_image_fit(canvas: &mut Canvas, image: &DecodedImage, x: f32, y: f32, w: f32, h: f32) {
    if image.width == 0 || image.height == 0 {
        return;
    }
    let scale = (w / image.width as f32).min(h / image.height as f32);
    let draw_w = image.width as f32 * scale;
    let draw_h = image.height as f32 * scale;
    canvas.draw_image(
        image,
        x + (w - draw_w) / 2.0,
        y + (h - draw_h) / 2.0,
        draw_w,
        draw_h,
    );
}

// -- Watermark and title ------------------------------------------------------

/// Faint brand name rotated 45° across the page centre. Drawn first so the
/// rest of the page covers it.
pub fn draw_watermark(canvas: &mut Canvas, brand: &str) {
    let style = TextStyle::bold(WATERMARK_SIZE, Palette::WATERMARK);
    let width = canvas.measure_text_width(brand, style);
    let page = *canvas.page();
    let (sin, cos) = 45f32.to_radians().sin_cos();
    let start_x = page.center_x() - width / 2.0 * cos;
    let start_y = page.height / 2.0 - width / 2.0 * sin;
    canvas.draw_text_rotated(brand, start_x, start_y, 45.0, style);
}

/// Lowest y any body section may reach: the footer divider plus its
/// clearance.
pub fn content_floor(page: &Page) -> f32 {
    page.margin + FOOTER_CLEARANCE
}

/// The cursor every document starts from: the top of the title band.
pub fn first_cursor(canvas: &Canvas) -> Cursor {
    Cursor::at(canvas.page().height - TITLE_OFFSET_PT)
}

/// Bordered title box sized to its text and centred horizontally.
pub fn draw_title_banner(canvas: &mut Canvas, cursor: Cursor, title: &str) -> Cursor {
    let style = TextStyle::bold(TITLE_SIZE, Palette::BRAND);
    let text_width = canvas.measure_text_width(title, style);
    let box_width = text_width + 2.0 * TITLE_PADDING;
    let center = canvas.page().center_x();
    let bottom = cursor.y() - TITLE_BOX_HEIGHT;

    canvas.draw_rect(
        center - box_width / 2.0,
        bottom,
        box_width,
        TITLE_BOX_HEIGHT,
        RectStyle::bordered(Palette::BRAND, 1.5),
    );
    canvas.draw_text(
        title,
        center - text_width / 2.0,
        bottom + (TITLE_BOX_HEIGHT - TITLE_SIZE * 0.7) / 2.0,
        style,
    );
    cursor.down(TITLE_BOX_HEIGHT + BOX_GAP)
}

// -- Header row ---------------------------------------------------------------

/// Right-hand side of the header row.
pub enum HeaderSide<'a> {
    /// Customer photo, or a placeholder when it could not be loaded.
    Photo(Option<&'a DecodedImage>),
    /// Bordered box of label/value lines.
    Info(&'a [(String, String)]),
}

/// What the header row placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderOutcome {
    pub cursor: Cursor,
    pub logo: AssetPlacement,
    /// `None` when the right side is an info box.
    pub photo: Option<AssetPlacement>,
}

/// Logo on the left, photo or info box on the right, both hanging from the
/// same top line.
pub fn draw_header(
    canvas: &mut Canvas,
    cursor: Cursor,
    brand: &str,
    logo: Option<&DecodedImage>,
    side: HeaderSide<'_>,
) -> HeaderOutcome {
    let page = *canvas.page();
    let top = cursor.y();

    let logo_placement = match logo {
        Some(image) => {
            draw_image_fit(canvas, image, page.left(), top - LOGO_BOX.1, LOGO_BOX.0, LOGO_BOX.1);
            AssetPlacement::Image
        }
        None => {
            let style = TextStyle::bold(TITLE_SIZE, Palette::BRAND);
            let fitted = truncate_chars(brand, char_budget(LOGO_BOX.0 * 1.6, TITLE_SIZE));
            canvas.draw_text(&fitted, page.left(), top - TITLE_SIZE, style);
            AssetPlacement::Fallback
        }
    };

    let photo = match side {
        HeaderSide::Photo(image) => {
            let (w, h) = PHOTO_BOX;
            let x = page.right() - w;
            let y = top - h;
            Some(match image {
                Some(image) => {
                    draw_image_fit(canvas, image, x, y, w, h);
                    canvas.draw_rect(x, y, w, h, RectStyle::bordered(Palette::BORDER, 0.8));
                    AssetPlacement::Image
                }
                None => {
                    canvas.draw_rect(
                        x,
                        y,
                        w,
                        h,
                        RectStyle::bordered(Palette::BORDER, 0.8).with_fill(Palette::PLACEHOLDER),
                    );
                    canvas.draw_text_centered(
                        "PHOTO",
                        x + w / 2.0,
                        y + h / 2.0 - BODY_SIZE * 0.35,
                        style::label(),
                    );
                    AssetPlacement::Fallback
                }
            })
        }
        HeaderSide::Info(lines) => {
            let x = page.right() - INFO_BOX_WIDTH;
            let y = top - HEADER_ROW_HEIGHT;
            canvas.draw_rect(
                x,
                y,
                INFO_BOX_WIDTH,
                HEADER_ROW_HEIGHT,
                RectStyle::bordered(Palette::BORDER, 0.8),
            );
            let label_width = INFO_BOX_WIDTH * 0.42;
            for (idx, (label, value)) in lines.iter().enumerate() {
                let baseline = top - INNER_PADDING - (idx + 1) as f32 * INFO_LINE_HEIGHT + 4.0;
                if baseline < y + INNER_PADDING {
                    break;
                }
                canvas.draw_text(label, x + INNER_PADDING, baseline, style::label());
                let room = INFO_BOX_WIDTH - label_width - INNER_PADDING;
                let value = truncate_chars(value, char_budget(room, BODY_SIZE));
                canvas.draw_text(&value, x + label_width, baseline, style::body_bold());
            }
            None
        }
    };

    debug!(?logo_placement, ?photo, "header drawn");
    HeaderOutcome {
        cursor: cursor.down(HEADER_ROW_HEIGHT + BOX_GAP),
        logo: logo_placement,
        photo,
    }
}

// -- Info boxes ---------------------------------------------------------------

fn draw_box_title(canvas: &mut Canvas, x: f32, top: f32, title: &str) {
    canvas.draw_text(
        title,
        x + INNER_PADDING,
        top - BOX_TITLE_HEIGHT + 4.0,
        style::section_title(),
    );
}

/// Bordered box of plain rows: label, colon, an underline rule, and the value
/// written on the rule.
pub fn draw_info_rows(
    canvas: &mut Canvas,
    cursor: Cursor,
    title: &str,
    rows: &[(String, String)],
) -> Cursor {
    let page = *canvas.page();
    let width = page.content_width();
    let height = BOX_TITLE_HEIGHT + rows.len() as f32 * INFO_LINE_HEIGHT + INNER_PADDING;
    let top = cursor.y();
    let left = page.left();

    canvas.draw_rect(left, top - height, width, height, RectStyle::bordered(Palette::BORDER, 0.8));
    draw_box_title(canvas, left, top, title);

    let label_width = 110.0;
    let rule_start = left + INNER_PADDING + label_width;
    let rule_end = left + width - INNER_PADDING;
    for (idx, (label, value)) in rows.iter().enumerate() {
        let baseline = top - BOX_TITLE_HEIGHT - (idx + 1) as f32 * INFO_LINE_HEIGHT + 5.0;
        canvas.draw_text(&format!("{label}:"), left + INNER_PADDING, baseline, style::label());
        canvas.draw_line(
            (rule_start, baseline - 2.0),
            (rule_end, baseline - 2.0),
            0.4,
            Palette::DIVIDER,
        );
        let value = truncate_chars(value, char_budget(rule_end - rule_start - 4.0, BODY_SIZE));
        canvas.draw_text(&value, rule_start + 4.0, baseline, style::body());
    }

    cursor.down(height + BOX_GAP)
}

/// One label/value cell of a grid or card row.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoCell {
    pub label: String,
    pub value: String,
    /// Overrides the body colour of the value (e.g. warning for a balance).
    pub color: Option<RgbColor>,
}

impl InfoCell {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: None,
        }
    }

    pub fn colored(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// Width of one of `n` side-by-side columns across `table_width`.
pub fn grid_column_width(table_width: f32, n: usize) -> f32 {
    table_width / n.max(1) as f32 - BOX_GAP
}

/// Titled box with `cells` laid out row-major in `columns` fixed-width
/// columns.
pub fn draw_grid_box(
    canvas: &mut Canvas,
    cursor: Cursor,
    title: &str,
    columns: usize,
    cells: &[InfoCell],
) -> Cursor {
    let page = *canvas.page();
    let columns = columns.max(1);
    let width = page.content_width();
    let rows = cells.len().div_ceil(columns);
    let height = BOX_TITLE_HEIGHT + rows as f32 * INFO_LINE_HEIGHT + INNER_PADDING;
    let top = cursor.y();
    let left = page.left();
    let column_width = grid_column_width(width, columns);

    canvas.draw_rect(left, top - height, width, height, RectStyle::bordered(Palette::BORDER, 0.8));
    draw_box_title(canvas, left, top, title);

    for (idx, cell) in cells.iter().enumerate() {
        let row = idx / columns;
        let col = idx % columns;
        let x = left + INNER_PADDING + col as f32 * (column_width + BOX_GAP);
        let baseline = top - BOX_TITLE_HEIGHT - (row + 1) as f32 * INFO_LINE_HEIGHT + 5.0;

        let label = format!("{}: ", cell.label);
        let label_width = canvas.measure_text_width(&label, style::label());
        canvas.draw_text(&label, x, baseline, style::label());
        let room = column_width - label_width - INNER_PADDING;
        let value = truncate_chars(&cell.value, char_budget(room, BODY_SIZE));
        let value_style = TextStyle::regular(BODY_SIZE, cell.color.unwrap_or(Palette::BODY_TEXT));
        canvas.draw_text(&value, x + label_width, baseline, value_style);
    }

    cursor.down(height + BOX_GAP)
}

/// Titled row of equal cards (date cards, financial summary), label above a
/// bold value.
pub fn draw_card_row(canvas: &mut Canvas, cursor: Cursor, title: &str, cards: &[InfoCell]) -> Cursor {
    let page = *canvas.page();
    let left = page.left();
    let top = cursor.y();

    canvas.draw_text(title, left, top - SECTION_TITLE_DROP, style::section_title());
    let cards_top = top - BOX_TITLE_HEIGHT;
    let card_width = grid_column_width(page.content_width(), cards.len());
    // Spread the trailing gap so the last card ends on the right margin.
    let spacing = if cards.len() > 1 {
        (page.content_width() - card_width * cards.len() as f32) / (cards.len() - 1) as f32
    } else {
        0.0
    };

    for (idx, card) in cards.iter().enumerate() {
        let x = left + idx as f32 * (card_width + spacing);
        let bottom = cards_top - CARD_HEIGHT;
        canvas.draw_rect(
            x,
            bottom,
            card_width,
            CARD_HEIGHT,
            RectStyle::bordered(Palette::BORDER, 0.8),
        );
        let label = truncate_chars(&card.label, char_budget(card_width - 2.0 * INNER_PADDING, style::SMALL_SIZE));
        canvas.draw_text(&label, x + INNER_PADDING, cards_top - 13.0, style::small());
        let value_style = TextStyle::bold(style::SECTION_SIZE, card.color.unwrap_or(Palette::BODY_TEXT));
        let value = truncate_chars(&card.value, char_budget(card_width - 2.0 * INNER_PADDING, style::SECTION_SIZE));
        canvas.draw_text(&value, x + INNER_PADDING, bottom + 8.0, value_style);
    }

    cursor.down(BOX_TITLE_HEIGHT + CARD_HEIGHT + BOX_GAP)
}

/// Baseline drop of a free-standing section title below the cursor.
pub const SECTION_TITLE_DROP: f32 = 11.0;

/// Free-standing section title above a table.
pub fn draw_section_title(canvas: &mut Canvas, cursor: Cursor, title: &str) -> Cursor {
    let left = canvas.page().left();
    canvas.draw_text(title, left, cursor.y() - SECTION_TITLE_DROP, style::section_title());
    cursor.down(BOX_TITLE_HEIGHT)
}

// -- Notes --------------------------------------------------------------------

/// What the notes box printed.
#[derive(Debug, Clone, PartialEq)]
pub struct NotesOutcome {
    pub cursor: Cursor,
    /// Lines printed inside the box.
    pub drawn: Vec<String>,
    /// Lines beyond the cap. Empty unless the policy is `Paginate`; under
    /// `Truncate` they are discarded.
    pub carried_over: Vec<String>,
    /// Number of wrapped lines that did not fit the box.
    pub overflow_lines: usize,
}

/// Height of a notes box holding `lines` lines.
pub fn notes_box_height(lines: usize) -> f32 {
    BOX_TITLE_HEIGHT + lines as f32 * NOTES_LINE_HEIGHT + INNER_PADDING
}

/// Wrap notes to the rendered width of a box `width` points wide.
pub fn wrap_notes(canvas: &Canvas, notes: &str, width: f32) -> Vec<String> {
    let room = width - 2.0 * INNER_PADDING;
    wrap_to_width(notes, room, |line| canvas.measure_text_width(line, style::body()))
}

/// Notes box holding at most `line_cap` wrapped lines.
///
/// The box never reaches below `floor`: it loses lines until it fits, and is
/// left out entirely when not even one line fits. Lines that were not drawn
/// count as overflow.
pub fn draw_notes(
    canvas: &mut Canvas,
    cursor: Cursor,
    notes: &str,
    line_cap: usize,
    policy: OverflowPolicy,
    floor: f32,
) -> NotesOutcome {
    let page = *canvas.page();
    let width = page.content_width();
    let left = page.left();
    let top = cursor.y();

    let room = ((top - floor - notes_box_height(0)) / NOTES_LINE_HEIGHT).floor();
    let cap = line_cap.min(room.max(0.0) as usize);

    let mut lines = wrap_notes(canvas, notes, width);
    let overflow = lines.split_off(lines.len().min(cap));

    let cursor = if cap == 0 {
        debug!(top, floor, "no room for the notes box");
        cursor
    } else {
        let height = notes_box_height(cap);
        canvas.draw_rect(left, top - height, width, height, RectStyle::bordered(Palette::BORDER, 0.8));
        draw_box_title(canvas, left, top, "NOTES");
        for (idx, line) in lines.iter().enumerate() {
            let baseline = top - BOX_TITLE_HEIGHT - (idx + 1) as f32 * NOTES_LINE_HEIGHT + 3.0;
            canvas.draw_text(line, left + INNER_PADDING, baseline, style::body());
        }
        cursor.down(height + BOX_GAP)
    };

    if !overflow.is_empty() {
        debug!(dropped = overflow.len(), cap, ?policy, "notes exceed the box");
    }
    let overflow_lines = overflow.len();
    NotesOutcome {
        cursor,
        drawn: lines,
        carried_over: match policy {
            OverflowPolicy::Truncate => Vec::new(),
            OverflowPolicy::Paginate => overflow,
        },
        overflow_lines,
    }
}

/// Open a continuation page and print the notes lines that did not fit.
/// Returns how many lines were printed; lines past the footer are cut.
pub fn draw_notes_continuation(canvas: &mut Canvas, lines: &[String]) -> usize {
    canvas.start_page();
    let page = *canvas.page();
    let top = first_cursor(canvas).y();
    let room = ((top - content_floor(&page) - notes_box_height(0)) / NOTES_LINE_HEIGHT).floor();
    let count = lines.len().min(room.max(0.0) as usize);
    let height = notes_box_height(count);

    canvas.draw_rect(
        page.left(),
        top - height,
        page.content_width(),
        height,
        RectStyle::bordered(Palette::BORDER, 0.8),
    );
    draw_box_title(canvas, page.left(), top, "NOTES (CONTINUED)");
    for (idx, line) in lines.iter().take(count).enumerate() {
        let baseline = top - BOX_TITLE_HEIGHT - (idx + 1) as f32 * NOTES_LINE_HEIGHT + 3.0;
        canvas.draw_text(line, page.left() + INNER_PADDING, baseline, style::body());
    }
    count
}

// -- Footer -------------------------------------------------------------------

/// Divider on the bottom margin, then the centred contact line, then
/// "Prepared by" on the left and the generation time on the right.
pub fn draw_footer(
    canvas: &mut Canvas,
    contact_line: &str,
    prepared_by: Option<&str>,
    generated_at: NaiveDateTime,
) {
    let page = *canvas.page();
    let divider_y = page.margin;
    let base = divider_y - 2.0 * FOOTER_LINE_GAP;

    canvas.draw_line((page.left(), divider_y), (page.right(), divider_y), 0.6, Palette::DIVIDER);
    if !contact_line.is_empty() {
        canvas.draw_text_centered(contact_line, page.center_x(), divider_y - FOOTER_LINE_GAP, style::small());
    }
    if let Some(name) = prepared_by.filter(|n| !n.trim().is_empty()) {
        canvas.draw_text(&format!("Prepared by: {name}"), page.left(), base, style::small());
    }
    let stamp = format!("Generated {}", generated_at.format("%d/%m/%Y %H:%M"));
    canvas.draw_text_right(&stamp, page.right(), base, style::small());
}
