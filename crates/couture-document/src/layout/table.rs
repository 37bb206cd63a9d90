// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Table renderer — bordered, zebra-striped tables with fixed-height standard
// rows and taller "expanded" rows whose value area holds several labelled
// sub-fields, two per line.
//
// Rows are drawn top-down from the incoming cursor; the returned cursor sits
// just under the outer border. Cell text that does not fit is cut without an
// ellipsis.

use couture_core::config::CellTruncation;
use tracing::debug;

use crate::layout::style::{Palette, TABLE_SIZE};
use crate::pdf::canvas::{Canvas, Cursor, RectStyle, RgbColor, TextStyle};
use crate::text::format::{char_budget, truncate_chars};

/// Height of the header bar.
pub const HEADER_HEIGHT: f32 = 20.0;
/// Height of a standard row.
pub const STANDARD_ROW_HEIGHT: f32 = 18.0;
/// Height of one line of sub-fields in an expanded row.
pub const SUB_LINE_HEIGHT: f32 = 12.0;
/// Vertical padding added to every expanded row.
pub const EXPANDED_PADDING: f32 = 8.0;
/// Horizontal inset of cell text.
pub const CELL_PADDING: f32 = 4.0;

/// Height of an expanded row with `sub_fields` entries laid out two per line.
pub fn expanded_row_height(sub_fields: usize) -> f32 {
    sub_fields.div_ceil(2) as f32 * SUB_LINE_HEIGHT + EXPANDED_PADDING
}

// -- Columns ------------------------------------------------------------------

/// Horizontal placement of text inside a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    /// Flush against the right cell padding; used for amounts.
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub label: String,
    pub width: f32,
    pub align: Align,
}

/// The columns of one table. Widths always add up to the table width.
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumns {
    columns: Vec<TableColumn>,
    total_width: f32,
}

impl TableColumns {
    /// Split `total_width` between columns by relative weight. The last
    /// column takes whatever is left so the sum is exact.
    pub fn proportional(weights: &[(&str, f32)], total_width: f32) -> Self {
        let weight_sum: f32 = weights.iter().map(|(_, w)| w.max(0.0)).sum();
        let mut columns = Vec::with_capacity(weights.len());
        let mut used = 0.0f32;

        for (idx, (label, weight)) in weights.iter().enumerate() {
            let width = if idx + 1 == weights.len() {
                total_width - used
            } else if weight_sum > 0.0 {
                total_width * weight.max(0.0) / weight_sum
            } else {
                total_width / weights.len() as f32
            };
            used += width;
            columns.push(TableColumn {
                label: (*label).to_string(),
                width,
                align: Align::Left,
            });
        }

        Self {
            columns,
            total_width,
        }
    }

    /// Right-align the header and cells of the columns at `indices`.
    pub fn align_right(mut self, indices: &[usize]) -> Self {
        for &idx in indices {
            if let Some(column) = self.columns.get_mut(idx) {
                column.align = Align::Right;
            }
        }
        self
    }

    pub fn total_width(&self) -> f32 {
        self.total_width
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableColumn> {
        self.columns.iter()
    }

    /// Left edge of every column given the table's left edge.
    pub fn offsets(&self, left: f32) -> Vec<f32> {
        let mut x = left;
        self.columns
            .iter()
            .map(|c| {
                let start = x;
                x += c.width;
                start
            })
            .collect()
    }
}

// -- Rows ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SubField {
    pub label: String,
    pub value: String,
}

impl SubField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// One value per column.
    Standard(Vec<String>),
    /// Leading cells (row number, label) followed by sub-fields that share
    /// the remaining columns.
    Expanded {
        lead: Vec<String>,
        sub_fields: Vec<SubField>,
    },
}

impl Row {
    pub fn height(&self) -> f32 {
        match self {
            Self::Standard(_) => STANDARD_ROW_HEIGHT,
            Self::Expanded { sub_fields, .. } => {
                expanded_row_height(sub_fields.len()).max(STANDARD_ROW_HEIGHT)
            }
        }
    }
}

/// Summary line appended under the data rows (payment ledgers).
#[derive(Debug, Clone, PartialEq)]
pub struct TotalRow {
    pub label: String,
    pub value: String,
    /// Column whose right edge the value is aligned to.
    pub value_column: usize,
    pub value_color: RgbColor,
}

#[derive(Debug, Clone)]
pub struct TableOptions {
    pub truncation: CellTruncation,
    pub font_size: f32,
    pub total_row: Option<TotalRow>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            truncation: CellTruncation::CharacterBudget,
            font_size: TABLE_SIZE,
            total_row: None,
        }
    }
}

/// Height of the header bar plus the total row, if any.
pub fn frame_height(options: &TableOptions) -> f32 {
    let total = if options.total_row.is_some() {
        STANDARD_ROW_HEIGHT
    } else {
        0.0
    };
    HEADER_HEIGHT + total
}

/// How many leading `rows` fit in `available` points together with the
/// header bar and total row.
pub fn rows_that_fit(rows: &[Row], available: f32, options: &TableOptions) -> usize {
    let mut used = frame_height(options);
    if used > available {
        return 0;
    }
    rows.iter()
        .take_while(|row| {
            used += row.height();
            used <= available
        })
        .count()
}

/// What [`render_table`] drew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableOutcome {
    /// Cursor just under the table.
    pub cursor: Cursor,
    pub data_rows: usize,
    pub has_total_row: bool,
    pub height: f32,
}

// -- Rendering ----------------------------------------------------------------

/// Baseline that visually centres a line of `size`-point text in a band.
fn centred_baseline(bottom: f32, height: f32, size: f32) -> f32 {
    bottom + (height - size * 0.7) / 2.0
}

/// Cut `text` so it fits a cell `width` points wide.
pub fn fit_cell(
    canvas: &Canvas,
    text: &str,
    width: f32,
    style: TextStyle,
    truncation: CellTruncation,
) -> String {
    let available = width - 2.0 * CELL_PADDING;
    match truncation {
        CellTruncation::CharacterBudget => {
            truncate_chars(text, char_budget(available, style.size))
        }
        CellTruncation::Measured => {
            let mut fitted = String::new();
            let mut used = 0.0f32;
            for ch in text.chars() {
                let mut buf = [0u8; 4];
                let w = canvas.measure_text_width(ch.encode_utf8(&mut buf), style);
                if used + w > available {
                    break;
                }
                used += w;
                fitted.push(ch);
            }
            fitted
        }
    }
}

/// Draw a table starting at `origin` and return the cursor below it.
pub fn render_table(
    canvas: &mut Canvas,
    origin: Cursor,
    columns: &TableColumns,
    rows: &[Row],
    options: &TableOptions,
) -> TableOutcome {
    let left = canvas.page().left();
    let width = columns.total_width();
    let offsets = columns.offsets(left);
    let widths: Vec<f32> = columns.iter().map(|c| c.width).collect();
    let size = options.font_size;
    let cell_style = TextStyle::regular(size, Palette::BODY_TEXT);
    let top = origin.y();

    // Header bar
    let header_bottom = top - HEADER_HEIGHT;
    canvas.draw_rect(
        left,
        header_bottom,
        width,
        HEADER_HEIGHT,
        RectStyle::filled(Palette::TABLE_HEADER),
    );
    let header_style = TextStyle::bold(size, Palette::HEADER_TEXT);
    let header_baseline = centred_baseline(header_bottom, HEADER_HEIGHT, size);
    for (idx, column) in columns.iter().enumerate() {
        let text = fit_cell(canvas, &column.label, column.width, header_style, options.truncation);
        draw_cell(canvas, &text, offsets[idx], column, header_baseline, header_style);
    }

    let mut y = header_bottom;
    for (idx, row) in rows.iter().enumerate() {
        let number = idx + 1;
        let height = row.height();
        let bottom = y - height;

        if number % 2 == 0 {
            canvas.draw_rect(left, bottom, width, height, RectStyle::filled(Palette::ZEBRA));
        }

        match row {
            Row::Standard(cells) => {
                let baseline = centred_baseline(bottom, height, size);
                for ((cell, column), x) in cells.iter().zip(columns.iter()).zip(&offsets) {
                    let text = fit_cell(canvas, cell, column.width, cell_style, options.truncation);
                    draw_cell(canvas, &text, *x, column, baseline, cell_style);
                }
            }
            Row::Expanded { lead, sub_fields } => {
                let baseline = centred_baseline(bottom, height, size);
                for (col, cell) in lead.iter().enumerate().take(widths.len()) {
                    let text = fit_cell(canvas, cell, widths[col], body_bold(size), options.truncation);
                    canvas.draw_text(&text, offsets[col] + CELL_PADDING, baseline, body_bold(size));
                }
                let value_col = lead.len().min(widths.len());
                let value_x = offsets.get(value_col).copied().unwrap_or(left + width);
                let value_width = left + width - value_x;
                draw_sub_fields(canvas, sub_fields, value_x, value_width, y, options);
            }
        }

        canvas.draw_line((left, bottom), (left + width, bottom), 0.5, Palette::DIVIDER);
        y = bottom;
    }

    if let Some(total) = &options.total_row {
        let height = STANDARD_ROW_HEIGHT;
        let bottom = y - height;
        canvas.draw_rect(left, bottom, width, height, RectStyle::filled(Palette::TOTAL_ROW));
        let baseline = centred_baseline(bottom, height, size);
        canvas.draw_text(&total.label, left + CELL_PADDING, baseline, body_bold(size));

        let col = total.value_column.min(widths.len().saturating_sub(1));
        let right = offsets.get(col).map_or(left + width, |x| x + widths[col]) - CELL_PADDING;
        canvas.draw_text_right(
            &total.value,
            right,
            baseline,
            TextStyle::bold(size, total.value_color),
        );
        y = bottom;
    }

    canvas.draw_rect(
        left,
        y,
        width,
        top - y,
        RectStyle::bordered(Palette::BORDER, 0.8),
    );

    let height = top - y;
    debug!(rows = rows.len(), height, "table rendered");
    TableOutcome {
        cursor: origin.down(height),
        data_rows: rows.len(),
        has_total_row: options.total_row.is_some(),
        height,
    }
}

fn draw_cell(canvas: &mut Canvas, text: &str, x: f32, column: &TableColumn, baseline: f32, style: TextStyle) {
    match column.align {
        Align::Left => canvas.draw_text(text, x + CELL_PADDING, baseline, style),
        Align::Right => canvas.draw_text_right(text, x + column.width - CELL_PADDING, baseline, style),
    }
}

fn body_bold(size: f32) -> TextStyle {
    TextStyle::bold(size, Palette::BODY_TEXT)
}

/// Lay out sub-fields two per line: left half, then right half.
fn draw_sub_fields(
    canvas: &mut Canvas,
    sub_fields: &[SubField],
    x: f32,
    width: f32,
    row_top: f32,
    options: &TableOptions,
) {
    let size = options.font_size;
    let half = width / 2.0;
    let label_style = TextStyle::bold(size, Palette::MUTED_TEXT);
    let value_style = TextStyle::regular(size, Palette::BODY_TEXT);

    for (idx, field) in sub_fields.iter().enumerate() {
        let line = idx / 2;
        let column_x = x + (idx % 2) as f32 * half;
        let line_bottom = row_top - EXPANDED_PADDING / 2.0 - (line + 1) as f32 * SUB_LINE_HEIGHT;
        let baseline = centred_baseline(line_bottom, SUB_LINE_HEIGHT, size);

        let label = format!("{}: ", field.label);
        let label = fit_cell(canvas, &label, half, label_style, options.truncation);
        let label_width = canvas.measure_text_width(&label, label_style);
        canvas.draw_text(&label, column_x + CELL_PADDING, baseline, label_style);

        let value_room = half - label_width;
        let value = fit_cell(canvas, &field.value, value_room, value_style, options.truncation);
        canvas.draw_text(&value, column_x + CELL_PADDING + label_width, baseline, value_style);
    }
}
