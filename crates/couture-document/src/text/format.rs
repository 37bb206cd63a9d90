// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Display formatting shared by both sheets: money, dates, word wrap and
// character-budget truncation.

use chrono::{NaiveDate, NaiveDateTime};

/// Average glyph width as a fraction of the font size, used for the
/// character budget of table cells.
const AVG_GLYPH_RATIO: f32 = 0.5;

/// Format an integer amount with a space every three digits and the currency
/// code appended: `1234567` → `"1 234 567 FCFA"`.
pub fn format_currency(amount: i64, currency_code: &str) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped} {currency_code}")
    } else {
        format!("{grouped} {currency_code}")
    }
}

/// `dd/mm/yyyy`, or a dash when the date is missing.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "-".into(),
    }
}

/// `dd/mm/yyyy HH:MM`, or a dash when the timestamp is missing.
pub fn format_timestamp(at: Option<NaiveDateTime>) -> String {
    match at {
        Some(t) => t.format("%d/%m/%Y %H:%M").to_string(),
        None => "-".into(),
    }
}

/// Greedy word wrap on whitespace-normalised text.
///
/// Lines never exceed `max_chars` characters, except a single word longer
/// than `max_chars`, which is emitted on its own line unsplit. Joining the
/// result with single spaces yields the normalised input.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    wrap_to_width(text, max_chars.max(1) as f32, |line| line.chars().count() as f32)
}

/// Greedy word wrap where `measure` gives the rendered width of a candidate
/// line. Lines stay within `max_width` except a single word that alone is
/// wider, which is emitted unsplit.
pub fn wrap_to_width<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Keep at most `max_chars` characters. No ellipsis is added.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// How many characters fit in `width` points at `font_size`, assuming the
/// average glyph is half as wide as the font is tall.
pub fn char_budget(width: f32, font_size: f32) -> usize {
    if width <= 0.0 || font_size <= 0.0 {
        return 0;
    }
    (width / (font_size * AVG_GLYPH_RATIO)).floor() as usize
}
