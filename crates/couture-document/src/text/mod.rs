// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text module — sanitizing user input and formatting display strings.

pub mod format;
pub mod sanitize;

pub use format::{format_currency, format_date, format_timestamp, wrap_text, wrap_to_width};
pub use sanitize::{sanitize, sanitize_or_dash};
