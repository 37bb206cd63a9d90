// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — drawing surface, font metrics, encoding, and inspection.

pub mod canvas;
pub mod metrics;
pub mod reader;
pub mod writer;

pub use canvas::{Canvas, Cursor, DrawOp, Page, RectStyle, RgbColor, TextStyle};
pub use metrics::{FontRole, FontSet};
pub use reader::PdfInspector;
pub use writer::PdfWriter;
