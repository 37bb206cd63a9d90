// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — palette, tables, and the fixed page sections.

pub mod sections;
pub mod style;
pub mod table;

pub use sections::{AssetPlacement, HeaderOutcome, HeaderSide, InfoCell, NotesOutcome};
pub use style::Palette;
pub use table::{Align, Row, SubField, TableColumns, TableOptions, TableOutcome, TotalRow, render_table};
