// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// couture-document — Printable PDFs for a tailoring workshop.
//
// Turns a measurement record or a custom order into a single A4 page: text
// sanitizing and formatting, a display-list canvas encoded with printpdf,
// logo/photo resolution with visual fallbacks, tables with expandable rows,
// and the fixed sections both sheets share.

pub mod assets;
pub mod builder;
pub mod image;
pub mod layout;
pub mod pdf;
pub mod sheets;
pub mod text;

// Re-export the entry points so callers can use `couture_document::OrderSheet` etc.
pub use assets::{AssetLoader, AssetRef, AssetResolver, AssetRoot, PreloadedAssets, ResolutionFailure};
pub use builder::{DocumentAssets, DocumentBuilder, RenderSummary, RenderedDocument};
pub use pdf::reader::PdfInspector;
pub use sheets::{MeasurementSheet, OrderSheet};
