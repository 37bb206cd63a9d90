// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Couture.
//
// Only unrecoverable conditions live here. Asset resolution failures are
// expected during rendering and are absorbed by the document crate before
// they could ever become a `CoutureError`.

use thiserror::Error;

/// Top-level error type for all Couture operations.
#[derive(Debug, Error)]
pub enum CoutureError {
    // -- Rendering (fatal) --
    #[error("page construction failed: {0}")]
    PageConstruction(String),

    #[error("font embedding failed: {0}")]
    FontEmbedding(String),

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CoutureError>;
