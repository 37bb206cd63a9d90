// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Couture — Core records, configuration, and error definitions shared by the
// document engine and its callers.

pub mod config;
pub mod error;
pub mod types;

pub use config::DocumentConfig;
pub use error::CoutureError;
pub use types::*;
