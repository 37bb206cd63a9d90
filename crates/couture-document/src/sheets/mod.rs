// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sheet generators — the two document kinds built on the section composer.

pub mod measurement;
pub mod order;

pub use measurement::MeasurementSheet;
pub use order::OrderSheet;
