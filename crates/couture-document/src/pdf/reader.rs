// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF inspector — re-read encoded output with `lopdf` to confirm its page
// structure before a document is handed back.

use lopdf::{Document, Object, ObjectId};
use couture_core::error::CoutureError;
use tracing::{debug, instrument};

/// Read-only view over an encoded PDF.
pub struct PdfInspector {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfInspector {
    /// Parse PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, CoutureError> {
        let document = Document::load_mem(data).map_err(|err| {
            CoutureError::Pdf(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Width and height in points of a 1-indexed page, following inherited
    /// `/MediaBox` entries up the page tree.
    pub fn media_box(&self, page_number: u32) -> Option<(f32, f32)> {
        let pages = self.document.get_pages();
        let mut node: ObjectId = *pages.get(&page_number)?;

        // Page trees are shallow; the bound guards against reference cycles.
        for _ in 0..16 {
            let dict = self.document.get_dictionary(node).ok()?;
            if let Ok(Object::Array(values)) = dict.get(b"MediaBox") {
                let nums: Vec<f32> = values.iter().filter_map(number).collect();
                if nums.len() == 4 {
                    return Some((nums[2] - nums[0], nums[3] - nums[1]));
                }
                return None;
            }
            node = dict.get(b"Parent").ok()?.as_reference().ok()?;
        }
        None
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}
