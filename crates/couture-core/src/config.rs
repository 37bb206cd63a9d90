// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document engine configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoutureError, Result};

/// Built-in PDF font family used for both regular and bold faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Helvetica,
    Courier,
}

impl FontFamily {
    /// Parse a family name as it appears in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "arial" | "sans" => Some(Self::Helvetica),
            "courier" | "mono" | "monospace" => Some(Self::Courier),
            _ => None,
        }
    }
}

/// What happens to content that does not fit its fixed box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Cut excess text without ellipsis and keep the document on one page.
    Truncate,
    /// Carry notes lines beyond the cap onto a continuation page.
    Paginate,
}

/// How table cell text is shortened to fit its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellTruncation {
    /// Column width divided by an assumed average glyph width (half the font
    /// size). Matches documents produced by earlier releases.
    CharacterBudget,
    /// Longest prefix whose measured width fits inside the cell padding.
    Measured,
}

/// Settings shared by every document the engine renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Brand name used for the watermark and the logo fallback label.
    pub brand_name: String,
    /// Company contact line centred in the footer.
    pub contact_line: String,
    /// Currency code appended to every monetary figure.
    pub currency_code: String,
    /// Directory that local asset references are resolved against.
    pub asset_root: PathBuf,
    /// Brand logo, relative to `asset_root`.
    pub logo_path: Option<PathBuf>,
    /// Upper bound on a remote image fetch, in seconds.
    pub fetch_timeout_secs: u64,
    /// Font family name for all text, resolved when a document starts.
    pub font_family: String,
    /// Overflow behaviour for the notes box.
    pub overflow_policy: OverflowPolicy,
    /// Table cell truncation mode.
    pub cell_truncation: CellTruncation,
    /// Maximum wrapped lines printed inside the notes box.
    pub notes_line_cap: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            brand_name: "COUTURE".into(),
            contact_line: String::new(),
            currency_code: "FCFA".into(),
            asset_root: PathBuf::from("."),
            logo_path: Some(PathBuf::from("assets/logo.png")),
            fetch_timeout_secs: 5,
            font_family: "Helvetica".into(),
            overflow_policy: OverflowPolicy::Truncate,
            cell_truncation: CellTruncation::CharacterBudget,
            notes_line_cap: 3,
        }
    }
}

impl DocumentConfig {
    /// Load a configuration from a JSON file. Missing keys take their default.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the renderer cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.currency_code.trim().is_empty() {
            return Err(CoutureError::InvalidConfig(
                "currency code must not be empty".into(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(CoutureError::InvalidConfig(
                "fetch timeout must be at least one second".into(),
            ));
        }
        if self.notes_line_cap == 0 {
            return Err(CoutureError::InvalidConfig(
                "notes line cap must be at least one".into(),
            ));
        }
        Ok(())
    }

    /// Remote fetch timeout as a `Duration`.
    pub fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DocumentConfig::default();
        config.validate().expect("default config validates");
        assert_eq!(config.currency_code, "FCFA");
        assert_eq!(config.notes_line_cap, 3);
        assert_eq!(config.overflow_policy, OverflowPolicy::Truncate);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("couture.json");
        std::fs::write(&path, r#"{ "brand_name": "ATELIER AWA", "fetch_timeout_secs": 3 }"#)
            .expect("write config");

        let config = DocumentConfig::from_json_file(&path).expect("load config");
        assert_eq!(config.brand_name, "ATELIER AWA");
        assert_eq!(config.fetch_timeout_secs, 3);
        assert_eq!(config.currency_code, "FCFA");
        assert_eq!(FontFamily::from_name(&config.font_family), Some(FontFamily::Helvetica));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = DocumentConfig {
            fetch_timeout_secs: 0,
            ..DocumentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoutureError::InvalidConfig(_))
        ));
    }

    #[test]
    fn font_family_names() {
        assert_eq!(FontFamily::from_name("Helvetica"), Some(FontFamily::Helvetica));
        assert_eq!(FontFamily::from_name(" MONO "), Some(FontFamily::Courier));
        assert_eq!(FontFamily::from_name("Comic Sans"), None);
    }
}
