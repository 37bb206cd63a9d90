// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document builder — owns one canvas from page setup to encoded bytes.
//
// `DocumentBuilder` validates the page and fonts, `begin()` hands out a
// `ComposingDocument` that sections draw into, and `finalize(self)` encodes
// and verifies the PDF. Finalizing consumes the composer.

use chrono::NaiveDateTime;
use couture_core::config::{FontFamily, OverflowPolicy};
use couture_core::error::{CoutureError, Result};
use couture_core::DocumentConfig;
use tracing::{debug, info, instrument, warn};

use crate::assets::{AssetRef, AssetResolver};
use crate::image::DecodedImage;
use crate::layout::sections::{self, AssetPlacement, HeaderSide, InfoCell};
use crate::layout::table::{self, Row, TableColumns, TableOptions};
use crate::pdf::canvas::{Canvas, Cursor, Page, A4_HEIGHT_PT, A4_WIDTH_PT, CONTENT_MARGIN_PT};
use crate::pdf::metrics::FontSet;
use crate::pdf::reader::PdfInspector;
use crate::pdf::writer::PdfWriter;

// -- Assets -------------------------------------------------------------------

/// Image references for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentAssets {
    pub logo: Option<AssetRef>,
    pub photo: Option<AssetRef>,
}

impl DocumentAssets {
    /// The configured brand logo and no photo.
    pub fn from_config(config: &DocumentConfig) -> Self {
        Self {
            logo: config.logo_path.clone().map(AssetRef::Local),
            photo: None,
        }
    }

    /// Attach a stored photo reference (path or URL). Blank references are
    /// treated as absent.
    pub fn with_photo(mut self, reference: Option<&str>) -> Self {
        self.photo = reference
            .filter(|r| !r.trim().is_empty())
            .map(AssetRef::parse);
        self
    }
}

/// Decoded images, `None` wherever resolution failed or nothing was given.
#[derive(Debug, Clone, Default)]
pub struct ResolvedAssets {
    pub logo: Option<DecodedImage>,
    pub photo: Option<DecodedImage>,
}

async fn resolve_slot<R: AssetResolver>(
    resolver: &R,
    asset: Option<&AssetRef>,
    slot: &'static str,
) -> Option<DecodedImage> {
    let asset = asset?;
    match resolver.resolve(asset).await {
        Ok(image) => Some(image),
        Err(err) => {
            warn!(slot, error = %err, "Asset unavailable, drawing fallback");
            None
        }
    }
}

/// Resolve the logo and photo concurrently. Failures are logged and become
/// `None`; they never fail the document.
pub async fn resolve_assets<R: AssetResolver>(resolver: &R, assets: &DocumentAssets) -> ResolvedAssets {
    let (logo, photo) = tokio::join!(
        resolve_slot(resolver, assets.logo.as_ref(), "logo"),
        resolve_slot(resolver, assets.photo.as_ref(), "photo"),
    );
    ResolvedAssets { logo, photo }
}

// -- Summary ------------------------------------------------------------------

/// Rows one table printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub data_rows: usize,
    /// Rows left out because they would have run into the footer.
    pub dropped_rows: usize,
    pub has_total_row: bool,
}

/// What ended up on the page, for diagnostics and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: usize,
    pub tables: Vec<TableSummary>,
    pub notes_lines_drawn: usize,
    /// Lines that did not fit the notes box and were discarded.
    pub notes_lines_dropped: usize,
    /// Lines moved to a continuation page.
    pub notes_lines_continued: usize,
    pub logo: Option<AssetPlacement>,
    pub photo: Option<AssetPlacement>,
}

impl RenderSummary {
    pub fn table(&self, name: &str) -> Option<&TableSummary> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Encoded PDF plus what was drawn.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub summary: RenderSummary,
}

// -- Builder states -----------------------------------------------------------

/// Initialized state: page geometry and font faces checked, nothing drawn.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    title: String,
    page: Page,
    fonts: FontSet,
    generated_at: NaiveDateTime,
}

impl DocumentBuilder {
    /// Set up an A4 document. Fails on an invalid config or an unknown font
    /// family.
    pub fn new(title: impl Into<String>, config: &DocumentConfig) -> Result<Self> {
        config.validate()?;
        let family = FontFamily::from_name(&config.font_family).ok_or_else(|| {
            CoutureError::FontEmbedding(format!(
                "no built-in face for font family {:?}",
                config.font_family
            ))
        })?;
        let page = Page::new(A4_WIDTH_PT, A4_HEIGHT_PT, CONTENT_MARGIN_PT)?;
        Ok(Self {
            title: title.into(),
            page,
            fonts: FontSet::new(family),
            generated_at: chrono::Local::now().naive_local(),
        })
    }

    /// Override the footer timestamp (defaults to the local time at setup).
    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = at;
        self
    }

    pub fn begin(self) -> ComposingDocument {
        debug!(title = %self.title, family = ?self.fonts.family(), "Composing document");
        let canvas = Canvas::new(self.page, self.fonts);
        let cursor = sections::first_cursor(&canvas);
        ComposingDocument {
            title: self.title,
            generated_at: self.generated_at,
            canvas,
            cursor,
            summary: RenderSummary::default(),
            carried_notes: Vec::new(),
            footer: None,
        }
    }
}

/// Composing state: sections draw into the canvas in order, each moving the
/// cursor down.
pub struct ComposingDocument {
    title: String,
    generated_at: NaiveDateTime,
    canvas: Canvas,
    cursor: Cursor,
    summary: RenderSummary,
    carried_notes: Vec<String>,
    footer: Option<(String, Option<String>)>,
}

impl ComposingDocument {
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Width available to tables and boxes.
    pub fn table_width(&self) -> f32 {
        self.canvas.page().content_width()
    }

    /// Lowest y the body may reach before the footer.
    pub fn floor(&self) -> f32 {
        sections::content_floor(self.canvas.page())
    }

    pub fn watermark(&mut self, brand: &str) {
        sections::draw_watermark(&mut self.canvas, brand);
    }

    pub fn title_banner(&mut self, title: &str) {
        self.cursor = sections::draw_title_banner(&mut self.canvas, self.cursor, title);
    }

    pub fn header(&mut self, brand: &str, logo: Option<&DecodedImage>, side: HeaderSide<'_>) {
        let outcome = sections::draw_header(&mut self.canvas, self.cursor, brand, logo, side);
        self.cursor = outcome.cursor;
        self.summary.logo = Some(outcome.logo);
        self.summary.photo = outcome.photo;
    }

    pub fn info_rows(&mut self, title: &str, rows: &[(String, String)]) {
        self.cursor = sections::draw_info_rows(&mut self.canvas, self.cursor, title, rows);
    }

    pub fn grid_box(&mut self, title: &str, columns: usize, cells: &[InfoCell]) {
        self.cursor = sections::draw_grid_box(&mut self.canvas, self.cursor, title, columns, cells);
    }

    pub fn card_row(&mut self, title: &str, cards: &[InfoCell]) {
        self.cursor = sections::draw_card_row(&mut self.canvas, self.cursor, title, cards);
    }

    /// Section title followed by a table, recorded under `name`.
    pub fn table(&mut self, name: &str, columns: &TableColumns, rows: &[Row], options: &TableOptions) {
        self.table_above(name, columns, rows, options, 0.0);
    }

    /// Like [`table`](Self::table), but keeps `reserve` points free above the
    /// footer for the sections that follow. Rows that do not fit are dropped;
    /// when not even the header fits the table is left out.
    pub fn table_above(
        &mut self,
        name: &str,
        columns: &TableColumns,
        rows: &[Row],
        options: &TableOptions,
        reserve: f32,
    ) {
        let limit = self.floor() + reserve;
        let available = self.cursor.y() - sections::BOX_TITLE_HEIGHT - limit;
        let fits_frame = table::frame_height(options) <= available;
        let shown = table::rows_that_fit(rows, available, options);
        let dropped = rows.len() - shown;
        if dropped > 0 {
            warn!(table = name, shown, dropped, "table rows cut at the footer");
        }

        let has_total_row = if fits_frame {
            self.cursor = sections::draw_section_title(&mut self.canvas, self.cursor, name);
            let outcome = table::render_table(&mut self.canvas, self.cursor, columns, &rows[..shown], options);
            self.cursor = outcome.cursor.down(sections::BOX_GAP);
            outcome.has_total_row
        } else {
            false
        };

        self.summary.tables.push(TableSummary {
            name: name.to_string(),
            data_rows: shown,
            dropped_rows: dropped,
            has_total_row,
        });
    }

    pub fn notes(&mut self, notes: &str, line_cap: usize, policy: OverflowPolicy) {
        let floor = self.floor();
        let outcome = sections::draw_notes(&mut self.canvas, self.cursor, notes, line_cap, policy, floor);
        self.cursor = outcome.cursor;
        self.summary.notes_lines_drawn = outcome.drawn.len();
        self.summary.notes_lines_dropped = outcome.overflow_lines - outcome.carried_over.len();
        self.carried_notes = outcome.carried_over;
    }

    pub fn footer(&mut self, contact_line: &str, prepared_by: Option<&str>) {
        sections::draw_footer(&mut self.canvas, contact_line, prepared_by, self.generated_at);
        self.footer = Some((contact_line.to_string(), prepared_by.map(str::to_string)));
    }

    /// Write any continuation page, encode, and verify the result.
    #[instrument(skip_all, fields(title = %self.title))]
    pub fn finalize(mut self) -> Result<RenderedDocument> {
        if !self.carried_notes.is_empty() {
            let printed = sections::draw_notes_continuation(&mut self.canvas, &self.carried_notes);
            self.summary.notes_lines_continued = printed;
            self.summary.notes_lines_dropped += self.carried_notes.len() - printed;
            if let Some((contact, prepared_by)) = &self.footer {
                sections::draw_footer(
                    &mut self.canvas,
                    contact,
                    prepared_by.as_deref(),
                    self.generated_at,
                );
            }
        }

        let bytes = PdfWriter::new(&self.title).encode(&self.canvas)?;
        let inspector = PdfInspector::from_bytes(&bytes)?;
        let drawn = self.canvas.page_count();
        if inspector.page_count() != drawn {
            return Err(CoutureError::Pdf(format!(
                "encoded PDF has {} pages, expected {drawn}",
                inspector.page_count()
            )));
        }

        self.summary.pages = drawn;
        info!(
            bytes = bytes.len(),
            pages = drawn,
            tables = self.summary.tables.len(),
            "Document finalized"
        );
        Ok(RenderedDocument {
            bytes,
            summary: self.summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{PreloadedAssets, ResolutionFailure};
    use crate::layout::table::SubField;
    use crate::pdf::canvas::DrawOp;
    use std::future::Future;

    fn timestamp() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 3, 14)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn unknown_font_family_is_fatal() {
        let config = DocumentConfig {
            font_family: "Comic Sans".into(),
            ..DocumentConfig::default()
        };
        let err = DocumentBuilder::new("x", &config).expect_err("should reject font");
        assert!(matches!(err, CoutureError::FontEmbedding(_)));
    }

    #[test]
    fn invalid_config_is_rejected_before_drawing() {
        let config = DocumentConfig {
            currency_code: " ".into(),
            ..DocumentConfig::default()
        };
        assert!(matches!(
            DocumentBuilder::new("x", &config),
            Err(CoutureError::InvalidConfig(_))
        ));
    }

    #[test]
    fn finalize_produces_single_a4_page() {
        let config = DocumentConfig::default();
        let mut doc = DocumentBuilder::new("Test", &config)
            .expect("builder")
            .generated_at(timestamp())
            .begin();
        doc.watermark("COUTURE");
        doc.title_banner("TEST");
        let columns = TableColumns::proportional(&[("A", 0.5), ("B", 0.5)], doc.table_width());
        let rows = vec![
            Row::Standard(vec!["1".into(), "x".into()]),
            Row::Expanded {
                lead: vec!["2".into(), String::new()],
                sub_fields: vec![SubField::new("Short", "20"), SubField::new("Long", "60")],
            },
        ];
        doc.table("ITEMS", &columns, &rows, &TableOptions::default());
        doc.footer("", None);

        let rendered = doc.finalize().expect("finalize");
        assert_eq!(rendered.summary.pages, 1);
        assert_eq!(rendered.summary.table("ITEMS").map(|t| t.data_rows), Some(2));

        let inspector = PdfInspector::from_bytes(&rendered.bytes).expect("parse");
        let (w, h) = inspector.media_box(1).expect("media box");
        assert!((w - A4_WIDTH_PT).abs() < 0.01, "width {w}");
        assert!((h - A4_HEIGHT_PT).abs() < 0.01, "height {h}");
    }

    /// Lowest y of every op on the first page.
    fn body_bottoms(doc: &ComposingDocument) -> Vec<f32> {
        doc.canvas().pages()[0]
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y),
                DrawOp::Rect { y, .. } | DrawOp::Image { y, .. } => Some(*y),
                DrawOp::Line { from, to, .. } => Some(from.1.min(to.1)),
            })
            .collect()
    }

    #[test]
    fn long_tables_stop_above_the_footer() {
        let config = DocumentConfig::default();
        let mut doc = DocumentBuilder::new("Long", &config)
            .expect("builder")
            .generated_at(timestamp())
            .begin();
        doc.title_banner("LONG");
        let columns = TableColumns::proportional(&[("No.", 0.2), ("Item", 0.8)], doc.table_width());
        let rows: Vec<Row> = (1..=60)
            .map(|i| Row::Standard(vec![i.to_string(), format!("item {i}")]))
            .collect();
        doc.table("ITEMS", &columns, &rows, &TableOptions::default());
        doc.table("MORE", &columns, &rows[..2], &TableOptions::default());
        doc.notes("Deliver before noon.", 3, OverflowPolicy::Truncate);

        let floor = doc.floor();
        assert!(body_bottoms(&doc).iter().all(|&y| y >= floor));

        doc.footer("Atelier", None);
        let rendered = doc.finalize().expect("finalize");
        let items = rendered.summary.table("ITEMS").expect("items summary");
        assert!(items.data_rows > 0);
        assert_eq!(items.data_rows + items.dropped_rows, 60);
        let more = rendered.summary.table("MORE").expect("second table summary");
        assert_eq!((more.data_rows, more.dropped_rows), (0, 2));
        assert_eq!(rendered.summary.notes_lines_drawn, 0);
        assert_eq!(rendered.summary.notes_lines_dropped, 1);
        assert_eq!(rendered.summary.pages, 1);
    }

    #[test]
    fn paginated_notes_add_a_page() {
        let config = DocumentConfig::default();
        let mut doc = DocumentBuilder::new("Notes", &config)
            .expect("builder")
            .generated_at(timestamp())
            .begin();
        let notes = "Keep the hem generous for later alterations please. ".repeat(12);
        doc.notes(&notes, 3, OverflowPolicy::Paginate);
        doc.footer("Atelier", Some("Awa"));
        let rendered = doc.finalize().expect("finalize");

        assert_eq!(rendered.summary.pages, 2);
        assert_eq!(rendered.summary.notes_lines_drawn, 3);
        assert!(rendered.summary.notes_lines_continued > 0);
        assert_eq!(rendered.summary.notes_lines_dropped, 0);
        let inspector = PdfInspector::from_bytes(&rendered.bytes).expect("parse");
        assert_eq!(inspector.page_count(), 2);
    }

    struct FailingResolver;

    impl AssetResolver for FailingResolver {
        fn resolve(
            &self,
            asset: &AssetRef,
        ) -> impl Future<Output = std::result::Result<DecodedImage, ResolutionFailure>> + Send {
            let url = format!("{asset:?}");
            async move {
                Err(ResolutionFailure::Network {
                    url,
                    detail: "connection refused".into(),
                })
            }
        }
    }

    #[tokio::test]
    async fn failed_assets_resolve_to_none() {
        let assets = DocumentAssets {
            logo: Some(AssetRef::parse("assets/logo.png")),
            photo: Some(AssetRef::parse("https://photos.invalid/p.jpg")),
        };
        let resolved = resolve_assets(&FailingResolver, &assets).await;
        assert!(resolved.logo.is_none());
        assert!(resolved.photo.is_none());
    }

    #[tokio::test]
    async fn preloaded_logo_resolves_and_blank_photo_is_absent() {
        let logo = DecodedImage { width: 2, height: 2, rgb: vec![255; 12] };
        let resolver = PreloadedAssets::new().with(AssetRef::parse("assets/logo.png"), logo.clone());
        let assets = DocumentAssets::from_config(&DocumentConfig::default()).with_photo(Some("  "));
        assert_eq!(assets.photo, None);

        let resolved = resolve_assets(&resolver, &assets).await;
        assert_eq!(resolved.logo, Some(logo));
        assert!(resolved.photo.is_none());
    }
}
