// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Measurement sheet — one customer's body measurements on a single A4 page.

use couture_core::error::Result;
use couture_core::{DocumentConfig, MeasurementRecord, MeasurementUnit};
use tracing::{info, instrument};

use crate::assets::AssetResolver;
use crate::builder::{
    resolve_assets, DocumentAssets, DocumentBuilder, RenderedDocument, ResolvedAssets,
};
use crate::layout::sections::HeaderSide;
use crate::layout::table::{Row, SubField, TableColumns, TableOptions};
use crate::text::{format_date, sanitize, sanitize_or_dash};

pub const MEASUREMENT_TITLE: &str = "MEASUREMENT SHEET";
/// Name the measurement table is recorded under in the render summary.
pub const MEASUREMENT_TABLE: &str = "MEASUREMENTS";

const COLUMNS: [(&str, f32); 3] = [("No.", 0.10), ("Measurement", 0.38), ("Value", 0.52)];

/// Renders [`MeasurementRecord`]s.
pub struct MeasurementSheet;

impl MeasurementSheet {
    /// Resolve the logo and photo, then lay out and encode the sheet.
    ///
    /// Asset failures become fallbacks; only page, font, or encoding
    /// problems return an error.
    #[instrument(skip_all, fields(customer = %record.customer.name))]
    pub async fn render<R: AssetResolver>(
        record: &MeasurementRecord,
        assets: &DocumentAssets,
        resolver: &R,
        config: &DocumentConfig,
    ) -> Result<RenderedDocument> {
        let builder = DocumentBuilder::new(MEASUREMENT_TITLE, config)?;
        let resolved = resolve_assets(resolver, assets).await;
        Self::compose(builder, record, &resolved, config)
    }

    /// Lay out the sheet from already-resolved images.
    pub fn compose(
        builder: DocumentBuilder,
        record: &MeasurementRecord,
        assets: &ResolvedAssets,
        config: &DocumentConfig,
    ) -> Result<RenderedDocument> {
        let brand = sanitize(Some(config.brand_name.as_str()));
        let mut doc = builder.begin();

        doc.watermark(&brand);
        doc.title_banner(MEASUREMENT_TITLE);
        doc.header(&brand, assets.logo.as_ref(), HeaderSide::Photo(assets.photo.as_ref()));
        doc.info_rows("CUSTOMER", &info_rows(record));

        let columns = TableColumns::proportional(&COLUMNS, doc.table_width());
        let options = TableOptions {
            truncation: config.cell_truncation,
            ..TableOptions::default()
        };
        doc.table(MEASUREMENT_TABLE, &columns, &measurement_rows(record), &options);

        doc.notes(
            &sanitize(record.notes.as_deref()),
            config.notes_line_cap,
            config.overflow_policy,
        );
        let taken_by = record.taken_by.as_deref().map(|n| sanitize(Some(n)));
        doc.footer(&sanitize(Some(config.contact_line.as_str())), taken_by.as_deref());

        let rendered = doc.finalize()?;
        info!(
            bytes = rendered.bytes.len(),
            photo = ?rendered.summary.photo,
            "Measurement sheet rendered"
        );
        Ok(rendered)
    }
}

fn info_rows(record: &MeasurementRecord) -> Vec<(String, String)> {
    vec![
        ("Name".into(), sanitize_or_dash(Some(record.customer.name.as_str()))),
        ("Phone".into(), sanitize_or_dash(record.customer.phone.as_deref())),
        ("Date".into(), format_date(record.date)),
        ("Unit".into(), record.unit.label().into()),
    ]
}

/// Display form of one measurement: the sanitized value with its unit, or a
/// dash when it was not taken.
fn with_unit(raw: &str, unit: MeasurementUnit) -> String {
    let value = sanitize(Some(raw));
    let value = value.trim();
    if value.is_empty() {
        "-".into()
    } else {
        format!("{value} {}", unit.label())
    }
}

enum Entry<'a> {
    Single(&'static str, &'a str),
    Group(&'static str, Vec<(&'static str, &'a str)>),
}

fn entries(record: &MeasurementRecord) -> Vec<Entry<'_>> {
    use Entry::{Group, Single};
    let sleeve = &record.sleeve_lengths;
    let dress = &record.dress_lengths;
    let skirt = &record.skirt_lengths;
    vec![
        Single("Neck", &record.neck),
        Single("Shoulder width", &record.shoulder_width),
        Single("Chest", &record.chest),
        Single("Under bust", &record.under_bust),
        Single("Bust span", &record.bust_span),
        Single("Waist", &record.waist),
        Single("Hips", &record.hips),
        Single("Back width", &record.back_width),
        Single("Arm circumference", &record.arm_circumference),
        Group(
            "Sleeve length",
            vec![
                ("Short", sleeve.short_sleeve.as_str()),
                ("Elbow", sleeve.elbow.as_str()),
                ("3/4", sleeve.three_quarter.as_str()),
                ("Long", sleeve.long_sleeve.as_str()),
            ],
        ),
        Single("Wrist", &record.wrist),
        Single("Front waist length", &record.front_waist_length),
        Single("Back waist length", &record.back_waist_length),
        Single("Blouse length", &record.blouse_length),
        Group(
            "Dress length",
            vec![
                ("Mini", dress.mini.as_str()),
                ("Knee", dress.knee.as_str()),
                ("Midi", dress.midi.as_str()),
                ("Maxi", dress.maxi.as_str()),
            ],
        ),
        Single("Thigh", &record.thigh),
        Single("Knee", &record.knee),
        Single("Calf", &record.calf),
        Single("Ankle", &record.ankle),
        Single("Trouser length", &record.trouser_length),
        Single("Crotch depth", &record.crotch_depth),
        Group(
            "Skirt length",
            vec![
                ("Short", skirt.short.as_str()),
                ("Knee", skirt.knee.as_str()),
                ("Long", skirt.long.as_str()),
            ],
        ),
    ]
}

/// The fixed 22 table rows. Grouped measurements always keep every
/// sub-field, so the row count and heights never depend on which values
/// were taken.
pub fn measurement_rows(record: &MeasurementRecord) -> Vec<Row> {
    entries(record)
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            let number = (idx + 1).to_string();
            match entry {
                Entry::Single(label, value) => Row::Standard(vec![
                    number,
                    label.to_string(),
                    with_unit(value, record.unit),
                ]),
                Entry::Group(label, parts) => Row::Expanded {
                    lead: vec![number, label.to_string()],
                    sub_fields: parts
                        .into_iter()
                        .map(|(name, value)| SubField::new(name, with_unit(value, record.unit)))
                        .collect(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetLoader, AssetRef, PreloadedAssets};
    use crate::image::DecodedImage;
    use crate::layout::sections::AssetPlacement;
    use crate::pdf::reader::PdfInspector;

    fn full_record() -> MeasurementRecord {
        let json = r#"{
            "date": "2026-03-14",
            "unit": "cm",
            "customer": { "name": "Aïssatou Ndiaye", "phone": "+221 77 123 45 67" },
            "neck": "38", "shoulder_width": "42", "chest": "96", "under_bust": "82",
            "bust_span": "18", "waist": "74", "hips": "102", "back_width": "36",
            "arm_circumference": "30",
            "sleeve_lengths": { "short_sleeve": "22", "elbow": "34", "three_quarter": "46", "long_sleeve": "60" },
            "wrist": "16", "front_waist_length": "44", "back_waist_length": "41",
            "blouse_length": "62",
            "dress_lengths": { "mini": "80", "knee": "98", "midi": "115", "maxi": "140" },
            "thigh": "58", "knee": "38", "calf": "36", "ankle": "23",
            "trouser_length": "104", "crotch_depth": "28",
            "skirt_lengths": { "short": "45", "knee": "60", "long": "95" },
            "notes": "Prefers a relaxed fit – “no darts” at the back.",
            "taken_by": "Fatou"
        }"#;
        serde_json::from_str(json).expect("parse record")
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn logo() -> DecodedImage {
        DecodedImage { width: 4, height: 2, rgb: vec![120; 4 * 2 * 3] }
    }

    #[test]
    fn table_has_twenty_two_numbered_rows() {
        let rows = measurement_rows(&full_record());
        assert_eq!(rows.len(), 22);

        let expanded: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| matches!(r, Row::Expanded { .. }))
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(expanded, vec![10, 15, 22]);

        match &rows[0] {
            Row::Standard(cells) => assert_eq!(cells, &["1", "Neck", "38 cm"]),
            other => panic!("unexpected first row {other:?}"),
        }
    }

    #[test]
    fn row_count_is_stable_for_an_empty_record() {
        let rows = measurement_rows(&MeasurementRecord::new(MeasurementUnit::Inches));
        assert_eq!(rows.len(), 22);
        match &rows[9] {
            Row::Expanded { sub_fields, .. } => {
                assert_eq!(sub_fields.len(), 4);
                assert!(sub_fields.iter().all(|f| f.value == "-"));
            }
            other => panic!("row 10 should be expanded, got {other:?}"),
        }
    }

    #[test]
    fn compound_values_are_kept_verbatim() {
        let mut record = MeasurementRecord::new(MeasurementUnit::Cm);
        record.waist = "50 - 45".into();
        let rows = measurement_rows(&record);
        match &rows[5] {
            Row::Standard(cells) => assert_eq!(cells[2], "50 - 45 cm"),
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[tokio::test]
    async fn full_record_renders_a_single_page() {
        let config = DocumentConfig::default();
        let resolver = PreloadedAssets::new().with(AssetRef::parse("assets/logo.png"), logo());
        let assets = DocumentAssets::from_config(&config);

        let rendered = MeasurementSheet::render(&full_record(), &assets, &resolver, &config)
            .await
            .expect("render");

        let table = rendered.summary.table(MEASUREMENT_TABLE).expect("table summary");
        assert_eq!(table.data_rows, 22);
        assert_eq!(table.dropped_rows, 0);
        assert!(!table.has_total_row);
        assert_eq!(rendered.summary.logo, Some(AssetPlacement::Image));
        // No photo reference: placeholder box.
        assert_eq!(rendered.summary.photo, Some(AssetPlacement::Fallback));

        let inspector = PdfInspector::from_bytes(&rendered.bytes).expect("valid pdf");
        assert_eq!(inspector.page_count(), 1);
    }

    #[tokio::test]
    async fn unreachable_photo_url_draws_placeholder() {
        init_tracing();
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let root = tempfile::tempdir().expect("tempdir");
        let config = DocumentConfig {
            asset_root: root.path().to_path_buf(),
            fetch_timeout_secs: 2,
            ..DocumentConfig::default()
        };
        let url = format!("http://127.0.0.1:{port}/customers/42.jpg");
        let assets = DocumentAssets::from_config(&config).with_photo(Some(url.as_str()));
        let loader = AssetLoader::from_config(&config).expect("loader");

        let rendered = MeasurementSheet::render(&full_record(), &assets, &loader, &config)
            .await
            .expect("asset failures must not fail the document");

        assert_eq!(rendered.summary.photo, Some(AssetPlacement::Fallback));
        // The temp root holds no logo either.
        assert_eq!(rendered.summary.logo, Some(AssetPlacement::Fallback));
        let inspector = PdfInspector::from_bytes(&rendered.bytes).expect("valid pdf");
        assert_eq!(inspector.page_count(), 1);
    }

    #[tokio::test]
    async fn missing_remote_photo_draws_placeholder() {
        init_tracing();
        let (addr, server) = crate::assets::test_server::not_found().await;
        let root = tempfile::tempdir().expect("tempdir");
        let config = DocumentConfig {
            asset_root: root.path().to_path_buf(),
            fetch_timeout_secs: 2,
            ..DocumentConfig::default()
        };
        let url = format!("http://{addr}/customers/42.jpg");
        let assets = DocumentAssets::default().with_photo(Some(url.as_str()));
        let loader = AssetLoader::from_config(&config).expect("loader");

        let rendered = MeasurementSheet::render(&full_record(), &assets, &loader, &config)
            .await
            .expect("a 404 photo must not fail the document");

        assert_eq!(rendered.summary.photo, Some(AssetPlacement::Fallback));
        assert_eq!(rendered.summary.pages, 1);
        server.abort();
    }

    #[test]
    fn long_notes_are_capped() {
        let config = DocumentConfig::default();
        let mut record = full_record();
        record.notes = Some(
            (0..10)
                .map(|i| format!("Note {i}: please leave extra seam allowance on both side seams of the bodice."))
                .collect::<Vec<_>>()
                .join(" "),
        );
        let builder = DocumentBuilder::new(MEASUREMENT_TITLE, &config).expect("builder");
        let rendered = MeasurementSheet::compose(builder, &record, &ResolvedAssets::default(), &config)
            .expect("render");

        assert_eq!(rendered.summary.notes_lines_drawn, 3);
        assert!(rendered.summary.notes_lines_dropped > 0);
        assert_eq!(rendered.summary.pages, 1);
    }
}
