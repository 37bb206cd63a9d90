// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Custom order sheet — order header, customer, dates, money, items, and the
// payment ledger on a single A4 page.

use couture_core::error::Result;
use couture_core::{CustomOrderRecord, DocumentConfig};
use tracing::{info, instrument};

use crate::assets::AssetResolver;
use crate::builder::{
    resolve_assets, ComposingDocument, DocumentAssets, DocumentBuilder, RenderedDocument,
    ResolvedAssets,
};
use crate::layout::sections::{self, HeaderSide, InfoCell};
use crate::layout::style::Palette;
use crate::layout::table::{self, Row, TableColumns, TableOptions, TotalRow};
use crate::text::{format_currency, format_date, format_timestamp, sanitize, sanitize_or_dash};

pub const ORDER_TITLE: &str = "CUSTOM ORDER";
pub const ITEMS_TABLE: &str = "ITEMS";
pub const PAYMENTS_TABLE: &str = "PAYMENTS";

const ITEM_COLUMNS: [(&str, f32); 7] = [
    ("No.", 0.06),
    ("Garment", 0.16),
    ("Description", 0.27),
    ("Qty", 0.07),
    ("Unit price", 0.16),
    ("Status", 0.12),
    ("Tailor", 0.16),
];

const PAYMENT_COLUMNS: [(&str, f32); 6] = [
    ("No.", 0.06),
    ("Date", 0.19),
    ("Type", 0.14),
    ("Method", 0.16),
    ("Amount", 0.18),
    ("Notes", 0.27),
];

/// Index of the `Unit price` column.
const PRICE_COLUMN: usize = 4;
/// Index of the `Amount` column, where the ledger total is aligned.
const AMOUNT_COLUMN: usize = 4;

/// Renders [`CustomOrderRecord`]s.
pub struct OrderSheet;

impl OrderSheet {
    #[instrument(skip_all, fields(order = %record.order_number))]
    pub async fn render<R: AssetResolver>(
        record: &CustomOrderRecord,
        assets: &DocumentAssets,
        resolver: &R,
        config: &DocumentConfig,
    ) -> Result<RenderedDocument> {
        let builder = DocumentBuilder::new(ORDER_TITLE, config)?;
        let resolved = resolve_assets(resolver, assets).await;
        Self::compose(builder, record, &resolved, config)
    }

    /// Lay out the sheet from already-resolved images. Order sheets carry no
    /// photo; the header's right box holds the order identifiers.
    pub fn compose(
        builder: DocumentBuilder,
        record: &CustomOrderRecord,
        assets: &ResolvedAssets,
        config: &DocumentConfig,
    ) -> Result<RenderedDocument> {
        let brand = sanitize(Some(config.brand_name.as_str()));
        let mut doc = builder.begin();
        draw_body(&mut doc, &brand, record, assets, config);
        let created_by = record.created_by.as_deref().map(|n| sanitize(Some(n)));
        doc.footer(&sanitize(Some(config.contact_line.as_str())), created_by.as_deref());

        let rendered = doc.finalize()?;
        info!(
            bytes = rendered.bytes.len(),
            items = record.items.len(),
            payments = record.payments.len(),
            balance = record.balance(),
            "Order sheet rendered"
        );
        Ok(rendered)
    }
}

/// Everything above the footer. The items table leaves room for the ledger's
/// header, first payment and total, and for the notes box; both tables drop
/// rows rather than run into the footer.
fn draw_body(
    doc: &mut ComposingDocument,
    brand: &str,
    record: &CustomOrderRecord,
    assets: &ResolvedAssets,
    config: &DocumentConfig,
) {
    let currency = sanitize(Some(config.currency_code.as_str()));

    doc.watermark(brand);
    doc.title_banner(ORDER_TITLE);
    let order_info = order_info(record);
    doc.header(brand, assets.logo.as_ref(), HeaderSide::Info(&order_info));
    doc.grid_box("CUSTOMER", 2, &customer_cells(record));
    doc.card_row("DATES", &date_cards(record));
    doc.card_row("FINANCIAL SUMMARY", &financial_cards(record, &currency));

    let width = doc.table_width();
    let options = TableOptions {
        truncation: config.cell_truncation,
        ..TableOptions::default()
    };
    let ledger_options = TableOptions {
        total_row: Some(TotalRow {
            label: "TOTAL PAID".into(),
            value: format_currency(record.total_paid(), &currency),
            value_column: AMOUNT_COLUMN,
            value_color: Palette::SUCCESS,
        }),
        ..options.clone()
    };
    let payments = payment_rows(record, &currency);

    let notes_reserve = sections::notes_box_height(config.notes_line_cap) + sections::BOX_GAP;
    let ledger_reserve = sections::BOX_TITLE_HEIGHT
        + table::frame_height(&ledger_options)
        + payments.first().map_or(0.0, Row::height)
        + sections::BOX_GAP;

    doc.table_above(
        ITEMS_TABLE,
        &TableColumns::proportional(&ITEM_COLUMNS, width).align_right(&[PRICE_COLUMN]),
        &item_rows(record, &currency),
        &options,
        ledger_reserve + notes_reserve,
    );
    doc.table_above(
        PAYMENTS_TABLE,
        &TableColumns::proportional(&PAYMENT_COLUMNS, width).align_right(&[AMOUNT_COLUMN]),
        &payments,
        &ledger_options,
        notes_reserve,
    );

    doc.notes(
        &sanitize(record.notes.as_deref()),
        config.notes_line_cap,
        config.overflow_policy,
    );
}

fn order_info(record: &CustomOrderRecord) -> Vec<(String, String)> {
    vec![
        ("Order No.".into(), sanitize_or_dash(Some(record.order_number.as_str()))),
        ("Status".into(), record.status.label().into()),
        ("Priority".into(), record.priority.label().into()),
    ]
}

fn customer_cells(record: &CustomOrderRecord) -> Vec<InfoCell> {
    let customer = &record.customer;
    vec![
        InfoCell::new("Name", sanitize_or_dash(Some(customer.name.as_str()))),
        InfoCell::new("Phone", sanitize_or_dash(customer.phone.as_deref())),
        InfoCell::new("WhatsApp", sanitize_or_dash(customer.whatsapp.as_deref())),
        InfoCell::new("Email", sanitize_or_dash(customer.email.as_deref())),
        InfoCell::new("City", sanitize_or_dash(customer.city.as_deref())),
        InfoCell::new("Country", sanitize_or_dash(customer.country.as_deref())),
    ]
}

fn date_cards(record: &CustomOrderRecord) -> Vec<InfoCell> {
    vec![
        InfoCell::new("ORDER DATE", format_date(record.order_date)),
        InfoCell::new("PICKUP DATE", format_date(record.pickup_date)),
        InfoCell::new("CUSTOMER DEADLINE", format_date(record.customer_deadline)),
    ]
}

/// Total cost, material cost, paid, and the outstanding balance. An unpaid
/// balance is shown in the warning colour, a settled one in success.
pub fn financial_cards(record: &CustomOrderRecord, currency: &str) -> Vec<InfoCell> {
    let balance = record.balance();
    let balance_color = if balance > 0 {
        Palette::WARNING
    } else {
        Palette::SUCCESS
    };
    vec![
        InfoCell::new("TOTAL COST", format_currency(record.total_cost, currency)),
        InfoCell::new("MATERIAL COST", format_currency(record.material_cost, currency)),
        InfoCell::new("PAID", format_currency(record.total_paid(), currency)).colored(Palette::SUCCESS),
        InfoCell::new("BALANCE", format_currency(balance, currency)).colored(balance_color),
    ]
}

pub fn item_rows(record: &CustomOrderRecord, currency: &str) -> Vec<Row> {
    record
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            Row::Standard(vec![
                (idx + 1).to_string(),
                sanitize_or_dash(Some(item.display_type())),
                sanitize_or_dash(item.description.as_deref()),
                item.quantity.to_string(),
                format_currency(item.unit_price, currency),
                item.status.label().into(),
                sanitize_or_dash(item.assigned_tailor.as_deref()),
            ])
        })
        .collect()
}

pub fn payment_rows(record: &CustomOrderRecord, currency: &str) -> Vec<Row> {
    record
        .payments
        .iter()
        .enumerate()
        .map(|(idx, payment)| {
            Row::Standard(vec![
                (idx + 1).to_string(),
                format_timestamp(payment.paid_at),
                payment.payment_type.label().into(),
                payment.method.label().into(),
                format_currency(payment.amount, currency),
                sanitize_or_dash(payment.notes.as_deref()),
            ])
        })
        .collect()
}
