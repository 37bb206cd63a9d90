// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the couture-document crate. Both sheets are laid
// out and encoded from already-resolved images, so the numbers cover layout,
// printpdf serialisation, and the lopdf page-count check, not I/O.

use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};

use couture_core::{
    CustomOrderRecord, CustomerIdentity, DocumentConfig, ItemStatus, MeasurementRecord,
    MeasurementUnit, OrderItem, OrderStatus, Payment, PaymentMethod, PaymentType, Priority,
};
use couture_document::builder::ResolvedAssets;
use couture_document::image::DecodedImage;
use couture_document::{DocumentBuilder, MeasurementSheet, OrderSheet};

fn logo() -> DecodedImage {
    DecodedImage {
        width: 240,
        height: 100,
        rgb: vec![180; 240 * 100 * 3],
    }
}

fn customer() -> CustomerIdentity {
    CustomerIdentity {
        name: "Mariama Bâ".into(),
        phone: Some("+221 77 000 11 22".into()),
        city: Some("Dakar".into()),
        ..CustomerIdentity::default()
    }
}

fn order() -> CustomOrderRecord {
    let items = (0..6)
        .map(|i| OrderItem {
            garment_type: "boubou".into(),
            custom_type: None,
            description: Some(format!("Bazin riche, broderie n°{i}")),
            quantity: 1 + i,
            unit_price: 15_000 * i64::from(i + 1),
            status: ItemStatus::Sewing,
            assigned_tailor: Some("Ousmane".into()),
        })
        .collect();
    let payments = (0..3)
        .map(|i| Payment {
            amount: 20_000,
            payment_type: if i == 0 {
                PaymentType::Deposit
            } else {
                PaymentType::Installment
            },
            method: PaymentMethod::MobileMoney,
            paid_at: NaiveDate::from_ymd_opt(2026, 3, 1 + i).and_then(|d| d.and_hms_opt(10, 0, 0)),
            notes: None,
        })
        .collect();

    CustomOrderRecord {
        order_number: "CMD-2026-0042".into(),
        status: OrderStatus::InProgress,
        priority: Priority::High,
        order_date: NaiveDate::from_ymd_opt(2026, 3, 1),
        pickup_date: NaiveDate::from_ymd_opt(2026, 3, 20),
        customer_deadline: NaiveDate::from_ymd_opt(2026, 3, 22),
        customer: customer(),
        items,
        payments,
        total_cost: 250_000,
        material_cost: 30_000,
        notes: Some("Fitting on the 15th. ".repeat(8)),
        created_by: Some("Awa".into()),
    }
}

fn measurements() -> MeasurementRecord {
    let mut record = MeasurementRecord::new(MeasurementUnit::Cm);
    record.customer = customer();
    record.date = NaiveDate::from_ymd_opt(2026, 3, 14);
    record.chest = "96".into();
    record.waist = "50 - 45".into();
    record.sleeve_lengths.long_sleeve = "60".into();
    record.dress_lengths.midi = "115".into();
    record
}

fn bench_order_sheet(c: &mut Criterion) {
    let config = DocumentConfig::default();
    let record = order();
    let assets = ResolvedAssets {
        logo: Some(logo()),
        photo: None,
    };

    c.bench_function("order_sheet (6 items, 3 payments)", |b| {
        b.iter(|| {
            let builder = DocumentBuilder::new("bench", &config).expect("builder");
            let rendered = OrderSheet::compose(builder, black_box(&record), &assets, &config)
                .expect("render");
            black_box(rendered.bytes);
        });
    });
}

fn bench_measurement_sheet(c: &mut Criterion) {
    let config = DocumentConfig::default();
    let record = measurements();
    let assets = ResolvedAssets {
        logo: Some(logo()),
        photo: Some(logo()),
    };

    c.bench_function("measurement_sheet (22 rows)", |b| {
        b.iter(|| {
            let builder = DocumentBuilder::new("bench", &config).expect("builder");
            let rendered = MeasurementSheet::compose(builder, black_box(&record), &assets, &config)
                .expect("render");
            black_box(rendered.bytes);
        });
    });
}

criterion_group!(benches, bench_order_sheet, bench_measurement_sheet);
criterion_main!(benches);
