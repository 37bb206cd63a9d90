// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Domain records handed to the document engine.
//
// The data layer assembles these and passes them in whole; the engine only
// reads them. Measurement values stay opaque display strings because shop
// staff record compound values such as "50 - 45" that are never computed on.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Length unit a measurement record was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnit {
    Cm,
    Inches,
}

impl MeasurementUnit {
    /// Short label printed next to the unit field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cm => "cm",
            Self::Inches => "inches",
        }
    }
}

/// Who the document is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerIdentity {
    pub name: String,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

// -- Measurements -------------------------------------------------------------

/// Sleeve length variants taken in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleeveLengths {
    pub short_sleeve: String,
    pub elbow: String,
    pub three_quarter: String,
    pub long_sleeve: String,
}

/// Dress length variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DressLengths {
    pub mini: String,
    pub knee: String,
    pub midi: String,
    pub maxi: String,
}

/// Skirt length variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkirtLengths {
    pub short: String,
    pub knee: String,
    pub long: String,
}

/// One customer's body measurements.
///
/// Every value is a free-form string; an empty string means "not taken".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub date: Option<NaiveDate>,
    pub unit: MeasurementUnit,
    #[serde(default)]
    pub customer: CustomerIdentity,

    // Upper body
    #[serde(default)]
    pub neck: String,
    #[serde(default)]
    pub shoulder_width: String,
    #[serde(default)]
    pub chest: String,
    #[serde(default)]
    pub under_bust: String,
    #[serde(default)]
    pub bust_span: String,
    #[serde(default)]
    pub waist: String,
    #[serde(default)]
    pub hips: String,
    #[serde(default)]
    pub back_width: String,
    #[serde(default)]
    pub arm_circumference: String,
    #[serde(default)]
    pub sleeve_lengths: SleeveLengths,

    // Torso lengths
    #[serde(default)]
    pub wrist: String,
    #[serde(default)]
    pub front_waist_length: String,
    #[serde(default)]
    pub back_waist_length: String,
    #[serde(default)]
    pub blouse_length: String,
    #[serde(default)]
    pub dress_lengths: DressLengths,

    // Lower body
    #[serde(default)]
    pub thigh: String,
    #[serde(default)]
    pub knee: String,
    #[serde(default)]
    pub calf: String,
    #[serde(default)]
    pub ankle: String,
    #[serde(default)]
    pub trouser_length: String,
    #[serde(default)]
    pub crotch_depth: String,
    #[serde(default)]
    pub skirt_lengths: SkirtLengths,

    #[serde(default)]
    pub notes: Option<String>,
    /// Staff member who took the measurements.
    #[serde(default)]
    pub taken_by: Option<String>,
}

impl MeasurementRecord {
    /// An empty record in the given unit.
    pub fn new(unit: MeasurementUnit) -> Self {
        Self {
            date: None,
            unit,
            customer: CustomerIdentity::default(),
            neck: String::new(),
            shoulder_width: String::new(),
            chest: String::new(),
            under_bust: String::new(),
            bust_span: String::new(),
            waist: String::new(),
            hips: String::new(),
            back_width: String::new(),
            arm_circumference: String::new(),
            sleeve_lengths: SleeveLengths::default(),
            wrist: String::new(),
            front_waist_length: String::new(),
            back_waist_length: String::new(),
            blouse_length: String::new(),
            dress_lengths: DressLengths::default(),
            thigh: String::new(),
            knee: String::new(),
            calf: String::new(),
            ankle: String::new(),
            trouser_length: String::new(),
            crotch_depth: String::new(),
            skirt_lengths: SkirtLengths::default(),
            notes: None,
            taken_by: None,
        }
    }
}

// -- Custom orders ------------------------------------------------------------

/// Lifecycle status of a custom order. Transitions are decided elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Ready => "Ready",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

/// Workshop progress of a single garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Pending,
    Cutting,
    Sewing,
    Fitting,
    Finished,
}

impl ItemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Cutting => "Cutting",
            Self::Sewing => "Sewing",
            Self::Fitting => "Fitting",
            Self::Finished => "Finished",
        }
    }
}

/// One garment on a custom order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub garment_type: String,
    /// Free label used when the garment type is "other".
    #[serde(default)]
    pub custom_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: u32,
    /// Unit price in whole currency units.
    pub unit_price: i64,
    pub status: ItemStatus,
    #[serde(default)]
    pub assigned_tailor: Option<String>,
}

impl OrderItem {
    /// Garment label shown on documents: the custom label wins when present.
    pub fn display_type(&self) -> &str {
        match self.custom_type.as_deref() {
            Some(custom) if !custom.trim().is_empty() => custom,
            _ => &self.garment_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Deposit,
    Installment,
    Balance,
}

impl PaymentType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Installment => "Installment",
            Self::Balance => "Balance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    MobileMoney,
    BankTransfer,
    Card,
    Other,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::MobileMoney => "Mobile money",
            Self::BankTransfer => "Bank transfer",
            Self::Card => "Card",
            Self::Other => "Other",
        }
    }
}

/// A payment received against a custom order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: i64,
    pub payment_type: PaymentType,
    pub method: PaymentMethod,
    pub paid_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A made-to-measure order with its items and payment ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOrderRecord {
    pub order_number: String,
    pub status: OrderStatus,
    pub priority: Priority,
    pub order_date: Option<NaiveDate>,
    pub pickup_date: Option<NaiveDate>,
    pub customer_deadline: Option<NaiveDate>,
    pub customer: CustomerIdentity,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub total_cost: i64,
    #[serde(default)]
    pub material_cost: i64,
    #[serde(default)]
    pub notes: Option<String>,
    /// Staff member who created the order.
    #[serde(default)]
    pub created_by: Option<String>,
}

impl CustomOrderRecord {
    /// Sum of every recorded payment.
    pub fn total_paid(&self) -> i64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Amount still owed: total cost plus material cost minus payments.
    pub fn balance(&self) -> i64 {
        self.total_cost + self.material_cost - self.total_paid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(amount: i64) -> Payment {
        Payment {
            amount,
            payment_type: PaymentType::Installment,
            method: PaymentMethod::Cash,
            paid_at: None,
            notes: None,
        }
    }

    #[test]
    fn balance_includes_material_cost() {
        let order = CustomOrderRecord {
            order_number: "CMD-0042".into(),
            status: OrderStatus::InProgress,
            priority: Priority::Normal,
            order_date: None,
            pickup_date: None,
            customer_deadline: None,
            customer: CustomerIdentity::default(),
            items: Vec::new(),
            payments: vec![payment(20_000), payment(15_000)],
            total_cost: 60_000,
            material_cost: 5_000,
            notes: None,
            created_by: None,
        };
        assert_eq!(order.total_paid(), 35_000);
        assert_eq!(order.balance(), 30_000);
    }

    #[test]
    fn custom_type_overrides_garment_type() {
        let mut item = OrderItem {
            garment_type: "other".into(),
            custom_type: Some("Grand boubou".into()),
            description: None,
            quantity: 1,
            unit_price: 45_000,
            status: ItemStatus::Sewing,
            assigned_tailor: None,
        };
        assert_eq!(item.display_type(), "Grand boubou");
        item.custom_type = Some("  ".into());
        assert_eq!(item.display_type(), "other");
    }

    #[test]
    fn measurement_record_deserializes_with_missing_fields() {
        let json = r#"{
            "date": "2026-03-14",
            "unit": "inches",
            "waist": "32",
            "sleeve_lengths": { "long_sleeve": "24" }
        }"#;
        let record: MeasurementRecord = serde_json::from_str(json).expect("parse record");
        assert_eq!(record.unit, MeasurementUnit::Inches);
        assert_eq!(record.waist, "32");
        assert_eq!(record.sleeve_lengths.long_sleeve, "24");
        assert!(record.chest.is_empty());
        assert!(record.notes.is_none());
    }
}
