//! The three event record kinds the ledger ingests.
//!
//! All records are append-only: once persisted they are never updated or
//! deleted by this service. Corrections arrive as new Amendment records.

use crate::domain::{Decimal, InvoiceId, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line item inside a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItem {
    pub item_id: ItemId,
    pub cost: Decimal,
    pub tax_rate: Decimal,
}

/// A sale event: an invoice with its line items, effective at `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleEvent {
    pub invoice_id: InvoiceId,
    pub date: DateTime<Utc>,
    pub items: Vec<SaleLineItem>,
}

/// An amendment: a standalone override of one line item's cost and rate.
///
/// Amendments need not reference an existing sale or item; an amendment to
/// an unknown identity simply introduces that identity into the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amendment {
    pub invoice_id: InvoiceId,
    pub item_id: ItemId,
    pub date: DateTime<Utc>,
    pub cost: Decimal,
    pub tax_rate: Decimal,
}

/// A tax payment made at `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxPayment {
    pub date: DateTime<Utc>,
    pub amount: Decimal,
}
