//! Position aggregation: decimal summation of resolved tax and payments.

use crate::domain::{Decimal, ItemKey, LineItemVersion, TaxPayment};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Sum `cost × taxRate` over all resolved winning versions.
pub fn total_tax_from_sales(resolved: &HashMap<ItemKey, LineItemVersion>) -> Decimal {
    resolved
        .values()
        .fold(Decimal::zero(), |acc, v| acc + v.tax())
}

/// Sum payment amounts with date ≤ `query_date`.
///
/// The repository query already restricts by date; re-filtering here keeps
/// the function total over whatever slice it is handed.
pub fn total_payments(payments: &[TaxPayment], query_date: DateTime<Utc>) -> Decimal {
    payments
        .iter()
        .filter(|p| p.date <= query_date)
        .fold(Decimal::zero(), |acc, p| acc + p.amount)
}

/// Net tax position: tax owed from sales minus payments made.
pub fn net_position(
    resolved: &HashMap<ItemKey, LineItemVersion>,
    payments: &[TaxPayment],
    query_date: DateTime<Utc>,
) -> Decimal {
    total_tax_from_sales(resolved) - total_payments(payments, query_date)
}
