//! SQLite-backed repository for the event ledger.
//!
//! Dates persist as epoch milliseconds, decimals as canonical strings.
//! Every table carries an AUTOINCREMENT `ingest_id`, and all list queries
//! order by it, so retrieval order is the persisted ingest order.

use crate::db::{EventStore, StoreError};
use crate::domain::{Amendment, Decimal, InvoiceId, ItemId, SaleEvent, SaleLineItem, TaxPayment};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }
}

fn parse_stored_decimal(value: &str, table: &str, column: &str) -> Decimal {
    Decimal::from_str_canonical(value).unwrap_or_else(|e| {
        warn!(
            table = table,
            column = column,
            value = value,
            error = %e,
            "Failed to parse stored decimal, using zero"
        );
        Decimal::zero()
    })
}

fn parse_stored_uuid(value: &str, table: &str, column: &str) -> Uuid {
    Uuid::parse_str(value).unwrap_or_else(|e| {
        warn!(
            table = table,
            column = column,
            value = value,
            error = %e,
            "Failed to parse stored uuid, using nil"
        );
        Uuid::nil()
    })
}

fn date_from_ms(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[async_trait]
impl EventStore for Repository {
    /// Append a sale event and its line items in one transaction.
    async fn save_sale(&self, sale: &SaleEvent) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO sales_events (invoice_id, date_ms) VALUES (?, ?)")
            .bind(sale.invoice_id.to_string())
            .bind(sale.date.timestamp_millis())
            .execute(&mut *tx)
            .await?;

        for item in &sale.items {
            sqlx::query(
                r#"
                INSERT INTO sale_line_items (invoice_id, item_id, cost, tax_rate)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(sale.invoice_id.to_string())
            .bind(item.item_id.to_string())
            .bind(item.cost.to_canonical_string())
            .bind(item.tax_rate.to_canonical_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn save_amendment(&self, amendment: &Amendment) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO amendments (invoice_id, item_id, date_ms, cost, tax_rate)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(amendment.invoice_id.to_string())
        .bind(amendment.item_id.to_string())
        .bind(amendment.date.timestamp_millis())
        .bind(amendment.cost.to_canonical_string())
        .bind(amendment.tax_rate.to_canonical_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save_payment(&self, payment: &TaxPayment) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO tax_payments (date_ms, amount) VALUES (?, ?)")
            .bind(payment.date.timestamp_millis())
            .bind(payment.amount.to_canonical_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_all_sales(&self) -> Result<Vec<SaleEvent>, StoreError> {
        let sale_rows = sqlx::query(
            "SELECT invoice_id, date_ms FROM sales_events ORDER BY ingest_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut sales = Vec::with_capacity(sale_rows.len());
        let mut by_invoice: HashMap<String, usize> = HashMap::with_capacity(sale_rows.len());

        for row in &sale_rows {
            let invoice_id: String = row.get("invoice_id");
            let date_ms: i64 = row.get("date_ms");

            by_invoice.insert(invoice_id.clone(), sales.len());
            sales.push(SaleEvent {
                invoice_id: InvoiceId::new(parse_stored_uuid(
                    &invoice_id,
                    "sales_events",
                    "invoice_id",
                )),
                date: date_from_ms(date_ms),
                items: Vec::new(),
            });
        }

        let item_rows = sqlx::query(
            r#"
            SELECT invoice_id, item_id, cost, tax_rate
            FROM sale_line_items
            ORDER BY ingest_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        for row in &item_rows {
            let invoice_id: String = row.get("invoice_id");
            let item_id: String = row.get("item_id");
            let cost: String = row.get("cost");
            let tax_rate: String = row.get("tax_rate");

            // Foreign key guarantees the parent sale exists.
            if let Some(&idx) = by_invoice.get(&invoice_id) {
                sales[idx].items.push(SaleLineItem {
                    item_id: ItemId::new(parse_stored_uuid(
                        &item_id,
                        "sale_line_items",
                        "item_id",
                    )),
                    cost: parse_stored_decimal(&cost, "sale_line_items", "cost"),
                    tax_rate: parse_stored_decimal(&tax_rate, "sale_line_items", "tax_rate"),
                });
            } else {
                warn!(invoice_id = %invoice_id, "Orphan line item row, skipping");
            }
        }

        Ok(sales)
    }

    async fn list_all_amendments(&self) -> Result<Vec<Amendment>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT invoice_id, item_id, date_ms, cost, tax_rate
            FROM amendments
            ORDER BY ingest_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let amendments = rows
            .iter()
            .map(|row| {
                let invoice_id: String = row.get("invoice_id");
                let item_id: String = row.get("item_id");
                let date_ms: i64 = row.get("date_ms");
                let cost: String = row.get("cost");
                let tax_rate: String = row.get("tax_rate");

                Amendment {
                    invoice_id: InvoiceId::new(parse_stored_uuid(
                        &invoice_id,
                        "amendments",
                        "invoice_id",
                    )),
                    item_id: ItemId::new(parse_stored_uuid(&item_id, "amendments", "item_id")),
                    date: date_from_ms(date_ms),
                    cost: parse_stored_decimal(&cost, "amendments", "cost"),
                    tax_rate: parse_stored_decimal(&tax_rate, "amendments", "tax_rate"),
                }
            })
            .collect();

        Ok(amendments)
    }

    async fn list_payments_up_to(
        &self,
        date: DateTime<Utc>,
    ) -> Result<Vec<TaxPayment>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT date_ms, amount
            FROM tax_payments
            WHERE date_ms <= ?
            ORDER BY ingest_id ASC
            "#,
        )
        .bind(date.timestamp_millis())
        .fetch_all(&self.pool)
        .await?;

        let payments = rows
            .iter()
            .map(|row| {
                let date_ms: i64 = row.get("date_ms");
                let amount: String = row.get("amount");

                TaxPayment {
                    date: date_from_ms(date_ms),
                    amount: parse_stored_decimal(&amount, "tax_payments", "amount"),
                }
            })
            .collect();

        Ok(payments)
    }
}
