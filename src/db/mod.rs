//! Storage layer for the event ledger.
//!
//! This module provides:
//! - Database initialization and migrations
//! - The `EventStore` trait the service layer depends on
//! - The SQLite-backed `Repository` implementation

pub mod migrations;
pub mod repo;

pub use migrations::init_db;
pub use repo::Repository;

use crate::domain::{Amendment, SaleEvent, TaxPayment};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Storage failure surfaced to the service layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The four storage operations the position service needs.
///
/// List results come back in persisted insertion order, which anchors the
/// resolver's sequence tie-break to ingest order instead of whatever order
/// a query engine happens to return rows in.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append a sale event with its line items.
    async fn save_sale(&self, sale: &SaleEvent) -> Result<(), StoreError>;

    /// Append an amendment.
    async fn save_amendment(&self, amendment: &Amendment) -> Result<(), StoreError>;

    /// Append a tax payment.
    async fn save_payment(&self, payment: &TaxPayment) -> Result<(), StoreError>;

    /// All sale events with their line items, in insertion order.
    async fn list_all_sales(&self) -> Result<Vec<SaleEvent>, StoreError>;

    /// All amendments, in insertion order.
    async fn list_all_amendments(&self) -> Result<Vec<Amendment>, StoreError>;

    /// Payments dated at or before `date`, in insertion order.
    async fn list_payments_up_to(&self, date: DateTime<Utc>)
        -> Result<Vec<TaxPayment>, StoreError>;
}
