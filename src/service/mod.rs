//! Position service: orchestrates storage reads and the resolution engine.

use crate::db::{EventStore, StoreError};
use crate::domain::{Amendment, Decimal, SaleEvent, TaxPayment};
use crate::engine::{net_position, resolve_as_of, VersionIndex};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Stateless orchestrator over an injected event store.
///
/// The write operations are pass-through appends; all business logic lives
/// in the read path. `tax_position` is a pure function of the event set at
/// call time, so concurrent and repeated calls never interfere.
pub struct PositionService {
    store: Arc<dyn EventStore>,
}

impl PositionService {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        PositionService { store }
    }

    /// Record a sale event.
    pub async fn record_sale(&self, sale: &SaleEvent) -> Result<(), StoreError> {
        self.store.save_sale(sale).await
    }

    /// Record an amendment to a sale line item.
    pub async fn record_amendment(&self, amendment: &Amendment) -> Result<(), StoreError> {
        self.store.save_amendment(amendment).await
    }

    /// Record a tax payment.
    pub async fn record_payment(&self, payment: &TaxPayment) -> Result<(), StoreError> {
        self.store.save_payment(payment).await
    }

    /// Net tax position as of `query_date`.
    ///
    /// The three reads are independent and issued concurrently; the
    /// build/resolve/aggregate pipeline over the fetched snapshots is pure
    /// and synchronous.
    pub async fn tax_position(&self, query_date: DateTime<Utc>) -> Result<Decimal, StoreError> {
        let (sales, amendments, payments) = futures::try_join!(
            self.store.list_all_sales(),
            self.store.list_all_amendments(),
            self.store.list_payments_up_to(query_date),
        )?;

        let index = VersionIndex::build(&sales, &amendments);
        let resolved = resolve_as_of(&index, query_date);
        let position = net_position(&resolved, &payments, query_date);

        debug!(
            identities = index.len(),
            resolved = resolved.len(),
            payments = payments.len(),
            %position,
            "Computed tax position"
        );

        Ok(position)
    }
}
