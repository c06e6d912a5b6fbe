//! Domain types for the tax event ledger.
//!
//! This module provides:
//! - Lossless numeric handling via a Decimal wrapper
//! - Typed identifiers: InvoiceId, ItemId and the composite ItemKey
//! - The three immutable event records: SaleEvent, Amendment, TaxPayment
//! - LineItemVersion, the unit of as-of-date resolution

pub mod decimal;
pub mod events;
pub mod primitives;
pub mod version;

pub use decimal::Decimal;
pub use events::{Amendment, SaleEvent, SaleLineItem, TaxPayment};
pub use primitives::{InvoiceId, ItemId, ItemKey};
pub use version::{LineItemVersion, VersionOrigin};
