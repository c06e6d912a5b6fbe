//! Pure computation engine for as-of-date tax position reconstruction.
//!
//! Nothing in this module performs I/O or suspends: the service layer
//! fetches the event history and hands in plain slices. Every function is
//! total over its input; malformed values are degraded at the storage
//! boundary, never rejected here.

pub mod aggregate;
pub mod index;
pub mod resolver;

pub use aggregate::{net_position, total_payments, total_tax_from_sales};
pub use index::VersionIndex;
pub use resolver::resolve_as_of;
