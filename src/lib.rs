pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod service;

pub use config::Config;
pub use db::{init_db, EventStore, Repository, StoreError};
pub use domain::{
    Amendment, Decimal, InvoiceId, ItemId, ItemKey, LineItemVersion, SaleEvent, SaleLineItem,
    TaxPayment, VersionOrigin,
};
pub use error::AppError;
pub use service::PositionService;
