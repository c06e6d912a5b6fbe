//! End-to-end pipeline tests against the real SQLite repository, without
//! the HTTP layer.

use std::str::FromStr;
use std::sync::Arc;
use taxledger::db::init_db;
use taxledger::{
    Amendment, Decimal, EventStore, InvoiceId, ItemId, PositionService, Repository, SaleEvent,
    SaleLineItem, TaxPayment,
};
use chrono::{DateTime, Utc};
use tempfile::TempDir;

const INV_A: &str = "11111111-1111-4111-8111-111111111111";
const INV_B: &str = "22222222-2222-4222-8222-222222222222";
const ITEM_1: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa";
const ITEM_2: &str = "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb";

fn date(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

fn sale(invoice: &str, date_s: &str, items: &[(&str, &str, &str)]) -> SaleEvent {
    SaleEvent {
        invoice_id: InvoiceId::from_str(invoice).unwrap(),
        date: date(date_s),
        items: items
            .iter()
            .map(|(id, cost, rate)| SaleLineItem {
                item_id: ItemId::from_str(id).unwrap(),
                cost: dec(cost),
                tax_rate: dec(rate),
            })
            .collect(),
    }
}

fn amendment(invoice: &str, item: &str, date_s: &str, cost: &str, rate: &str) -> Amendment {
    Amendment {
        invoice_id: InvoiceId::from_str(invoice).unwrap(),
        item_id: ItemId::from_str(item).unwrap(),
        date: date(date_s),
        cost: dec(cost),
        tax_rate: dec(rate),
    }
}

async fn setup() -> (PositionService, String, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let service = PositionService::new(Arc::new(Repository::new(pool)));
    (service, db_path, temp_dir)
}

#[tokio::test]
async fn test_multiple_invoices_aggregate_together() {
    let (service, _path, _temp) = setup().await;

    service
        .record_sale(&sale(
            INV_A,
            "2024-02-22T10:00:00Z",
            &[(ITEM_1, "1000", "0.2")],
        ))
        .await
        .unwrap();
    service
        .record_sale(&sale(
            INV_B,
            "2024-02-22T12:00:00Z",
            &[(ITEM_1, "3000", "0.1")],
        ))
        .await
        .unwrap();

    // Same itemId under different invoices is a different identity.
    let position = service
        .tax_position(date("2024-02-23T00:00:00Z"))
        .await
        .unwrap();
    assert_eq!(position, dec("500"));
}

#[tokio::test]
async fn test_amendment_chain_resolves_to_latest_admissible() {
    let (service, _path, _temp) = setup().await;

    service
        .record_sale(&sale(
            INV_A,
            "2024-02-01T00:00:00Z",
            &[(ITEM_1, "1000", "0.2")],
        ))
        .await
        .unwrap();
    for (d, cost) in [
        ("2024-02-05T00:00:00Z", "900"),
        ("2024-02-10T00:00:00Z", "800"),
        ("2024-03-01T00:00:00Z", "700"),
    ] {
        service
            .record_amendment(&amendment(INV_A, ITEM_1, d, cost, "0.2"))
            .await
            .unwrap();
    }

    // At Feb 15 the Feb 10 amendment is the latest admissible version.
    let position = service
        .tax_position(date("2024-02-15T00:00:00Z"))
        .await
        .unwrap();
    assert_eq!(position, dec("160"));

    // At Mar 2 the Mar 1 amendment has taken over.
    let position = service
        .tax_position(date("2024-03-02T00:00:00Z"))
        .await
        .unwrap();
    assert_eq!(position, dec("140"));
}

#[tokio::test]
async fn test_payments_of_any_sign_are_summed() {
    let (service, _path, _temp) = setup().await;

    service
        .record_payment(&TaxPayment {
            date: date("2024-02-22T09:00:00Z"),
            amount: dec("500"),
        })
        .await
        .unwrap();
    // A correction entered as a negative payment.
    service
        .record_payment(&TaxPayment {
            date: date("2024-02-22T10:00:00Z"),
            amount: dec("-200"),
        })
        .await
        .unwrap();

    let position = service
        .tax_position(date("2024-02-23T00:00:00Z"))
        .await
        .unwrap();
    assert_eq!(position, dec("-300"));
}

#[tokio::test]
async fn test_tie_break_survives_reopening_the_database() {
    let (service, db_path, _temp) = setup().await;

    // Two amendments with identical effective dates; only the persisted
    // ingest order separates them.
    service
        .record_amendment(&amendment(
            INV_A,
            ITEM_1,
            "2024-02-22T10:00:00Z",
            "1000",
            "0.1",
        ))
        .await
        .unwrap();
    service
        .record_amendment(&amendment(
            INV_A,
            ITEM_1,
            "2024-02-22T10:00:00Z",
            "2000",
            "0.1",
        ))
        .await
        .unwrap();

    let expected = service
        .tax_position(date("2024-02-23T00:00:00Z"))
        .await
        .unwrap();
    assert_eq!(expected, dec("200"));

    // A fresh pool over the same file must resolve identically.
    let pool = init_db(&db_path).await.expect("reopen failed");
    let reopened = PositionService::new(Arc::new(Repository::new(pool)));
    let recomputed = reopened
        .tax_position(date("2024-02-23T00:00:00Z"))
        .await
        .unwrap();
    assert_eq!(recomputed, expected);
}

#[tokio::test]
async fn test_store_trait_object_is_usable_directly() {
    let (_, db_path, _temp) = setup().await;

    let pool = init_db(&db_path).await.unwrap();
    let store: Arc<dyn EventStore> = Arc::new(Repository::new(pool));

    store
        .save_payment(&TaxPayment {
            date: date("2024-02-22T09:00:00Z"),
            amount: dec("42"),
        })
        .await
        .unwrap();

    let payments = store
        .list_payments_up_to(date("2024-02-23T00:00:00Z"))
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount, dec("42"));
}
