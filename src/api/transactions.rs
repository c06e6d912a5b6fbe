use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::api::AppState;
use crate::domain::{SaleEvent, TaxPayment};
use crate::error::AppError;

/// Transaction body, discriminated by `eventType`.
///
/// An unknown or missing discriminator fails deserialization and is
/// rejected as a bad request, never silently dropped.
#[derive(Debug, Deserialize)]
#[serde(tag = "eventType")]
pub enum TransactionRequest {
    #[serde(rename = "SALES")]
    Sales(SaleEvent),
    #[serde(rename = "TAX_PAYMENT")]
    TaxPayment(TaxPayment),
}

/// POST /transactions: ingest a sale or tax payment event.
///
/// The Json rejection is mapped to 400 explicitly; axum's default for a
/// body that parses as JSON but fails validation is 422.
pub async fn ingest_transaction(
    State(state): State<AppState>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    match request {
        TransactionRequest::Sales(sale) => {
            state.service.record_sale(&sale).await.map_err(|e| {
                error!(invoice_id = %sale.invoice_id, error = %e, "Failed to record sale");
                AppError::from(e)
            })?;
        }
        TransactionRequest::TaxPayment(payment) => {
            state.service.record_payment(&payment).await.map_err(|e| {
                error!(error = %e, "Failed to record tax payment");
                AppError::from(e)
            })?;
        }
    }

    Ok(StatusCode::ACCEPTED)
}
