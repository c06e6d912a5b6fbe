use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use crate::api::AppState;
use crate::domain::Amendment;
use crate::error::AppError;

/// PATCH /sale: record an amendment to a single sale line item.
///
/// The amendment is valid even when no matching sale or item exists; it
/// simply introduces a new identity into the ledger.
pub async fn amend_sale(
    State(state): State<AppState>,
    payload: Result<Json<Amendment>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(amendment) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    state.service.record_amendment(&amendment).await.map_err(|e| {
        error!(
            invoice_id = %amendment.invoice_id,
            item_id = %amendment.item_id,
            error = %e,
            "Failed to record amendment"
        );
        AppError::from(e)
    })?;

    Ok(StatusCode::ACCEPTED)
}
