use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::api::AppState;
use crate::domain::Decimal;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct TaxPositionQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxPositionResponse {
    /// The caller's date string, echoed back verbatim.
    pub date: String,
    pub tax_position: Decimal,
}

/// Parse an ISO-8601 query date. A bare date is treated as midnight UTC.
fn parse_query_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDate>()
        .ok()
        .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
}

/// GET /tax-position?date=<ISO-8601>: net tax position as of the date.
pub async fn query_tax_position(
    Query(params): Query<TaxPositionQuery>,
    State(state): State<AppState>,
) -> Result<Json<TaxPositionResponse>, AppError> {
    let raw_date = params
        .date
        .ok_or_else(|| AppError::BadRequest("Missing date query parameter".to_string()))?;

    let query_date = parse_query_date(&raw_date)
        .ok_or_else(|| AppError::BadRequest("Invalid date query parameter".to_string()))?;

    let tax_position = state.service.tax_position(query_date).await.map_err(|e| {
        error!(date = %raw_date, error = %e, "Failed to compute tax position");
        AppError::from(e)
    })?;

    Ok(Json(TaxPositionResponse {
        date: raw_date,
        tax_position,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_with_utc_suffix() {
        let dt = parse_query_date("2024-02-22T08:00:00Z").unwrap();
        assert_eq!(dt, "2024-02-22T08:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset_normalizes_to_utc() {
        let dt = parse_query_date("2024-02-22T10:00:00+02:00").unwrap();
        assert_eq!(dt, "2024-02-22T08:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_parse_bare_date_is_midnight_utc() {
        let dt = parse_query_date("2024-02-22").unwrap();
        assert_eq!(dt, "2024-02-22T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_query_date("not-a-date").is_none());
        assert!(parse_query_date("").is_none());
        assert!(parse_query_date("2024-13-45").is_none());
    }

    #[test]
    fn test_response_shape() {
        let response = TaxPositionResponse {
            date: "2024-02-22T11:00:00Z".to_string(),
            tax_position: Decimal::from_str_canonical("100").unwrap(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["date"], "2024-02-22T11:00:00Z");
        assert_eq!(json["taxPosition"], 100.0);
    }
}
