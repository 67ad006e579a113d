//! # ID Number Routes
//!
//! Decode ID numbers and shape the payloads the display widgets and the
//! persistence backend consume.
//!
//! | Method | Path                                   | Result                     |
//! |--------|----------------------------------------|----------------------------|
//! | POST   | `/v1/id-numbers/decode`                | components and findings    |
//! | POST   | `/v1/id-numbers/relay`                 | payload for a widget       |
//! | POST   | `/v1/id-numbers/holiday-query`         | holiday backend query      |
//! | POST   | `/v1/id-numbers/references`            | record a reference         |
//! | GET    | `/v1/id-numbers/references/:id_number` | current reference count    |
//!
//! Invalid ID numbers are not errors: decode returns 200 with findings.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use said_core::{
    Decoded, HolidayQuery, HolidayRequestType, ReferenceRecord, ReferenceSink, RelayPayload,
    Widget,
};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, Validate};
use crate::state::AppState;

/// Decode request. Any string is accepted, including the empty one.
#[derive(Debug, Deserialize)]
pub struct DecodeRequest {
    pub id_number: String,
}

/// Decode response.
#[derive(Debug, Serialize)]
pub struct DecodeResponse {
    #[serde(flatten)]
    pub decoded: Decoded,
    /// Findings joined for display. Empty for a valid number.
    pub message: String,
}

/// Relay payload request.
#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    pub id_number: String,
    /// Name the widget announced itself with.
    pub component_name: String,
    /// Required for the holiday widget.
    #[serde(default)]
    pub request_type: Option<HolidayRequestType>,
}

/// Holiday query request.
#[derive(Debug, Deserialize)]
pub struct HolidayQueryRequest {
    pub id_number: String,
    pub request_type: HolidayRequestType,
}

/// Reference request.
#[derive(Debug, Deserialize)]
pub struct ReferenceRequest {
    pub id_number: String,
}

impl Validate for ReferenceRequest {
    fn validate(&self) -> Result<(), String> {
        if self.id_number.trim().is_empty() {
            return Err("id_number must not be empty".to_string());
        }
        Ok(())
    }
}

/// Recorded reference and the updated count.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReferenceResponse {
    pub record: ReferenceRecord,
    pub reference_count: u64,
}

/// Current count for one ID number.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReferenceCount {
    pub id_number: String,
    pub reference_count: u64,
}

/// Build the ID number router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/id-numbers/decode", post(decode))
        .route("/v1/id-numbers/relay", post(relay))
        .route("/v1/id-numbers/holiday-query", post(holiday_query))
        .route("/v1/id-numbers/references", post(record_reference))
        .route("/v1/id-numbers/references/:id_number", get(reference_count))
}

/// POST /v1/id-numbers/decode — Decode an ID number.
async fn decode(
    State(state): State<AppState>,
    body: Result<Json<DecodeRequest>, JsonRejection>,
) -> Result<Json<DecodeResponse>, AppError> {
    let req = extract_json(body)?;
    let decoded = state.decoder.decode(&req.id_number);
    let message = decoded.message();
    Ok(Json(DecodeResponse { decoded, message }))
}

/// POST /v1/id-numbers/relay — Shape the payload a widget would receive.
async fn relay(
    State(state): State<AppState>,
    body: Result<Json<RelayRequest>, JsonRejection>,
) -> Result<Json<RelayPayload>, AppError> {
    let req = extract_json(body)?;
    let widget = Widget::from_component_name(&req.component_name).ok_or_else(|| {
        AppError::NotFound(format!("component \"{}\" not found", req.component_name))
    })?;

    let decoded = state.decoder.decode(&req.id_number);
    RelayPayload::for_widget(widget, &decoded.components, req.request_type)
        .map(Json)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "request_type is required for component \"{}\"",
                widget.component_name()
            ))
        })
}

/// POST /v1/id-numbers/holiday-query — Derive the holiday backend query.
async fn holiday_query(
    State(state): State<AppState>,
    body: Result<Json<HolidayQueryRequest>, JsonRejection>,
) -> Result<Json<HolidayQuery>, AppError> {
    let req = extract_json(body)?;
    let decoded = state.decoder.decode(&req.id_number);
    HolidayQuery::for_birth_date(decoded.components.date, req.request_type)
        .map(Json)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "no valid birth date in \"{}\"",
                req.id_number
            ))
        })
}

/// POST /v1/id-numbers/references — Record that an ID number was looked up.
async fn record_reference(
    State(state): State<AppState>,
    body: Result<Json<ReferenceRequest>, JsonRejection>,
) -> Result<Json<ReferenceResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let decoded = state.decoder.decode(&req.id_number);
    let record = ReferenceRecord::new(req.id_number, &decoded.components);
    let reference_count = state.references.record(&record)?;

    tracing::info!(
        valid = decoded.is_valid(),
        reference_count,
        "recorded id number reference"
    );

    Ok(Json(ReferenceResponse {
        record,
        reference_count,
    }))
}

/// GET /v1/id-numbers/references/:id_number — Current reference count.
async fn reference_count(
    State(state): State<AppState>,
    Path(id_number): Path<String>,
) -> Result<Json<ReferenceCount>, AppError> {
    let reference_count = state.references.count(&id_number).ok_or_else(|| {
        AppError::NotFound(format!("no references recorded for \"{id_number}\""))
    })?;
    Ok(Json(ReferenceCount {
        id_number,
        reference_count,
    }))
}
