//! Summary endpoint.
//!
//! `GET /api/patients/:id/summary[?timestamp=…]` — the record a patient
//! view renders: one summary snapshot (newest unless a timestamp is
//! named) plus the notes ordered newest first.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{PatientId, PatientRecord};

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub timestamp: Option<NaiveDateTime>,
}

pub async fn fetch(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<PatientId>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<PatientRecord>, ApiError> {
    let record = ctx.store.record(patient_id, query.timestamp)?;
    Ok(Json(record))
}
