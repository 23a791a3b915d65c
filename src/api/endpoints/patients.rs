//! Patient listing endpoints.
//!
//! `GET /api/patients` — every patient id in the corpus.
//! `GET /api/patients/:id/timestamps` — snapshot timestamps, newest first.

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::PatientId;

#[derive(Serialize)]
pub struct PatientIdsResponse {
    pub patient_ids: Vec<PatientId>,
}

#[derive(Serialize)]
pub struct TimestampsResponse {
    pub timestamps: Vec<NaiveDateTime>,
}

pub async fn list(State(ctx): State<ApiContext>) -> Json<PatientIdsResponse> {
    Json(PatientIdsResponse {
        patient_ids: ctx.store.patient_ids(),
    })
}

pub async fn timestamps(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<PatientId>,
) -> Result<Json<TimestampsResponse>, ApiError> {
    let timestamps = ctx.store.timestamps(patient_id)?;
    Ok(Json(TimestampsResponse { timestamps }))
}
