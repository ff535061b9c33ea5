use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use api::{
    request::{DeleteSchedule, ScheduleRequest},
    response::{ScheduleRecord, SyncResult},
};

use crate::report::{Report, Severity};
use crate::{error::AppError, result::Result, AppState};

#[derive(Deserialize)]
struct ScheduleQuery {
    status: Option<String>,
}

#[derive(Serialize)]
struct SyncReply {
    #[serde(flatten)]
    result: SyncResult,
    report: Report,
}

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/api/schedule", get(list).post(create))
        .route("/api/schedule/:id", delete(remove))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<ScheduleRecord>>> {
    state
        .registry
        .schedules(query.status.as_deref())
        .await
        .map(Json)
        .map_err(AppError::from_registry)
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<ScheduleRequest>,
) -> Result<impl IntoResponse> {
    if request.duration == 0 {
        return Err(AppError::bad_request("duration must be greater than zero"));
    }
    let binding = state.binding.snapshot();
    let result = state.sync.create(request, binding).await;
    Ok(reply(result))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
    record: Option<Json<DeleteSchedule>>,
) -> Result<impl IntoResponse> {
    let record = record.map(|Json(record)| record).unwrap_or_default();
    let binding = state.binding.snapshot();
    let result = state.sync.delete(&id, &record, binding).await;
    Ok(reply(result))
}

fn reply(result: SyncResult) -> impl IntoResponse {
    let report = Report::from_result(&result);
    match report.severity {
        Severity::Silent => info!(schedule = ?result.schedule_id, "schedule sync complete"),
        Severity::Warning => warn!(message = ?report.message, "schedule sync degraded"),
        Severity::Blocking => error!(message = ?report.message, "schedule sync failed"),
    }
    (report.status(), Json(SyncReply { result, report }))
}
