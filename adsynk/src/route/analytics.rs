use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::{Duration, Utc};
use http::header;
use serde::Deserialize;

use crate::{error::AppError, result::Result, AppState};

#[derive(Deserialize)]
struct ExportQuery {
    start: Option<String>,
    end: Option<String>,
}

pub fn route() -> Router<AppState> {
    Router::new().route("/api/analytics/export", get(export))
}

async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let end = query
        .end
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());
    let start = query
        .start
        .unwrap_or_else(|| (Utc::now() - Duration::days(30)).format("%Y-%m-%d").to_string());

    let csv = state
        .registry
        .export_analytics(&start, &end)
        .await
        .map_err(AppError::from_registry)?;

    let filename = format!("ad_analytics_{}_to_{}.csv", start, end);
    Ok((
        [
            (
                header::CONTENT_TYPE,
                String::from("text/csv; charset=utf-8"),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}
