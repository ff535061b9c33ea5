use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, put},
    Router,
};

use api::{
    request::{CreateAd, SetAdActive},
    response::Ad,
};

use crate::{error::AppError, result::Result, AppState};

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/api/ads", get(list).post(create))
        .route("/api/ads/:id", delete(remove))
        .route("/api/ads/:id/status", put(set_status))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Ad>>> {
    state
        .registry
        .ads()
        .await
        .map(Json)
        .map_err(AppError::from_registry)
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateAd>,
) -> Result<impl IntoResponse> {
    if request.duration == 0 {
        return Err(AppError::bad_request("duration must be greater than zero"));
    }
    let created = state
        .registry
        .create_ad(&request)
        .await
        .map_err(AppError::from_registry)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetAdActive>,
) -> Result<StatusCode> {
    state
        .registry
        .set_ad_active(&id, request.active)
        .await
        .map_err(AppError::from_registry)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state
        .registry
        .delete_ad(&id)
        .await
        .map_err(AppError::from_registry)?;
    Ok(StatusCode::NO_CONTENT)
}
