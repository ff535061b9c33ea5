use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use api::request::TestChannel;

use crate::binding::{ChannelBinding, Connectivity};
use crate::{error::AppError, result::Result, AppState};

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/api/channel", get(current).delete(clear))
        .route("/api/channel/test", post(test))
}

async fn current(State(state): State<AppState>) -> Json<Option<ChannelBinding>> {
    Json(state.binding.snapshot())
}

async fn clear(State(state): State<AppState>) -> StatusCode {
    state.binding.clear();
    StatusCode::NO_CONTENT
}

#[derive(Serialize)]
struct TestReply {
    binding: ChannelBinding,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn test(
    State(state): State<AppState>,
    body: Option<Json<TestChannel>>,
) -> Result<Json<TestReply>> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let channel_id = body
        .channel_id
        .filter(|id| !id.is_empty())
        .or_else(|| state.config.inserter.channel.clone())
        .ok_or_else(|| AppError::bad_request("channel id is required"))?;

    let reply = match state.inserter.describe_channel(&channel_id).await {
        Ok(description) => {
            info!(
                channel = channel_id,
                name = description.channel_name,
                state = description.channel_state,
                "channel connection verified"
            );
            TestReply {
                binding: ChannelBinding {
                    channel_id: channel_id.clone(),
                    channel_name: Some(description.channel_name),
                    channel_state: Some(description.channel_state),
                    status: Connectivity::Connected,
                    last_verified: Utc::now(),
                },
                error: None,
            }
        }
        Err(err) => {
            warn!(channel = channel_id, %err, "channel connection test failed");
            let status = if err.is_network() {
                Connectivity::Error
            } else {
                Connectivity::Failed
            };
            TestReply {
                binding: ChannelBinding {
                    channel_id: channel_id.clone(),
                    channel_name: None,
                    channel_state: None,
                    status,
                    last_verified: Utc::now(),
                },
                error: Some(err.to_string()),
            }
        }
    };
    state.binding.put(reply.binding.clone());
    Ok(Json(reply))
}
