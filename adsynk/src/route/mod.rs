use axum::Router;

use crate::AppState;

pub mod ad;
pub mod analytics;
pub mod channel;
pub mod schedule;

pub fn route() -> Router<AppState> {
    Router::new()
        .merge(schedule::route())
        .merge(ad::route())
        .merge(channel::route())
        .merge(analytics::route())
}
