use std::{future::Future, time::Duration};

use axum::{extract::Request, Router};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer, trace::TraceLayer, validate_request::ValidateRequestHeaderLayer,
};
use tracing::{error, info, info_span};

use crate::auth::TokenValidate;
use crate::binding::BindingStore;
use crate::config::Config;
use crate::inserter::InserterClient;
use crate::registry::RegistryClient;
use crate::sync::Synchronizer;

mod auth;
pub mod binding;
pub mod config;
mod error;
pub mod inserter;
pub mod log;
pub mod registry;
pub mod report;
mod result;
mod route;
pub mod sync;

pub async fn serve<F>(cfg: Config, listener: TcpListener, signal: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Server listening on {}", listener.local_addr().unwrap());

    let registry = RegistryClient::new(
        cfg.registry.url.clone(),
        cfg.registry.token.clone(),
        Duration::from_millis(cfg.registry.timeout.0),
    );
    let inserter = InserterClient::new(
        cfg.inserter.url.clone(),
        cfg.inserter.token.clone(),
        Duration::from_millis(cfg.inserter.timeout.0),
    );

    let app_state = AppState {
        sync: Synchronizer::new(registry.clone(), inserter.clone()),
        config: cfg.clone(),
        registry,
        inserter,
        binding: BindingStore::default(),
    };

    let auth_layer = ValidateRequestHeaderLayer::custom(TokenValidate::new(cfg.auth.tokens));
    let app = Router::new()
        .merge(route::route().layer(auth_layer))
        .layer(if cfg.http.cors {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        })
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let span = info_span!(
                    "http_request",
                    uri = ?request.uri(),
                    method = ?request.method(),
                    span_id = tracing::field::Empty,
                );
                span.record(
                    "span_id",
                    span.id().unwrap_or(tracing::Id::from_u64(42)).into_u64(),
                );
                span
            }),
        );

    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await
        .unwrap_or_else(|e| error!("Application error: {e}"));
}

#[derive(Clone)]
struct AppState {
    config: Config,
    registry: RegistryClient,
    inserter: InserterClient,
    binding: BindingStore,
    sync: Synchronizer,
}
