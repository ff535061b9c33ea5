use std::{fmt, time::Duration};

use http::{header, StatusCode};
use reqwest::Method;
use tracing::debug;

use api::{
    path,
    request::SpliceCreate,
    response::{ChannelDescription, ErrorBody},
};

/// Seconds to the inserter's 90kHz time base.
pub const TICKS_PER_SECOND: u64 = 90_000;

pub fn ticks(duration_secs: u32) -> u64 {
    duration_secs as u64 * TICKS_PER_SECOND
}

// 5-digit range, only needs to avoid collision within one channel's
// outstanding actions.
pub fn pick_splice_event_id() -> u32 {
    rand::random_range(10_000..=99_999)
}

#[derive(Debug)]
pub enum InserterError {
    InvalidRequest(String),
    AuthenticationFailed(String),
    AccessDenied(String),
    NotFound(String),
    RateLimited(String),
    Backend(String),
    Network(String),
    Unclassified(String),
}

impl InserterError {
    fn classify(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => InserterError::InvalidRequest(message),
            StatusCode::UNAUTHORIZED => InserterError::AuthenticationFailed(message),
            StatusCode::FORBIDDEN => InserterError::AccessDenied(message),
            StatusCode::NOT_FOUND => InserterError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => InserterError::RateLimited(message),
            s if s.is_server_error() => InserterError::Backend(message),
            _ => InserterError::Unclassified(message),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, InserterError::Network(_))
    }
}

impl fmt::Display for InserterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InserterError::InvalidRequest(m) => write!(f, "invalid channel or parameters: {m}"),
            InserterError::AuthenticationFailed(m) => write!(f, "authentication failed: {m}"),
            InserterError::AccessDenied(m) => write!(f, "access denied: {m}"),
            InserterError::NotFound(m) => write!(f, "channel or action not found: {m}"),
            InserterError::RateLimited(m) => write!(f, "too many requests: {m}"),
            InserterError::Backend(m) => write!(f, "live channel backend error: {m}"),
            InserterError::Network(m) => write!(f, "network error: {m}"),
            InserterError::Unclassified(m) => write!(f, "{m}"),
        }
    }
}

impl std::error::Error for InserterError {}

#[derive(Clone)]
pub struct InserterClient {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl InserterClient {
    pub fn new(url: String, token: Option<String>, timeout: Duration) -> Self {
        Self {
            url,
            token,
            client: reqwest::Client::builder()
                .connect_timeout(Duration::from_millis(500))
                .timeout(timeout)
                .build()
                .unwrap(),
        }
    }

    pub async fn describe_channel(
        &self,
        channel: &str,
    ) -> Result<ChannelDescription, InserterError> {
        let res = self
            .request(Method::GET, path::channel_test(channel))
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            res.json::<ChannelDescription>().await.map_err(transport)
        } else {
            Err(Self::error_from(res).await)
        }
    }

    pub async fn create_splice(
        &self,
        channel: &str,
        splice: &SpliceCreate,
    ) -> Result<(), InserterError> {
        let res = self
            .request(Method::POST, path::channel_schedule(channel))
            .json(splice)
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            debug!(channel, action = splice.action_name, "splice action created");
            Ok(())
        } else {
            Err(Self::error_from(res).await)
        }
    }

    pub async fn delete_splice(&self, channel: &str, action: &str) -> Result<(), InserterError> {
        let res = self
            .request(Method::DELETE, path::channel_schedule_action(channel, action))
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            debug!(channel, action, "splice action deleted");
            Ok(())
        } else {
            Err(Self::error_from(res).await)
        }
    }

    fn request(&self, method: Method, path: String) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, format!("{}{}", self.url, path));
        if let Some(token) = &self.token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        req
    }

    async fn error_from(res: reqwest::Response) -> InserterError {
        let status = res.status();
        let message = match res.json::<ErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => format!("HTTP {}", status),
        };
        InserterError::classify(status, message)
    }
}

fn transport(err: reqwest::Error) -> InserterError {
    if err.is_timeout() || err.is_connect() {
        InserterError::Network(err.to_string())
    } else {
        InserterError::Unclassified(err.to_string())
    }
}
