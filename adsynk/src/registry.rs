use std::{fmt, time::Duration};

use http::{header, StatusCode};
use reqwest::Method;
use tracing::debug;

use api::{
    path,
    request::{CreateAd, ScheduleRequest, SetAdActive},
    response::{Ad, AdCreated, ScheduleCreated, ScheduleRecord},
};

#[derive(Debug)]
pub enum RegistryError {
    Validation(String),
    Backend(String),
    Network(String),
}

impl RegistryError {
    fn classify(status: StatusCode, message: String) -> Self {
        if status == StatusCode::BAD_REQUEST {
            RegistryError::Validation(message)
        } else {
            RegistryError::Backend(message)
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Validation(m) => write!(f, "validation failed: {m}"),
            RegistryError::Backend(m) => write!(f, "registry backend error: {m}"),
            RegistryError::Network(m) => write!(f, "registry unreachable: {m}"),
        }
    }
}

impl std::error::Error for RegistryError {}

#[derive(Clone)]
pub struct RegistryClient {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl RegistryClient {
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

    pub async fn create_schedule(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleCreated, RegistryError> {
        let res = self
            .request(Method::POST, path::SCHEDULES.to_string())
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            let created = res.json::<ScheduleCreated>().await.map_err(transport)?;
            debug!(schedule = created.schedule_id, "schedule record created");
            Ok(created)
        } else {
            Err(Self::error_from(res).await)
        }
    }

    pub async fn delete_schedule(&self, id: &str) -> Result<(), RegistryError> {
        let res = self
            .request(Method::DELETE, path::schedule(id))
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            debug!(schedule = id, "schedule record deleted");
            Ok(())
        } else {
            Err(Self::error_from(res).await)
        }
    }

    pub async fn schedules(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<ScheduleRecord>, RegistryError> {
        let path = match status {
            Some(status) => path::schedules_with_status(status),
            None => path::SCHEDULES.to_string(),
        };
        let res = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            res.json::<Vec<ScheduleRecord>>().await.map_err(transport)
        } else {
            Err(Self::error_from(res).await)
        }
    }

    pub async fn ads(&self) -> Result<Vec<Ad>, RegistryError> {
        let res = self
            .request(Method::GET, path::ADS.to_string())
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            res.json::<Vec<Ad>>().await.map_err(transport)
        } else {
            Err(Self::error_from(res).await)
        }
    }

    pub async fn create_ad(&self, request: &CreateAd) -> Result<AdCreated, RegistryError> {
        let res = self
            .request(Method::POST, path::ADS.to_string())
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            res.json::<AdCreated>().await.map_err(transport)
        } else {
            Err(Self::error_from(res).await)
        }
    }

    pub async fn set_ad_active(&self, id: &str, active: bool) -> Result<(), RegistryError> {
        let res = self
            .request(Method::PUT, path::ad_status(id))
            .json(&SetAdActive { active })
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(res).await)
        }
    }

    // The registry rejects deletion of an ad still referenced by active
    // schedules.
    pub async fn delete_ad(&self, id: &str) -> Result<(), RegistryError> {
        let res = self
            .request(Method::DELETE, path::ad(id))
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            debug!(ad = id, "ad deleted");
            Ok(())
        } else {
            Err(Self::error_from(res).await)
        }
    }

    pub async fn export_analytics(&self, start: &str, end: &str) -> Result<String, RegistryError> {
        let res = self
            .request(Method::GET, path::analytics_export(start, end))
            .send()
            .await
            .map_err(transport)?;
        if res.status().is_success() {
            res.text().await.map_err(transport)
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

    async fn error_from(res: reqwest::Response) -> RegistryError {
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or(v.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| {
                if text.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    text
                }
            });
        RegistryError::classify(status, message)
    }
}

fn transport(err: reqwest::Error) -> RegistryError {
    RegistryError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_is_validation() {
        assert!(matches!(
            RegistryError::classify(StatusCode::BAD_REQUEST, String::from("m")),
            RegistryError::Validation(_)
        ));
        assert!(matches!(
            RegistryError::classify(StatusCode::INTERNAL_SERVER_ERROR, String::from("m")),
            RegistryError::Backend(_)
        ));
        assert!(matches!(
            RegistryError::classify(StatusCode::NOT_FOUND, String::from("m")),
            RegistryError::Backend(_)
        ));
    }
}
