use http::StatusCode;
use serde::Serialize;

use api::response::SyncResult;

pub const WARNING_DISMISS_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Silent,
    Warning,
    Blocking,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub refresh: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismiss_after_secs: Option<u64>,
}

impl Report {
    pub fn from_result(result: &SyncResult) -> Self {
        if !result.registry_success {
            Report {
                severity: Severity::Blocking,
                message: Some(
                    result
                        .errors
                        .first()
                        .cloned()
                        .unwrap_or_else(|| String::from("operation failed")),
                ),
                refresh: false,
                dismiss_after_secs: None,
            }
        } else if !result.inserter_success {
            Report {
                severity: Severity::Warning,
                message: result.errors.first().cloned(),
                refresh: true,
                dismiss_after_secs: Some(WARNING_DISMISS_SECS),
            }
        } else {
            Report {
                severity: Severity::Silent,
                message: None,
                refresh: true,
                dismiss_after_secs: None,
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.severity {
            Severity::Blocking => StatusCode::BAD_GATEWAY,
            _ => StatusCode::OK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(registry: bool, inserter: bool, errors: Vec<&str>) -> SyncResult {
        SyncResult {
            success: registry,
            registry_success: registry,
            inserter_success: inserter,
            errors: errors.into_iter().map(String::from).collect(),
            schedule_id: None,
        }
    }

    #[test]
    fn full_success_is_silent_and_refreshes() {
        let report = Report::from_result(&result(true, true, vec![]));
        assert_eq!(report.severity, Severity::Silent);
        assert!(report.message.is_none());
        assert!(report.refresh);
        assert!(report.dismiss_after_secs.is_none());
        assert_eq!(report.status(), StatusCode::OK);
    }

    #[test]
    fn degraded_success_warns_and_still_refreshes() {
        let report = Report::from_result(&result(true, false, vec!["sync failed"]));
        assert_eq!(report.severity, Severity::Warning);
        assert_eq!(report.message.as_deref(), Some("sync failed"));
        assert!(report.refresh);
        assert_eq!(report.dismiss_after_secs, Some(WARNING_DISMISS_SECS));
        assert_eq!(report.status(), StatusCode::OK);
    }

    #[test]
    fn registry_failure_blocks_without_refresh() {
        let report = Report::from_result(&result(false, false, vec!["registry down"]));
        assert_eq!(report.severity, Severity::Blocking);
        assert_eq!(report.message.as_deref(), Some("registry down"));
        assert!(!report.refresh);
        assert!(report.dismiss_after_secs.is_none());
        assert_eq!(report.status(), StatusCode::BAD_GATEWAY);
    }
}
