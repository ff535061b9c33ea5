use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScheduleRequest {
    pub ad_id: String,
    pub schedule_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    pub duration: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DeleteSchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreateAd {
    pub title: String,
    pub advertiser: String,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SetAdActive {
    pub active: bool,
}

/// Splice request in the inserter's wire format; duration in 90kHz ticks.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SpliceCreate {
    pub action_name: String,
    pub schedule_time: DateTime<Utc>,
    pub splice_event_id: u32,
    pub duration: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TestChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}
