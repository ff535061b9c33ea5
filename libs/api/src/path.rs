pub const ADS: &str = "/api/ads";
pub const SCHEDULES: &str = "/api/schedule";
pub const CHANNEL: &str = "/api/channel";
pub const CHANNEL_TEST: &str = "/api/channel/test";

pub fn schedule(id: &str) -> String {
    format!("/api/schedule/{}", id)
}

pub fn schedules_with_status(status: &str) -> String {
    format!("/api/schedule?status={}", status)
}

pub fn ad(ad: &str) -> String {
    format!("/api/ads/{}", ad)
}

pub fn ad_status(ad: &str) -> String {
    format!("/api/ads/{}/status", ad)
}

pub fn analytics_export(start: &str, end: &str) -> String {
    format!("/api/analytics/export?start={}&end={}", start, end)
}

pub fn channel_test(channel: &str) -> String {
    format!("/channel/{}/test", channel)
}

pub fn channel_schedule(channel: &str) -> String {
    format!("/channel/{}/schedule", channel)
}

pub fn channel_schedule_action(channel: &str, action: &str) -> String {
    format!("/channel/{}/schedule/{}", channel, action)
}
