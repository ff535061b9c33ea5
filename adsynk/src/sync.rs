use tracing::{info, warn};

use api::{
    request::{DeleteSchedule, ScheduleRequest, SpliceCreate},
    response::SyncResult,
};

use crate::binding::{self, ChannelBinding};
use crate::inserter::{self, InserterClient};
use crate::registry::RegistryClient;

/// Drives the two-step create/delete protocol across the schedule
/// registry and the live-channel inserter.
#[derive(Clone)]
pub struct Synchronizer {
    registry: RegistryClient,
    inserter: InserterClient,
}

// Event name when non-blank, else a schedule-id fallback. Must be stable
// between create and the later matching delete.
pub fn action_name(event_name: Option<&str>, schedule_id: &str) -> String {
    match event_name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("ad-{}", schedule_id),
    }
}

impl Synchronizer {
    pub fn new(registry: RegistryClient, inserter: InserterClient) -> Self {
        Self { registry, inserter }
    }

    pub async fn create(
        &self,
        request: ScheduleRequest,
        binding: Option<ChannelBinding>,
    ) -> SyncResult {
        let created = match self.registry.create_schedule(&request).await {
            Ok(created) => created,
            Err(err) => {
                warn!(ad = request.ad_id, %err, "registry create failed");
                return SyncResult {
                    success: false,
                    registry_success: false,
                    inserter_success: false,
                    errors: vec![format!("registry create failed: {err}")],
                    schedule_id: None,
                };
            }
        };

        let Some(channel) = binding::resolve(binding.as_ref()) else {
            info!(
                schedule = created.schedule_id,
                "live channel not bound, schedule created in registry only"
            );
            return SyncResult {
                success: true,
                registry_success: true,
                inserter_success: false,
                errors: vec![String::from(
                    "live channel sync skipped: channel is not configured or not connected",
                )],
                schedule_id: Some(created.schedule_id),
            };
        };

        let splice = SpliceCreate {
            action_name: action_name(request.event_name.as_deref(), &created.schedule_id),
            schedule_time: request.schedule_time,
            splice_event_id: inserter::pick_splice_event_id(),
            duration: inserter::ticks(request.duration),
        };
        match self.inserter.create_splice(channel, &splice).await {
            Ok(()) => {
                info!(
                    schedule = created.schedule_id,
                    channel,
                    action = splice.action_name,
                    "schedule synchronized"
                );
                SyncResult {
                    success: true,
                    registry_success: true,
                    inserter_success: true,
                    errors: vec![],
                    schedule_id: Some(created.schedule_id),
                }
            }
            Err(err) => {
                warn!(
                    schedule = created.schedule_id,
                    channel,
                    action = splice.action_name,
                    %err,
                    "live channel sync failed"
                );
                SyncResult {
                    success: true,
                    registry_success: true,
                    inserter_success: false,
                    errors: vec![format!("live channel sync failed: {err}")],
                    schedule_id: Some(created.schedule_id),
                }
            }
        }
    }

    pub async fn delete(
        &self,
        schedule_id: &str,
        record: &DeleteSchedule,
        binding: Option<ChannelBinding>,
    ) -> SyncResult {
        if let Err(err) = self.registry.delete_schedule(schedule_id).await {
            warn!(schedule = schedule_id, %err, "registry delete failed");
            return SyncResult {
                success: false,
                registry_success: false,
                inserter_success: false,
                errors: vec![format!("registry delete failed: {err}")],
                schedule_id: Some(schedule_id.to_string()),
            };
        }

        let Some(channel) = binding::resolve(binding.as_ref()) else {
            info!(
                schedule = schedule_id,
                "live channel not bound, schedule deleted from registry only"
            );
            return SyncResult {
                success: true,
                registry_success: true,
                inserter_success: false,
                errors: vec![String::from(
                    "live channel sync skipped: channel is disconnected or not configured, \
                     schedule deleted from registry only",
                )],
                schedule_id: Some(schedule_id.to_string()),
            };
        };

        let action = action_name(record.event_name.as_deref(), schedule_id);
        match self.inserter.delete_splice(channel, &action).await {
            Ok(()) => {
                info!(schedule = schedule_id, channel, action, "schedule removed from both systems");
                SyncResult {
                    success: true,
                    registry_success: true,
                    inserter_success: true,
                    errors: vec![],
                    schedule_id: Some(schedule_id.to_string()),
                }
            }
            Err(err) => {
                warn!(schedule = schedule_id, channel, action, %err, "live channel delete failed");
                SyncResult {
                    success: true,
                    registry_success: true,
                    inserter_success: false,
                    errors: vec![format!("live channel delete failed: {err}")],
                    schedule_id: Some(schedule_id.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_name_prefers_event_name() {
        assert_eq!(action_name(Some("evt-promo"), "schedule_1"), "evt-promo");
    }

    #[test]
    fn action_name_falls_back_to_schedule_id() {
        assert_eq!(action_name(None, "schedule_1"), "ad-schedule_1");
        assert_eq!(action_name(Some(""), "schedule_1"), "ad-schedule_1");
        assert_eq!(action_name(Some("   "), "schedule_1"), "ad-schedule_1");
    }

    #[test]
    fn action_name_is_stable_across_create_and_delete() {
        let at_create = action_name(Some("evt-promo"), "schedule_1");
        let at_delete = action_name(Some("evt-promo"), "schedule_1");
        assert_eq!(at_create, at_delete);

        let at_create = action_name(None, "schedule_2");
        let at_delete = action_name(None, "schedule_2");
        assert_eq!(at_create, at_delete);
    }
}
