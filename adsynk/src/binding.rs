use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    #[default]
    #[serde(rename = "disconnected")]
    Disconnected,
    #[serde(rename = "connected")]
    Connected,
    #[serde(rename = "failed")]
    Failed,
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelBinding {
    pub channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_state: Option<String>,
    pub status: Connectivity,
    pub last_verified: DateTime<Utc>,
}

impl ChannelBinding {
    pub fn channel(&self) -> Option<&str> {
        if self.status == Connectivity::Connected && !self.channel_id.is_empty() {
            Some(&self.channel_id)
        } else {
            None
        }
    }
}

pub fn resolve(binding: Option<&ChannelBinding>) -> Option<&str> {
    binding.and_then(ChannelBinding::channel)
}

#[derive(Clone, Default)]
pub struct BindingStore {
    current: Arc<RwLock<Option<ChannelBinding>>>,
}

impl BindingStore {
    pub fn snapshot(&self) -> Option<ChannelBinding> {
        self.current.read().unwrap().clone()
    }

    pub fn put(&self, binding: ChannelBinding) {
        *self.current.write().unwrap() = Some(binding);
    }

    pub fn clear(&self) {
        *self.current.write().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(status: Connectivity, channel_id: &str) -> ChannelBinding {
        ChannelBinding {
            channel_id: channel_id.to_string(),
            channel_name: None,
            channel_state: None,
            status,
            last_verified: Utc::now(),
        }
    }

    #[test]
    fn only_connected_bindings_resolve() {
        assert_eq!(
            resolve(Some(&binding(Connectivity::Connected, "ch-1"))),
            Some("ch-1")
        );
        assert_eq!(resolve(Some(&binding(Connectivity::Disconnected, "ch-1"))), None);
        assert_eq!(resolve(Some(&binding(Connectivity::Failed, "ch-1"))), None);
        assert_eq!(resolve(Some(&binding(Connectivity::Error, "ch-1"))), None);
    }

    #[test]
    fn empty_channel_id_never_resolves() {
        assert_eq!(resolve(Some(&binding(Connectivity::Connected, ""))), None);
    }

    #[test]
    fn absent_binding_never_resolves() {
        assert_eq!(resolve(None), None);
    }

    #[test]
    fn store_snapshot_roundtrip() {
        let store = BindingStore::default();
        assert!(store.snapshot().is_none());
        store.put(binding(Connectivity::Connected, "ch-1"));
        assert_eq!(store.snapshot().unwrap().channel_id, "ch-1");
        store.clear();
        assert!(store.snapshot().is_none());
    }
}
