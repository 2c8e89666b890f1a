//! Alarm and incident event payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::IncidentId;
use crate::error::{DevopsAgentError, Result};

/// Source of events published for new incidents.
pub const INCIDENT_EVENT_SOURCE: &str = "devops.agent";

/// Detail type of events published for new incidents.
pub const NEW_INCIDENT_DETAIL_TYPE: &str = "New Incident Detected";

/// An alarm state-change event.
///
/// Only the fields the incident pipeline reads are typed; everything else
/// is preserved in `extra` so the original event can be stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmEvent {
    pub account: String,
    pub region: String,
    pub detail: AlarmDetail,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmDetail {
    pub alarm_name: String,
    pub state: AlarmState,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmState {
    /// e.g. `ALARM`, `OK`, `INSUFFICIENT_DATA`
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AlarmEvent {
    /// Build a minimal event; mostly useful in tests and tooling.
    pub fn new(
        alarm_name: impl Into<String>,
        state: impl Into<String>,
        region: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
            detail: AlarmDetail {
                alarm_name: alarm_name.into(),
                state: AlarmState {
                    value: state.into(),
                    reason: None,
                    timestamp: None,
                    extra: Map::new(),
                },
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Parse an event from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DevopsAgentError::InvalidEvent {
            message: format!("alarm event: {}", e),
        })
    }

    pub fn alarm_name(&self) -> &str {
        &self.detail.alarm_name
    }

    pub fn state(&self) -> &str {
        &self.detail.state.value
    }
}

/// Event published when a new (non-duplicate) incident is detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncidentEvent {
    pub source: String,
    pub detail_type: String,
    pub detail: NewIncidentDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncidentDetail {
    pub incident_id: IncidentId,
    pub original_event: AlarmEvent,
    pub processed_at: DateTime<Utc>,
}

impl NewIncidentEvent {
    pub fn new(incident_id: IncidentId, original_event: AlarmEvent, now: DateTime<Utc>) -> Self {
        Self {
            source: INCIDENT_EVENT_SOURCE.to_string(),
            detail_type: NEW_INCIDENT_DETAIL_TYPE.to_string(),
            detail: NewIncidentDetail {
                incident_id,
                original_event,
                processed_at: now,
            },
        }
    }

    /// Parse an event from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DevopsAgentError::InvalidEvent {
            message: format!("incident event: {}", e),
        })
    }

    pub fn incident_id(&self) -> &IncidentId {
        &self.detail.incident_id
    }
}
