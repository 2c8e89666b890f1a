//! Alarm deduplication.
//!
//! Alarms that fire repeatedly for the same underlying problem map to the
//! same incident id. A new occurrence inside the deduplication window is
//! ignored; otherwise it is recorded and forwarded to the handler.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;

use super::{AlarmEvent, EventBus, IncidentId, IncidentRecord, IncidentStore, NewIncidentEvent};
use crate::error::{DevopsAgentError, Result};

/// Default deduplication window.
pub const DEFAULT_DEDUP_WINDOW_MINUTES: i64 = 15;

/// Convert a window length in minutes to a [`Duration`].
///
/// # Errors
///
/// Returns `InvalidArgument` for negative lengths and lengths too large
/// to represent.
pub fn window_minutes(minutes: i64) -> Result<Duration> {
    if minutes < 0 {
        return Err(DevopsAgentError::InvalidArgument {
            message: format!("window must not be negative, got {} minutes", minutes),
        });
    }

    Duration::try_minutes(minutes).ok_or_else(|| DevopsAgentError::InvalidArgument {
        message: format!("window of {} minutes is too large", minutes),
    })
}

/// What the deduplicator did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupAction {
    Ignored,
    Forwarded,
}

impl fmt::Display for DedupAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => write!(f, "ignored"),
            Self::Forwarded => write!(f, "forwarded"),
        }
    }
}

/// Outcome of processing one alarm event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupOutcome {
    pub message: String,
    pub incident_id: IncidentId,
    pub action: DedupAction,
}

impl DedupOutcome {
    fn ignored(incident_id: IncidentId) -> Self {
        Self {
            message: "Duplicate incident ignored".to_string(),
            incident_id,
            action: DedupAction::Ignored,
        }
    }

    fn forwarded(incident_id: IncidentId) -> Self {
        Self {
            message: "New incident processed".to_string(),
            incident_id,
            action: DedupAction::Forwarded,
        }
    }
}

/// Suppresses repeated alarms and forwards new incidents.
pub struct Deduplicator<S, B> {
    store: S,
    bus: B,
    window: Duration,
}

impl<S: IncidentStore, B: EventBus> Deduplicator<S, B> {
    pub fn new(store: S, bus: B) -> Self {
        Self {
            store,
            bus,
            window: Duration::minutes(DEFAULT_DEDUP_WINDOW_MINUTES),
        }
    }

    /// Override the deduplication window.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Process one alarm event.
    ///
    /// # Errors
    ///
    /// Recording the incident or publishing the event can fail. A failed
    /// duplicate lookup is logged and the event is treated as new.
    pub fn process(&mut self, event: &AlarmEvent, now: DateTime<Utc>) -> Result<DedupOutcome> {
        let incident_id = IncidentId::from_alarm(event.alarm_name(), &event.region, &event.account);
        tracing::info!("Processing incident: {}", incident_id);

        if self.is_duplicate(&incident_id, now) {
            tracing::info!("Duplicate incident detected: {}", incident_id);
            return Ok(DedupOutcome::ignored(incident_id));
        }

        self.store
            .put(IncidentRecord::new(incident_id.clone(), event, now))?;
        tracing::debug!("Incident recorded: {}", incident_id);

        self.bus
            .publish(&NewIncidentEvent::new(incident_id.clone(), event.clone(), now))?;
        tracing::info!("New incident forwarded: {}", incident_id);

        Ok(DedupOutcome::forwarded(incident_id))
    }

    fn is_duplicate(&self, incident_id: &IncidentId, now: DateTime<Utc>) -> bool {
        // A window reaching past the earliest representable time covers everything.
        let window_start = now
            .checked_sub_signed(self.window)
            .map_or(i64::MIN, |start| start.timestamp_millis());
        match self.store.find_since(incident_id, window_start) {
            Ok(found) => found.is_some(),
            Err(e) => {
                tracing::warn!("Error checking for duplicates: {}", e);
                false
            }
        }
    }
}
