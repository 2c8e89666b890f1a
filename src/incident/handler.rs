//! Incident handling.
//!
//! For each forwarded incident the handler:
//!
//! 1. marks it `processing`
//! 2. gathers context (alarm details plus recent error logs)
//! 3. archives that context for audit
//! 4. asks the agent for a decision, or falls back to rule-based triage
//! 5. marks it `completed` with the resolution
//!
//! Failures to archive, notify or update status are logged and do not stop
//! handling. An event that cannot be understood marks the incident `failed`
//! (when its id can be recovered) and raises a critical alert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{
    build_prompt, triage, Agent, AlarmEvent, Alert, ContextArchive, IncidentContext, IncidentId,
    IncidentRecord, IncidentStatus, IncidentStore, LogSource, NewIncidentEvent, NoLogs, Notifier,
    Severity,
};
use crate::error::Result;

/// Confidence reported for agent decisions.
pub const AGENT_CONFIDENCE: f64 = 0.8;

/// Decision produced for an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolution {
    Agent(AgentResolution),
    Fallback(FallbackResolution),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResolution {
    pub agent_response: String,
    pub actions_taken: Vec<String>,
    pub confidence: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackResolution {
    pub fallback_processing: bool,
    pub action: String,
    pub recommendation: String,
    pub human_notified: bool,
}

impl Resolution {
    pub fn recommendation(&self) -> &str {
        match self {
            Self::Agent(r) => &r.recommendation,
            Self::Fallback(r) => &r.recommendation,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Processes forwarded incidents.
pub struct IncidentHandler<S, N> {
    store: S,
    notifier: N,
    archive: Option<Box<dyn ContextArchive>>,
    logs: Box<dyn LogSource>,
    agent: Option<Box<dyn Agent>>,
}

impl<S: IncidentStore, N: Notifier> IncidentHandler<S, N> {
    /// Create a handler with no archive, no log source and no agent.
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            archive: None,
            logs: Box::new(NoLogs),
            agent: None,
        }
    }

    pub fn with_archive(mut self, archive: Box<dyn ContextArchive>) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn with_log_source(mut self, logs: Box<dyn LogSource>) -> Self {
        self.logs = logs;
        self
    }

    pub fn with_agent(mut self, agent: Box<dyn Agent>) -> Self {
        self.agent = Some(agent);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Handle a raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEvent` if the payload is not a new-incident event.
    pub fn handle_json(&mut self, payload: &str, now: DateTime<Utc>) -> Result<Resolution> {
        let event = match NewIncidentEvent::from_json(payload) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!("Error processing incident: {}", e);
                if let Some((id, original)) = recover_failed_incident(payload) {
                    self.mark_failed(&id, &original, &e.to_string(), now);
                }
                self.alert(format!("Incident processing failed: {}", e), Severity::Critical);
                return Err(e);
            }
        };

        self.handle(&event, now)
    }

    /// Handle a parsed new-incident event.
    pub fn handle(&mut self, event: &NewIncidentEvent, now: DateTime<Utc>) -> Result<Resolution> {
        let id = event.incident_id().clone();
        tracing::info!("Processing incident: {}", id);

        let original = &event.detail.original_event;
        self.set_status(&id, original, IncidentStatus::Processing, None, now);

        match self.process(event, now) {
            Ok((resolution, result)) => {
                self.set_status(&id, original, IncidentStatus::Completed, Some(result), now);
                tracing::info!("Incident processing completed: {}", id);
                Ok(resolution)
            }
            Err(e) => {
                tracing::error!("Error processing incident: {}", e);
                self.mark_failed(&id, original, &e.to_string(), now);
                self.alert(format!("Incident processing failed: {}", e), Severity::Critical);
                Err(e)
            }
        }
    }

    fn process(
        &mut self,
        event: &NewIncidentEvent,
        now: DateTime<Utc>,
    ) -> Result<(Resolution, Value)> {
        let id = event.incident_id();
        let context = IncidentContext::gather(&event.detail.original_event, self.logs.as_ref(), now);

        if let Some(archive) = self.archive.as_mut() {
            match archive.store(id, &context) {
                Ok(location) => tracing::debug!("Context stored at {}", location),
                Err(e) => tracing::warn!("Error storing context: {}", e),
            }
        }

        let decision = self
            .agent
            .as_ref()
            .map(|agent| invoke_agent(agent.as_ref(), id, &context));

        let resolution = match decision {
            Some(Ok(resolution)) => resolution,
            Some(Err(e)) => {
                tracing::warn!("Error invoking agent: {}", e);
                self.fallback(id, &context)
            }
            None => {
                tracing::info!("Agent not configured, using fallback logic");
                self.fallback(id, &context)
            }
        };

        let result = serde_json::to_value(&resolution).map_err(anyhow::Error::from)?;
        Ok((resolution, result))
    }

    fn fallback(&mut self, id: &IncidentId, context: &IncidentContext) -> Resolution {
        let triaged = triage(&context.alarm.name);

        self.alert(
            format!("Incident {} requires attention: {}", id, context.alarm.name),
            Severity::Medium,
        );

        Resolution::Fallback(FallbackResolution {
            fallback_processing: true,
            action: triaged.action,
            recommendation: triaged.recommendation,
            human_notified: true,
        })
    }

    fn alert(&mut self, message: String, severity: Severity) {
        let alert = Alert::new(message, severity);
        match self.notifier.send(&alert) {
            Ok(()) => tracing::debug!("Alert sent: {}", alert.message),
            Err(e) => tracing::warn!("Error sending alert: {}", e),
        }
    }

    /// Update status; creates a record from the event when none exists.
    fn set_status(
        &mut self,
        id: &IncidentId,
        original: &AlarmEvent,
        status: IncidentStatus,
        result: Option<Value>,
        now: DateTime<Utc>,
    ) {
        match self.store.update_status(id, status, result.clone(), now) {
            Ok(true) => {}
            Ok(false) => {
                let mut record = IncidentRecord::new(id.clone(), original, now);
                record.set_status(status, result, now);
                if let Err(e) = self.store.put(record) {
                    tracing::warn!("Error updating incident status: {}", e);
                    return;
                }
            }
            Err(e) => {
                tracing::warn!("Error updating incident status: {}", e);
                return;
            }
        }
        tracing::debug!("Incident status updated: {} -> {}", id, status);
    }

    fn mark_failed(
        &mut self,
        id: &IncidentId,
        original: &AlarmEvent,
        error: &str,
        now: DateTime<Utc>,
    ) {
        let result = Some(json!({ "error": error }));
        self.set_status(id, original, IncidentStatus::Failed, result, now);
    }
}

fn invoke_agent(agent: &dyn Agent, id: &IncidentId, context: &IncidentContext) -> Result<Resolution> {
    let prompt = build_prompt(id, context);
    tracing::debug!(
        "Invoking agent with input: {}...",
        prompt.chars().take(200).collect::<String>()
    );

    let completion = agent.invoke(id.as_str(), &prompt)?;
    tracing::debug!("Agent response: {}", completion);

    Ok(Resolution::Agent(AgentResolution {
        agent_response: completion,
        actions_taken: vec!["analysis_completed".to_string()],
        confidence: AGENT_CONFIDENCE,
        recommendation: "Monitor situation".to_string(),
    }))
}

/// Incident id and alarm of a payload that is not a valid event.
///
/// The alarm is empty when the payload does not carry a readable one.
fn recover_failed_incident(payload: &str) -> Option<(IncidentId, AlarmEvent)> {
    let value: Value = serde_json::from_str(payload).ok()?;
    let id = value["detail"]["incidentId"].as_str().map(IncidentId::from)?;
    let original = serde_json::from_value(value["detail"]["originalEvent"].clone())
        .unwrap_or_else(|_| AlarmEvent::new("", "", "", ""));
    Some((id, original))
}
