//! Incident processing.
//!
//! Two stages run after an alarm fires:
//!
//! - [`Deduplicator`] turns alarm events into incidents, drops repeats
//!   inside a time window and forwards new incidents on an [`EventBus`]
//! - [`IncidentHandler`] gathers context for a forwarded incident, asks an
//!   [`Agent`] (or rule-based [`triage`]) what to do and notifies humans
//!
//! Every external service sits behind a trait with a local implementation:
//!
//! | Trait | Local implementations |
//! |---|---|
//! | [`IncidentStore`] | [`MemoryIncidentStore`], [`JsonlIncidentStore`] |
//! | [`EventBus`] | [`MemoryEventBus`], [`OutboxEventBus`] |
//! | [`ContextArchive`] | [`DirectoryArchive`] |
//! | [`LogSource`] | [`NoLogs`], [`FileLogSource`] |
//! | [`Agent`] | [`CommandAgent`] |
//! | [`Notifier`] | [`LogNotifier`], [`MemoryNotifier`] |

pub mod agent;
pub mod archive;
pub mod bus;
pub mod context;
pub mod dedup;
pub mod event;
pub mod handler;
pub mod id;
pub mod notify;
pub mod record;
pub mod store;
pub mod triage;

pub use agent::{build_prompt, Agent, CommandAgent, SESSION_ID_VAR};
pub use archive::{context_key, ContextArchive, DirectoryArchive};
pub use bus::{EventBus, MemoryEventBus, OutboxEventBus};
pub use context::{
    AlarmSummary, FileLogSource, IncidentContext, LogSource, NoLogs,
    DEFAULT_LOG_LOOKBACK_MINUTES, MAX_LOG_LINES,
};
pub use dedup::{
    window_minutes, DedupAction, DedupOutcome, Deduplicator, DEFAULT_DEDUP_WINDOW_MINUTES,
};
pub use event::{
    AlarmDetail, AlarmEvent, AlarmState, NewIncidentDetail, NewIncidentEvent,
    INCIDENT_EVENT_SOURCE, NEW_INCIDENT_DETAIL_TYPE,
};
pub use handler::{
    AgentResolution, FallbackResolution, IncidentHandler, Resolution, AGENT_CONFIDENCE,
};
pub use id::IncidentId;
pub use notify::{Alert, LogNotifier, MemoryNotifier, Notifier, Severity};
pub use record::{IncidentRecord, IncidentStatus, RECORD_RETENTION_DAYS};
pub use store::{IncidentStore, JsonlIncidentStore, MemoryIncidentStore};
pub use triage::{triage, Triage};
