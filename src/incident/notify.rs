//! Human notification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// How urgently a human needs to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A notification for humans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub subject: String,
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            subject: format!(
                "DevOps Agent Alert ({})",
                severity.to_string().to_uppercase()
            ),
            message: message.into(),
            severity,
        }
    }
}

/// Delivers alerts to humans.
pub trait Notifier {
    fn send(&mut self, alert: &Alert) -> Result<()>;
}

/// Emits alerts through the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&mut self, alert: &Alert) -> Result<()> {
        match alert.severity {
            Severity::Low | Severity::Medium => {
                tracing::warn!("{}: {}", alert.subject, alert.message)
            }
            Severity::High | Severity::Critical => {
                tracing::error!("{}: {}", alert.subject, alert.message)
            }
        }
        Ok(())
    }
}

/// Collects alerts in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    alerts: Vec<Alert>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }
}

impl Notifier for MemoryNotifier {
    fn send(&mut self, alert: &Alert) -> Result<()> {
        self.alerts.push(alert.clone());
        Ok(())
    }
}
