//! Incident identification.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable identifier of an incident.
///
/// Derived from the alarm name, region and account, so repeated firings of
/// the same alarm map to the same incident. This is a 16-character hex
/// string (8 bytes of SHA256).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(String);

impl IncidentId {
    /// Derive the id for an alarm.
    ///
    /// # Example
    ///
    /// ```
    /// use devops_agent::incident::IncidentId;
    ///
    /// let a = IncidentId::from_alarm("HighCPU", "us-east-1", "123456789012");
    /// let b = IncidentId::from_alarm("HighCPU", "us-east-1", "123456789012");
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str().len(), 16);
    /// ```
    pub fn from_alarm(alarm_name: &str, region: &str, account: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(format!("{}:{}:{}", alarm_name, region, account).as_bytes());
        let digest = hasher.finalize();
        Self(hex::encode(&digest[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IncidentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
