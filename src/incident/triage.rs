//! Rule-based triage used when no agent is available.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Outcome of rule-based triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triage {
    pub action: String,
    pub recommendation: String,
}

struct TriageRule {
    pattern: Regex,
    action: &'static str,
    recommendation: &'static str,
}

fn rule(pattern: &str, action: &'static str, recommendation: &'static str) -> TriageRule {
    TriageRule {
        pattern: RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("triage rule must compile"),
        action,
        recommendation,
    }
}

/// Rules in priority order; the first match wins.
static RULES: LazyLock<Vec<TriageRule>> = LazyLock::new(|| {
    vec![
        rule(
            "cpu",
            "cpu_high_detected",
            "Consider scaling out or investigating high CPU usage",
        ),
        rule(
            "memory",
            "memory_high_detected",
            "Check for memory leaks or scale up instance",
        ),
    ]
});

const GENERIC_ACTION: &str = "generic_alarm";
const GENERIC_RECOMMENDATION: &str = "Manual investigation required";

/// Classify an alarm by its name.
///
/// # Example
///
/// ```
/// use devops_agent::incident::triage;
///
/// assert_eq!(triage("api-HighCpu").action, "cpu_high_detected");
/// assert_eq!(triage("DiskFull").action, "generic_alarm");
/// ```
pub fn triage(alarm_name: &str) -> Triage {
    let (action, recommendation) = RULES
        .iter()
        .find(|r| r.pattern.is_match(alarm_name))
        .map(|r| (r.action, r.recommendation))
        .unwrap_or((GENERIC_ACTION, GENERIC_RECOMMENDATION));

    Triage {
        action: action.to_string(),
        recommendation: recommendation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_alarms() {
        for name in ["HighCPUUtilization", "api-cpu-alarm", "Cpu"] {
            let t = triage(name);
            assert_eq!(t.action, "cpu_high_detected", "{name}");
            assert!(t.recommendation.contains("CPU"));
        }
    }

    #[test]
    fn memory_alarms() {
        let t = triage("worker-MemoryPressure");
        assert_eq!(t.action, "memory_high_detected");
        assert_eq!(t.recommendation, "Check for memory leaks or scale up instance");
    }

    #[test]
    fn cpu_wins_over_memory() {
        assert_eq!(triage("CPU-and-Memory").action, "cpu_high_detected");
    }

    #[test]
    fn anything_else_is_generic() {
        let t = triage("5xxErrorRate");
        assert_eq!(t.action, GENERIC_ACTION);
        assert_eq!(t.recommendation, GENERIC_RECOMMENDATION);
    }
}
