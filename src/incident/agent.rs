//! AI agent invocation.
//!
//! The agent runtime is external. [`Agent`] is the seam; [`CommandAgent`]
//! bridges to any executable that reads a prompt on stdin and writes its
//! answer to stdout.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use super::{IncidentContext, IncidentId};
use crate::error::{DevopsAgentError, Result};

/// Environment variable carrying the session id to a command agent.
pub const SESSION_ID_VAR: &str = "DEVOPS_AGENT_SESSION_ID";

/// An agent that can analyse an incident.
pub trait Agent {
    /// Send `input` in the given session and return the full completion.
    fn invoke(&self, session_id: &str, input: &str) -> Result<String>;
}

/// Build the analysis request sent to the agent.
pub fn build_prompt(id: &IncidentId, context: &IncidentContext) -> String {
    format!(
        "Incident Analysis Request:\n\
         \n\
         Incident ID: {id}\n\
         Alarm: {name}\n\
         State: {state}\n\
         Reason: {reason}\n\
         Region: {region}\n\
         \n\
         Recent Logs:\n\
         {logs}\n\
         \n\
         Please analyze this incident and recommend appropriate remediation actions.\n",
        id = id,
        name = context.alarm.name,
        state = context.alarm.state,
        reason = context.alarm.reason,
        region = context.region,
        logs = context.logs.join("\n"),
    )
}

/// Agent backed by a shell command.
#[derive(Debug, Clone)]
pub struct CommandAgent {
    command: String,
}

impl CommandAgent {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn shell_command(&self) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.command);
            cmd
        }
    }
}

impl Agent for CommandAgent {
    fn invoke(&self, session_id: &str, input: &str) -> Result<String> {
        let agent_error = |message: String| DevopsAgentError::AgentError { message };

        let mut child = self
            .shell_command()
            .env(SESSION_ID_VAR, session_id)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| agent_error(format!("could not start '{}': {}", self.command, e)))?;

        // The prompt is written while output is collected; stdin closes
        // when the writer finishes.
        let writer = child.stdin.take().map(|mut stdin| {
            let prompt = input.to_string();
            thread::spawn(move || stdin.write_all(prompt.as_bytes()))
        });

        let output = child
            .wait_with_output()
            .map_err(|e| agent_error(format!("agent did not finish: {}", e)))?;

        if let Some(writer) = writer {
            match writer.join() {
                // A command may exit without reading its input.
                Ok(Err(e)) if e.kind() != ErrorKind::BrokenPipe => {
                    return Err(agent_error(format!("could not send prompt: {}", e)));
                }
                Err(_) => return Err(agent_error("prompt writer panicked".to_string())),
                _ => {}
            }
        }

        if !output.status.success() {
            return Err(agent_error(format!(
                "'{}' exited with {:?}: {}",
                self.command,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incident::{AlarmEvent, NoLogs};
    use chrono::Utc;

    fn context() -> IncidentContext {
        let mut event = AlarmEvent::new("HighCPU", "ALARM", "us-east-1", "123");
        event.detail.state.reason = Some("Threshold Crossed".into());
        let mut ctx = IncidentContext::gather(&event, &NoLogs, Utc::now());
        ctx.logs = vec!["ERROR a".into(), "ERROR b".into()];
        ctx
    }

    #[test]
    fn prompt_contains_incident_details() {
        let prompt = build_prompt(&IncidentId::from("abc"), &context());
        assert!(prompt.starts_with("Incident Analysis Request:"));
        assert!(prompt.contains("Incident ID: abc"));
        assert!(prompt.contains("Alarm: HighCPU"));
        assert!(prompt.contains("State: ALARM"));
        assert!(prompt.contains("Reason: Threshold Crossed"));
        assert!(prompt.contains("Region: us-east-1"));
        assert!(prompt.contains("ERROR a\nERROR b"));
        assert!(prompt.contains("recommend appropriate remediation actions"));
    }

    #[cfg(unix)]
    #[test]
    fn command_agent_round_trips_stdin() {
        let agent = CommandAgent::new("cat");
        let out = agent.invoke("abc", "  hello agent \n").unwrap();
        assert_eq!(out, "hello agent");
    }

    #[cfg(unix)]
    #[test]
    fn command_agent_handles_prompt_larger_than_pipe_buffer() {
        let agent = CommandAgent::new("cat");
        let prompt = "x".repeat(1_000_000);
        let out = agent.invoke("abc", &prompt).unwrap();
        assert_eq!(out.len(), 1_000_000);
    }

    #[cfg(unix)]
    #[test]
    fn command_agent_ignores_unread_prompt() {
        let agent = CommandAgent::new("echo done");
        let out = agent.invoke("abc", &"y".repeat(1_000_000)).unwrap();
        assert_eq!(out, "done");
    }

    #[cfg(unix)]
    #[test]
    fn command_agent_receives_session_id() {
        let agent = CommandAgent::new("printf %s \"$DEVOPS_AGENT_SESSION_ID\"");
        assert_eq!(agent.invoke("sess-42", "").unwrap(), "sess-42");
    }

    #[cfg(unix)]
    #[test]
    fn command_agent_failure_is_agent_error() {
        let agent = CommandAgent::new("echo nope >&2; exit 3");
        let err = agent.invoke("abc", "").unwrap_err();
        match err {
            DevopsAgentError::AgentError { message } => {
                assert!(message.contains("Some(3)"));
                assert!(message.contains("nope"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
