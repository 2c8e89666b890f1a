//! Stack properties and fixed metadata.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::EnvironmentConfig;
use crate::environment::Environment;

/// Prefix of every stack id; the environment name is appended.
pub const STACK_ID_PREFIX: &str = "DevopsAgentStack";

/// Description attached to every stack.
pub const STACK_DESCRIPTION: &str =
    "Autonomous DevOps Incident Responder using AWS Bedrock AgentCore";

/// Value of the `Project` tag.
pub const PROJECT: &str = "AutonomousDevOpsIncidentResponder";

/// Value of the `Purpose` tag.
pub const PURPOSE: &str = "AWS-AI-Agent-Hackathon";

/// Value of the `Owner` tag.
pub const OWNER: &str = "DevOps-Team";

/// Stack tags, ordered by key.
pub type Tags = BTreeMap<String, String>;

/// Properties handed to the stack constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackProps {
    /// Account/region the stack deploys into.
    pub env: EnvironmentConfig,
    pub environment: Environment,
    pub description: String,
    pub tags: Tags,
}

impl StackProps {
    /// Assemble the standard properties for an environment.
    pub fn for_environment(environment: Environment, env: EnvironmentConfig) -> Self {
        Self {
            env,
            environment,
            description: STACK_DESCRIPTION.to_string(),
            tags: standard_tags(environment),
        }
    }
}

/// Stack id for an environment: `DevopsAgentStack-<env>`.
///
/// ```
/// use devops_agent::environment::Environment;
/// use devops_agent::stack::stack_id;
///
/// assert_eq!(stack_id(Environment::Prod), "DevopsAgentStack-prod");
/// ```
pub fn stack_id(environment: Environment) -> String {
    format!("{}-{}", STACK_ID_PREFIX, environment)
}

/// The four tags every stack carries.
pub fn standard_tags(environment: Environment) -> Tags {
    [
        ("Project", PROJECT),
        ("Environment", environment.as_str()),
        ("Purpose", PURPOSE),
        ("Owner", OWNER),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentEnv;

    #[test]
    fn tags_have_exactly_four_fixed_keys() {
        for env in Environment::ALL {
            let tags = standard_tags(env);
            let keys: Vec<_> = tags.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["Environment", "Owner", "Project", "Purpose"]);
            assert_eq!(tags["Environment"], env.as_str());
            assert_eq!(tags["Project"], PROJECT);
            assert_eq!(tags["Purpose"], PURPOSE);
            assert_eq!(tags["Owner"], OWNER);
        }
    }

    #[test]
    fn stack_id_has_prefix_and_environment() {
        assert_eq!(stack_id(Environment::Dev), "DevopsAgentStack-dev");
        assert_eq!(stack_id(Environment::Prod), "DevopsAgentStack-prod");
    }

    #[test]
    fn props_carry_description_and_env() {
        let env = EnvironmentConfig::for_environment(
            Environment::Prod,
            &DeploymentEnv::default().with_region("eu-west-1"),
        );
        let props = StackProps::for_environment(Environment::Prod, env.clone());
        assert_eq!(props.env, env);
        assert_eq!(props.environment, Environment::Prod);
        assert_eq!(props.description, STACK_DESCRIPTION);
        assert_eq!(props.tags, standard_tags(Environment::Prod));
    }
}
