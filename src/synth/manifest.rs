//! Cloud assembly manifest and template rendering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CloudAssembly;
use crate::stack::{Stack, Tags};

/// Schema version written into `manifest.json`.
pub const MANIFEST_VERSION: &str = "36.0.0";

/// Artifact type of a stack template.
pub const STACK_ARTIFACT_TYPE: &str = "aws:cloudformation:stack";

/// Top-level `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyManifest {
    pub version: String,
    pub artifacts: BTreeMap<String, ArtifactEntry>,
}

/// One stack artifact in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    #[serde(rename = "type")]
    pub artifact_type: String,
    /// `aws://<account>/<region>`
    pub environment: String,
    pub properties: ArtifactProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactProperties {
    pub template_file: String,
    pub tags: Tags,
}

/// A stack template.
///
/// `Resources` is always empty here: the resource graph belongs to the
/// provisioning engine, not to the bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackTemplate {
    pub description: String,
    pub metadata: TemplateMetadata,
    pub resources: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateMetadata {
    pub environment: String,
    pub tags: Tags,
}

/// Render the manifest and templates for a set of stacks.
pub fn render_assembly(stacks: &[Stack]) -> CloudAssembly {
    let mut artifacts = BTreeMap::new();
    let mut templates = BTreeMap::new();

    for stack in stacks {
        artifacts.insert(
            stack.id.clone(),
            ArtifactEntry {
                artifact_type: STACK_ARTIFACT_TYPE.to_string(),
                environment: stack.props.env.target(),
                properties: ArtifactProperties {
                    template_file: stack.template_file(),
                    tags: stack.props.tags.clone(),
                },
            },
        );
        templates.insert(stack.id.clone(), render_template(stack));
    }

    CloudAssembly {
        directory: None,
        manifest: AssemblyManifest {
            version: MANIFEST_VERSION.to_string(),
            artifacts,
        },
        templates,
    }
}

fn render_template(stack: &Stack) -> StackTemplate {
    StackTemplate {
        description: stack.props.description.clone(),
        metadata: TemplateMetadata {
            environment: stack.props.environment.to_string(),
            tags: stack.props.tags.clone(),
        },
        resources: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeploymentEnv, EnvironmentConfig};
    use crate::environment::Environment;
    use crate::stack::{stack_id, StackProps, STACK_DESCRIPTION};
    use serde_json::json;

    fn stack_for(env: Environment, vars: &DeploymentEnv) -> Stack {
        let cfg = EnvironmentConfig::for_environment(env, vars);
        Stack::new(stack_id(env), StackProps::for_environment(env, cfg))
    }

    #[test]
    fn manifest_lists_each_stack() {
        let vars = DeploymentEnv::default();
        let assembly = render_assembly(&[
            stack_for(Environment::Dev, &vars),
            stack_for(Environment::Prod, &vars),
        ]);
        let ids: Vec<_> = assembly.stack_ids().collect();
        assert_eq!(ids, vec!["DevopsAgentStack-dev", "DevopsAgentStack-prod"]);
        assert_eq!(assembly.templates.len(), 2);
        assert_eq!(assembly.directory, None);
    }

    #[test]
    fn artifact_carries_environment_target_and_tags() {
        let vars = DeploymentEnv::default()
            .with_account("123456789012")
            .with_region("eu-west-1");
        let assembly = render_assembly(&[stack_for(Environment::Prod, &vars)]);
        let artifact = &assembly.manifest.artifacts["DevopsAgentStack-prod"];

        assert_eq!(artifact.artifact_type, STACK_ARTIFACT_TYPE);
        assert_eq!(artifact.environment, "aws://123456789012/eu-west-1");
        assert_eq!(
            artifact.properties.template_file,
            "DevopsAgentStack-prod.template.json"
        );
        assert_eq!(artifact.properties.tags["Environment"], "prod");
    }

    #[test]
    fn template_serializes_in_pascal_case() {
        let assembly = render_assembly(&[stack_for(Environment::Dev, &DeploymentEnv::default())]);
        let template = serde_json::to_value(&assembly.templates["DevopsAgentStack-dev"]).unwrap();

        assert_eq!(
            template,
            json!({
                "Description": STACK_DESCRIPTION,
                "Metadata": {
                    "Environment": "dev",
                    "Tags": {
                        "Environment": "dev",
                        "Owner": "DevOps-Team",
                        "Project": "AutonomousDevOpsIncidentResponder",
                        "Purpose": "AWS-AI-Agent-Hackathon"
                    }
                },
                "Resources": {}
            })
        );
    }

    #[test]
    fn manifest_serializes_type_field() {
        let assembly = render_assembly(&[stack_for(Environment::Dev, &DeploymentEnv::default())]);
        let manifest = serde_json::to_value(&assembly.manifest).unwrap();
        let artifact = &manifest["artifacts"]["DevopsAgentStack-dev"];

        assert_eq!(manifest["version"], MANIFEST_VERSION);
        assert_eq!(artifact["type"], STACK_ARTIFACT_TYPE);
        assert_eq!(artifact["environment"], "aws://unknown-account/us-east-1");
        assert_eq!(
            artifact["properties"]["templateFile"],
            "DevopsAgentStack-dev.template.json"
        );
    }

    #[test]
    fn empty_input_renders_empty_manifest() {
        let assembly = render_assembly(&[]);
        assert!(assembly.manifest.artifacts.is_empty());
        assert!(assembly.templates.is_empty());
    }
}
