//! Config command implementation.
//!
//! The `devops-agent config` command shows the resolved deployment
//! environment without constructing or synthesizing anything.

use std::path::{Path, PathBuf};

use crate::app::plan;
use crate::cli::args::ConfigArgs;
use crate::config::DeploymentEnv;
use crate::context::load_context;
use crate::environment::ENVIRONMENT_CONTEXT_KEY;
use crate::error::{DevopsAgentError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    args: ConfigArgs,
    vars: DeploymentEnv,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, args: ConfigArgs, vars: &DeploymentEnv) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            vars: vars.clone(),
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let context = load_context(&self.project_root, &self.args.context)?;

        let plan = match plan(context.try_get(ENVIRONMENT_CONTEXT_KEY), &self.vars) {
            Ok(plan) => plan,
            Err(e @ DevopsAgentError::UnknownEnvironment { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&plan).map_err(|e| DevopsAgentError::Other(e.into()))?;
            ui.raw(&json);
            return Ok(CommandResult::success());
        }

        if self.args.yaml {
            let yaml = serde_yaml::to_string(&plan).map_err(|e| DevopsAgentError::Other(e.into()))?;
            ui.raw(yaml.trim_end());
            return Ok(CommandResult::success());
        }

        ui.show_header("Deployment environment");
        ui.show_field("Environment", plan.resolved.environment.as_str());
        ui.show_field("Source", &plan.resolved.source.to_string());
        ui.show_field("Stack", &plan.stack_id);
        ui.show_field(
            "Account",
            plan.props.env.account.as_deref().unwrap_or("(from credentials)"),
        );
        ui.show_field("Region", &plan.props.env.region);
        ui.show_field("Description", &plan.props.description);
        for (key, value) in &plan.props.tags {
            ui.show_field(&format!("Tag {}", key), value);
        }

        Ok(CommandResult::success())
    }
}
