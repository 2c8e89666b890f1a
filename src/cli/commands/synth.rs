//! Synth command implementation.
//!
//! The `devops-agent synth` command resolves the deployment environment,
//! constructs the stack and writes the cloud assembly.

use std::path::{Path, PathBuf};

use crate::app::bootstrap;
use crate::cli::args::SynthArgs;
use crate::config::DeploymentEnv;
use crate::context::load_context;
use crate::error::{DevopsAgentError, Result};
use crate::synth::{DirectorySynthesizer, MemorySynthesizer, Synthesizer};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The synth command implementation.
pub struct SynthCommand {
    project_root: PathBuf,
    args: SynthArgs,
    vars: DeploymentEnv,
}

impl SynthCommand {
    /// Create a new synth command.
    pub fn new(project_root: &Path, args: SynthArgs, vars: &DeploymentEnv) -> Self {
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
    pub fn args(&self) -> &SynthArgs {
        &self.args
    }

    /// Output directory, resolved against the project root.
    pub fn outdir(&self) -> PathBuf {
        if self.args.output.is_absolute() {
            self.args.output.clone()
        } else {
            self.project_root.join(&self.args.output)
        }
    }

    fn synthesizer(&self) -> Box<dyn Synthesizer> {
        if self.args.dry_run {
            Box::new(MemorySynthesizer)
        } else {
            Box::new(DirectorySynthesizer::new(self.outdir()))
        }
    }
}

impl Command for SynthCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let context = load_context(&self.project_root, &self.args.context)?;
        let synthesizer = self.synthesizer();

        let result = match bootstrap(context, &self.vars, synthesizer.as_ref()) {
            Ok(result) => result,
            Err(e @ DevopsAgentError::UnknownEnvironment { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let plan = &result.plan;
        ui.show_header("Synthesizing");
        ui.show_field("Environment", plan.resolved.environment.as_str());
        ui.show_field("Source", &plan.resolved.source.to_string());
        ui.show_field("Stack", &plan.stack_id);
        ui.show_field("Target", &plan.props.env.target());

        if self.args.json {
            let json = serde_json::to_string_pretty(&result.assembly.manifest)
                .map_err(|e| DevopsAgentError::Other(e.into()))?;
            ui.raw(&json);
        }

        match &result.assembly.directory {
            Some(dir) => ui.success(&format!(
                "Synthesized {} to {}",
                plan.stack_id,
                dir.display()
            )),
            None => ui.success(&format!("Rendered {} (dry run)", plan.stack_id)),
        }

        Ok(CommandResult::success())
    }
}
