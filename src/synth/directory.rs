//! Writes the cloud assembly to an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use super::{render_assembly, CloudAssembly, Synthesizer};
use crate::error::{DevopsAgentError, Result};
use crate::stack::Stack;

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTDIR: &str = "cdk.out";

/// Name of the manifest inside the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Synthesizer that writes `manifest.json` and one
/// `<stack-id>.template.json` per stack.
#[derive(Debug, Clone)]
pub struct DirectorySynthesizer {
    outdir: PathBuf,
}

impl DirectorySynthesizer {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
        }
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> anyhow::Result<()> {
        let path = self.outdir.join(file);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json + "\n").with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl Synthesizer for DirectorySynthesizer {
    fn synthesize(&self, stacks: &[Stack]) -> Result<CloudAssembly> {
        let mut assembly = render_assembly(stacks);

        fs::create_dir_all(&self.outdir)?;

        for stack in stacks {
            let template = &assembly.templates[&stack.id];
            self.write_json(&stack.template_file(), template)
                .map_err(|e| DevopsAgentError::SynthesisError {
                    stack: stack.id.clone(),
                    message: format!("{:#}", e),
                })?;
        }

        self.write_json(MANIFEST_FILE, &assembly.manifest)?;

        assembly.directory = Some(self.outdir.clone());
        Ok(assembly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeploymentEnv, EnvironmentConfig};
    use crate::environment::Environment;
    use crate::stack::{stack_id, StackProps};
    use crate::synth::{AssemblyManifest, StackTemplate};
    use tempfile::TempDir;

    fn dev_stack() -> Stack {
        let cfg = EnvironmentConfig::for_environment(Environment::Dev, &DeploymentEnv::default());
        Stack::new(
            stack_id(Environment::Dev),
            StackProps::for_environment(Environment::Dev, cfg),
        )
    }

    #[test]
    fn writes_manifest_and_template() {
        let temp = TempDir::new().unwrap();
        let outdir = temp.path().join("cdk.out");
        let synth = DirectorySynthesizer::new(&outdir);

        let assembly = synth.synthesize(&[dev_stack()]).unwrap();

        assert_eq!(assembly.directory.as_deref(), Some(outdir.as_path()));

        let manifest: AssemblyManifest =
            serde_json::from_str(&fs::read_to_string(outdir.join(MANIFEST_FILE)).unwrap())
                .unwrap();
        assert_eq!(manifest, assembly.manifest);

        let template: StackTemplate = serde_json::from_str(
            &fs::read_to_string(outdir.join("DevopsAgentStack-dev.template.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(template, assembly.templates["DevopsAgentStack-dev"]);
    }

    #[test]
    fn creates_nested_output_directory() {
        let temp = TempDir::new().unwrap();
        let outdir = temp.path().join("a").join("b");
        DirectorySynthesizer::new(&outdir)
            .synthesize(&[dev_stack()])
            .unwrap();
        assert!(outdir.join(MANIFEST_FILE).exists());
    }

    #[test]
    fn outdir_accessor() {
        let synth = DirectorySynthesizer::new(DEFAULT_OUTDIR);
        assert_eq!(synth.outdir(), Path::new("cdk.out"));
    }
}
