//! Synthesis of constructed stacks into a deployable artifact.
//!
//! The [`Synthesizer`] trait is the seam to the provisioning engine. This
//! crate ships two implementations:
//!
//! - [`MemorySynthesizer`] renders the cloud assembly without touching disk
//! - [`DirectorySynthesizer`] renders and writes it to an output directory
//!
//! # Example
//!
//! ```
//! use devops_agent::config::{DeploymentEnv, EnvironmentConfig};
//! use devops_agent::environment::Environment;
//! use devops_agent::stack::{stack_id, Stack, StackProps};
//! use devops_agent::synth::{MemorySynthesizer, Synthesizer};
//!
//! let env = EnvironmentConfig::for_environment(Environment::Dev, &DeploymentEnv::default());
//! let stack = Stack::new(stack_id(Environment::Dev), StackProps::for_environment(Environment::Dev, env));
//!
//! let assembly = MemorySynthesizer.synthesize(&[stack]).unwrap();
//! assert!(assembly.manifest.artifacts.contains_key("DevopsAgentStack-dev"));
//! ```

pub mod directory;
pub mod manifest;

pub use directory::{DirectorySynthesizer, DEFAULT_OUTDIR, MANIFEST_FILE};
pub use manifest::{
    render_assembly, ArtifactEntry, ArtifactProperties, AssemblyManifest, StackTemplate,
    TemplateMetadata, MANIFEST_VERSION, STACK_ARTIFACT_TYPE,
};

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Result;
use crate::stack::Stack;

/// Builds a deployable artifact from constructed stacks.
pub trait Synthesizer {
    /// Synthesize every stack into a single cloud assembly.
    fn synthesize(&self, stacks: &[Stack]) -> Result<CloudAssembly>;
}

/// The synthesized output: a manifest plus one template per stack.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudAssembly {
    /// Where the assembly was written, if it was written at all.
    pub directory: Option<PathBuf>,
    pub manifest: AssemblyManifest,
    /// Templates keyed by stack id.
    pub templates: BTreeMap<String, StackTemplate>,
}

impl CloudAssembly {
    /// Ids of the stacks in this assembly.
    pub fn stack_ids(&self) -> impl Iterator<Item = &str> {
        self.manifest.artifacts.keys().map(String::as_str)
    }
}

/// Renders the assembly in memory only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySynthesizer;

impl Synthesizer for MemorySynthesizer {
    fn synthesize(&self, stacks: &[Stack]) -> Result<CloudAssembly> {
        Ok(render_assembly(stacks))
    }
}
