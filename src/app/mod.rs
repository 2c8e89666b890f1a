//! The top-level application.
//!
//! An [`App`] owns the context, collects the stacks constructed into it
//! and finally synthesizes them. [`bootstrap()`] drives the whole sequence
//! for the incident responder deployment.

pub mod bootstrap;

pub use bootstrap::{bootstrap, plan, Bootstrapped, DeploymentPlan};

use crate::context::AppContext;
use crate::error::{DevopsAgentError, Result};
use crate::stack::{Stack, StackProps};
use crate::synth::{CloudAssembly, Synthesizer};

/// Root of the construct tree.
#[derive(Debug, Default)]
pub struct App {
    context: AppContext,
    stacks: Vec<Stack>,
}

impl App {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            stacks: Vec::new(),
        }
    }

    /// Look up a context value.
    pub fn try_get_context(&self, key: &str) -> Option<&str> {
        self.context.try_get(key)
    }

    /// Construct a stack inside this app.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStack` if a stack with the same id already exists.
    pub fn add_stack(&mut self, id: impl Into<String>, props: StackProps) -> Result<&Stack> {
        let id = id.into();
        if self.stacks.iter().any(|s| s.id == id) {
            return Err(DevopsAgentError::DuplicateStack { id });
        }

        tracing::debug!("Adding stack {} ({})", id, props.env);
        self.stacks.push(Stack::new(id, props));
        let index = self.stacks.len() - 1;
        Ok(&self.stacks[index])
    }

    /// Stacks constructed so far, in construction order.
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Emit the deployable artifact for every constructed stack.
    pub fn synth(&self, synthesizer: &dyn Synthesizer) -> Result<CloudAssembly> {
        tracing::debug!("Synthesizing {} stack(s)", self.stacks.len());
        synthesizer.synthesize(&self.stacks)
    }
}
