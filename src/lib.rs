//! devops-agent - Deployment entry point and incident processing for the
//! autonomous DevOps incident responder.
//!
//! The deployment side resolves which environment to deploy (`dev` or
//! `prod`) from context, pairs it with the account and region supplied by
//! the deploying tool, constructs a single tagged stack and synthesizes it
//! into a cloud assembly. The incident side deduplicates alarm events and
//! turns forwarded incidents into agent or rule-based decisions.
//!
//! # Modules
//!
//! - [`app`] - Application object and the bootstrap sequence
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Deployment variables and per-environment account/region
//! - [`context`] - Context values from `cdk.json` and `--context`
//! - [`environment`] - Deployment environments and their resolution
//! - [`error`] - Error types and result aliases
//! - [`incident`] - Alarm deduplication and incident handling
//! - [`stack`] - Stack ids, descriptions and tags
//! - [`synth`] - Cloud assembly rendering and output
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use devops_agent::app::bootstrap;
//! use devops_agent::config::DeploymentEnv;
//! use devops_agent::context::AppContext;
//! use devops_agent::synth::MemorySynthesizer;
//!
//! let ctx: AppContext = [("environment", "prod")].into_iter().collect();
//! let vars = DeploymentEnv::default().with_region("eu-west-1");
//!
//! let result = bootstrap(ctx, &vars, &MemorySynthesizer).unwrap();
//! assert_eq!(result.plan.stack_id, "DevopsAgentStack-prod");
//! assert_eq!(result.plan.props.env.region, "eu-west-1");
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod incident;
pub mod stack;
pub mod synth;
pub mod ui;

pub use error::{DevopsAgentError, Result};
