//! Deployment configuration.
//!
//! This module turns the deployment environment variables into the
//! account/region pair each stack is deployed into.
//!
//! # Modules
//!
//! - [`environment`] - Snapshot of `CDK_DEFAULT_*` variables
//! - [`target`] - Per-environment account/region lookup

pub mod environment;
pub mod target;

pub use environment::{load_system_env, DeploymentEnv, ACCOUNT_VAR, REGION_VAR};
pub use target::{EnvironmentConfig, FALLBACK_REGION, UNKNOWN_ACCOUNT};
