//! Environment resolution.
//!
//! Resolves the active environment using the priority chain:
//! 1. Context value `environment` (if present and non-empty)
//! 2. Fallback to "dev"

use serde::Serialize;

use super::Environment;
use crate::context::AppContext;
use crate::error::Result;

/// Context key naming the deployment environment.
pub const ENVIRONMENT_CONTEXT_KEY: &str = "environment";

/// How the environment was determined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentSource {
    /// Taken from the `environment` context value.
    Context,
    /// Context value absent or empty.
    #[serde(rename = "default")]
    Fallback,
}

impl std::fmt::Display for EnvironmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Context => write!(f, "context"),
            Self::Fallback => write!(f, "default"),
        }
    }
}

/// A resolved environment with how it was determined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEnvironment {
    /// The deployment target.
    pub environment: Environment,
    /// How this environment was determined.
    pub source: EnvironmentSource,
}

impl ResolvedEnvironment {
    /// Resolve the environment from application context.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEnvironment` when the context names an environment
    /// outside the supported set.
    ///
    /// # Example
    ///
    /// ```
    /// use devops_agent::context::AppContext;
    /// use devops_agent::environment::{Environment, EnvironmentSource, ResolvedEnvironment};
    ///
    /// let resolved = ResolvedEnvironment::resolve(&AppContext::new()).unwrap();
    /// assert_eq!(resolved.environment, Environment::Dev);
    /// assert_eq!(resolved.source, EnvironmentSource::Fallback);
    /// ```
    pub fn resolve(context: &AppContext) -> Result<Self> {
        Self::resolve_name(context.try_get(ENVIRONMENT_CONTEXT_KEY))
    }

    /// Resolve from a raw, possibly missing, environment name.
    pub fn resolve_name(name: Option<&str>) -> Result<Self> {
        match name {
            Some(name) if !name.is_empty() => Ok(Self {
                environment: name.parse()?,
                source: EnvironmentSource::Context,
            }),
            _ => Ok(Self {
                environment: Environment::default(),
                source: EnvironmentSource::Fallback,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DevopsAgentError;

    #[test]
    fn context_value_takes_priority() {
        let ctx: AppContext = [(ENVIRONMENT_CONTEXT_KEY, "prod")].into_iter().collect();
        let resolved = ResolvedEnvironment::resolve(&ctx).unwrap();
        assert_eq!(resolved.environment, Environment::Prod);
        assert_eq!(resolved.source, EnvironmentSource::Context);
    }

    #[test]
    fn fallback_to_dev_when_absent() {
        let resolved = ResolvedEnvironment::resolve(&AppContext::new()).unwrap();
        assert_eq!(resolved.environment, Environment::Dev);
        assert_eq!(resolved.source, EnvironmentSource::Fallback);
    }

    #[test]
    fn empty_value_falls_back() {
        let resolved = ResolvedEnvironment::resolve_name(Some("")).unwrap();
        assert_eq!(resolved.environment, Environment::Dev);
        assert_eq!(resolved.source, EnvironmentSource::Fallback);
    }

    #[test]
    fn explicit_dev_is_from_context() {
        let resolved = ResolvedEnvironment::resolve_name(Some("dev")).unwrap();
        assert_eq!(resolved.environment, Environment::Dev);
        assert_eq!(resolved.source, EnvironmentSource::Context);
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = ResolvedEnvironment::resolve_name(Some("staging")).unwrap_err();
        assert!(matches!(err, DevopsAgentError::UnknownEnvironment { .. }));
    }

    #[test]
    fn source_display() {
        assert_eq!(EnvironmentSource::Context.to_string(), "context");
        assert_eq!(EnvironmentSource::Fallback.to_string(), "default");
    }
}
