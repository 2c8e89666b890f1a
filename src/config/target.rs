//! Per-environment account and region lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::environment::DeploymentEnv;
use crate::environment::Environment;

/// Region used when `CDK_DEFAULT_REGION` is unset or empty.
pub const FALLBACK_REGION: &str = "us-east-1";

/// Placeholder used in target strings when no account is known.
pub const UNKNOWN_ACCOUNT: &str = "unknown-account";

/// Account/region pair a stack deploys into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Target account; `None` means "whatever the deploying credentials use".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Target region.
    pub region: String,
}

impl EnvironmentConfig {
    /// Look up the configuration for a deployment environment.
    ///
    /// Every environment currently shares the same rule: the account is
    /// passed through untouched and the region falls back to
    /// [`FALLBACK_REGION`]. The match keeps adding an environment a
    /// compile-time decision.
    ///
    /// # Example
    ///
    /// ```
    /// use devops_agent::config::{DeploymentEnv, EnvironmentConfig};
    /// use devops_agent::environment::Environment;
    ///
    /// let cfg = EnvironmentConfig::for_environment(Environment::Dev, &DeploymentEnv::default());
    /// assert_eq!(cfg.region, "us-east-1");
    /// assert_eq!(cfg.account, None);
    /// ```
    pub fn for_environment(environment: Environment, vars: &DeploymentEnv) -> Self {
        match environment {
            Environment::Dev | Environment::Prod => Self {
                account: vars.default_account.clone(),
                region: region_or_fallback(vars.default_region.as_deref()),
            },
        }
    }

    /// Target string in `aws://<account>/<region>` form.
    pub fn target(&self) -> String {
        format!(
            "aws://{}/{}",
            self.account.as_deref().unwrap_or(UNKNOWN_ACCOUNT),
            self.region
        )
    }
}

impl fmt::Display for EnvironmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target())
    }
}

fn region_or_fallback(region: Option<&str>) -> String {
    match region {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => FALLBACK_REGION.to_string(),
    }
}
