//! Deployment environment variables.
//!
//! The account and region defaults come from the process environment, but
//! they are captured once into a [`DeploymentEnv`] value and passed around
//! explicitly. Resolution code never reads process state itself.

use std::collections::HashMap;

/// Variable holding the default target account.
pub const ACCOUNT_VAR: &str = "CDK_DEFAULT_ACCOUNT";

/// Variable holding the default target region.
pub const REGION_VAR: &str = "CDK_DEFAULT_REGION";

/// Snapshot of the deployment-related environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentEnv {
    /// `CDK_DEFAULT_ACCOUNT`, exactly as set.
    pub default_account: Option<String>,
    /// `CDK_DEFAULT_REGION`, exactly as set.
    pub default_region: Option<String>,
}

impl DeploymentEnv {
    /// Capture the variables from the current process.
    pub fn from_process() -> Self {
        Self::from_vars(&load_system_env())
    }

    /// Capture the variables from an explicit map.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use devops_agent::config::DeploymentEnv;
    ///
    /// let vars = HashMap::from([("CDK_DEFAULT_REGION".to_string(), "eu-west-1".to_string())]);
    /// let env = DeploymentEnv::from_vars(&vars);
    /// assert_eq!(env.default_region.as_deref(), Some("eu-west-1"));
    /// assert_eq!(env.default_account, None);
    /// ```
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        Self {
            default_account: vars.get(ACCOUNT_VAR).cloned(),
            default_region: vars.get(REGION_VAR).cloned(),
        }
    }

    /// Builder-style helper for tests and embedding.
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.default_account = Some(account.into());
        self
    }

    /// Builder-style helper for tests and embedding.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = Some(region.into());
        self
    }
}

/// Load environment variables from the system.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
pub fn load_system_env() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vars_reads_both_variables() {
        let vars = HashMap::from([
            (ACCOUNT_VAR.to_string(), "123456789012".to_string()),
            (REGION_VAR.to_string(), "ap-southeast-2".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ]);
        let env = DeploymentEnv::from_vars(&vars);
        assert_eq!(env.default_account.as_deref(), Some("123456789012"));
        assert_eq!(env.default_region.as_deref(), Some("ap-southeast-2"));
    }

    #[test]
    fn from_vars_keeps_empty_strings() {
        let vars = HashMap::from([(ACCOUNT_VAR.to_string(), String::new())]);
        let env = DeploymentEnv::from_vars(&vars);
        assert_eq!(env.default_account.as_deref(), Some(""));
    }

    #[test]
    fn empty_map_gives_nothing() {
        assert_eq!(
            DeploymentEnv::from_vars(&HashMap::new()),
            DeploymentEnv::default()
        );
    }

    #[test]
    fn builders_set_fields() {
        let env = DeploymentEnv::default()
            .with_account("111111111111")
            .with_region("us-west-2");
        assert_eq!(env.default_account.as_deref(), Some("111111111111"));
        assert_eq!(env.default_region.as_deref(), Some("us-west-2"));
    }
}
