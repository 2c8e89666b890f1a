//! Deployment environments and their resolution.
//!
//! The set of deployment targets is closed: an environment name that is
//! not listed here is rejected when it is parsed, never carried forward as
//! a missing configuration. The active environment is taken from the
//! `environment` context value, falling back to `dev`.

pub mod resolver;

pub use resolver::{EnvironmentSource, ResolvedEnvironment, ENVIRONMENT_CONTEXT_KEY};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DevopsAgentError;

/// A supported deployment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Prod,
}

impl Environment {
    /// Every supported environment, in declaration order.
    pub const ALL: [Environment; 2] = [Environment::Dev, Environment::Prod];

    /// The name used in context values, stack ids and tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }

    /// Comma-separated list of supported names, for error messages.
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(Environment::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = DevopsAgentError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| DevopsAgentError::UnknownEnvironment {
                name: s.to_string(),
                supported: Self::supported_names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Prod);
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Prod".parse::<Environment>().is_err());
        assert!("DEV".parse::<Environment>().is_err());
    }

    #[test]
    fn parsing_does_not_trim() {
        assert!(" dev".parse::<Environment>().is_err());
    }

    #[test]
    fn unknown_name_lists_supported() {
        let err = "staging".parse::<Environment>().unwrap_err();
        match err {
            DevopsAgentError::UnknownEnvironment { name, supported } => {
                assert_eq!(name, "staging");
                assert_eq!(supported, "dev, prod");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for env in Environment::ALL {
            assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }
    }

    #[test]
    fn default_is_dev() {
        assert_eq!(Environment::default(), Environment::Dev);
    }
}
