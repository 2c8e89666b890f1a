//! Context file discovery and `--context` argument parsing.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::AppContext;
use crate::error::{DevopsAgentError, Result};

/// Name of the project file carrying default context values.
pub const CONTEXT_FILE: &str = "cdk.json";

/// Load context for a project, applying `--context` overrides last.
///
/// A missing `cdk.json` is not an error; the file layer is simply empty.
pub fn load_context(project_root: &Path, overrides: &[String]) -> Result<AppContext> {
    let mut ctx = load_context_file(&project_root.join(CONTEXT_FILE))?;
    let overrides = overrides
        .iter()
        .map(|pair| parse_context_pair(pair))
        .collect::<Result<AppContext>>()?;

    ctx.merge(overrides);
    Ok(ctx)
}

/// Read the `context` object from a `cdk.json`-style file.
///
/// String values are used verbatim; any other JSON value is kept as its
/// JSON text. A `null` value counts as unset.
fn load_context_file(path: &Path) -> Result<AppContext> {
    if !path.exists() {
        return Ok(AppContext::new());
    }

    let content = fs::read_to_string(path)?;
    let root: Value =
        serde_json::from_str(&content).map_err(|e| DevopsAgentError::ContextParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let Some(context) = root.get("context") else {
        return Ok(AppContext::new());
    };

    let Some(entries) = context.as_object() else {
        return Err(DevopsAgentError::ContextParseError {
            path: path.to_path_buf(),
            message: "\"context\" must be an object".to_string(),
        });
    };

    tracing::debug!("Loaded {} context value(s) from {}", entries.len(), path.display());

    Ok(entries
        .iter()
        .filter_map(|(k, v)| {
            let value = match v {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((k.clone(), value))
        })
        .collect())
}

/// Parse a `KEY=VALUE` context argument.
///
/// The value may itself contain `=`; only the first one separates.
///
/// # Example
///
/// ```
/// use devops_agent::context::parse_context_pair;
///
/// let (k, v) = parse_context_pair("environment=prod").unwrap();
/// assert_eq!((k.as_str(), v.as_str()), ("environment", "prod"));
/// ```
pub fn parse_context_pair(pair: &str) -> Result<(String, String)> {
    let Some((key, value)) = pair.split_once('=') else {
        return Err(DevopsAgentError::InvalidContext {
            message: format!("expected KEY=VALUE, got '{}'", pair),
        });
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(DevopsAgentError::InvalidContext {
            message: format!("empty key in '{}'", pair),
        });
    }

    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_context_file(content: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONTEXT_FILE), content).unwrap();
        temp
    }

    #[test]
    fn missing_file_gives_empty_context() {
        let temp = TempDir::new().unwrap();
        let ctx = load_context(temp.path(), &[]).unwrap();
        assert!(ctx.is_empty());
    }

    #[test]
    fn reads_context_object() {
        let temp = write_context_file(
            r#"{ "app": "devops-agent", "context": { "environment": "prod", "retries": 3 } }"#,
        );
        let ctx = load_context(temp.path(), &[]).unwrap();
        assert_eq!(ctx.try_get("environment"), Some("prod"));
        assert_eq!(ctx.try_get("retries"), Some("3"));
    }

    #[test]
    fn null_value_is_unset() {
        let temp = write_context_file(r#"{ "context": { "environment": null, "team": "ops" } }"#);
        let ctx = load_context(temp.path(), &[]).unwrap();
        assert_eq!(ctx.try_get("environment"), None);
        assert_eq!(ctx.try_get("team"), Some("ops"));
    }

    #[test]
    fn malformed_override_is_rejected() {
        let err = load_context(Path::new("/nonexistent"), &["environment".to_string()]).unwrap_err();
        assert!(matches!(err, DevopsAgentError::InvalidContext { .. }));
    }

    #[test]
    fn file_without_context_key_is_empty() {
        let temp = write_context_file(r#"{ "app": "devops-agent" }"#);
        let ctx = load_context(temp.path(), &[]).unwrap();
        assert!(ctx.is_empty());
    }

    #[test]
    fn overrides_win_over_file() {
        let temp = write_context_file(r#"{ "context": { "environment": "prod" } }"#);
        let ctx = load_context(temp.path(), &["environment=dev".to_string()]).unwrap();
        assert_eq!(ctx.try_get("environment"), Some("dev"));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let temp = write_context_file("{ not json");
        let err = load_context(temp.path(), &[]).unwrap_err();
        assert!(matches!(err, DevopsAgentError::ContextParseError { .. }));
    }

    #[test]
    fn non_object_context_is_parse_error() {
        let temp = write_context_file(r#"{ "context": ["environment"] }"#);
        let err = load_context(temp.path(), &[]).unwrap_err();
        assert!(err.to_string().contains("must be an object"));
    }

    #[test]
    fn pair_keeps_equals_in_value() {
        let (k, v) = parse_context_pair("filter=a=b").unwrap();
        assert_eq!(k, "filter");
        assert_eq!(v, "a=b");
    }

    #[test]
    fn pair_allows_empty_value() {
        let (k, v) = parse_context_pair("environment=").unwrap();
        assert_eq!(k, "environment");
        assert_eq!(v, "");
    }

    #[test]
    fn pair_without_equals_is_rejected() {
        let err = parse_context_pair("environment").unwrap_err();
        assert!(matches!(err, DevopsAgentError::InvalidContext { .. }));
    }

    #[test]
    fn pair_with_empty_key_is_rejected() {
        let err = parse_context_pair("=prod").unwrap_err();
        assert!(err.to_string().contains("empty key"));
    }
}
