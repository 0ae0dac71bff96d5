//! Environment variable substitution for config values.
//!
//! Supports `${VAR_NAME}` in string values, resolved at load time. Only
//! uppercase `[A-Z_][A-Z0-9_]*` names are matched; `$${VAR}` escapes to a
//! literal `${VAR}`. A referenced variable that is unset or empty fails the
//! load with the offending config path in the error.

use std::collections::HashMap;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Matches both plain `${VAR}` references and `$${VAR}` escapes.
static ENV_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references throughout a config JSON value tree.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute using a provided variable map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => {
            let result: Result<Vec<_>> = arr
                .iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(result?))
        }
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        // Primitives pass through unchanged.
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_REF.replace_all(s, |caps: &regex::Captures| {
        let whole = &caps[0];
        let var_name = &caps[1];

        // `$${VAR}` keeps a literal `${VAR}`.
        if whole.starts_with("$$") {
            return format!("${{{var_name}}}");
        }

        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert(MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_simple_var() {
        let v = json!({"weather": {"apiKey": "${OPENWEATHER_API_KEY}"}});
        let env = env(&[("OPENWEATHER_API_KEY", "ow-abc123")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["weather"]["apiKey"], "ow-abc123");
    }

    #[test]
    fn error_on_missing_var_names_path() {
        let v = json!({"agent": {"bearerToken": "${MISSING_TOKEN}"}});
        let err = resolve_env_vars_with(&v, &HashMap::new()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("MISSING_TOKEN"));
        assert!(msg.contains("agent.bearerToken"));
    }

    #[test]
    fn empty_var_counts_as_missing() {
        let v = json!({"key": "${EMPTY_VAR}"});
        let env = env(&[("EMPTY_VAR", "")]);
        assert!(resolve_env_vars_with(&v, &env).is_err());
    }

    #[test]
    fn escaped_ref_stays_literal() {
        let v = json!({"doc": "use $${HOME} literally"});
        let result = resolve_env_vars_with(&v, &HashMap::new()).unwrap();
        assert_eq!(result["doc"], "use ${HOME} literally");
    }

    #[test]
    fn passthrough_non_var_strings() {
        let v = json!({"key": "plain-string", "n": 3, "b": true});
        let result = resolve_env_vars_with(&v, &HashMap::new()).unwrap();
        assert_eq!(result, v);
    }

    #[test]
    fn lowercase_names_are_not_references() {
        let v = json!({"key": "${not_a_var}"});
        let result = resolve_env_vars_with(&v, &HashMap::new()).unwrap();
        assert_eq!(result["key"], "${not_a_var}");
    }

    #[test]
    fn substitutes_inside_arrays() {
        let v = json!({"list": ["${A_VAR}", "plain"]});
        let env = env(&[("A_VAR", "filled")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["list"][0], "filled");
    }
}
