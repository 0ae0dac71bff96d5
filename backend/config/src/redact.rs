//! Config redaction: produce safe-to-share snapshots by masking secrets.

use serde_json::Value;

/// Field names whose string values are masked.
static SENSITIVE_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "apikey",
    "bearerToken",
    "bearer_token",
    "token",
    "secret",
    "password",
];

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Redact a config JSON value, masking all sensitive fields.
///
/// The result is safe to log, print from `skycast config`, or share for
/// debugging. A four-character prefix is kept as an identification hint.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => {
            let hint = if s.len() > 4 {
                format!("{}***", &s[..4])
            } else {
                "***".to_string()
            };
            Value::String(hint)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_api_key() {
        let v = json!({"weather": {"apiKey": "ow-abcdef123456"}});
        let redacted = redact(&v);
        let key = redacted["weather"]["apiKey"].as_str().unwrap();
        assert!(key.ends_with("***"));
        assert!(!key.contains("abcdef"));
    }

    #[test]
    fn redacts_bearer_token() {
        let v = json!({"agent": {"bearerToken": "eyJhbGciOiJIUzI1NiJ9"}});
        let redacted = redact(&v);
        assert_eq!(redacted["agent"]["bearerToken"], "eyJh***");
    }

    #[test]
    fn short_secret_fully_masked() {
        let v = json!({"token": "abc"});
        assert_eq!(redact(&v)["token"], "***");
    }

    #[test]
    fn passthrough_non_sensitive() {
        let v = json!({"ui": {"showThinking": true}, "logging": {"level": "debug"}});
        assert_eq!(redact(&v), v);
    }
}
