//! Structural check for `deployments.json`.

use serde_json::{Map, Value};

use crate::deployments::types::DeploymentRecord;
use crate::profiles::types::ValidationResult;

const REQUIRED_FIELDS: &[&str] = &[
    "stage",
    "timestamp",
    "imageTag",
    "endpoint",
    "stackName",
    "region",
];

const OPTIONAL_FIELDS: &[&str] = &["deployedBy", "commit"];

fn check_record(path: &str, value: &Value, errors: &mut Vec<String>) {
    let Some(record) = value.as_object() else {
        errors.push(format!("{}: must be an object", path));
        return;
    };
    check_record_fields(path, record, errors);
}

fn check_record_fields(path: &str, record: &Map<String, Value>, errors: &mut Vec<String>) {
    for field in REQUIRED_FIELDS {
        match record.get(*field) {
            None | Some(Value::Null) => {
                errors.push(format!("{}.{}: required field is missing", path, field));
            }
            Some(Value::String(text)) if text.trim().is_empty() => {
                errors.push(format!("{}.{}: must not be empty", path, field));
            }
            Some(Value::String(text)) => {
                if *field == "timestamp" && chrono::DateTime::parse_from_rfc3339(text).is_err() {
                    errors.push(format!(
                        "{}.timestamp: '{}' is not an ISO-8601 timestamp",
                        path, text
                    ));
                }
            }
            Some(_) => errors.push(format!("{}.{}: must be a string", path, field)),
        }
    }

    for field in OPTIONAL_FIELDS {
        if let Some(value) = record.get(*field)
            && !value.is_null()
            && !value.is_string()
        {
            errors.push(format!("{}.{}: must be a string", path, field));
        }
    }
}

/// Validate a parsed deployments document.
pub fn validate_deployment_history(document: &Value) -> ValidationResult {
    let Some(root) = document.as_object() else {
        return ValidationResult::from_errors(vec![
            "deployments: must be a JSON object".to_string(),
        ]);
    };

    let mut errors = Vec::new();

    match root.get("active") {
        Some(Value::Object(active)) => {
            for (stage, record) in active {
                let path = format!("active.{}", stage);
                check_record(&path, record, &mut errors);
                if let Some(recorded) = record.get("stage").and_then(Value::as_str)
                    && recorded != stage
                {
                    errors.push(format!(
                        "{}.stage: '{}' does not match its key",
                        path, recorded
                    ));
                }
            }
        }
        Some(_) => errors.push("active: must be an object".to_string()),
        None => errors.push("active: required field is missing".to_string()),
    }

    match root.get("history") {
        Some(Value::Array(history)) => {
            for (index, record) in history.iter().enumerate() {
                check_record(&format!("history[{}]", index), record, &mut errors);
            }
        }
        Some(_) => errors.push("history: must be an array".to_string()),
        None => errors.push("history: required field is missing".to_string()),
    }

    ValidationResult::from_errors(errors)
}

/// Validate a single record before it is appended.
pub fn validate_record(record: &DeploymentRecord) -> ValidationResult {
    let mut errors = Vec::new();
    match serde_json::to_value(record) {
        Ok(value) => check_record("record", &value, &mut errors),
        Err(e) => errors.push(format!("record: could not be serialized: {}", e)),
    }
    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_json(stage: &str) -> Value {
        json!({
            "stage": stage,
            "timestamp": "2025-11-04T12:00:00Z",
            "imageTag": "0.6.0",
            "endpoint": "https://abc.execute-api.us-east-1.amazonaws.com/prod",
            "stackName": "BenchlingWebhookStack",
            "region": "us-east-1"
        })
    }

    #[test]
    fn test_valid_history() {
        let document = json!({
            "active": { "dev": record_json("dev") },
            "history": [record_json("dev"), record_json("prod")]
        });
        let result = validate_deployment_history(&document);
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn test_empty_history_is_valid() {
        assert!(validate_deployment_history(&json!({ "active": {}, "history": [] })).is_valid);
    }

    #[test]
    fn test_missing_top_level_fields() {
        let result = validate_deployment_history(&json!({}));
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.starts_with("active")));
        assert!(result.errors.iter().any(|e| e.starts_with("history")));
    }

    #[test]
    fn test_wrong_container_types() {
        let result = validate_deployment_history(&json!({ "active": [], "history": {} }));
        assert!(result.errors.contains(&"active: must be an object".to_string()));
        assert!(result.errors.contains(&"history: must be an array".to_string()));
    }

    #[test]
    fn test_record_field_errors_are_located() {
        let mut broken = record_json("dev");
        broken.as_object_mut().unwrap().remove("endpoint");
        broken["timestamp"] = json!("last tuesday");
        broken["commit"] = json!(42);

        let result = validate_deployment_history(&json!({ "active": {}, "history": [broken] }));
        assert!(result.errors.iter().any(|e| e == "history[0].endpoint: required field is missing"));
        assert!(result.errors.iter().any(|e| e.starts_with("history[0].timestamp")));
        assert!(result.errors.iter().any(|e| e == "history[0].commit: must be a string"));
    }

    #[test]
    fn test_active_key_must_match_stage() {
        let document = json!({ "active": { "prod": record_json("dev") }, "history": [] });
        let result = validate_deployment_history(&document);
        assert!(result.errors.iter().any(|e| e.contains("does not match its key")));
    }

    #[test]
    fn test_validate_record() {
        let record = DeploymentRecord::new("dev", "0.6.0", "https://x", "Stack", "us-east-1");
        assert!(validate_record(&record).is_valid);

        let empty_stage = DeploymentRecord::new("", "0.6.0", "https://x", "Stack", "us-east-1");
        let result = validate_record(&empty_stage);
        assert_eq!(result.errors, vec!["record.stage: must not be empty"]);
    }
}
