//! Profile schema validation
//!
//! Validates raw profile documents against the closed profile schema. All
//! violations are collected; nothing here fails fast or touches the disk.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::profiles::types::{ConfigSource, LogLevel, ProfileConfig, ValidationResult};

static STACK_ARN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^arn:aws:cloudformation:[a-z0-9-]+:\d{12}:stack/.+").expect("valid ARN pattern")
});

static AWS_REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2}(-gov)?-[a-z]+-\d$").expect("valid region pattern")
});

static ACCOUNT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{12}$").expect("valid account pattern"));

pub const INHERITS_KEY: &str = "_inherits";

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    StackArn,
    Region,
    AccountId,
    Timestamp,
    Flag,
    OneOf(&'static [&'static str]),
}

struct FieldRule {
    name: &'static str,
    required: bool,
    kind: FieldKind,
}

struct SectionRule {
    name: &'static str,
    required: bool,
    fields: &'static [FieldRule],
}

const fn required(name: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule {
        name,
        required: true,
        kind,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule {
        name,
        required: false,
        kind,
    }
}

const SCHEMA: &[SectionRule] = &[
    SectionRule {
        name: "quilt",
        required: true,
        fields: &[
            required("stackArn", FieldKind::StackArn),
            required("catalog", FieldKind::Text),
            required("database", FieldKind::Text),
            required("queueUrl", FieldKind::Text),
            required("region", FieldKind::Region),
        ],
    },
    SectionRule {
        name: "benchling",
        required: true,
        fields: &[
            required("tenant", FieldKind::Text),
            required("clientId", FieldKind::Text),
            optional("clientSecret", FieldKind::Text),
            optional("secretArn", FieldKind::Text),
            required("appDefinitionId", FieldKind::Text),
            optional("testEntryId", FieldKind::Text),
        ],
    },
    SectionRule {
        name: "packages",
        required: true,
        fields: &[
            required("bucket", FieldKind::Text),
            required("prefix", FieldKind::Text),
            required("metadataKey", FieldKind::Text),
        ],
    },
    SectionRule {
        name: "deployment",
        required: true,
        fields: &[
            required("region", FieldKind::Region),
            optional("account", FieldKind::AccountId),
            optional("ecrRepository", FieldKind::Text),
            optional("imageTag", FieldKind::Text),
        ],
    },
    SectionRule {
        name: "logging",
        required: false,
        fields: &[required("level", FieldKind::OneOf(&LogLevel::ALL))],
    },
    SectionRule {
        name: "security",
        required: false,
        fields: &[
            optional("webhookAllowList", FieldKind::Text),
            optional("enableVerification", FieldKind::Flag),
        ],
    },
    SectionRule {
        name: "_metadata",
        required: true,
        fields: &[
            required("version", FieldKind::Text),
            required("createdAt", FieldKind::Timestamp),
            required("updatedAt", FieldKind::Timestamp),
            required("source", FieldKind::OneOf(&ConfigSource::ALL)),
        ],
    },
];

/// Whether required sections/fields must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// A standalone profile: every required section and field must be present.
    Complete,
    /// A partial profile layered over its `_inherits` base.
    Overlay,
}

/// Validate a complete profile document.
pub fn validate_profile(config: &Value) -> ValidationResult {
    validate(config, Mode::Complete)
}

/// Validate a partial profile that declares `_inherits`.
///
/// Presence of required sections and fields is not checked, since the base
/// profile supplies them. Formats, enums and the closed top-level property set
/// still apply.
pub fn validate_overlay(config: &Value) -> ValidationResult {
    validate(config, Mode::Overlay)
}

/// Validate a typed profile.
pub fn validate_config(config: &ProfileConfig) -> ValidationResult {
    match serde_json::to_value(config) {
        Ok(value) => validate_profile(&value),
        Err(e) => ValidationResult::from_errors(vec![format!(
            "config: could not be serialized: {}",
            e
        )]),
    }
}

fn validate(config: &Value, mode: Mode) -> ValidationResult {
    let Some(root) = config.as_object() else {
        return ValidationResult::from_errors(vec![
            "config: must be a JSON object".to_string(),
        ]);
    };

    let mut errors = Vec::new();

    if mode == Mode::Complete {
        for section in SCHEMA.iter().filter(|s| s.required) {
            if !root.contains_key(section.name) {
                errors.push(format!("{}: required section is missing", section.name));
            }
        }
    }

    for section in SCHEMA {
        match root.get(section.name) {
            Some(Value::Object(fields)) => validate_section(section, fields, mode, &mut errors),
            Some(_) => errors.push(format!("{}: must be an object", section.name)),
            None => {}
        }
    }

    validate_inherits(root.get(INHERITS_KEY), mode, &mut errors);

    for key in root.keys() {
        let known = key == INHERITS_KEY || SCHEMA.iter().any(|s| s.name == key);
        if !known {
            errors.push(format!("{}: unknown top-level property", key));
        }
    }

    ValidationResult::from_errors(errors)
}

fn validate_section(
    section: &SectionRule,
    fields: &Map<String, Value>,
    mode: Mode,
    errors: &mut Vec<String>,
) {
    for rule in section.fields {
        let path = format!("{}.{}", section.name, rule.name);
        match fields.get(rule.name) {
            None | Some(Value::Null) => {
                if rule.required && mode == Mode::Complete {
                    errors.push(format!("{}: required field is missing", path));
                }
            }
            Some(value) => {
                if let Some(problem) = check_field(rule, value) {
                    errors.push(format!("{}: {}", path, problem));
                }
            }
        }
    }
}

fn check_field(rule: &FieldRule, value: &Value) -> Option<String> {
    if let FieldKind::Flag = rule.kind {
        return (!value.is_boolean()).then(|| "must be a boolean".to_string());
    }

    let Some(text) = value.as_str() else {
        return Some("must be a string".to_string());
    };

    if text.trim().is_empty() {
        // Optional free-text fields may be blank; everything else must carry a value.
        return match (rule.required, rule.kind) {
            (false, FieldKind::Text) => None,
            _ => Some("must not be empty".to_string()),
        };
    }

    match rule.kind {
        FieldKind::Text | FieldKind::Flag => None,
        FieldKind::StackArn => (!STACK_ARN.is_match(text)).then(|| {
            format!(
                "'{}' is not a CloudFormation stack ARN (arn:aws:cloudformation:<region>:<account>:stack/<name>/<id>)",
                text
            )
        }),
        FieldKind::Region => (!AWS_REGION.is_match(text))
            .then(|| format!("'{}' is not a valid AWS region (e.g. us-east-1)", text)),
        FieldKind::AccountId => (!ACCOUNT_ID.is_match(text))
            .then(|| format!("'{}' must be a 12-digit AWS account id", text)),
        FieldKind::Timestamp => chrono::DateTime::parse_from_rfc3339(text)
            .err()
            .map(|_| format!("'{}' is not an ISO-8601 timestamp", text)),
        FieldKind::OneOf(allowed) => (!allowed.contains(&text))
            .then(|| format!("'{}' must be one of: {}", text, allowed.join(", "))),
    }
}

fn validate_inherits(value: Option<&Value>, mode: Mode, errors: &mut Vec<String>) {
    match value {
        None => {
            if mode == Mode::Overlay {
                errors.push(format!(
                    "{}: required for a partial profile",
                    INHERITS_KEY
                ));
            }
        }
        Some(Value::String(name)) if !name.trim().is_empty() => {}
        Some(Value::String(_)) => errors.push(format!("{}: must not be empty", INHERITS_KEY)),
        Some(_) => errors.push(format!(
            "{}: must be a profile name string",
            INHERITS_KEY
        )),
    }
}
