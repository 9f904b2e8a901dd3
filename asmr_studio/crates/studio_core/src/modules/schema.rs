use crate::modules::protocol::ValidationStatus;
use serde_json::Value;
use thiserror::Error;

pub const REQUIRED_KEYS: &[&str] = &[
    "title",
    "description",
    "style",
    "mood",
    "lighting",
    "camera",
    "soundscape",
    "visual_effects",
    "asmr_details",
    "pacing",
    "environment",
    "subject",
    "sequence",
];

/// Nested sections and the keys each must carry.
pub const SECTIONS: &[(&str, &[&str])] = &[
    ("camera", &["movement", "angle", "focus"]),
    ("soundscape", &["primary", "secondary", "quality"]),
    ("asmr_details", &["triggers", "materials"]),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("not valid JSON: {0}")]
    Parse(String),
    #[error("top level is not a JSON object")]
    NotAnObject,
    #[error("missing required key `{0}`")]
    MissingKey(&'static str),
    #[error("`{0}` is not an object")]
    SectionNotAnObject(&'static str),
    #[error("`{section}` is missing `{key}`")]
    MissingSectionKey {
        section: &'static str,
        key: &'static str,
    },
}

/// Structural check only: key presence and section shape. Value types and
/// option membership are not inspected.
pub fn check(doc: &Value) -> Result<(), SchemaError> {
    let obj = doc.as_object().ok_or(SchemaError::NotAnObject)?;

    if let Some(missing) = REQUIRED_KEYS.iter().find(|k| !obj.contains_key(**k)) {
        return Err(SchemaError::MissingKey(*missing));
    }

    for (section, keys) in SECTIONS {
        let inner = obj
            .get(*section)
            .and_then(Value::as_object)
            .ok_or(SchemaError::SectionNotAnObject(*section))?;
        if let Some(key) = keys.iter().find(|k| !inner.contains_key(**k)) {
            return Err(SchemaError::MissingSectionKey {
                section: *section,
                key: *key,
            });
        }
    }

    Ok(())
}

pub fn check_str(text: &str) -> Result<(), SchemaError> {
    let doc: Value = serde_json::from_str(text).map_err(|e| SchemaError::Parse(e.to_string()))?;
    check(&doc)
}

pub fn validate(doc: &Value) -> ValidationStatus {
    status_of(check(doc))
}

pub fn validate_str(text: &str) -> ValidationStatus {
    status_of(check_str(text))
}

fn status_of(result: Result<(), SchemaError>) -> ValidationStatus {
    match result {
        Ok(()) => ValidationStatus::Valid,
        Err(e) => {
            tracing::debug!("self-test failed: {e}");
            ValidationStatus::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> Value {
        json!({
            "title": "", "description": "", "style": "ASMR", "mood": [],
            "lighting": "", "pacing": "", "environment": "", "subject": "",
            "sequence": [], "visual_effects": [],
            "camera": {"movement": "", "angle": "", "focus": ""},
            "soundscape": {"primary": "", "secondary": [], "quality": ""},
            "asmr_details": {"triggers": [], "materials": []}
        })
    }

    #[test]
    fn complete_shape_is_valid() {
        assert_eq!(check(&complete()), Ok(()));
        assert_eq!(validate(&complete()), ValidationStatus::Valid);
    }

    #[test]
    fn value_types_are_not_checked() {
        let mut doc = complete();
        doc["mood"] = json!("Calm");
        doc["camera"]["movement"] = json!(42);
        assert_eq!(validate(&doc), ValidationStatus::Valid);
    }

    #[test]
    fn reports_first_missing_key() {
        assert_eq!(
            check(&json!({"title": "x"})),
            Err(SchemaError::MissingKey("description"))
        );
    }

    #[test]
    fn section_must_be_object_with_keys() {
        let mut doc = complete();
        doc["camera"] = json!({"movement": "Static"});
        assert_eq!(
            check(&doc),
            Err(SchemaError::MissingSectionKey {
                section: "camera",
                key: "angle"
            })
        );

        doc["camera"] = Value::Null;
        assert_eq!(check(&doc), Err(SchemaError::SectionNotAnObject("camera")));

        let mut doc = complete();
        doc["asmr_details"] = json!(["triggers", "materials"]);
        assert_eq!(validate(&doc), ValidationStatus::Invalid);
    }

    #[test]
    fn text_input() {
        assert_eq!(validate_str("{not json"), ValidationStatus::Invalid);
        assert!(matches!(check_str("{not json"), Err(SchemaError::Parse(_))));
        assert_eq!(check_str("[]"), Err(SchemaError::NotAnObject));
        assert_eq!(
            validate_str(&complete().to_string()),
            ValidationStatus::Valid
        );
    }
}
