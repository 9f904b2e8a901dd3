//! Conversion between [`FormState`] and the canonical [`PromptDocument`].
//!
//! `generate` is total over any form state. `hydrate` accepts arbitrary JSON
//! (typically model output) and substitutes field defaults for anything
//! missing or of the wrong type; it never fails.

use crate::modules::cleaner::{dedup_preserving_order, parse_json_lenient};
use crate::modules::form::{FormState, SingleSelect};
use crate::modules::protocol::{AsmrDetails, Camera, PromptDocument, Soundscape, STYLE};
use serde_json::Value;

pub fn generate(state: &FormState) -> PromptDocument {
    let description = if state.description.is_empty() {
        fallback_description(&state.idea)
    } else {
        state.description.clone()
    };

    PromptDocument {
        title: state.idea.clone(),
        description,
        style: STYLE.to_string(),
        mood: state.moods.clone(),
        pacing: state.pacing.clone(),
        environment: state.environment.clone(),
        subject: state.subject.clone(),
        sequence: sequence_lines(&state.sequence),
        lighting: state.lighting.clone(),
        camera: Camera {
            movement: state.camera_movement.clone(),
            angle: state.camera_angle.clone(),
            focus: state.camera_focus.clone(),
        },
        soundscape: Soundscape {
            primary: state.soundscape_primary.clone(),
            secondary: state.soundscape_secondary.clone(),
            quality: state.soundscape_quality.clone(),
        },
        visual_effects: state.visual_effects.clone(),
        asmr_details: AsmrDetails {
            triggers: state.asmr_triggers.clone(),
            materials: state.materials.clone(),
        },
    }
}

pub fn fallback_description(idea: &str) -> String {
    format!("An ASMR-style video about: {idea}.")
}

/// Splits on `'\n'` and drops blank lines. Kept lines are not trimmed.
pub fn sequence_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Safe navigation: walks object keys, yielding `None` at the first missing key
/// or non-object parent.
pub fn lookup<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(doc, |node, key| node.as_object().and_then(|o| o.get(*key)))
}

fn text_at(doc: &Value, path: &[&str]) -> String {
    lookup(doc, path)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn single_at(doc: &Value, path: &[&str], field: SingleSelect) -> String {
    match lookup(doc, path).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => field.default_value().to_string(),
    }
}

/// Only real arrays count; a string or null becomes an empty selection.
fn list_at(doc: &Value, path: &[&str]) -> Vec<String> {
    let items = lookup(doc, path)
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    dedup_preserving_order(items)
}

fn joined_lines_at(doc: &Value, path: &[&str]) -> String {
    lookup(doc, path)
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

pub fn hydrate(doc: &Value) -> FormState {
    FormState {
        idea: text_at(doc, &["title"]),
        description: text_at(doc, &["description"]),
        moods: list_at(doc, &["mood"]),
        lighting: single_at(doc, &["lighting"], SingleSelect::Lighting),
        pacing: single_at(doc, &["pacing"], SingleSelect::Pacing),
        sequence: joined_lines_at(doc, &["sequence"]),
        environment: text_at(doc, &["environment"]),
        subject: text_at(doc, &["subject"]),
        camera_movement: single_at(doc, &["camera", "movement"], SingleSelect::CameraMovement),
        camera_angle: single_at(doc, &["camera", "angle"], SingleSelect::CameraAngle),
        camera_focus: single_at(doc, &["camera", "focus"], SingleSelect::CameraFocus),
        visual_effects: list_at(doc, &["visual_effects"]),
        soundscape_primary: single_at(
            doc,
            &["soundscape", "primary"],
            SingleSelect::SoundscapePrimary,
        ),
        soundscape_secondary: list_at(doc, &["soundscape", "secondary"]),
        soundscape_quality: single_at(
            doc,
            &["soundscape", "quality"],
            SingleSelect::SoundscapeQuality,
        ),
        asmr_triggers: list_at(doc, &["asmr_details", "triggers"]),
        materials: list_at(doc, &["asmr_details", "materials"]),
    }
}

/// Text variant of [`hydrate`]; unparsable input yields the default state.
pub fn hydrate_str(text: &str) -> FormState {
    match parse_json_lenient(text) {
        Some(doc) => hydrate(&doc),
        None => {
            tracing::debug!("hydrate: input is not JSON, using defaults");
            FormState::default()
        }
    }
}

/// Merges a partial, camelCase form-shaped object (settings suggestion or
/// image seed) into `state`. `idea` and `description` are kept; every other
/// field follows the same defaulting rules as [`hydrate`].
pub fn apply_suggestion(state: &FormState, suggestion: &Value) -> FormState {
    let sequence = match lookup(suggestion, &["sequence"]) {
        Some(Value::String(s)) => s.clone(),
        _ => joined_lines_at(suggestion, &["sequence"]),
    };

    FormState {
        idea: state.idea.clone(),
        description: state.description.clone(),
        moods: list_at(suggestion, &["moods"]),
        lighting: single_at(suggestion, &["lighting"], SingleSelect::Lighting),
        pacing: single_at(suggestion, &["pacing"], SingleSelect::Pacing),
        sequence,
        environment: text_at(suggestion, &["environment"]),
        subject: text_at(suggestion, &["subject"]),
        camera_movement: single_at(
            suggestion,
            &["cameraMovement"],
            SingleSelect::CameraMovement,
        ),
        camera_angle: single_at(suggestion, &["cameraAngle"], SingleSelect::CameraAngle),
        camera_focus: single_at(suggestion, &["cameraFocus"], SingleSelect::CameraFocus),
        visual_effects: list_at(suggestion, &["visualEffects"]),
        soundscape_primary: single_at(
            suggestion,
            &["soundscapePrimary"],
            SingleSelect::SoundscapePrimary,
        ),
        soundscape_secondary: list_at(suggestion, &["soundscapeSecondary"]),
        soundscape_quality: single_at(
            suggestion,
            &["soundscapeQuality"],
            SingleSelect::SoundscapeQuality,
        ),
        asmr_triggers: list_at(suggestion, &["asmrTriggers"]),
        materials: list_at(suggestion, &["materials"]),
    }
}
