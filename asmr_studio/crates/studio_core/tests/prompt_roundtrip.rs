use serde_json::{json, Value};
use studio_core::form::{FormState, MultiSelect, SingleSelect, TextField};
use studio_core::mapper::{generate, hydrate};
use studio_core::protocol::ValidationStatus;
use studio_core::schema::{validate, validate_str};

fn watch_repair() -> FormState {
    let mut s = FormState::default();
    s.set_text(TextField::Idea, "restoring a vintage watch");
    s.set_text(
        TextField::Description,
        "Gloved hands take apart a pocket watch under a lamp.",
    );
    s.set_text(TextField::Environment, "A quiet workbench");
    s.set_text(TextField::Subject, "Gloved hands moving with precision");
    s.set_text(
        TextField::Sequence,
        "1. Opens the watch case\n2. Gently removes the gears\n3. Cleans each part with a soft brush",
    );
    s.set_single(SingleSelect::Lighting, "Soft Studio Light");
    s.set_single(SingleSelect::CameraAngle, "Macro");
    s.set_single(SingleSelect::CameraFocus, "Shallow Depth of Field");
    s.set_single(SingleSelect::SoundscapePrimary, "Tapping");
    s.set_single(SingleSelect::SoundscapeQuality, "Crisp");
    for mood in ["Vintage", "Calm", "Intimate"] {
        s.toggle(MultiSelect::Moods, mood);
    }
    s.toggle(MultiSelect::SoundscapeSecondary, "Ticking Clock");
    s.toggle(MultiSelect::VisualEffects, "Bokeh");
    s.toggle(MultiSelect::VisualEffects, "Film Grain");
    s.toggle(MultiSelect::AsmrTriggers, "Tapping");
    s.toggle(MultiSelect::AsmrTriggers, "Brushing");
    s.toggle(MultiSelect::Materials, "Metal");
    s.toggle(MultiSelect::Materials, "Glass");
    s
}

fn roundtrip(state: &FormState) -> FormState {
    let value = serde_json::to_value(generate(state)).unwrap();
    hydrate(&value)
}

#[test]
fn round_trip_reproduces_state() {
    let state = watch_repair();
    assert_eq!(roundtrip(&state), state);
}

#[test]
fn round_trip_through_pretty_text() {
    let state = watch_repair();
    let text = studio_core::export::to_pretty_json(&generate(&state)).unwrap();
    assert_eq!(studio_core::mapper::hydrate_str(&text), state);
}

#[test]
fn round_trip_fills_description_and_trims_blank_lines() {
    let mut state = watch_repair();
    state.description.clear();
    state.sequence = "\nfirst\n   \n  second  \n".to_string();

    let back = roundtrip(&state);
    assert_eq!(
        back.description,
        "An ASMR-style video about: restoring a vintage watch."
    );
    assert_eq!(back.sequence, "first\n  second  ");

    let expected = FormState {
        description: back.description.clone(),
        sequence: back.sequence.clone(),
        ..state
    };
    assert_eq!(back, expected);
}

#[test]
fn round_trip_default_state() {
    let state = FormState::default();
    let back = roundtrip(&state);
    assert_eq!(back.description, "An ASMR-style video about: .");
    assert_eq!(
        FormState {
            description: String::new(),
            ..back
        },
        state
    );
}

#[test]
fn generate_maps_every_field() {
    let doc = generate(&watch_repair());
    assert_eq!(doc.title, "restoring a vintage watch");
    assert_eq!(doc.style, "ASMR");
    assert_eq!(doc.mood, vec!["Vintage", "Calm", "Intimate"]);
    assert_eq!(doc.sequence.len(), 3);
    assert_eq!(doc.sequence[1], "2. Gently removes the gears");
    assert_eq!(doc.lighting, "Soft Studio Light");
    assert_eq!(doc.camera.movement, "Static");
    assert_eq!(doc.camera.angle, "Macro");
    assert_eq!(doc.camera.focus, "Shallow Depth of Field");
    assert_eq!(doc.soundscape.secondary, vec!["Ticking Clock"]);
    assert_eq!(doc.soundscape.quality, "Crisp");
    assert_eq!(doc.visual_effects, vec!["Bokeh", "Film Grain"]);
    assert_eq!(doc.asmr_details.triggers, vec!["Tapping", "Brushing"]);
    assert_eq!(doc.asmr_details.materials, vec!["Metal", "Glass"]);
}

#[test]
fn generate_does_not_fail_on_unknown_options() {
    let state = FormState {
        lighting: "Strobe".into(),
        moods: vec!["Angry".into()],
        ..FormState::default()
    };
    let doc = generate(&state);
    assert_eq!(doc.lighting, "Strobe");
    assert_eq!(doc.mood, vec!["Angry"]);
}

#[test]
fn serialized_key_order_and_names() {
    let text = serde_json::to_string(&generate(&FormState::default())).unwrap();
    let keys = [
        "\"title\"",
        "\"description\"",
        "\"style\"",
        "\"mood\"",
        "\"pacing\"",
        "\"environment\"",
        "\"subject\"",
        "\"sequence\"",
        "\"lighting\"",
        "\"camera\"",
        "\"soundscape\"",
        "\"visual_effects\"",
        "\"asmr_details\"",
    ];
    let positions: Vec<usize> = keys.iter().map(|k| text.find(k).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
}

#[test]
fn hydrate_empty_object_is_default_state() {
    assert_eq!(hydrate(&json!({})), FormState::default());
}

#[test]
fn hydrate_string_mood_and_null_camera() {
    let state = hydrate(&json!({"mood": "Calm", "camera": null}));
    assert!(state.moods.is_empty());
    assert_eq!(state.camera_movement, "Static");
    assert_eq!(state.camera_angle, "Eye-level");
    assert_eq!(state.camera_focus, "Soft Focus");
}

#[test]
fn hydrate_never_panics_on_odd_shapes() {
    let inputs = [
        Value::Null,
        json!(true),
        json!(12.5),
        json!("text"),
        json!([{"title": "x"}]),
        json!({"camera": [], "soundscape": "loud", "asmr_details": 3}),
        json!({"sequence": "one\ntwo", "visual_effects": {"a": 1}}),
    ];
    for input in inputs {
        let state = hydrate(&input);
        assert!(state.sequence.is_empty());
        assert!(state.visual_effects.is_empty());
        assert_eq!(state.soundscape_quality, "High-Fidelity (Binaural)");
    }
}

#[test]
fn generated_documents_always_validate() {
    let states = [FormState::default(), watch_repair()];
    for state in states {
        let value = serde_json::to_value(generate(&state)).unwrap();
        assert_eq!(validate(&value), ValidationStatus::Valid);
        assert_eq!(validate_str(&value.to_string()), ValidationStatus::Valid);
    }
}

#[test]
fn validation_negative_cases() {
    assert_eq!(validate_str("{not json"), ValidationStatus::Invalid);
    assert_eq!(validate(&json!({"title": "x"})), ValidationStatus::Invalid);

    let mut value = serde_json::to_value(generate(&watch_repair())).unwrap();
    value["camera"] = json!({"movement": "Static"});
    assert_eq!(validate(&value), ValidationStatus::Invalid);
}
