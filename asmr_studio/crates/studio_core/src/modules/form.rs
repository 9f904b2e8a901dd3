use crate::modules::catalog::{self, camera, sound};
use crate::modules::cleaner::dedup_preserving_order;
use serde::{Deserialize, Serialize};

/// Editable prompt configuration. The caller owns it; the mapper only reads or
/// rebuilds it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub idea: String,
    pub description: String,
    pub moods: Vec<String>,
    pub lighting: String,
    pub pacing: String,
    pub sequence: String,
    pub environment: String,
    pub subject: String,
    pub camera_movement: String,
    pub camera_angle: String,
    pub camera_focus: String,
    pub visual_effects: Vec<String>,
    pub soundscape_primary: String,
    pub soundscape_secondary: Vec<String>,
    pub soundscape_quality: String,
    pub asmr_triggers: Vec<String>,
    pub materials: Vec<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            idea: String::new(),
            description: String::new(),
            moods: Vec::new(),
            lighting: SingleSelect::Lighting.default_value().to_string(),
            pacing: SingleSelect::Pacing.default_value().to_string(),
            sequence: String::new(),
            environment: String::new(),
            subject: String::new(),
            camera_movement: SingleSelect::CameraMovement.default_value().to_string(),
            camera_angle: SingleSelect::CameraAngle.default_value().to_string(),
            camera_focus: SingleSelect::CameraFocus.default_value().to_string(),
            visual_effects: Vec::new(),
            soundscape_primary: SingleSelect::SoundscapePrimary.default_value().to_string(),
            soundscape_secondary: Vec::new(),
            soundscape_quality: SingleSelect::SoundscapeQuality.default_value().to_string(),
            asmr_triggers: Vec::new(),
            materials: Vec::new(),
        }
    }
}

/// Empty or whitespace-only. Such a single-select value is replaced by its default.
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleSelect {
    Lighting,
    Pacing,
    CameraMovement,
    CameraAngle,
    CameraFocus,
    SoundscapePrimary,
    SoundscapeQuality,
}

impl SingleSelect {
    pub const ALL: [SingleSelect; 7] = [
        SingleSelect::Lighting,
        SingleSelect::Pacing,
        SingleSelect::CameraMovement,
        SingleSelect::CameraAngle,
        SingleSelect::CameraFocus,
        SingleSelect::SoundscapePrimary,
        SingleSelect::SoundscapeQuality,
    ];

    pub fn options(self) -> &'static [&'static str] {
        match self {
            SingleSelect::Lighting => catalog::LIGHTING_STYLES,
            SingleSelect::Pacing => catalog::PACING_OPTIONS,
            SingleSelect::CameraMovement => camera::MOVEMENTS,
            SingleSelect::CameraAngle => camera::ANGLES,
            SingleSelect::CameraFocus => camera::FOCUS,
            SingleSelect::SoundscapePrimary => sound::PRIMARY,
            SingleSelect::SoundscapeQuality => sound::QUALITIES,
        }
    }

    pub fn default_value(self) -> &'static str {
        catalog::default_of(self.options())
    }

    pub fn key(self) -> &'static str {
        match self {
            SingleSelect::Lighting => "lighting",
            SingleSelect::Pacing => "pacing",
            SingleSelect::CameraMovement => "cameraMovement",
            SingleSelect::CameraAngle => "cameraAngle",
            SingleSelect::CameraFocus => "cameraFocus",
            SingleSelect::SoundscapePrimary => "soundscapePrimary",
            SingleSelect::SoundscapeQuality => "soundscapeQuality",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSelect {
    Moods,
    VisualEffects,
    SoundscapeSecondary,
    AsmrTriggers,
    Materials,
}

impl MultiSelect {
    pub const ALL: [MultiSelect; 5] = [
        MultiSelect::Moods,
        MultiSelect::VisualEffects,
        MultiSelect::SoundscapeSecondary,
        MultiSelect::AsmrTriggers,
        MultiSelect::Materials,
    ];

    pub fn options(self) -> &'static [&'static str] {
        match self {
            MultiSelect::Moods => catalog::MOODS,
            MultiSelect::VisualEffects => catalog::VISUAL_EFFECTS,
            MultiSelect::SoundscapeSecondary => sound::SECONDARY,
            MultiSelect::AsmrTriggers => catalog::ASMR_TRIGGERS,
            MultiSelect::Materials => catalog::CORE_MATERIALS,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            MultiSelect::Moods => "moods",
            MultiSelect::VisualEffects => "visualEffects",
            MultiSelect::SoundscapeSecondary => "soundscapeSecondary",
            MultiSelect::AsmrTriggers => "asmrTriggers",
            MultiSelect::Materials => "materials",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Idea,
    Description,
    Environment,
    Subject,
    Sequence,
}

impl FormState {
    pub fn reset(&mut self) {
        *self = FormState::default();
    }

    pub fn single(&self, field: SingleSelect) -> &str {
        match field {
            SingleSelect::Lighting => &self.lighting,
            SingleSelect::Pacing => &self.pacing,
            SingleSelect::CameraMovement => &self.camera_movement,
            SingleSelect::CameraAngle => &self.camera_angle,
            SingleSelect::CameraFocus => &self.camera_focus,
            SingleSelect::SoundscapePrimary => &self.soundscape_primary,
            SingleSelect::SoundscapeQuality => &self.soundscape_quality,
        }
    }

    fn single_mut(&mut self, field: SingleSelect) -> &mut String {
        match field {
            SingleSelect::Lighting => &mut self.lighting,
            SingleSelect::Pacing => &mut self.pacing,
            SingleSelect::CameraMovement => &mut self.camera_movement,
            SingleSelect::CameraAngle => &mut self.camera_angle,
            SingleSelect::CameraFocus => &mut self.camera_focus,
            SingleSelect::SoundscapePrimary => &mut self.soundscape_primary,
            SingleSelect::SoundscapeQuality => &mut self.soundscape_quality,
        }
    }

    pub fn multi(&self, field: MultiSelect) -> &[String] {
        match field {
            MultiSelect::Moods => &self.moods,
            MultiSelect::VisualEffects => &self.visual_effects,
            MultiSelect::SoundscapeSecondary => &self.soundscape_secondary,
            MultiSelect::AsmrTriggers => &self.asmr_triggers,
            MultiSelect::Materials => &self.materials,
        }
    }

    fn multi_mut(&mut self, field: MultiSelect) -> &mut Vec<String> {
        match field {
            MultiSelect::Moods => &mut self.moods,
            MultiSelect::VisualEffects => &mut self.visual_effects,
            MultiSelect::SoundscapeSecondary => &mut self.soundscape_secondary,
            MultiSelect::AsmrTriggers => &mut self.asmr_triggers,
            MultiSelect::Materials => &mut self.materials,
        }
    }

    /// A blank value falls back to the field default, so the field is never blank.
    pub fn set_single(&mut self, field: SingleSelect, value: impl Into<String>) {
        let value = value.into();
        *self.single_mut(field) = if is_blank(&value) {
            field.default_value().to_string()
        } else {
            value
        };
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let slot = match field {
            TextField::Idea => &mut self.idea,
            TextField::Description => &mut self.description,
            TextField::Environment => &mut self.environment,
            TextField::Subject => &mut self.subject,
            TextField::Sequence => &mut self.sequence,
        };
        *slot = value.into();
    }

    /// Removes `item` if selected, otherwise appends it. Returns whether the item
    /// is selected afterwards.
    pub fn toggle(&mut self, field: MultiSelect, item: &str) -> bool {
        let selection = self.multi_mut(field);
        if let Some(pos) = selection.iter().position(|s| s == item) {
            selection.remove(pos);
            false
        } else {
            selection.push(item.to_string());
            true
        }
    }

    /// Restores the field invariants on a hand-edited state: no duplicate
    /// multi-select entries, no blank single-select values.
    pub fn normalized(mut self) -> Self {
        for field in MultiSelect::ALL {
            let items = std::mem::take(self.multi_mut(field));
            *self.multi_mut(field) = dedup_preserving_order(items);
        }
        for field in SingleSelect::ALL {
            if is_blank(self.single(field)) {
                *self.single_mut(field) = field.default_value().to_string();
            }
        }
        self
    }

    /// Values that are not part of their option set. Informational only.
    pub fn catalog_warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        for field in SingleSelect::ALL {
            let v = self.single(field);
            if !catalog::contains(field.options(), v) {
                out.push(format!("{}: {v:?} is not a known option", field.key()));
            }
        }
        for field in MultiSelect::ALL {
            for v in self.multi(field) {
                if !catalog::contains(field.options(), v) {
                    out.push(format!("{}: {v:?} is not a known option", field.key()));
                }
            }
        }
        out
    }
}
