use serde::{Deserialize, Serialize};

/// Value of `PromptDocument::style`; every document carries it.
pub const STYLE: &str = "ASMR";

/// Canonical prompt handed to the video model and to the AI refinement and
/// narrative helpers. Field names and nesting are part of the wire contract.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PromptDocument {
    pub title: String,
    pub description: String,
    pub style: String,
    pub mood: Vec<String>,
    pub pacing: String,
    pub environment: String,
    pub subject: String,
    pub sequence: Vec<String>,
    pub lighting: String,
    pub camera: Camera,
    pub soundscape: Soundscape,
    pub visual_effects: Vec<String>,
    pub asmr_details: AsmrDetails,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    pub movement: String,
    pub angle: String,
    pub focus: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Soundscape {
    pub primary: String,
    pub secondary: Vec<String>,
    pub quality: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AsmrDetails {
    pub triggers: Vec<String>,
    pub materials: Vec<String>,
}

/// Outcome of the structural self-test.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    Invalid,
    #[default]
    Unchecked,
}

impl ValidationStatus {
    pub fn is_valid(self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Invalid => "invalid",
            ValidationStatus::Unchecked => "unchecked",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
