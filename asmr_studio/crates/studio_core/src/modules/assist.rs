//! AI helpers around the form. Every model response is treated as untrusted:
//! structured replies are funnelled through the mapper's defaulting rules and
//! never trusted to match the schema.

use crate::modules::cleaner::tidy_prose;
use crate::modules::export::to_pretty_json;
use crate::modules::form::FormState;
use crate::modules::gemini::{GeminiClient, GeminiError, InlineImage};
use crate::modules::mapper::{apply_suggestion, hydrate, lookup};
use crate::modules::protocol::{PromptDocument, ValidationStatus};
use crate::modules::schema;
use crate::modules::system_prompt;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("idea is empty")]
    EmptyIdea,
    #[error("image is empty")]
    EmptyImage,
    #[error(transparent)]
    Gemini(#[from] GeminiError),
    #[error("prompt serialization failed: {0}")]
    Export(#[from] crate::modules::export::ExportError),
    #[error("model returned an empty answer")]
    EmptyAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaExpansion {
    pub title: String,
    pub description: String,
}

impl IdeaExpansion {
    fn from_value(v: &Value) -> Self {
        Self {
            title: string_at(v, &["title"]),
            description: string_at(v, &["description"]),
        }
    }

    /// A blank title keeps the current idea; the description is always replaced.
    pub fn apply(&self, state: &mut FormState) {
        if !self.title.trim().is_empty() {
            state.idea = self.title.clone();
        }
        state.description = self.description.clone();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSeed {
    pub idea: String,
    pub description: String,
    pub settings: Value,
}

impl ImageSeed {
    fn from_value(v: &Value) -> Self {
        Self {
            idea: string_at(v, &["idea"]),
            description: string_at(v, &["description"]),
            settings: lookup(v, &["settings"]).cloned().unwrap_or(Value::Null),
        }
    }

    pub fn apply(&self, state: &FormState) -> FormState {
        let mut next = apply_suggestion(state, &self.settings);
        if !self.idea.trim().is_empty() {
            next.idea = self.idea.clone();
        }
        if !self.description.trim().is_empty() {
            next.description = self.description.clone();
        }
        next
    }
}

/// Refinement output plus its self-test result.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    pub document: Value,
    pub status: ValidationStatus,
}

impl Refinement {
    /// Form state for a document that passed the self-test.
    pub fn to_form(&self) -> Option<FormState> {
        self.status.is_valid().then(|| hydrate(&self.document))
    }
}

fn string_at(v: &Value, path: &[&str]) -> String {
    lookup(v, path)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn idea_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" }
        },
        "required": ["title", "description"]
    })
}

fn settings_schema() -> Value {
    let text = json!({ "type": "STRING" });
    let list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "moods": list,
            "pacing": text,
            "environment": text,
            "subject": text,
            "sequence": list,
            "lighting": text,
            "cameraMovement": text,
            "cameraAngle": text,
            "cameraFocus": text,
            "visualEffects": list,
            "soundscapePrimary": text,
            "soundscapeSecondary": list,
            "soundscapeQuality": text,
            "asmrTriggers": list,
            "materials": list
        }
    })
}

fn image_seed_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "idea": { "type": "STRING" },
            "description": { "type": "STRING" },
            "settings": settings_schema()
        },
        "required": ["idea", "description", "settings"]
    })
}

pub struct Assistant {
    client: GeminiClient,
}

impl Assistant {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    pub async fn enhance_idea(&self, idea: &str) -> Result<IdeaExpansion, AssistError> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(AssistError::EmptyIdea);
        }
        let prompt = system_prompt::enhance_prompt(idea);
        let v = self
            .client
            .generate_json(&prompt, Some(idea_schema()), None)
            .await?;
        Ok(IdeaExpansion::from_value(&v))
    }

    /// Raw suggestion object; merge it with [`apply_suggestion`].
    pub async fn suggest_settings(&self, state: &FormState) -> Result<Value, AssistError> {
        if state.idea.trim().is_empty() {
            return Err(AssistError::EmptyIdea);
        }
        let prompt = system_prompt::suggest_prompt(state.idea.trim(), state.description.trim());
        let v = self
            .client
            .generate_json(&prompt, Some(settings_schema()), None)
            .await?;
        Ok(v)
    }

    pub async fn seed_from_image(&self, image: &InlineImage) -> Result<ImageSeed, AssistError> {
        if image.data.is_empty() {
            return Err(AssistError::EmptyImage);
        }
        let prompt = system_prompt::image_seed_prompt();
        let v = self
            .client
            .generate_json(&prompt, Some(image_seed_schema()), Some(image))
            .await?;
        Ok(ImageSeed::from_value(&v))
    }

    pub async fn refine_json(
        &self,
        doc: &PromptDocument,
        instructions: Option<&str>,
    ) -> Result<Refinement, AssistError> {
        let prompt = system_prompt::refine_prompt(&to_pretty_json(doc)?, instructions);
        let document = self.client.generate_json(&prompt, None, None).await?;
        let status = schema::validate(&document);
        if !status.is_valid() {
            tracing::warn!("refined prompt failed the self-test");
        }
        Ok(Refinement { document, status })
    }

    pub async fn narrative(&self, doc: &PromptDocument) -> Result<String, AssistError> {
        let prompt = system_prompt::narrative_prompt(&to_pretty_json(doc)?);
        let text = tidy_prose(&self.client.generate_text(&prompt, None).await?);
        if text.is_empty() {
            return Err(AssistError::EmptyAnswer);
        }
        Ok(text)
    }
}
