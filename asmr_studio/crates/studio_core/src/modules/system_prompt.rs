use crate::modules::catalog;

pub const ENHANCE_PROMPT: &str = r#"You are a creative director for ASMR videos.
Expand the user's short idea into a richer title and description.

- title: a short, evocative, sensory-rich title for an ASMR video.
- description: one detailed paragraph describing the scene, focusing on textures, sounds and atmosphere.

OUTPUT FORMAT (JSON): { "title": "...", "description": "..." } ONLY output valid JSON."#;

const SUGGEST_PROMPT_HEAD: &str = r#"You are an ASMR video director. Given the concept below, choose production settings that best fit it.

RULES:
- Single-select keys take exactly one value copied verbatim from its option list.
- Multi-select keys take an array of 1-4 values copied verbatim from its option list.
- environment and subject are short free-text phrases.
- sequence is an array of 3-6 short actions in the order they happen on screen.
- Do not invent option values and do not add other keys.

OPTION LISTS:"#;

const SUGGEST_PROMPT_TAIL: &str = r#"OUTPUT FORMAT (JSON): { "moods": [...], "pacing": "...", "environment": "...", "subject": "...", "sequence": [...], "lighting": "...", "cameraMovement": "...", "cameraAngle": "...", "cameraFocus": "...", "visualEffects": [...], "soundscapePrimary": "...", "soundscapeSecondary": [...], "soundscapeQuality": "...", "asmrTriggers": [...], "materials": [...] } ONLY output valid JSON."#;

const IMAGE_SEED_HEAD: &str = r#"You are an ASMR video director. Look at the attached image and imagine an ASMR video set in it.
Return a short idea (a few words), a one-paragraph description focusing on textures, sounds and atmosphere, and production settings.

SETTINGS RULES:
- Single-select keys take exactly one value copied verbatim from its option list.
- Multi-select keys take an array of 1-4 values copied verbatim from its option list.

OPTION LISTS:"#;

const IMAGE_SEED_TAIL: &str = r#"OUTPUT FORMAT (JSON): { "idea": "...", "description": "...", "settings": { "moods": [...], "pacing": "...", "environment": "...", "subject": "...", "sequence": [...], "lighting": "...", "cameraMovement": "...", "cameraAngle": "...", "cameraFocus": "...", "visualEffects": [...], "soundscapePrimary": "...", "soundscapeSecondary": [...], "soundscapeQuality": "...", "asmrTriggers": [...], "materials": [...] } } ONLY output valid JSON."#;

pub const REFINE_PROMPT: &str = r#"You refine JSON prompts for an ASMR video generation model.
Improve the prompt below: make descriptions more vivid and sensory, make the sequence concrete and well paced, keep settings coherent with each other.

CONSTRAINTS:
- Keep exactly the same keys and nesting: title, description, style, mood, pacing, environment, subject, sequence, lighting, camera { movement, angle, focus }, soundscape { primary, secondary, quality }, visual_effects, asmr_details { triggers, materials }.
- style stays "ASMR". mood, sequence, visual_effects, soundscape.secondary, asmr_details.triggers and asmr_details.materials stay arrays of strings.

ONLY output the refined JSON object."#;

pub const NARRATIVE_PROMPT: &str = r#"You write scene descriptions for video generation models.
Turn the ASMR JSON prompt below into one flowing paragraph (120-200 words) in present tense that a video model can follow directly.
Mention the setting, subject, lighting, camera work, the action sequence in order, and the soundscape with its ASMR triggers and materials.
Output plain prose only: no headings, lists, markdown or JSON."#;

fn option_lists() -> String {
    catalog::describe()
}

pub fn suggest_prompt(idea: &str, description: &str) -> String {
    format!(
        "{SUGGEST_PROMPT_HEAD}\n{}\n\n{SUGGEST_PROMPT_TAIL}\n\nCONCEPT:\nIdea: {idea}\nDescription: {description}",
        option_lists()
    )
}

pub fn image_seed_prompt() -> String {
    format!("{IMAGE_SEED_HEAD}\n{}\n\n{IMAGE_SEED_TAIL}", option_lists())
}

pub fn enhance_prompt(idea: &str) -> String {
    format!("{ENHANCE_PROMPT}\n\nUSER IDEA:\n\"{idea}\"")
}

pub fn refine_prompt(doc_json: &str, instructions: Option<&str>) -> String {
    match instructions.map(str::trim).filter(|s| !s.is_empty()) {
        Some(extra) => format!("{REFINE_PROMPT}\n\nUSER NOTES:\n{extra}\n\nPROMPT:\n{doc_json}"),
        None => format!("{REFINE_PROMPT}\n\nPROMPT:\n{doc_json}"),
    }
}

pub fn narrative_prompt(doc_json: &str) -> String {
    format!("{NARRATIVE_PROMPT}\n\nPROMPT:\n{doc_json}")
}
