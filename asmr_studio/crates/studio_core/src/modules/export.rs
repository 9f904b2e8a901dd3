use crate::modules::protocol::PromptDocument;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Two-space indented JSON, the format shown to the user and copied out.
pub fn to_pretty_json(doc: &PromptDocument) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// `"  Vintage Watch Repair  "` becomes `vintage_watch_repair.json`; a blank
/// idea becomes `prompt.json`.
pub fn export_filename(idea: &str) -> String {
    let stem = idea
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    if stem.is_empty() {
        "prompt.json".to_string()
    } else {
        format!("{stem}.json")
    }
}

pub fn write_json(dir: &Path, idea: &str, doc: &PromptDocument) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(idea));
    std::fs::write(&path, to_pretty_json(doc)?)?;
    tracing::info!(path = %path.display(), "wrote prompt json");
    Ok(path)
}

pub fn write_text(path: &Path, text: &str) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}
