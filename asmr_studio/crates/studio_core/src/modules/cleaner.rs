use std::collections::HashSet;

/// Keeps the first occurrence of each entry.
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

/// Narrows model output down to the JSON object it contains: a bare object,
/// a fenced ```json block, or the outermost braces inside surrounding prose.
pub fn extract_json_like(text: &str) -> Option<&str> {
    let t = text.trim();
    if t.starts_with('{') && t.ends_with('}') {
        return Some(t);
    }

    if let Some(stripped) = t.strip_prefix("```") {
        // ```json\n{...}\n```
        let stripped = stripped.trim_start();
        let stripped = stripped.strip_prefix("json").unwrap_or(stripped).trim_start();
        let stripped = stripped.trim_start_matches(['\r', '\n']).trim();
        let stripped = stripped.strip_suffix("```").unwrap_or(stripped).trim();
        if stripped.starts_with('{') && stripped.ends_with('}') {
            return Some(stripped);
        }
    }

    let start = t.find('{')?;
    let end = t.rfind('}')?;
    if end > start {
        Some(&t[start..=end])
    } else {
        None
    }
}

/// Parses model output as JSON, falling back to the extracted object.
pub fn parse_json_lenient(text: &str) -> Option<serde_json::Value> {
    if let Ok(v) = serde_json::from_str(text) {
        return Some(v);
    }
    let extracted = extract_json_like(text)?;
    serde_json::from_str(extracted).ok()
}

/// Collapses stray whitespace in prose returned by the narrative helper.
pub fn tidy_prose(text: &str) -> String {
    let t = text.trim();
    let t = t
        .strip_prefix("```")
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(t);
    t.split("\n\n")
        .map(|para| para.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|para| !para.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
