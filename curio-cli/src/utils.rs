use curio::config::{ConfigLoader, CurioConfig};
use curio::resources::ResourceRecord;
use curio::storage::Document;
use curio::{CurioError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load the configuration from `path`, or from the default locations and the
/// environment when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CurioConfig> {
    let mut loader = ConfigLoader::new();
    match path {
        Some(path) => {
            loader.load_file(path)?;
        }
        None => {
            loader.load_default_files();
        }
    }
    loader.load_env();
    Ok(loader.extract()?)
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CurioError::Other(format!("Failed to read {} file {}: {}", what, path.display(), e))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        CurioError::Other(format!("Invalid {} file {}: {}", what, path.display(), e))
    })
}

/// Read a JSON array of documents.
pub fn load_corpus(path: &Path) -> Result<Vec<Document>> {
    let documents: Vec<Document> = read_json(path, "corpus")?;
    if let Some(position) = documents.iter().position(|d| d.text.trim().is_empty()) {
        return Err(CurioError::Other(format!(
            "Document {} in {} has no text",
            position,
            path.display()
        )));
    }
    Ok(documents)
}

/// Read a JSON array of cached external resources.
pub fn load_resources(path: &Path) -> Result<Vec<ResourceRecord>> {
    read_json(path, "resources")
}

/// Shorten `text` to `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
