use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

/// Load a loan or limits document from `path`, relative to the working
/// directory unless absolute.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let location = locate(path)?;
    let raw = fs::read_to_string(&location)
        .map_err(|e| format!("cannot read {}: {}", location.display(), e))?;
    let parsed = serde_json::from_str(&raw)
        .map_err(|e| format!("{} is not a valid loan document: {}", location.display(), e))?;
    tracing::debug!(path = %location.display(), bytes = raw.len(), "loaded input file");
    Ok(parsed)
}

fn locate(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let location = std::env::current_dir()?.join(path);
    match fs::metadata(&location) {
        Ok(meta) if meta.is_file() => Ok(location),
        Ok(_) => Err(format!("{} is a directory, expected a JSON file", location.display()).into()),
        Err(_) => Err(format!("no such input file: {}", location.display()).into()),
    }
}
