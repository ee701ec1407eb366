use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CloudKit Web Services access secrets.
#[derive(Debug, Deserialize)]
pub struct Secrets {
    /// CloudKit container identifier, e.g. `iCloud.com.salongo.app`.
    pub container: String,
    /// Container environment, `development` or `production`.
    pub environment: String,
    /// CloudKit API token for the container.
    pub api_token: String,
}

/// Load secrets from `~/.salongo/cloudkit.json`.
pub fn load_secrets() -> Result<Secrets, String> {
    let mut path = dirs::home_dir().ok_or_else(|| "Unable to locate home directory".to_string())?;
    path.push(".salongo");
    path.push("cloudkit.json");
    read_secrets(&path)
}

/// Load secrets from an explicit path.
pub fn load_secrets_from(path: &Path) -> Result<Secrets, String> {
    read_secrets(&path.to_path_buf())
}

fn read_secrets(path: &PathBuf) -> Result<Secrets, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&contents).map_err(|e| format!("Invalid {}: {e}", path.display()))
}
