use std::fs;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Remembered author email, pre-filled into the create-project form.
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub theme: String,
}

fn get_app_data_dir() -> Result<PathBuf, String> {
    let data_dir = dirs::data_dir()
        .ok_or("Could not find data directory")?
        .join("InfoBridge");

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir).map_err(|e| e.to_string())?;
    }

    Ok(data_dir)
}

fn get_config_path() -> Result<PathBuf, String> {
    Ok(get_app_data_dir()?.join("config.json"))
}

pub fn load_config() -> Result<Config, String> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read config: {}", e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse config: {}", e))
}

pub fn save_config(config: &Config) -> Result<(), String> {
    let config_path = get_config_path()?;
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(&config_path, content)
        .map_err(|e| format!("Failed to write config: {}", e))?;
    Ok(())
}

pub fn get_api_base_url() -> Result<Option<String>, String> {
    let config = load_config()?;
    Ok(config.api_base_url)
}

pub fn set_api_base_url(url: &str) -> Result<(), String> {
    let mut config = load_config().unwrap_or_default();
    config.api_base_url = Some(url.to_string());
    save_config(&config)
}

pub fn get_author_email() -> Result<Option<String>, String> {
    let config = load_config()?;
    Ok(config.author_email)
}

pub fn set_author_email(email: &str) -> Result<(), String> {
    let mut config = load_config().unwrap_or_default();
    config.author_email = Some(email.to_string());
    save_config(&config)
}

pub fn get_full_config() -> Result<Config, String> {
    load_config()
}

/// Base URL for the REST backend, falling back to the local default when the
/// config file has none.
pub fn get_effective_base_url() -> String {
    load_config()
        .ok()
        .and_then(|c| c.api_base_url)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}
