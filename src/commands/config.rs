use std::sync::Arc;
use tauri::State;

use crate::services::api_client::ApiClient;
use crate::services::board_service::AppState;
use crate::services::config_service;

#[tauri::command]
pub fn get_config() -> Result<config_service::Config, String> {
    config_service::get_full_config()
}

#[tauri::command]
pub fn get_api_base_url() -> Result<Option<String>, String> {
    config_service::get_api_base_url()
}

/// Persist the base URL and swap the live client so subsequent fetches hit
/// the new backend.
#[tauri::command]
pub async fn set_api_base_url(state: State<'_, AppState>, url: String) -> Result<(), String> {
    config_service::set_api_base_url(&url)?;
    state.set_backend(Arc::new(ApiClient::new(&url))).await;
    Ok(())
}

#[tauri::command]
pub fn get_author_email() -> Result<Option<String>, String> {
    config_service::get_author_email()
}

#[tauri::command]
pub fn set_author_email(email: String) -> Result<(), String> {
    config_service::set_author_email(&email)
}
