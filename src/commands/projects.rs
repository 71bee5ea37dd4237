use tauri::State;

use crate::models::{Project, ProjectDraft};
use crate::services::board_service::{self, AppState};
use crate::services::project_service::{self, CreatedProject};
use crate::services::sync::ResourceSnapshot;

#[tauri::command]
pub async fn fetch_projects(
    state: State<'_, AppState>,
) -> Result<ResourceSnapshot<Vec<Project>>, String> {
    Ok(board_service::refetch_projects(&state).await)
}

#[tauri::command]
pub async fn get_project(
    state: State<'_, AppState>,
    project_id: i64,
) -> Result<Project, String> {
    project_service::get_project(&state, project_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_project(
    state: State<'_, AppState>,
    draft: ProjectDraft,
) -> Result<CreatedProject, String> {
    project_service::create_project(&state, &draft)
        .await
        .map_err(|e| e.to_string())
}
