use tauri::State;

use crate::models::{LinkItem, LinkItemDraft, RecommendationItem, Summary, ToggledItem};
use crate::services::api::Paginated;
use crate::services::board_service::{self, AppState, BoardSnapshot, PromoteOutcome};
use crate::services::sync::ResourceSnapshot;

#[tauri::command]
pub async fn open_project(
    state: State<'_, AppState>,
    project_id: i64,
) -> Result<BoardSnapshot, String> {
    Ok(board_service::open_project(&state, project_id).await)
}

#[tauri::command]
pub async fn board_snapshot(state: State<'_, AppState>) -> Result<BoardSnapshot, String> {
    Ok(board_service::board_snapshot(&state).await)
}

#[tauri::command]
pub async fn fetch_project_items(
    state: State<'_, AppState>,
) -> Result<ResourceSnapshot<Vec<LinkItem>>, String> {
    Ok(board_service::refetch_items(&state).await)
}

#[tauri::command]
pub async fn fetch_project_summaries(
    state: State<'_, AppState>,
) -> Result<ResourceSnapshot<Vec<Summary>>, String> {
    Ok(board_service::refetch_summaries(&state).await)
}

#[tauri::command]
pub async fn fetch_recommendation_items(
    state: State<'_, AppState>,
) -> Result<ResourceSnapshot<Paginated<RecommendationItem>>, String> {
    Ok(board_service::refetch_recommendation_items(&state).await)
}

/// Promote the selected recommendation items into resources. On success the
/// webview should clear its selection and render the returned board.
#[tauri::command]
pub async fn promote_recommendations(
    state: State<'_, AppState>,
    item_ids: Vec<i64>,
) -> Result<PromoteOutcome, String> {
    board_service::promote_selected(&state, &item_ids)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn toggle_item_fixed(
    state: State<'_, AppState>,
    item_id: i64,
) -> Result<ToggledItem, String> {
    board_service::toggle_item_fixed(&state, item_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn add_link(
    state: State<'_, AppState>,
    project_id: i64,
    link: LinkItemDraft,
) -> Result<LinkItem, String> {
    board_service::add_link(&state, project_id, link)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn fetch_resources_page(
    state: State<'_, AppState>,
    project_id: i64,
) -> Result<Paginated<LinkItem>, String> {
    board_service::fetch_resources_page(&state, project_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn fetch_summary_items_page(
    state: State<'_, AppState>,
    project_id: i64,
) -> Result<Paginated<Summary>, String> {
    board_service::fetch_summary_items_page(&state, project_id)
        .await
        .map_err(|e| e.to_string())
}
