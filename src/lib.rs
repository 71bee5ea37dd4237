mod commands;
mod models;
mod services;

use commands::*;
use services::board_service::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(AppState::new())
        .setup(|app| {
            // Log plugin only in debug builds
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Config commands
            get_config,
            get_api_base_url,
            set_api_base_url,
            get_author_email,
            set_author_email,
            // Project commands
            fetch_projects,
            get_project,
            create_project,
            // Board commands
            open_project,
            board_snapshot,
            fetch_project_items,
            fetch_project_summaries,
            fetch_recommendation_items,
            promote_recommendations,
            toggle_item_fixed,
            add_link,
            fetch_resources_page,
            fetch_summary_items_page,
            // Link commands
            open_link,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
