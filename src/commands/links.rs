/// Open a material link in the system browser.
#[tauri::command]
pub fn open_link(url: String) -> Result<(), String> {
    let parsed = url::Url::parse(&url).map_err(|e| format!("Invalid link: {}", e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err("Only http(s) links can be opened".to_string());
    }
    open::that(parsed.as_str()).map_err(|e| format!("Failed to open link: {}", e))
}
