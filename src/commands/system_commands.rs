use tauri::{command, State};

use crate::models::desktop::DesktopInfo;
use crate::state::AppContext;

#[command]
pub fn is_wayland(state: State<'_, AppContext>) -> bool {
    state.api.is_wayland()
}

#[command]
pub fn get_desktop_info(state: State<'_, AppContext>) -> DesktopInfo {
    state.api.desktop_info()
}

/// Directory passed on the command line, for the webview to open once loaded.
#[command]
pub fn get_startup_directory(state: State<'_, AppContext>) -> Option<String> {
    state
        .startup_directory
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
}
