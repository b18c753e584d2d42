use tauri::{command, State};

use crate::bridge::WellKnownLocation;
use crate::error::AppError;
use crate::models::file_entry::DirectoryEntry;
use crate::models::mount::MountCandidate;
use crate::models::permissions::PermissionBreakdown;
use crate::state::AppContext;

#[command]
pub async fn list_directory(
    path: String,
    state: State<'_, AppContext>,
) -> Result<Vec<DirectoryEntry>, AppError> {
    state.api.read_directory(&path).await
}

#[command]
pub fn get_home_dir(state: State<'_, AppContext>) -> String {
    state.api.home_dir().to_string_lossy().to_string()
}

#[command]
pub async fn get_common_path(
    location: String,
    state: State<'_, AppContext>,
) -> Result<Option<String>, AppError> {
    Ok(state
        .api
        .common_path(&location)
        .await
        .map(|p| p.to_string_lossy().to_string()))
}

#[command]
pub fn get_well_known_locations(state: State<'_, AppContext>) -> Vec<WellKnownLocation> {
    state.api.well_known_locations()
}

#[command]
pub async fn get_mounted_devices(
    state: State<'_, AppContext>,
) -> Result<Vec<MountCandidate>, AppError> {
    Ok(state.api.mounted_devices().await)
}

#[command]
pub async fn get_thumbnail_url(
    path: String,
    state: State<'_, AppContext>,
) -> Result<Option<String>, AppError> {
    Ok(state.api.thumbnail_url(&path).await)
}

#[command]
pub async fn open_file(path: String, state: State<'_, AppContext>) -> Result<(), AppError> {
    state.api.open_file(&path).await
}

#[command]
pub async fn get_file_permissions(
    path: String,
    state: State<'_, AppContext>,
) -> Result<PermissionBreakdown, AppError> {
    state.api.file_permissions(&path).await
}
