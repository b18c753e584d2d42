use std::path::Path;

use crate::error::AppError;
use crate::models::permissions::PermissionBreakdown;
use crate::services::file_service::StatFields;

pub async fn decode_permissions(path: &Path) -> Result<PermissionBreakdown, AppError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| AppError::filesystem(path, e))?;
    let stat = StatFields::from_metadata(&metadata);
    Ok(PermissionBreakdown::from_mode(stat.mode, stat.uid, stat.gid))
}
