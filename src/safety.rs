use crate::error::AppError;
use std::path::{Path, PathBuf};

/// Checks a path handed over by the webview before it reaches the filesystem.
pub fn validate_path(path: &str) -> Result<PathBuf, AppError> {
    if path.is_empty() {
        return Err(AppError::InvalidPath("path is empty".to_string()));
    }

    if path.contains('\0') {
        return Err(AppError::InvalidPath(
            "path contains a NUL byte".to_string(),
        ));
    }

    let p = Path::new(path);
    if !p.is_absolute() {
        return Err(AppError::InvalidPath(format!(
            "path must be absolute: {path}"
        )));
    }

    Ok(p.to_path_buf())
}
