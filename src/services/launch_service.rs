use std::path::Path;

use tracing::info;

use crate::error::AppError;

/// Opens `path` with the desktop's default application.
pub async fn open_file(path: &Path) -> Result<(), AppError> {
    let path_str = path.to_string_lossy().to_string();

    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(AppError::Launch {
            path: path_str,
            message: "no such file or directory".to_string(),
        });
    }

    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || open::that(&target))
        .await
        .map_err(|e| AppError::Launch {
            path: path_str.clone(),
            message: e.to_string(),
        })?
        .map_err(|e| AppError::Launch {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

    info!(path = %path_str, "opened with default application");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_path_is_a_launch_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.pdf");

        let err = open_file(&missing).await.unwrap_err();

        match err {
            AppError::Launch { path, message } => {
                assert_eq!(path, missing.to_string_lossy());
                assert!(message.contains("no such file"));
            }
            other => panic!("expected launch error, got {other:?}"),
        }
    }
}
