use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, warn};

use crate::services::classify_service::{image_mime_subtype, is_image_file, lowercase_extension};

pub const DEFAULT_THUMBNAIL_MAX_BYTES: u64 = 50 * 1024 * 1024;

/// Inlines an image as a `data:` URI for preview.
///
/// Returns `None` for non-images, files larger than `max_bytes`, and any
/// I/O failure. A missing thumbnail must never break a listing.
pub async fn make_thumbnail(path: &Path, max_bytes: u64) -> Option<String> {
    let path_str = path.to_string_lossy();
    if !is_image_file(&path_str) {
        return None;
    }
    let ext = lowercase_extension(&path_str)?;

    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to stat thumbnail source");
            return None;
        }
    };
    if metadata.len() > max_bytes {
        debug!(
            path = %path.display(),
            size = metadata.len(),
            max_bytes,
            "image too large for thumbnail"
        );
        return None;
    }

    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read thumbnail source");
            return None;
        }
    };

    Some(format!(
        "data:image/{};base64,{}",
        image_mime_subtype(&ext),
        STANDARD.encode(data)
    ))
}
