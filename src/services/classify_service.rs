use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "tiff"];

/// Lowercased extension after the final dot, if the name has one.
pub fn lowercase_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

pub fn is_image_file(name: &str) -> bool {
    lowercase_extension(name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// MIME subtype used after `image/` in a data URI.
pub fn image_mime_subtype(ext: &str) -> String {
    match ext.to_lowercase().as_str() {
        "svg" => "svg+xml".to_string(),
        "jpg" | "jpeg" => "jpeg".to_string(),
        other => other.to_string(),
    }
}
