//! Small path helpers shared by the loaders

use std::path::Path;

/// Image extensions the decoder is built with
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Check if a path has a YAML extension (`.yaml` or `.yml`)
pub fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "yaml" | "yml"))
        .unwrap_or(false)
}

/// Check if a path has an extension the image decoder understands
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Get the filename from a path for display in status messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_detection() {
        assert!(is_yaml_file(Path::new("metrics.yaml")));
        assert!(is_yaml_file(Path::new("metrics.YML")));
        assert!(!is_yaml_file(Path::new("metrics.json")));
        assert!(!is_yaml_file(Path::new("metrics")));
    }

    #[test]
    fn test_image_detection() {
        assert!(is_image_file(Path::new("page.png")));
        assert!(is_image_file(Path::new("page.JPEG")));
        assert!(!is_image_file(Path::new("page.json")));
    }

    #[test]
    fn test_filename_for_display() {
        assert_eq!(filename_for_display(Path::new("/a/b/page.png")), "page.png");
    }
}
