//! The only filesystem and launcher capability handed to the webview.
//!
//! Commands hold an `Arc<dyn FileManagerBridge>` and nothing else, so the
//! display layer cannot reach the filesystem outside these operations.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::config::FileManagerConfig;
use crate::error::AppError;
use crate::models::desktop::DesktopInfo;
use crate::models::file_entry::DirectoryEntry;
use crate::models::location::Location;
use crate::models::mount::MountCandidate;
use crate::models::permissions::PermissionBreakdown;
use crate::safety::validate_path;
use crate::services::location_service::LocationResolver;
use crate::services::mount_service::{default_mount_roots, scan_mount_roots, MountRoot};
use crate::services::{
    desktop_service, file_service, launch_service, permission_service, thumbnail_service,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WellKnownLocation {
    pub key: Location,
    pub path: String,
}

#[async_trait]
pub trait FileManagerBridge: Send + Sync {
    async fn read_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>, AppError>;

    fn home_dir(&self) -> PathBuf;

    async fn common_path(&self, location: &str) -> Option<PathBuf>;

    fn well_known_locations(&self) -> Vec<WellKnownLocation>;

    async fn mounted_devices(&self) -> Vec<MountCandidate>;

    async fn thumbnail_url(&self, path: &str) -> Option<String>;

    async fn open_file(&self, path: &str) -> Result<(), AppError>;

    async fn file_permissions(&self, path: &str) -> Result<PermissionBreakdown, AppError>;

    fn is_wayland(&self) -> bool;

    fn desktop_info(&self) -> DesktopInfo;
}

pub struct FileManagerApi {
    resolver: LocationResolver,
    mount_roots: Vec<MountRoot>,
    thumbnail_max_bytes: u64,
}

impl FileManagerApi {
    pub fn new(resolver: LocationResolver, config: &FileManagerConfig) -> Self {
        Self {
            resolver,
            mount_roots: default_mount_roots(),
            thumbnail_max_bytes: config.thumbnail_max_bytes,
        }
    }

    pub fn with_mount_roots(mut self, roots: Vec<MountRoot>) -> Self {
        self.mount_roots = roots;
        self
    }
}

#[async_trait]
impl FileManagerBridge for FileManagerApi {
    async fn read_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>, AppError> {
        let path = validate_path(path)?;
        file_service::list_directory(&path).await
    }

    fn home_dir(&self) -> PathBuf {
        self.resolver.home_dir().to_path_buf()
    }

    async fn common_path(&self, location: &str) -> Option<PathBuf> {
        self.resolver.resolve(location).await
    }

    fn well_known_locations(&self) -> Vec<WellKnownLocation> {
        self.resolver
            .well_known_locations()
            .into_iter()
            .map(|(key, path)| WellKnownLocation {
                key,
                path: path.to_string_lossy().to_string(),
            })
            .collect()
    }

    async fn mounted_devices(&self) -> Vec<MountCandidate> {
        scan_mount_roots(&self.mount_roots).await
    }

    async fn thumbnail_url(&self, path: &str) -> Option<String> {
        let path = match validate_path(path) {
            Ok(path) => path,
            Err(e) => {
                debug!(error = %e, "thumbnail request rejected");
                return None;
            }
        };
        thumbnail_service::make_thumbnail(&path, self.thumbnail_max_bytes).await
    }

    async fn open_file(&self, path: &str) -> Result<(), AppError> {
        let path = validate_path(path).map_err(|e| AppError::Launch {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        launch_service::open_file(&path).await
    }

    async fn file_permissions(&self, path: &str) -> Result<PermissionBreakdown, AppError> {
        let path = validate_path(path)?;
        permission_service::decode_permissions(&path).await
    }

    fn is_wayland(&self) -> bool {
        desktop_service::is_wayland()
    }

    fn desktop_info(&self) -> DesktopInfo {
        desktop_service::desktop_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mount::MountKind;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    fn api_for(home: &Path) -> Arc<dyn FileManagerBridge> {
        Arc::new(FileManagerApi::new(
            LocationResolver::new(home),
            &FileManagerConfig::default(),
        ))
    }

    #[tokio::test]
    async fn reads_directory_through_the_bridge() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        let api = api_for(tmp.path());

        let entries = api
            .read_directory(&tmp.path().to_string_lossy())
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn relative_paths_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let api = api_for(tmp.path());

        assert!(matches!(
            api.read_directory("Documents").await,
            Err(AppError::InvalidPath(_))
        ));
        assert!(matches!(
            api.file_permissions("").await,
            Err(AppError::InvalidPath(_))
        ));
        assert!(matches!(
            api.open_file("notes.txt").await,
            Err(AppError::Launch { .. })
        ));
        assert_eq!(api.thumbnail_url("photo.png").await, None);
    }

    #[tokio::test]
    async fn thumbnail_ceiling_comes_from_config() {
        let tmp = tempfile::tempdir().unwrap();
        let image = tmp.path().join("small.png");
        fs::write(&image, [0u8; 64]).unwrap();
        let config = FileManagerConfig {
            thumbnail_max_bytes: 32,
            ..Default::default()
        };
        let api = FileManagerApi::new(LocationResolver::new(tmp.path()), &config);

        assert_eq!(api.thumbnail_url(&image.to_string_lossy()).await, None);
    }

    #[tokio::test]
    async fn mounted_devices_scan_configured_roots() {
        let tmp = tempfile::tempdir().unwrap();
        let mnt = tmp.path().join("mnt");
        fs::create_dir_all(mnt.join("usb1")).unwrap();
        fs::write(mnt.join("usb1").join("data.bin"), "x").unwrap();
        let api = FileManagerApi::new(
            LocationResolver::new(tmp.path()),
            &FileManagerConfig::default(),
        )
        .with_mount_roots(vec![MountRoot::with_kind(&mnt, MountKind::Mount)]);

        let mounts = api.mounted_devices().await;

        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts[0].name, "usb1");
        assert_eq!(mounts[0].kind, MountKind::Mount);
    }

    #[tokio::test]
    async fn common_path_and_home() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("Music")).unwrap();
        let api = api_for(tmp.path());

        assert_eq!(api.home_dir(), tmp.path());
        assert_eq!(api.common_path("music").await, Some(tmp.path().join("Music")));
        assert_eq!(api.common_path("videos").await, None);
        assert_eq!(api.common_path("tmp").await, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn well_known_locations_serialize_with_keys() {
        let api = FileManagerApi::new(
            LocationResolver::new("/home/test"),
            &FileManagerConfig::default(),
        );
        let json = serde_json::to_value(api.well_known_locations()).unwrap();

        assert_eq!(json[0]["key"], "home");
        assert_eq!(json[0]["path"], "/home/test");
        assert_eq!(json[3]["key"], "downloads");
        assert_eq!(json[3]["path"], "/home/test/Downloads");
    }
}
