use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::mount::{MountCandidate, MountKind};

pub const MOUNT_ROOTS: [&str; 3] = ["/mnt", "/media", "/run/media"];

/// A directory whose subdirectories are treated as mount points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRoot {
    pub path: PathBuf,
    pub kind: MountKind,
}

impl MountRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = MountKind::for_root(&path.to_string_lossy());
        Self { path, kind }
    }

    pub fn with_kind(path: impl Into<PathBuf>, kind: MountKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

pub fn default_mount_roots() -> Vec<MountRoot> {
    MOUNT_ROOTS.into_iter().map(MountRoot::new).collect()
}

pub async fn list_mounts() -> Vec<MountCandidate> {
    scan_mount_roots(&default_mount_roots()).await
}

/// Reports every non-empty subdirectory of each root, in root order.
///
/// Best effort: unreadable roots and subdirectories are skipped.
pub async fn scan_mount_roots(roots: &[MountRoot]) -> Vec<MountCandidate> {
    let mut mounts = Vec::new();
    for root in roots {
        if let Err(e) = scan_root(root, &mut mounts).await {
            debug!(root = %root.path.display(), error = %e, "skipping mount root");
        }
    }
    mounts
}

async fn scan_root(root: &MountRoot, mounts: &mut Vec<MountCandidate>) -> std::io::Result<()> {
    let mut entries = tokio::fs::read_dir(&root.path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let is_dir = match entry.file_type().await {
            Ok(file_type) => file_type.is_dir(),
            Err(_) => continue,
        };
        if !is_dir {
            continue;
        }

        let mount_path = entry.path();
        match has_contents(&mount_path).await {
            Ok(true) => mounts.push(MountCandidate {
                name: entry.file_name().to_string_lossy().to_string(),
                path: mount_path.to_string_lossy().to_string(),
                kind: root.kind,
            }),
            Ok(false) => {}
            Err(e) => {
                debug!(path = %mount_path.display(), error = %e, "skipping unreadable mount point");
            }
        }
    }
    Ok(())
}

async fn has_contents(path: &Path) -> std::io::Result<bool> {
    let mut entries = tokio::fs::read_dir(path).await?;
    Ok(entries.next_entry().await?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_roots_are_fixed_and_tagged() {
        let roots = default_mount_roots();
        let tags: Vec<(&str, MountKind)> = roots
            .iter()
            .map(|r| (r.path.to_str().unwrap(), r.kind))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("/mnt", MountKind::Mount),
                ("/media", MountKind::Media),
                ("/run/media", MountKind::UserMedia),
            ]
        );
    }

    #[tokio::test]
    async fn reports_only_non_empty_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        let mnt = tmp.path().join("mnt");
        let media = tmp.path().join("media");
        fs::create_dir_all(mnt.join("usb1")).unwrap();
        fs::write(mnt.join("usb1").join("file.txt"), "x").unwrap();
        fs::create_dir_all(mnt.join("empty")).unwrap();
        fs::write(mnt.join("stray-file"), "x").unwrap();
        fs::create_dir_all(&media).unwrap();

        let roots = vec![
            MountRoot::with_kind(&mnt, MountKind::Mount),
            MountRoot::with_kind(&media, MountKind::Media),
        ];
        let mounts = scan_mount_roots(&roots).await;

        assert_eq!(
            mounts,
            vec![MountCandidate {
                name: "usb1".to_string(),
                path: mnt.join("usb1").to_string_lossy().to_string(),
                kind: MountKind::Mount,
            }]
        );
    }

    #[tokio::test]
    async fn missing_roots_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let media = tmp.path().join("media");
        fs::create_dir_all(media.join("alice").join("DISK")).unwrap();

        let roots = vec![
            MountRoot::with_kind(tmp.path().join("absent"), MountKind::Mount),
            MountRoot::with_kind(&media, MountKind::UserMedia),
        ];
        let mounts = scan_mount_roots(&roots).await;

        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts[0].name, "alice");
        assert_eq!(mounts[0].kind, MountKind::UserMedia);
    }

    #[tokio::test]
    async fn nothing_found_is_empty() {
        assert!(scan_mount_roots(&[]).await.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_mount_point_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let locked = tmp.path().join("locked");
        let open = tmp.path().join("open");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("secret"), "x").unwrap();
        fs::create_dir_all(&open).unwrap();
        fs::write(open.join("file"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // root bypasses permission bits
        let lock_held = fs::read_dir(&locked).is_err();

        let mounts = scan_mount_roots(&[MountRoot::with_kind(tmp.path(), MountKind::Mount)]).await;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let names: Vec<&str> = mounts.iter().map(|m| m.name.as_str()).collect();
        assert!(names.contains(&"open"));
        assert_eq!(names.contains(&"locked"), !lock_held);
    }
}
