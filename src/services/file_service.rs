use std::fs::Metadata;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::fs::DirEntry;
use tokio::task::JoinSet;
use tracing::debug;

use crate::error::AppError;
use crate::models::file_entry::DirectoryEntry;
use crate::services::classify_service::is_image_file;

/// The `stat` fields surfaced to the UI.
#[derive(Debug, Clone)]
pub struct StatFields {
    pub size: u64,
    pub mtime: DateTime<Utc>,
    pub atime: DateTime<Utc>,
    pub ctime: DateTime<Utc>,
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
}

impl StatFields {
    #[cfg(unix)]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            size: metadata.size(),
            mtime: timestamp(metadata.mtime(), metadata.mtime_nsec()),
            atime: timestamp(metadata.atime(), metadata.atime_nsec()),
            ctime: timestamp(metadata.ctime(), metadata.ctime_nsec()),
            mode: metadata.mode(),
            uid: metadata.uid(),
            gid: metadata.gid(),
        }
    }

    #[cfg(not(unix))]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let system_time = |t: std::io::Result<std::time::SystemTime>| {
            t.ok().map(DateTime::<Utc>::from).unwrap_or_default()
        };
        Self {
            size: metadata.len(),
            mtime: system_time(metadata.modified()),
            atime: system_time(metadata.accessed()),
            ctime: system_time(metadata.created()),
            mode: if metadata.permissions().readonly() {
                0o444
            } else {
                0o644
            },
            uid: 0,
            gid: 0,
        }
    }
}

#[cfg(unix)]
fn timestamp(secs: i64, nsecs: i64) -> DateTime<Utc> {
    let nsecs = u32::try_from(nsecs).unwrap_or(0);
    DateTime::<Utc>::from_timestamp(secs, nsecs).unwrap_or_default()
}

/// Lists the immediate children of `path`.
///
/// Failing to open the directory fails the whole listing. Children are
/// stat'ed concurrently. Symlinks whose target cannot be stat'ed are
/// described by `lstat`; a child that disappears between enumeration and
/// `stat` is skipped, and any other per-entry failure aborts the listing.
pub async fn list_directory(path: &Path) -> Result<Vec<DirectoryEntry>, AppError> {
    let mut read_dir = tokio::fs::read_dir(path)
        .await
        .map_err(|e| AppError::filesystem(path, e))?;

    let mut join_set: JoinSet<Result<Option<DirectoryEntry>, AppError>> = JoinSet::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| AppError::filesystem(path, e))?
    {
        join_set.spawn(describe_entry(entry));
    }

    let mut entries = Vec::with_capacity(join_set.len());
    while let Some(joined) = join_set.join_next().await {
        let described = joined
            .map_err(|e| AppError::General(format!("directory listing task failed: {e}")))?;
        if let Some(entry) = described? {
            entries.push(entry);
        }
    }

    entries.sort_by(|a, b| {
        b.is_directory
            .cmp(&a.is_directory)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    debug!(path = %path.display(), count = entries.len(), "listed directory");
    Ok(entries)
}

async fn describe_entry(entry: DirEntry) -> Result<Option<DirectoryEntry>, AppError> {
    let entry_path = entry.path();

    let file_type = match entry.file_type().await {
        Ok(file_type) => file_type,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %entry_path.display(), "entry vanished before stat, skipping");
            return Ok(None);
        }
        Err(e) => return Err(AppError::filesystem(&entry_path, e)),
    };

    // stat follows symlinks; a link whose target cannot be resolved
    // (dangling, looping, through a non-directory) is described by lstat.
    let metadata = match tokio::fs::metadata(&entry_path).await {
        Ok(metadata) => metadata,
        Err(e) if file_type.is_symlink() || e.kind() == ErrorKind::NotFound => {
            debug!(path = %entry_path.display(), error = %e, "stat failed, falling back to lstat");
            match tokio::fs::symlink_metadata(&entry_path).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(path = %entry_path.display(), "entry vanished before stat, skipping");
                    return Ok(None);
                }
                Err(e) => return Err(AppError::filesystem(&entry_path, e)),
            }
        }
        Err(e) => return Err(AppError::filesystem(&entry_path, e)),
    };

    let name = entry.file_name().to_string_lossy().to_string();
    let stat = StatFields::from_metadata(&metadata);

    Ok(Some(DirectoryEntry {
        is_image: is_image_file(&name),
        name,
        is_directory: file_type.is_dir(),
        is_file: file_type.is_file(),
        is_symlink: file_type.is_symlink(),
        size: stat.size,
        mtime: stat.mtime,
        atime: stat.atime,
        ctime: stat.ctime,
        path: entry_path.to_string_lossy().to_string(),
        mode: stat.mode,
        uid: stat.uid,
        gid: stat.gid,
    }))
}
