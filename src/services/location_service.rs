use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;
use crate::models::location::Location;

/// Resolves sidebar locations against a fixed home directory.
///
/// Profile directories use the conventional `$HOME/<Name>` layout. The XDG
/// `user-dirs.dirs` override is not read.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    home: PathBuf,
}

impl LocationResolver {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn from_env() -> Result<Self, AppError> {
        let home = directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| AppError::General("could not resolve home directory".to_string()))?;
        Ok(Self::new(home))
    }

    pub fn home_dir(&self) -> &Path {
        &self.home
    }

    /// The path a location maps to, without checking that it exists.
    pub fn path_for(&self, location: Location) -> PathBuf {
        if let Some(name) = location.profile_dir_name() {
            return self.home.join(name);
        }
        match location.system_path() {
            Some(path) => PathBuf::from(path),
            None => self.home.clone(),
        }
    }

    /// Resolves a location key. Profile directories must exist; system
    /// paths are returned as-is since many are virtual or not yet mounted.
    pub async fn resolve(&self, key: &str) -> Option<PathBuf> {
        let location = match key.parse::<Location>() {
            Ok(location) => location,
            Err(e) => {
                debug!(error = %e, "unrecognized location key");
                return None;
            }
        };

        let path = self.path_for(location);
        if !location.is_user_profile() {
            return Some(path);
        }

        match tokio::fs::try_exists(&path).await {
            Ok(true) => Some(path),
            _ => {
                debug!(location = %location, path = %path.display(), "profile directory missing");
                None
            }
        }
    }

    /// Every location with its unchecked path, in sidebar order.
    pub fn well_known_locations(&self) -> Vec<(Location, PathBuf)> {
        Location::ALL
            .into_iter()
            .map(|location| (location, self.path_for(location)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn tmp_is_returned_unconditionally() {
        let resolver = LocationResolver::new("/nonexistent-home");
        assert_eq!(resolver.resolve("tmp").await, Some(PathBuf::from("/tmp")));
        assert_eq!(resolver.resolve("root").await, Some(PathBuf::from("/")));
        assert_eq!(resolver.resolve("run").await, Some(PathBuf::from("/run")));
    }

    #[tokio::test]
    async fn home_is_returned_without_existence_check() {
        let resolver = LocationResolver::new("/nonexistent-home");
        assert_eq!(
            resolver.resolve("home").await,
            Some(PathBuf::from("/nonexistent-home"))
        );
    }

    #[tokio::test]
    async fn missing_profile_directory_resolves_to_none() {
        let home = tempfile::tempdir().unwrap();
        let resolver = LocationResolver::new(home.path());
        assert_eq!(resolver.resolve("downloads").await, None);
    }

    #[tokio::test]
    async fn existing_profile_directory_resolves() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir(home.path().join("Downloads")).unwrap();
        let resolver = LocationResolver::new(home.path());

        assert_eq!(
            resolver.resolve("downloads").await,
            Some(home.path().join("Downloads"))
        );
    }

    #[tokio::test]
    async fn unknown_key_resolves_to_none() {
        let resolver = LocationResolver::new("/home/test");
        assert_eq!(resolver.resolve("trash").await, None);
        assert_eq!(resolver.resolve("").await, None);
    }

    #[test]
    fn well_known_table_covers_every_location() {
        let resolver = LocationResolver::new("/home/test");
        let table = resolver.well_known_locations();

        assert_eq!(table.len(), 18);
        assert_eq!(table[0], (Location::Home, PathBuf::from("/home/test")));
        assert!(table.contains(&(Location::Pictures, PathBuf::from("/home/test/Pictures"))));
        assert!(table.contains(&(Location::Etc, PathBuf::from("/etc"))));
    }
}
