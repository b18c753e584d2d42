use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {path}: {message}")]
    Launch { path: String, message: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    General(String),
}

impl AppError {
    pub fn filesystem(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_string_lossy().to_string(),
            source,
        }
    }

    /// The underlying I/O error kind, if this error came from the filesystem.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Filesystem { source, .. } | Self::Io(source) => Some(source.kind()),
            _ => None,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
