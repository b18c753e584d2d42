use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MountKind {
    Mount,
    Media,
    UserMedia,
}

impl MountKind {
    /// Tag for candidates found under `root`.
    pub fn for_root(root: &str) -> Self {
        if root.contains("run") {
            Self::UserMedia
        } else if root.contains("media") {
            Self::Media
        } else {
            Self::Mount
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Media => "media",
            Self::UserMedia => "user-media",
        }
    }
}

impl std::fmt::Display for MountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountCandidate {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: MountKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_root_path() {
        assert_eq!(MountKind::for_root("/mnt"), MountKind::Mount);
        assert_eq!(MountKind::for_root("/media"), MountKind::Media);
        assert_eq!(MountKind::for_root("/run/media"), MountKind::UserMedia);
    }

    #[test]
    fn candidate_serializes_type_tag() {
        let candidate = MountCandidate {
            name: "usb1".to_string(),
            path: "/run/media/usb1".to_string(),
            kind: MountKind::UserMedia,
        };
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["type"], "user-media");
        assert_eq!(json["name"], "usb1");
    }
}
