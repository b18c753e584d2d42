use serde::{Deserialize, Serialize};

/// Symbolic names for the places shown in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Home,
    Desktop,
    Documents,
    Downloads,
    Pictures,
    Videos,
    Music,
    Templates,
    Public,
    Root,
    Usr,
    Opt,
    Tmp,
    Var,
    Etc,
    Mnt,
    Media,
    Run,
}

impl Location {
    pub const ALL: [Location; 18] = [
        Self::Home,
        Self::Desktop,
        Self::Documents,
        Self::Downloads,
        Self::Pictures,
        Self::Videos,
        Self::Music,
        Self::Templates,
        Self::Public,
        Self::Root,
        Self::Usr,
        Self::Opt,
        Self::Tmp,
        Self::Var,
        Self::Etc,
        Self::Mnt,
        Self::Media,
        Self::Run,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Desktop => "desktop",
            Self::Documents => "documents",
            Self::Downloads => "downloads",
            Self::Pictures => "pictures",
            Self::Videos => "videos",
            Self::Music => "music",
            Self::Templates => "templates",
            Self::Public => "public",
            Self::Root => "root",
            Self::Usr => "usr",
            Self::Opt => "opt",
            Self::Tmp => "tmp",
            Self::Var => "var",
            Self::Etc => "etc",
            Self::Mnt => "mnt",
            Self::Media => "media",
            Self::Run => "run",
        }
    }

    /// Directory name under `$HOME` for user-profile locations.
    pub fn profile_dir_name(self) -> Option<&'static str> {
        match self {
            Self::Desktop => Some("Desktop"),
            Self::Documents => Some("Documents"),
            Self::Downloads => Some("Downloads"),
            Self::Pictures => Some("Pictures"),
            Self::Videos => Some("Videos"),
            Self::Music => Some("Music"),
            Self::Templates => Some("Templates"),
            Self::Public => Some("Public"),
            _ => None,
        }
    }

    /// Fixed absolute path for system locations. `Home` is neither fixed nor
    /// a profile directory and returns `None` here.
    pub fn system_path(self) -> Option<&'static str> {
        match self {
            Self::Root => Some("/"),
            Self::Usr => Some("/usr"),
            Self::Opt => Some("/opt"),
            Self::Tmp => Some("/tmp"),
            Self::Var => Some("/var"),
            Self::Etc => Some("/etc"),
            Self::Mnt => Some("/mnt"),
            Self::Media => Some("/media"),
            Self::Run => Some("/run"),
            _ => None,
        }
    }

    pub fn is_user_profile(self) -> bool {
        self.profile_dir_name().is_some()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|location| location.as_str() == s)
            .ok_or_else(|| format!("unknown location: {s}"))
    }
}
