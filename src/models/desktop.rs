use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopInfo {
    pub desktop: String,
    pub session: String,
    pub wayland: bool,
    pub compositor: String,
}
