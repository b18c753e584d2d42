use crate::models::desktop::DesktopInfo;

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub fn is_wayland() -> bool {
    is_wayland_with(env_lookup)
}

pub fn desktop_info() -> DesktopInfo {
    desktop_info_with(env_lookup)
}

pub fn is_wayland_with(lookup: impl Fn(&str) -> Option<String>) -> bool {
    lookup("WAYLAND_DISPLAY").is_some()
}

pub fn desktop_info_with(lookup: impl Fn(&str) -> Option<String>) -> DesktopInfo {
    let compositor = if lookup("HYPRLAND_INSTANCE_SIGNATURE").is_some() {
        "hyprland"
    } else {
        "unknown"
    };

    DesktopInfo {
        desktop: lookup("XDG_CURRENT_DESKTOP").unwrap_or_else(|| "unknown".to_string()),
        session: lookup("XDG_SESSION_TYPE").unwrap_or_else(|| "unknown".to_string()),
        wayland: is_wayland_with(&lookup),
        compositor: compositor.to_string(),
    }
}
