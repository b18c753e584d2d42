pub mod classify_service;
pub mod desktop_service;
pub mod file_service;
pub mod launch_service;
pub mod location_service;
pub mod mount_service;
pub mod permission_service;
pub mod thumbnail_service;
