pub mod desktop;
pub mod file_entry;
pub mod location;
pub mod mount;
pub mod permissions;
