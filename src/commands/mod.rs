pub mod file_commands;
pub mod system_commands;
