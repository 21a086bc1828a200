//! CLI commands

pub mod init;
pub mod list;
pub mod new;
pub mod render;
pub mod theme;
