//! CLI commands.

pub mod check;
pub mod demo;
pub mod info;
pub mod optimize;
