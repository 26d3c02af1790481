//! CLI subcommands.

pub mod common;
pub mod config;
pub mod fly;
pub mod procedures;
pub mod show;
