//! # Agency Dashboard
//!
//! Wires the entity stores and Kanban boards of the agency dashboard to a
//! backend chosen from the environment, and exposes them through a small CLI.
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency initialization
//! - [`cli`]: Command-line definition
//! - [`commands`]: Command execution
//! - [`errors`]: Error types for the dashboard

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;

pub use cli::{BoardKind, Cli, Command};
pub use commands::execute;
pub use config::{BackendKind, ConnectionMode, DashboardConfig, Dependencies};
pub use errors::DashboardError;
