//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Reading the TOML configuration file from the platform-appropriate directory.
//! - Accepting the legacy single-integer format (the whole file is `max_speed`).
//! - Creating the file with defaults on first run.

pub mod config;
