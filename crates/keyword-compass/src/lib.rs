//! # Keyword Compass
//!
//! The collaborator layer around `keyword-compass-core`: TSV ingestion,
//! TOML configuration, and report rendering. The `kwc` binary wires these
//! together; the engine itself never touches a file.

pub mod config;
pub mod ingest;
pub mod report;
