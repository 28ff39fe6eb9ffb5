//! Configuration module
//!
//! User-tunable settings loaded from a TOML file in the platform config
//! directory.

pub mod config;
