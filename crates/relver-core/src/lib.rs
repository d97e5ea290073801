//! Core library for relver.
//!
//! This crate provides the foundational types and functionality used by the
//! `relver` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`manifest`] - Manifest version synchronization (the verify-release step)
//! - [`release`] - The release decision and verify context
//! - [`steps`] - Extension-point model for the release pipeline
//!
//! # Quick Start
//!
//! ```no_run
//! use relver_core::{Config, ConfigLoader};
//!
//! let config = ConfigLoader::new()
//!     .with_user_config(true)
//!     .load()
//!     .expect("Failed to load configuration");
//!
//! println!("Manifest: {}", config.manifest_path());
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod error;

pub mod manifest;

pub mod release;

pub mod steps;

pub use config::{Config, ConfigLoader, LogLevel};

pub use error::{ConfigError, ConfigResult};

// Re-export semver so downstream crates don't need a direct dependency.
pub use semver;
