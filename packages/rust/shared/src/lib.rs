//! Shared types, error model, and configuration for the Vanguard site client.
//!
//! Every other Vanguard crate builds on this one.
//! It provides:
//! - [`VanguardError`]: the unified error type
//! - Domain types ([`ContentItem`], [`ContentKind`], [`ContactSubmission`], [`InterestArea`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ContactConfig, ContentConfig, LibraryConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, parse_http_url,
};
pub use error::{Result, VanguardError};
pub use types::{ContactSubmission, ContentItem, ContentKind, InterestArea};
