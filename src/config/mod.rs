//! Configuration module for SiteSage
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All sections are optional, so an empty file yields the default configuration.
//!
//! # Example
//!
//! ```no_run
//! use sitesage::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitesage.toml")).unwrap();
//! println!("Checking up to {} links", config.crawler.max_links_checked);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, ReportFormat, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
