//! Configuration loading and parsing for cfn-sub.
//!
//! This module handles:
//! - Delimiter configuration types and validation
//! - TOML config file parsing
//! - Directory cascade discovery and merging

pub mod cascade;
pub mod init;
pub mod parser;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, discover_configs, merge_configs, resolve_delimiters, user_config_path,
};
pub use init::generate_init_template;
pub use parser::{parse_config_file, parse_config_str};
pub use types::{
	Config, DelimiterConfig, DelimiterOverrides, LoadedConfig, ResolvedConfig, ValueSource,
};
