use std::path::PathBuf;

/// Library-level structured errors for cfn-sub-vars.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum SubError {
	#[error("Invalid delimiters (prefix: {prefix:?}, suffix: {suffix:?}): {reason}")]
	InvalidDelimiters {
		prefix: String,
		suffix: String,
		reason: String,
	},

	#[error("Invalid placeholder pattern: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Template nesting exceeds {limit} levels at {pointer}")]
	DepthLimitExceeded { pointer: String, limit: usize },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to read template: {path}")]
	TemplateReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write template: {path}")]
	TemplateWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid JSON template: {origin}")]
	JsonError {
		origin: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("Invalid YAML template: {origin}")]
	YamlError {
		origin: String,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Unsupported YAML value in {origin}: {reason}")]
	YamlValueError { origin: String, reason: String },

	#[error("Cannot determine template format of {path} (use --format json|yaml)")]
	UnknownFormat { path: PathBuf },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using SubError.
pub type Result<T> = std::result::Result<T, SubError>;
