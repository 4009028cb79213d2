use crate::error::SubError;
use serde::Deserialize;
use std::path::PathBuf;

/// Default placeholder prefix.
pub const DEFAULT_PREFIX: &str = "#{";

/// Default placeholder suffix.
pub const DEFAULT_SUFFIX: &str = "}";

/// Top-level configuration from a `.cfnsub.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// If true, stop the directory cascade here and only consult ~/.cfnsub.toml next.
	#[serde(default)]
	pub root: bool,

	/// Placeholder prefix, e.g. `#{`.
	#[serde(default)]
	pub prefix: Option<String>,

	/// Placeholder suffix, e.g. `}`.
	#[serde(default)]
	pub suffix: Option<String>,
}

impl Config {
	/// Reject delimiters that are present but empty.
	pub fn validate(&self) -> Result<(), SubError> {
		for (name, value) in [("prefix", &self.prefix), ("suffix", &self.suffix)] {
			if value.as_deref() == Some("") {
				return Err(SubError::InvalidDelimiters {
					prefix: self.prefix.clone().unwrap_or_default(),
					suffix: self.suffix.clone().unwrap_or_default(),
					reason: format!("{} must not be empty", name),
				});
			}
		}
		Ok(())
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// The placeholder syntax: `prefix + name + suffix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterConfig {
	pub prefix: String,
	pub suffix: String,
}

impl Default for DelimiterConfig {
	fn default() -> Self {
		DelimiterConfig {
			prefix: DEFAULT_PREFIX.to_string(),
			suffix: DEFAULT_SUFFIX.to_string(),
		}
	}
}

impl DelimiterConfig {
	pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
		DelimiterConfig {
			prefix: prefix.into(),
			suffix: suffix.into(),
		}
	}

	/// Both delimiters must be non-empty, otherwise the pattern could match
	/// zero-width or unbounded text.
	pub fn validate(&self) -> Result<(), SubError> {
		let reason = if self.prefix.is_empty() {
			"prefix must not be empty"
		} else if self.suffix.is_empty() {
			"suffix must not be empty"
		} else {
			return Ok(());
		};

		Err(SubError::InvalidDelimiters {
			prefix: self.prefix.clone(),
			suffix: self.suffix.clone(),
			reason: reason.to_string(),
		})
	}
}

/// Delimiter values supplied on the command line. They beat every config file.
#[derive(Debug, Clone, Default)]
pub struct DelimiterOverrides {
	pub prefix: Option<String>,
	pub suffix: Option<String>,
}

/// Where a resolved delimiter value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
	Default,
	CommandLine,
	File(PathBuf),
}

impl std::fmt::Display for ValueSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ValueSource::Default => write!(f, "default"),
			ValueSource::CommandLine => write!(f, "command line"),
			ValueSource::File(path) => write!(f, "{}", path.display()),
		}
	}
}

/// Effective delimiters after merging the cascade, with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub delimiters: DelimiterConfig,
	pub prefix_source: ValueSource,
	pub suffix_source: ValueSource,
}

impl Default for ResolvedConfig {
	fn default() -> Self {
		ResolvedConfig {
			delimiters: DelimiterConfig::default(),
			prefix_source: ValueSource::Default,
			suffix_source: ValueSource::Default,
		}
	}
}

impl ResolvedConfig {
	/// Apply command-line overrides on top of the merged file values.
	pub fn with_overrides(mut self, overrides: &DelimiterOverrides) -> Self {
		if let Some(ref prefix) = overrides.prefix {
			self.delimiters.prefix = prefix.clone();
			self.prefix_source = ValueSource::CommandLine;
		}
		if let Some(ref suffix) = overrides.suffix {
			self.delimiters.suffix = suffix.clone();
			self.suffix_source = ValueSource::CommandLine;
		}
		self
	}
}
