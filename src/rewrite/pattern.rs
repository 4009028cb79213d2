use crate::config::DelimiterConfig;
use crate::error::{Result, SubError};
use regex::{Captures, Regex};

/// Compiled matcher for `prefix + name + suffix` placeholders.
///
/// The captured name is one or more characters, none of which is the first
/// character of the suffix. Prefix and suffix are matched literally.
#[derive(Debug, Clone)]
pub struct PlaceholderPattern {
	regex: Regex,
}

impl PlaceholderPattern {
	/// Compile the matcher for the given delimiters.
	pub fn new(config: &DelimiterConfig) -> Result<Self> {
		config.validate()?;

		let stop = config
			.suffix
			.chars()
			.next()
			.map(|c| regex::escape(&c.to_string()))
			.unwrap_or_default();

		let pattern = format!(
			"{}([^{}]+){}",
			regex::escape(&config.prefix),
			stop,
			regex::escape(&config.suffix)
		);

		let regex = Regex::new(&pattern).map_err(|source| SubError::InvalidPattern {
			pattern: pattern.clone(),
			source,
		})?;

		Ok(PlaceholderPattern { regex })
	}

	/// The compiled regex source, for diagnostics.
	pub fn as_str(&self) -> &str {
		self.regex.as_str()
	}

	/// Whether the string contains at least one placeholder.
	pub fn is_match(&self, input: &str) -> bool {
		self.regex.is_match(input)
	}

	/// Replace every placeholder with `${name}`.
	///
	/// Returns `None` when the input holds no placeholder.
	pub fn convert(&self, input: &str) -> Option<String> {
		if !self.is_match(input) {
			return None;
		}

		let converted = self
			.regex
			.replace_all(input, |caps: &Captures| format!("${{{}}}", &caps[1]));

		Some(converted.into_owned())
	}
}
