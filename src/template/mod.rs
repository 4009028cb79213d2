//! Template document I/O for cfn-sub.
//!
//! Templates are held as `serde_json::Value` with key order preserved, so a
//! rewritten template serializes with its keys where the author put them.

pub mod yaml;

use crate::error::{Result, SubError};
use serde_json::Value;
use std::path::Path;

/// Serialization format of a template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
	Json,
	Yaml,
}

impl TemplateFormat {
	/// Guess the format from a file extension.
	pub fn from_path(path: &Path) -> Option<Self> {
		let ext = path.extension()?.to_str()?.to_ascii_lowercase();
		match ext.as_str() {
			"json" | "template" => Some(TemplateFormat::Json),
			"yaml" | "yml" => Some(TemplateFormat::Yaml),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			TemplateFormat::Json => "json",
			TemplateFormat::Yaml => "yaml",
		}
	}
}

impl std::str::FromStr for TemplateFormat {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"json" => Ok(TemplateFormat::Json),
			"yaml" | "yml" => Ok(TemplateFormat::Yaml),
			other => Err(format!("unknown template format '{}'", other)),
		}
	}
}

/// Resolve the format for `path`, preferring an explicit choice.
pub fn detect_format(path: &Path, explicit: Option<TemplateFormat>) -> Result<TemplateFormat> {
	explicit
		.or_else(|| TemplateFormat::from_path(path))
		.ok_or_else(|| SubError::UnknownFormat {
			path: path.to_path_buf(),
		})
}

/// Parse a template from a string. `origin` names the source in errors.
pub fn parse_template_str(content: &str, format: TemplateFormat, origin: &str) -> Result<Value> {
	match format {
		TemplateFormat::Json => {
			serde_json::from_str(content).map_err(|source| SubError::JsonError {
				origin: origin.to_string(),
				source,
			})
		}
		TemplateFormat::Yaml => {
			let raw: serde_yaml::Value =
				serde_yaml::from_str(content).map_err(|source| SubError::YamlError {
					origin: origin.to_string(),
					source,
				})?;
			yaml::yaml_to_json(raw, origin)
		}
	}
}

/// Read and parse a template file.
pub fn load_template(path: &Path, format: TemplateFormat) -> Result<Value> {
	let content = std::fs::read_to_string(path).map_err(|source| SubError::TemplateReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_template_str(&content, format, &path.display().to_string())
}

/// Serialize a template. `pretty` only affects JSON.
pub fn render_template(template: &Value, format: TemplateFormat, pretty: bool) -> Result<String> {
	let origin = "<output>".to_string();
	match format {
		TemplateFormat::Json => {
			let rendered = if pretty {
				serde_json::to_string_pretty(template)
			} else {
				serde_json::to_string(template)
			};
			rendered
				.map(|mut s| {
					s.push('\n');
					s
				})
				.map_err(|source| SubError::JsonError { origin, source })
		}
		TemplateFormat::Yaml => serde_yaml::to_string(template)
			.map_err(|source| SubError::YamlError { origin, source }),
	}
}

/// Serialize a template and write it to `path`.
pub fn write_template(
	path: &Path,
	template: &Value,
	format: TemplateFormat,
	pretty: bool,
) -> Result<()> {
	let rendered = render_template(template, format, pretty)?;
	std::fs::write(path, rendered).map_err(|source| SubError::TemplateWriteError {
		path: path.to_path_buf(),
		source,
	})
}
