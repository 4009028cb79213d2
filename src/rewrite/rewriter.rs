use crate::config::DelimiterConfig;
use crate::error::{Result, SubError};
use crate::rewrite::changes::{ChangeLogEntry, to_pointer};
use crate::rewrite::pattern::PlaceholderPattern;
use serde_json::{Map, Value};

/// Mapping key of the CloudFormation substitution intrinsic.
pub const SUBSTITUTION_FUNCTION_KEY: &str = "Fn::Sub";

/// Container nesting allowed below the root before the rewrite aborts.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Rewrites placeholders in a template tree into `Fn::Sub` expressions.
#[derive(Debug, Clone)]
pub struct Rewriter {
	pattern: PlaceholderPattern,
	max_depth: usize,
}

impl Rewriter {
	/// Validate the delimiters and compile the placeholder matcher.
	pub fn new(config: &DelimiterConfig) -> Result<Self> {
		Ok(Rewriter {
			pattern: PlaceholderPattern::new(config)?,
			max_depth: DEFAULT_MAX_DEPTH,
		})
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn pattern(&self) -> &PlaceholderPattern {
		&self.pattern
	}

	/// Rewrite every matching leaf string under `root` in place.
	///
	/// A leaf is replaced by the converted string when some ancestor entry is
	/// keyed `Fn::Sub`, and by a `{"Fn::Sub": converted}` wrapper otherwise.
	/// Null entries are skipped. The root value itself is never replaced.
	pub fn rewrite(&self, root: &mut Value) -> Result<Vec<ChangeLogEntry>> {
		tracing::debug!(pattern = self.pattern.as_str(), "rewriting template");

		let mut changes = Vec::new();
		let mut path = Vec::new();
		self.visit(root, false, 0, &mut path, &mut changes)?;

		tracing::debug!(changes = changes.len(), "rewrite finished");
		Ok(changes)
	}

	fn visit(
		&self,
		node: &mut Value,
		inside_sub: bool,
		depth: usize,
		path: &mut Vec<String>,
		changes: &mut Vec<ChangeLogEntry>,
	) -> Result<()> {
		if depth > self.max_depth {
			return Err(SubError::DepthLimitExceeded {
				pointer: to_pointer(path),
				limit: self.max_depth,
			});
		}

		match node {
			Value::Object(map) => {
				for (key, child) in map.iter_mut() {
					// Latch: once inside Fn::Sub, every descendant stays inside.
					let child_inside = inside_sub || key == SUBSTITUTION_FUNCTION_KEY;
					path.push(key.clone());
					self.visit_child(child, child_inside, depth, path, changes)?;
					path.pop();
				}
			}
			Value::Array(items) => {
				for (index, child) in items.iter_mut().enumerate() {
					path.push(index.to_string());
					self.visit_child(child, inside_sub, depth, path, changes)?;
					path.pop();
				}
			}
			_ => {}
		}

		Ok(())
	}

	fn visit_child(
		&self,
		child: &mut Value,
		inside_sub: bool,
		depth: usize,
		path: &mut Vec<String>,
		changes: &mut Vec<ChangeLogEntry>,
	) -> Result<()> {
		match child {
			Value::Null => {}
			Value::Object(_) | Value::Array(_) => {
				self.visit(child, inside_sub, depth + 1, path, changes)?;
			}
			Value::String(original) => {
				if let Some(converted) = self.pattern.convert(original) {
					let original = std::mem::take(original);
					let replacement = if inside_sub {
						Value::String(converted)
					} else {
						wrap_in_sub(converted)
					};

					let entry = ChangeLogEntry {
						pointer: to_pointer(path),
						original,
						replacement: replacement.clone(),
					};
					tracing::debug!(pointer = %entry.pointer, change = %entry, "rewrote placeholder");

					*child = replacement;
					changes.push(entry);
				}
			}
			Value::Bool(_) | Value::Number(_) => {}
		}

		Ok(())
	}
}

fn wrap_in_sub(converted: String) -> Value {
	let mut wrapper = Map::new();
	wrapper.insert(
		SUBSTITUTION_FUNCTION_KEY.to_string(),
		Value::String(converted),
	);
	Value::Object(wrapper)
}

/// Convenience function: build a `Rewriter` for `config` and run it on `root`.
pub fn rewrite(root: &mut Value, config: &DelimiterConfig) -> Result<Vec<ChangeLogEntry>> {
	Rewriter::new(config)?.rewrite(root)
}
