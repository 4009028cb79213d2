use serde_json::Value;
use std::fmt;

/// One rewritten leaf, recorded in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeLogEntry {
	/// RFC 6901 pointer to the rewritten leaf, usable with `Value::pointer`.
	pub pointer: String,

	/// The leaf string before the rewrite.
	pub original: String,

	/// The new leaf: a plain string or a `{"Fn::Sub": ...}` wrapper object.
	pub replacement: Value,
}

impl ChangeLogEntry {
	/// Whether the rewrite introduced a wrapper object.
	pub fn is_wrapped(&self) -> bool {
		self.replacement.is_object()
	}

	/// The replacement rendered the way it is shown to users.
	pub fn rendered_replacement(&self) -> String {
		match &self.replacement {
			Value::String(s) => s.clone(),
			other => other.to_string(),
		}
	}
}

impl fmt::Display for ChangeLogEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "'{}' => '{}'", self.original, self.rendered_replacement())
	}
}

/// Build a JSON pointer from path segments, escaping `~` and `/`.
pub(crate) fn to_pointer(segments: &[String]) -> String {
	let mut pointer = String::new();
	for segment in segments {
		pointer.push('/');
		pointer.push_str(&segment.replace('~', "~0").replace('/', "~1"));
	}
	pointer
}
