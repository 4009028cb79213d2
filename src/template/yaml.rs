use crate::error::{Result, SubError};
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

/// Short-form tags whose long form is not spelled `Fn::<Tag>`.
const BARE_INTRINSICS: [&str; 2] = ["Ref", "Condition"];

/// Convert a parsed YAML document into the JSON value model.
///
/// CloudFormation short-form intrinsics become their long form:
/// `!Sub x` is `{"Fn::Sub": x}`, `!Ref x` is `{"Ref": x}`.
pub fn yaml_to_json(value: YamlValue, origin: &str) -> Result<Value> {
	match value {
		YamlValue::Null => Ok(Value::Null),
		YamlValue::Bool(b) => Ok(Value::Bool(b)),
		YamlValue::Number(n) => convert_number(&n, origin),
		YamlValue::String(s) => Ok(Value::String(s)),
		YamlValue::Sequence(items) => items
			.into_iter()
			.map(|item| yaml_to_json(item, origin))
			.collect::<Result<Vec<_>>>()
			.map(Value::Array),
		YamlValue::Mapping(mapping) => {
			let mut map = Map::new();
			for (key, value) in mapping {
				map.insert(convert_key(key, origin)?, yaml_to_json(value, origin)?);
			}
			Ok(Value::Object(map))
		}
		YamlValue::Tagged(tagged) => {
			let serde_yaml::value::TaggedValue { tag, value } = *tagged;
			let tag = tag.to_string();
			let name = tag.trim_start_matches('!');
			let key = if BARE_INTRINSICS.contains(&name) {
				name.to_string()
			} else {
				format!("Fn::{}", name)
			};

			let mut map = Map::new();
			map.insert(key, yaml_to_json(value, origin)?);
			Ok(Value::Object(map))
		}
	}
}

fn convert_number(n: &serde_yaml::Number, origin: &str) -> Result<Value> {
	if let Some(i) = n.as_i64() {
		return Ok(Value::Number(i.into()));
	}
	if let Some(u) = n.as_u64() {
		return Ok(Value::Number(u.into()));
	}
	n.as_f64()
		.and_then(Number::from_f64)
		.map(Value::Number)
		.ok_or_else(|| SubError::YamlValueError {
			origin: origin.to_string(),
			reason: format!("number {} has no JSON representation", n),
		})
}

fn convert_key(key: YamlValue, origin: &str) -> Result<String> {
	match key {
		YamlValue::String(s) => Ok(s),
		YamlValue::Number(n) => Ok(n.to_string()),
		YamlValue::Bool(b) => Ok(b.to_string()),
		YamlValue::Null => Ok("null".to_string()),
		other => Err(SubError::YamlValueError {
			origin: origin.to_string(),
			reason: format!("unsupported mapping key {:?}", other),
		}),
	}
}
