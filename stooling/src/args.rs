//! Argument parsing and type-checking against a tool descriptor.
//!
//! ```rust
//! use stooling::{ParamType, ToolArguments, ToolDescriptor, parse_json_object};
//!
//! let descriptor = ToolDescriptor::new("Add", "Adds two numbers")
//!     .param("a", ParamType::Number, "First")
//!     .param("b", ParamType::Number, "Second");
//!
//! let raw = parse_json_object(r#"{"a":15,"b":"25"}"#).expect("object should parse");
//! let args = ToolArguments::validate(&descriptor, &raw).expect("arguments should type-check");
//! assert_eq!(args.number("b").expect("b is a number"), 25.0);
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{ParamType, ToolDescriptor, ToolError, ToolValue};

pub fn parse_json_object(args_json: &str) -> Result<Map<String, Value>, ToolError> {
    if args_json.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_str(args_json)
        .map_err(|err| ToolError::argument_mismatch(format!("invalid JSON arguments: {err}")))?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(ToolError::argument_mismatch("expected JSON object arguments")),
    }
}

/// Arguments that have been checked against a descriptor's parameter list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolArguments {
    values: BTreeMap<String, ToolValue>,
}

impl ToolArguments {
    pub fn validate(
        descriptor: &ToolDescriptor,
        raw: &Map<String, Value>,
    ) -> Result<Self, ToolError> {
        if let Some(unexpected) = raw.keys().find(|key| descriptor.parameter(key).is_none()) {
            return Err(ToolError::argument_mismatch(format!(
                "unexpected argument '{unexpected}'"
            )));
        }

        let mut values = BTreeMap::new();
        for param in &descriptor.parameters {
            let value = match raw.get(&param.name) {
                None | Some(Value::Null) => {
                    return Err(ToolError::argument_mismatch(format!(
                        "missing argument '{}'",
                        param.name
                    )));
                }
                Some(value) => value,
            };

            let checked = coerce(param.param_type, value).ok_or_else(|| {
                ToolError::argument_mismatch(format!(
                    "argument '{}' must be a {}, got {value}",
                    param.name,
                    param.param_type.json_type()
                ))
            })?;
            values.insert(param.name.clone(), checked);
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&ToolValue> {
        self.values.get(name)
    }

    pub fn number(&self, name: &str) -> Result<f64, ToolError> {
        self.get(name)
            .and_then(ToolValue::as_number)
            .ok_or_else(|| ToolError::argument_mismatch(format!("missing number: '{name}'")))
    }

    pub fn text(&self, name: &str) -> Result<&str, ToolError> {
        self.get(name)
            .and_then(ToolValue::as_text)
            .ok_or_else(|| ToolError::argument_mismatch(format!("missing string: '{name}'")))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// Numeric strings are accepted for number parameters; local models often quote numbers.
fn coerce(param_type: ParamType, value: &Value) -> Option<ToolValue> {
    match (param_type, value) {
        (ParamType::Number, Value::Number(number)) => number.as_f64().map(ToolValue::Number),
        (ParamType::Number, Value::String(raw)) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(ToolValue::Number),
        (ParamType::String, Value::String(raw)) => Some(ToolValue::Text(raw.clone())),
        _ => None,
    }
}
