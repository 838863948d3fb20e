//! Tool descriptors, typed parameters, and primitive tool values.
//!
//! ```rust
//! use stooling::{ParamType, ToolDescriptor};
//!
//! let add = ToolDescriptor::new("Add", "Adds two numbers together")
//!     .param("a", ParamType::Number, "The first number")
//!     .param("b", ParamType::Number, "The second number")
//!     .returns(ParamType::Number);
//!
//! let definition = add.to_definition();
//! assert_eq!(definition.name, "Add");
//! assert!(definition.input_schema.contains("\"required\":[\"a\",\"b\"]"));
//! ```

use std::fmt::{Display, Formatter};

use serde_json::{Map, Value, json};
use sprovider::ToolDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Number,
    String,
}

impl ParamType {
    pub fn json_type(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParameter {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
    pub return_type: ParamType,
}

impl ToolDescriptor {
    /// Starts a descriptor with no parameters and a string return type.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            return_type: ParamType::String,
        }
    }

    pub fn param(
        mut self,
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        self.parameters.push(ToolParameter {
            name: name.into(),
            param_type,
            description: description.into(),
        });
        self
    }

    pub fn returns(mut self, return_type: ParamType) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|param| param.name == name)
    }

    /// JSON Schema object for the parameter list. Every parameter is required.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": param.param_type.json_type(),
                    "description": param.description,
                }),
            );
        }

        let required = self
            .parameters
            .iter()
            .map(|param| Value::String(param.name.clone()))
            .collect::<Vec<_>>();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema().to_string(),
        }
    }
}

/// Primitive value produced by a tool or accepted as an argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolValue {
    Number(f64),
    Text(String),
}

impl ToolValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Number(_) => None,
        }
    }
}

impl Display for ToolValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            // f64's Display drops a zero fraction, so 40.0 renders as "40".
            Self::Number(value) if *value == 0.0 => f.write_str("0"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<f64> for ToolValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for ToolValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ToolValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_schema_lists_typed_required_parameters() {
        let descriptor = ToolDescriptor::new("Percentage", "Calculates a percentage")
            .param("number", ParamType::Number, "The base number")
            .param("percent", ParamType::Number, "The percentage to take")
            .returns(ParamType::Number);

        let schema = descriptor.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["number"]["type"], "number");
        assert_eq!(schema["required"], json!(["number", "percent"]));
        assert_eq!(descriptor.return_type, ParamType::Number);
    }

    #[test]
    fn parameterless_descriptor_has_empty_schema() {
        let descriptor = ToolDescriptor::new("GetCurrentTime", "Returns the local time");

        let schema = descriptor.input_schema();
        assert_eq!(schema["properties"], json!({}));
        assert_eq!(schema["required"], json!([]));
        assert_eq!(descriptor.return_type, ParamType::String);
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(ToolValue::Number(40.0).to_string(), "40");
        assert_eq!(ToolValue::Number(-0.0).to_string(), "0");
        assert_eq!(ToolValue::Number(2.5).to_string(), "2.5");
        assert_eq!(ToolValue::text("12:30").to_string(), "12:30");
    }
}
