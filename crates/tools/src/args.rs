//! Field-by-field extraction of model-issued function arguments.

use serde_json::{Map, Value};

use crate::error::ToolError;

/// Borrow `value` as an argument object, rejecting arrays, scalars and null.
pub fn expect_object<'a>(tool: &str, value: &'a Value) -> Result<&'a Map<String, Value>, ToolError> {
    value.as_object().ok_or_else(|| ToolError::InvalidArguments {
        tool: tool.to_string(),
        found: json_type(value),
    })
}

/// Tracks which keys have been read so leftovers can be reported.
pub struct Arguments<'a> {
    tool: &'a str,
    map: &'a Map<String, Value>,
    consumed: Vec<&'a str>,
}

impl<'a> Arguments<'a> {
    pub fn new(tool: &'a str, map: &'a Map<String, Value>) -> Self {
        Self {
            tool,
            map,
            consumed: Vec::new(),
        }
    }

    pub fn required_str(&mut self, name: &'a str) -> Result<String, ToolError> {
        self.optional_str(name)?
            .ok_or_else(|| ToolError::MissingArgument {
                tool: self.tool.to_string(),
                argument: name.to_string(),
            })
    }

    /// An explicit `null` counts as absent.
    pub fn optional_str(&mut self, name: &'a str) -> Result<Option<String>, ToolError> {
        self.consumed.push(name);
        match self.map.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => Err(ToolError::InvalidArgumentType {
                tool: self.tool.to_string(),
                argument: name.to_string(),
                expected: "string",
            }),
        }
    }

    /// Fail on the first key that no extractor asked for.
    pub fn finish(self) -> Result<(), ToolError> {
        match self
            .map
            .keys()
            .find(|key| !self.consumed.contains(&key.as_str()))
        {
            Some(extra) => Err(ToolError::UnexpectedArgument {
                tool: self.tool.to_string(),
                argument: extra.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
