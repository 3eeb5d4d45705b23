//! Output formatting

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Output builder for formatted CLI output
///
/// Text mode prints the message and any extra lines; JSON mode prints the
/// collected fields as one pretty object.
pub struct Output {
    json_mode: bool,
    fields: Map<String, Value>,
    message: Option<String>,
    lines: Vec<String>,
}

impl Output {
    /// Create a new output builder
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            message: None,
            lines: Vec::new(),
        }
    }

    /// Add a string field to the output
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a u64 field to the output
    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(key.to_string(), Value::Number(value.into()));
        self
    }

    /// Add any serializable value as a field
    pub fn field_json<T: Serialize>(mut self, key: &str, value: &T) -> Result<Self, serde_json::Error> {
        self.fields.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Set the human-readable message
    pub fn message(mut self, msg: &str) -> Self {
        self.message = Some(msg.to_string());
        self
    }

    /// Append a line printed after the message in text mode
    pub fn line(mut self, line: String) -> Self {
        self.lines.push(line);
        self
    }

    /// Print the output
    pub fn print(self) {
        if self.json_mode {
            let json = json!(self.fields);
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        } else {
            if let Some(msg) = self.message {
                println!("{}", msg);
            }
            for line in self.lines {
                println!("{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_collected() {
        let out = Output::new(true)
            .field("address", "0xabc")
            .field_u64("count", 2)
            .field_json("items", &vec!["a", "b"])
            .unwrap();
        assert_eq!(out.fields["address"], "0xabc");
        assert_eq!(out.fields["count"], 2);
        assert_eq!(out.fields["items"][1], "b");
    }
}
