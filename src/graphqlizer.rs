//! GraphQL input literals
//!
//! Mutations under test embed their inputs inline so that saved examples are
//! self-contained. `Graphqlizer` renders any serializable input as a GraphQL
//! input value:
//!
//! ```text
//! {"name": "app", "webhooks": [{"type": "CONFIGURATION_CHANGED"}]}
//! => {name: "app", webhooks: [{type: CONFIGURATION_CHANGED}]}
//! ```
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

#[derive(Clone, Debug, Default)]
pub struct Graphqlizer {
    /// Keys whose string values are rendered as enum values
    enum_fields: HashSet<String>,
}

impl Graphqlizer {
    pub fn new<I, S>(enum_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enum_fields: enum_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Render input as GraphQL input value
    pub fn to_graphql<T: Serialize>(&self, input: &T) -> Result<String, serde_json::Error> {
        let value = serde_json::to_value(input)?;
        let mut out = String::new();
        self.write_value(&mut out, &value, false);
        Ok(out)
    }

    fn write_value(&self, out: &mut String, value: &Value, as_enum: bool) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(&b.to_string()),
            Value::Number(n) => out.push_str(&n.to_string()),
            Value::String(s) if as_enum => out.push_str(s),
            // JSON string escaping is valid GraphQL string escaping
            Value::String(s) => out.push_str(&Value::String(s.clone()).to_string()),
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_value(out, item, as_enum);
                }
                out.push(']');
            }
            Value::Object(members) => {
                out.push('{');
                // sorted keys keep saved examples stable
                let mut members: Vec<(&String, &Value)> =
                    members.iter().filter(|(_, v)| !v.is_null()).collect();
                members.sort_by(|a, b| a.0.cmp(b.0));
                let mut first = true;
                for (key, member) in members {
                    if !first {
                        out.push_str(", ");
                    }
                    first = false;
                    out.push_str(key);
                    out.push_str(": ");
                    self.write_value(out, member, self.enum_fields.contains(key));
                }
                out.push('}');
            }
        }
    }
}
