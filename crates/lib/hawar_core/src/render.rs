//! Rendering of received message text.
//!
//! Text that parses as a JSON object (or a non-empty array) is shown as a
//! two-column key/value table; everything else is shown verbatim.

use std::fmt;

use serde_json::Value;

/// Caption printed above a rendered table.
pub const TABLE_CAPTION: &str = "✅ تم جلب معلومات الموظف:";

/// Display form of a message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    Table { rows: Vec<(String, String)> },
}

/// Parse `text` as JSON and pick the display form.
pub fn render(text: &str) -> Rendered {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Rendered::Table {
            rows: map.iter().map(|(k, v)| (k.clone(), cell(v))).collect(),
        },
        Ok(Value::Array(items)) if !items.is_empty() => Rendered::Table {
            rows: items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), cell(v)))
                .collect(),
        },
        _ => Rendered::Text(text.to_string()),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Text(text) => f.write_str(text),
            Rendered::Table { rows } => {
                write!(f, "{TABLE_CAPTION}")?;
                let width = rows
                    .iter()
                    .map(|(k, _)| k.chars().count())
                    .max()
                    .unwrap_or(0);
                for (key, value) in rows {
                    let pad = width - key.chars().count();
                    write!(f, "\n{key}{} | {value}", " ".repeat(pad))?;
                }
                Ok(())
            }
        }
    }
}
