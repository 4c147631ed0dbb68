pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` payload of a computation envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Split an object into scalar fields (nested objects flattened with dotted
/// keys) and arrays of objects, which render as their own sections.
pub(crate) fn split_sections(
    map: &Map<String, Value>,
) -> (Vec<(String, String)>, Vec<(String, &[Value])>) {
    let mut fields = Vec::new();
    let mut sections = Vec::new();
    collect(map, "", &mut fields, &mut sections);
    (fields, sections)
}

fn collect<'a>(
    map: &'a Map<String, Value>,
    prefix: &str,
    fields: &mut Vec<(String, String)>,
    sections: &mut Vec<(String, &'a [Value])>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => collect(inner, &name, fields, sections),
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                sections.push((name, items.as_slice()));
            }
            _ => fields.push((name, format_value(val))),
        }
    }
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join("; "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_sections_flattens_nested_objects() {
        let value = json!({
            "prediction": {"probability": 0.92, "label": "Financial Distress"},
            "flags": [{"name": "ROA"}],
            "most_influential": ["ROA", "ROE"],
        });
        let (fields, sections) = split_sections(value.as_object().unwrap());

        assert!(fields.contains(&("prediction.label".into(), "Financial Distress".into())));
        assert!(fields.contains(&("most_influential".into(), "ROA; ROE".into())));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, "flags");
    }

    #[test]
    fn test_result_of_unwraps_envelope() {
        let value = json!({"result": {"value": "1"}, "warnings": []});
        assert_eq!(result_of(&value), &json!({"value": "1"}));
        let bare = json!({"value": "1"});
        assert_eq!(result_of(&bare), &bare);
    }
}
