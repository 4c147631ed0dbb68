use serde_json::Value;

use super::{format_value, result_of};

/// Print just the key answer.
///
/// Prediction reports print probability and label, ratio reports print the
/// six display values, flag lists print the flagged ratio names. Anything
/// else falls back to the first field.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(result_of(value)));
}

fn minimal_line(result: &Value) -> String {
    let Value::Object(map) = result else {
        return format_value(result);
    };

    if let (Some(Value::String(prob)), Some(label)) = (
        map.get("probability_display"),
        map.get("prediction").and_then(|p| p.get("label")),
    ) {
        return format!("{} {}", prob, format_value(label));
    }

    if let Some(Value::Array(lines)) = map.get("lines") {
        return lines
            .iter()
            .filter_map(|l| {
                let label = l.get("label")?.as_str()?;
                let display = l.get("display")?.as_str()?;
                Some(format!("{}={}", label, display))
            })
            .collect::<Vec<_>>()
            .join(" ");
    }

    if let Some(Value::Array(flags)) = map.get("flags") {
        if flags.is_empty() {
            return "no flags".to_string();
        }
        return flags
            .iter()
            .filter_map(|f| f.get("name")?.as_str())
            .collect::<Vec<_>>()
            .join(", ");
    }

    if let Some(val) = map.get("value").filter(|v| !v.is_null()) {
        return format_value(val);
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, format_value(val)),
        None => String::new(),
    }
}
