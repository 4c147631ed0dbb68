use serde_json::Value;
use std::io;

use super::{format_value, result_of, split_sections};

/// Write output as CSV to stdout: `field,value` rows for scalar fields, then
/// each list of records as a headed block after a blank row.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    let outcome = write_csv(&mut wtr, result_of(value))
        .and_then(|()| wtr.flush().map_err(csv::Error::from));
    if let Err(e) = outcome {
        tracing::error!(error = %e, "could not write CSV output");
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) => {
            let (fields, sections) = split_sections(map);
            if !fields.is_empty() {
                wtr.write_record(["field", "value"])?;
                for (key, val) in &fields {
                    wtr.write_record([key, val])?;
                }
            }
            for (title, records) in sections {
                wtr.write_record([""])?;
                wtr.write_record([title])?;
                write_records(wtr, records)?;
            }
        }
        Value::Array(arr) => write_records(wtr, arr)?,
        other => wtr.write_record([format_value(other)])?,
    }
    Ok(())
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([format_value(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}
