use clap::Args;
use serde_json::{json, Value};

use distress_core::locale;

/// Arguments for number parsing
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ParseArgs {
    /// Number in Indonesian format, e.g. 1.234.567,50
    pub text: String,
}

pub fn run_parse(args: ParseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let value = locale::parse_number(&args.text);
    Ok(json!({
        "input": args.text,
        "value": value,
    }))
}
