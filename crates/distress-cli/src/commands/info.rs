use serde_json::Value;

use distress_core::dashboard::{model_card, usage_guide};

pub fn run_about() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(model_card())?)
}

pub fn run_guide() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(usage_guide())?)
}
