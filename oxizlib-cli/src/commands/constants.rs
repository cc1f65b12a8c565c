//! Constants command implementation.

use oxizlib_core::constants;
use serde_json::{Map, Value};

pub fn cmd_constants(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let all = constants::all();

    if json {
        let map: Map<String, Value> = all
            .iter()
            .map(|(name, value)| (name.to_string(), Value::from(*value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let width = all.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in all {
        println!("{:<width$}  {}", name, value);
    }
    Ok(())
}
