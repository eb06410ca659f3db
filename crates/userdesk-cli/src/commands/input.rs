//! Turning command-line arguments into request payloads, and printing replies

use crate::api::Payload;
use crate::error::{CliError, Result};
use crate::PayloadArgs;
use serde::Serialize;
use serde_json::Value;

/// Build a payload from `--data` and `--field` arguments
///
/// `--data` must be a JSON object. Each `--field key=value` then sets a
/// string field, so `--field bio=` sends an empty string.
pub fn payload_from_args(args: &PayloadArgs) -> Result<Payload> {
    let mut payload = match &args.data {
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            _ => return Err(CliError::invalid_input("--data must be a JSON object")),
        },
        None => Payload::new(),
    };

    for (key, value) in parse_pairs(&args.fields)? {
        payload.insert(key, Value::String(value));
    }

    Ok(payload)
}

/// Parse `key=value` arguments; the value may be empty or contain `=`
pub fn parse_pairs(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|item| match item.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(CliError::invalid_input(format!(
                "expected KEY=VALUE, got '{}'",
                item
            ))),
        })
        .collect()
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
