pub mod describe;
pub mod evaluate;
pub mod fill;
pub mod schema;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::descriptor::ContainerDescriptor;

/// Reads a JSON file that must hold an object, e.g. field values or model attributes.
pub(crate) fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {} as json", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "{} must contain a json object, found {}",
            path.display(),
            json_type(&other)
        ),
    }
}

pub(crate) fn load_descriptor(path: &Path) -> Result<ContainerDescriptor> {
    ContainerDescriptor::load(path)
        .with_context(|| format!("failed to load descriptor {}", path.display()))
}

pub(crate) fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
