use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

/// Read-only lookup of the current value of sibling fields, keyed by field name.
///
/// Implemented for JSON objects and the common map types so hosts can pass
/// their form state straight through.
pub trait FieldValueSource {
    fn field_value(&self, field: &str) -> Option<&Value>;
}

impl FieldValueSource for Map<String, Value> {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

/// Non-object values expose no fields.
impl FieldValueSource for Value {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(field))
    }
}

impl FieldValueSource for BTreeMap<String, Value> {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl<S: BuildHasher> FieldValueSource for HashMap<String, Value, S> {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl<T: FieldValueSource + ?Sized> FieldValueSource for &T {
    fn field_value(&self, field: &str) -> Option<&Value> {
        (**self).field_value(field)
    }
}

/// Absent, `null`, `""`, `[]` and `{}` are empty. `false` and `0` are not.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => false,
    }
}

/// Absent, `null`, `""`, numeric zero, or a string whose trimmed content parses
/// as a finite number equal to zero (`"0"`, `"0.0"`, `" -0 "`).
pub fn is_null_or_zero(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(Value::String(text)) => text.is_empty() || parses_as_zero(text),
        Some(Value::Bool(_)) | Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

fn parses_as_zero(text: &str) -> bool {
    text.trim()
        .parse::<f64>()
        .is_ok_and(|number| number.is_finite() && number == 0.0)
}
