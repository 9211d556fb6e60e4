use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::RuleError;

/// Predicate kinds a dependency rule can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Equals,
    NotEquals,
    NotIn,
    NotEmpty,
    Empty,
    NullOrZero,
}

impl RuleKind {
    pub const ALL: [RuleKind; 6] = [
        RuleKind::Equals,
        RuleKind::NotEquals,
        RuleKind::NotIn,
        RuleKind::NotEmpty,
        RuleKind::Empty,
        RuleKind::NullOrZero,
    ];

    /// Key that carries the predicate in the serialized rule object.
    pub fn wire_key(&self) -> &'static str {
        match self {
            RuleKind::Equals => "value",
            RuleKind::NotEquals => "not",
            RuleKind::NotIn => "notIn",
            RuleKind::NotEmpty => "notEmpty",
            RuleKind::Empty => "empty",
            RuleKind::NullOrZero => "nullOrZero",
        }
    }

    /// Whether the predicate key is a bare `true` marker.
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            RuleKind::NotEmpty | RuleKind::Empty | RuleKind::NullOrZero
        )
    }
}

/// A single predicate over the current value of one sibling field.
///
/// Serializes to the object shapes consumed by the client renderer, e.g.
/// `{"field": "status", "value": "active"}` or `{"field": "title", "notEmpty": true}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireRule")]
pub enum DependencyRule {
    Equals { field: String, value: Value },
    NotEquals { field: String, value: Value },
    NotIn { field: String, values: Vec<Value> },
    NotEmpty { field: String },
    Empty { field: String },
    NullOrZero { field: String },
}

impl DependencyRule {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::NotEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::NotIn {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_empty(field: impl Into<String>) -> Self {
        Self::NotEmpty {
            field: field.into(),
        }
    }

    pub fn empty(field: impl Into<String>) -> Self {
        Self::Empty {
            field: field.into(),
        }
    }

    pub fn null_or_zero(field: impl Into<String>) -> Self {
        Self::NullOrZero {
            field: field.into(),
        }
    }

    /// Expands "value in set" into one `Equals` rule per value.
    ///
    /// The expansion keeps the established wire format: every value becomes its
    /// own `{field, value}` object. Rules in a set are ANDed, so registering
    /// more than one distinct value for the same field can never be satisfied.
    pub fn expand_in<I, V>(field: impl Into<String>, values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let field = field.into();
        values
            .into_iter()
            .map(|value| Self::equals(field.clone(), value))
            .collect()
    }

    /// Name of the sibling field this rule reads.
    pub fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. }
            | Self::NotEquals { field, .. }
            | Self::NotIn { field, .. }
            | Self::NotEmpty { field }
            | Self::Empty { field }
            | Self::NullOrZero { field } => field,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Equals { .. } => RuleKind::Equals,
            Self::NotEquals { .. } => RuleKind::NotEquals,
            Self::NotIn { .. } => RuleKind::NotIn,
            Self::NotEmpty { .. } => RuleKind::NotEmpty,
            Self::Empty { .. } => RuleKind::Empty,
            Self::NullOrZero { .. } => RuleKind::NullOrZero,
        }
    }

    /// Decodes a single rule from its JSON wire form.
    pub fn from_value(value: Value) -> Result<Self, RuleError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("field".into(), Value::String(self.field().to_string()));
        let key = self.kind().wire_key().to_string();
        let payload = match self {
            Self::Equals { value, .. } | Self::NotEquals { value, .. } => value.clone(),
            Self::NotIn { values, .. } => Value::Array(values.clone()),
            Self::NotEmpty { .. } | Self::Empty { .. } | Self::NullOrZero { .. } => {
                Value::Bool(true)
            }
        };
        map.insert(key, payload);
        Value::Object(map)
    }
}

impl Serialize for DependencyRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let key = self.kind().wire_key();
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("field", self.field())?;
        match self {
            Self::Equals { value, .. } | Self::NotEquals { value, .. } => {
                map.serialize_entry(key, value)?
            }
            Self::NotIn { values, .. } => map.serialize_entry(key, values)?,
            Self::NotEmpty { .. } | Self::Empty { .. } | Self::NullOrZero { .. } => {
                map.serialize_entry(key, &true)?
            }
        }
        map.end()
    }
}

/// Raw object form; every predicate key is optional so the decoder can report
/// which shape was intended. `null` payloads are kept as `Some(Value::Null)`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct WireRule {
    field: String,
    #[serde(default, deserialize_with = "present")]
    value: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    not: Option<Value>,
    #[serde(default)]
    not_in: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "present")]
    not_empty: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    empty: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    null_or_zero: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TryFrom<WireRule> for DependencyRule {
    type Error = RuleError;

    fn try_from(wire: WireRule) -> Result<Self, Self::Error> {
        let WireRule {
            field,
            value,
            not,
            not_in,
            not_empty,
            empty,
            null_or_zero,
        } = wire;

        let declared = [
            (RuleKind::Equals, value.is_some()),
            (RuleKind::NotEquals, not.is_some()),
            (RuleKind::NotIn, not_in.is_some()),
            (RuleKind::NotEmpty, not_empty.is_some()),
            (RuleKind::Empty, empty.is_some()),
            (RuleKind::NullOrZero, null_or_zero.is_some()),
        ]
        .into_iter()
        .filter(|(_, present)| *present)
        .map(|(kind, _)| kind.wire_key())
        .collect::<Vec<_>>();
        if declared.len() > 1 {
            return Err(RuleError::AmbiguousPredicate {
                field,
                keys: declared,
            });
        }

        if let Some(value) = value {
            return Ok(Self::Equals { field, value });
        }
        if let Some(value) = not {
            return Ok(Self::NotEquals { field, value });
        }
        if let Some(values) = not_in {
            return Ok(Self::NotIn { field, values });
        }
        if let Some(flag) = not_empty {
            expect_flag(&field, &flag, RuleKind::NotEmpty)?;
            return Ok(Self::NotEmpty { field });
        }
        if let Some(flag) = empty {
            expect_flag(&field, &flag, RuleKind::Empty)?;
            return Ok(Self::Empty { field });
        }
        if let Some(flag) = null_or_zero {
            expect_flag(&field, &flag, RuleKind::NullOrZero)?;
            return Ok(Self::NullOrZero { field });
        }

        Err(RuleError::MissingPredicate { field })
    }
}

fn expect_flag(field: &str, flag: &Value, kind: RuleKind) -> Result<(), RuleError> {
    if flag == &Value::Bool(true) {
        Ok(())
    } else {
        Err(RuleError::InvalidFlag {
            field: field.to_string(),
            key: kind.wire_key(),
        })
    }
}
