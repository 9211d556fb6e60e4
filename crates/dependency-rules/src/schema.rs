use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema, schema_for};

use crate::rule::{DependencyRule, RuleKind};
use crate::rule_set::DependencyRuleSet;

impl JsonSchema for DependencyRule {
    fn schema_name() -> Cow<'static, str> {
        "DependencyRule".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        let variants = RuleKind::ALL
            .iter()
            .map(|kind| {
                let payload = match kind {
                    RuleKind::Equals | RuleKind::NotEquals => serde_json::json!({}),
                    RuleKind::NotIn => serde_json::json!({ "type": "array" }),
                    RuleKind::NotEmpty | RuleKind::Empty | RuleKind::NullOrZero => {
                        serde_json::json!({ "const": true })
                    }
                };
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "field": { "type": "string" },
                        (kind.wire_key()): payload,
                    },
                    "required": ["field", kind.wire_key()],
                    "additionalProperties": false,
                })
            })
            .collect::<Vec<_>>();

        json_schema!({
            "description": "A single predicate over the current value of one sibling field.",
            "oneOf": variants,
        })
    }
}

/// JSON Schema describing one serialized dependency rule.
pub fn rule_schema() -> Schema {
    schema_for!(DependencyRule)
}

/// JSON Schema describing the serialized rule list.
pub fn rule_set_schema() -> Schema {
    schema_for!(DependencyRuleSet)
}
