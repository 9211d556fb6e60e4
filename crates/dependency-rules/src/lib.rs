#![allow(missing_docs)]

pub mod error;
pub mod evaluate;
pub mod rule;
pub mod rule_set;
pub mod schema;
pub mod values;

pub use error::RuleError;
pub use evaluate::{RuleOutcome, evaluate, evaluate_rule, explain};
pub use rule::{DependencyRule, RuleKind};
pub use rule_set::DependencyRuleSet;
pub use schema::{rule_schema, rule_set_schema};
pub use values::{FieldValueSource, is_empty_value, is_null_or_zero};
