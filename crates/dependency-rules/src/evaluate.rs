use serde::Serialize;

use crate::rule::DependencyRule;
use crate::rule_set::DependencyRuleSet;
use crate::values::{FieldValueSource, is_empty_value, is_null_or_zero};

/// Returns `true` when every rule in `rules` is satisfied by `values`.
///
/// An empty rule set is always satisfied. Missing fields never fail the call:
/// they read as empty for the emptiness rules and as unequal for the equality
/// rules.
pub fn evaluate<S>(rules: &DependencyRuleSet, values: &S) -> bool
where
    S: FieldValueSource + ?Sized,
{
    for (index, rule) in rules.iter().enumerate() {
        if !evaluate_rule(rule, values) {
            tracing::debug!(
                index,
                field = rule.field(),
                kind = rule.kind().wire_key(),
                "dependency rule not satisfied"
            );
            return false;
        }
    }
    true
}

/// Evaluates a single rule against the current field values.
pub fn evaluate_rule<S>(rule: &DependencyRule, values: &S) -> bool
where
    S: FieldValueSource + ?Sized,
{
    let current = values.field_value(rule.field());
    match rule {
        DependencyRule::Equals { value, .. } => current == Some(value),
        DependencyRule::NotEquals { value, .. } => current != Some(value),
        DependencyRule::NotIn {
            values: excluded, ..
        } => !current.is_some_and(|current| excluded.contains(current)),
        DependencyRule::NotEmpty { .. } => !is_empty_value(current),
        DependencyRule::Empty { .. } => is_empty_value(current),
        DependencyRule::NullOrZero { .. } => is_null_or_zero(current),
    }
}

/// Outcome of one rule, reported by [`explain`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleOutcome<'a> {
    pub rule: &'a DependencyRule,
    pub satisfied: bool,
}

/// Evaluates every rule without short-circuiting, in registration order.
pub fn explain<'a, S>(rules: &'a DependencyRuleSet, values: &S) -> Vec<RuleOutcome<'a>>
where
    S: FieldValueSource + ?Sized,
{
    rules
        .iter()
        .map(|rule| RuleOutcome {
            rule,
            satisfied: evaluate_rule(rule, values),
        })
        .collect()
}
