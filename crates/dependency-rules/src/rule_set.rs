use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::RuleError;
use crate::rule::DependencyRule;

/// Ordered, duplicate-free collection of dependency rules attached to a field group.
///
/// Registration order is kept exactly. Registering a rule structurally equal to
/// one already present is a no-op. Decoding from the wire form goes through the
/// same registration, so duplicate entries in the input collapse into one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct DependencyRuleSet {
    rules: Vec<DependencyRule>,
}

impl DependencyRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `rule` unless an equal rule is already registered.
    ///
    /// Returns `true` when the rule was appended.
    pub fn register(&mut self, rule: DependencyRule) -> bool {
        if self.rules.contains(&rule) {
            tracing::trace!(
                field = rule.field(),
                kind = rule.kind().wire_key(),
                "ignoring duplicate dependency rule"
            );
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// Owned form of [`register`](Self::register) for fluent construction.
    pub fn with_rule(mut self, rule: DependencyRule) -> Self {
        self.register(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DependencyRule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[DependencyRule] {
        &self.rules
    }

    pub fn contains(&self, rule: &DependencyRule) -> bool {
        self.rules.contains(rule)
    }

    /// Distinct field names referenced by the rules, in first-seen order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !fields.contains(&rule.field()) {
                fields.push(rule.field());
            }
        }
        fields
    }

    /// Wire form: a JSON array of rule objects in registration order.
    pub fn to_value(&self) -> Value {
        Value::Array(self.rules.iter().map(DependencyRule::to_value).collect())
    }

    pub fn from_value(value: Value) -> Result<Self, RuleError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RuleError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl<'de> Deserialize<'de> for DependencyRuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rules = Vec::<DependencyRule>::deserialize(deserializer)?;
        Ok(rules.into_iter().collect())
    }
}

impl FromIterator<DependencyRule> for DependencyRuleSet {
    fn from_iter<I: IntoIterator<Item = DependencyRule>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<DependencyRule> for DependencyRuleSet {
    fn extend<I: IntoIterator<Item = DependencyRule>>(&mut self, iter: I) {
        for rule in iter {
            self.register(rule);
        }
    }
}

impl IntoIterator for DependencyRuleSet {
    type Item = DependencyRule;
    type IntoIter = std::vec::IntoIter<DependencyRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a DependencyRuleSet {
    type Item = &'a DependencyRule;
    type IntoIter = std::slice::Iter<'a, DependencyRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duplicate_registration_is_ignored() {
        let mut set = DependencyRuleSet::new();
        assert!(set.register(DependencyRule::equals("status", "active")));
        assert!(!set.register(DependencyRule::equals("status", "active")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn equality_is_typed() {
        let set = DependencyRuleSet::new()
            .with_rule(DependencyRule::equals("count", 1))
            .with_rule(DependencyRule::equals("count", "1"))
            .with_rule(DependencyRule::equals("count", 1.0));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn not_in_duplicates_compare_whole_value_list() {
        let set = DependencyRuleSet::new()
            .with_rule(DependencyRule::not_in("status", ["a", "b"]))
            .with_rule(DependencyRule::not_in("status", ["b", "a"]))
            .with_rule(DependencyRule::not_in("status", ["a", "b"]));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn fields_are_listed_once_in_order() {
        let set = DependencyRuleSet::new()
            .with_rule(DependencyRule::not_empty("title"))
            .with_rule(DependencyRule::equals("status", "active"))
            .with_rule(DependencyRule::not_equals("title", "draft"));
        assert_eq!(set.fields(), vec!["title", "status"]);
    }

    #[test]
    fn decoding_collapses_duplicates() {
        let set = DependencyRuleSet::from_value(json!([
            { "field": "status", "value": "active" },
            { "field": "title", "notEmpty": true },
            { "field": "status", "value": "active" }
        ]))
        .expect("rule set should decode");
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice()[1], DependencyRule::not_empty("title"));
    }

    #[test]
    fn serde_and_to_value_agree() {
        let set = DependencyRuleSet::new()
            .with_rule(DependencyRule::equals("status", "active"))
            .with_rule(DependencyRule::empty("notes"));
        assert_eq!(serde_json::to_value(&set).unwrap(), set.to_value());
    }
}
