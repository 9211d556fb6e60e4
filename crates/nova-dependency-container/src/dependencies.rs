use dependency_rules::{DependencyRule, DependencyRuleSet, FieldValueSource, evaluate};
use serde_json::Value;

/// Dependency state owned by a field: the registered rules plus the satisfied flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dependencies {
    rules: DependencyRuleSet,
    satisfied: bool,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &DependencyRuleSet {
        &self.rules
    }

    pub fn register(&mut self, rule: DependencyRule) -> bool {
        self.rules.register(rule)
    }

    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    pub fn set_satisfied(&mut self, satisfied: bool) {
        self.satisfied = satisfied;
    }
}

impl From<DependencyRuleSet> for Dependencies {
    fn from(rules: DependencyRuleSet) -> Self {
        Self {
            rules,
            satisfied: false,
        }
    }
}

/// Fluent dependency registration shared by every field type that can be gated.
///
/// Implementors only expose their [`Dependencies`]; all registration methods are
/// provided and never register a structurally equal rule twice.
pub trait HasDependencies: Sized {
    fn dependencies(&self) -> &Dependencies;

    fn dependencies_mut(&mut self) -> &mut Dependencies;

    /// Registers a rule, returning `true` when it was not already present.
    fn add_dependency(&mut self, rule: DependencyRule) -> bool {
        self.dependencies_mut().register(rule)
    }

    fn depends_on(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_dependency(DependencyRule::equals(field, value));
        self
    }

    /// Registers one `value` rule per entry.
    ///
    /// Rules are ANDed, so two or more distinct values for the same field can
    /// never all hold; the group then stays hidden. The expansion is kept
    /// because existing renderers expect the plain `{field, value}` objects.
    fn depends_on_in<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for rule in DependencyRule::expand_in(field, values) {
            self.add_dependency(rule);
        }
        self
    }

    fn depends_on_not_in<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.add_dependency(DependencyRule::not_in(field, values));
        self
    }

    fn depends_on_not(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_dependency(DependencyRule::not_equals(field, value));
        self
    }

    fn depends_on_not_empty(mut self, field: impl Into<String>) -> Self {
        self.add_dependency(DependencyRule::not_empty(field));
        self
    }

    fn depends_on_empty(mut self, field: impl Into<String>) -> Self {
        self.add_dependency(DependencyRule::empty(field));
        self
    }

    fn depends_on_null_or_zero(mut self, field: impl Into<String>) -> Self {
        self.add_dependency(DependencyRule::null_or_zero(field));
        self
    }

    /// Marks the dependencies as satisfied regardless of the registered rules.
    fn satisfy_dependencies(mut self) -> Self {
        self.dependencies_mut().set_satisfied(true);
        self
    }

    fn are_dependencies_satisfied(&self) -> bool {
        self.dependencies().is_satisfied()
    }

    /// Evaluates the rules against `values` and stores the result as the satisfied flag.
    fn resolve_dependencies<S>(&mut self, values: &S) -> bool
    where
        S: FieldValueSource + ?Sized,
    {
        let satisfied = evaluate(self.dependencies().rules(), values);
        self.dependencies_mut().set_satisfied(satisfied);
        satisfied
    }

    fn dependency_rules(&self) -> &DependencyRuleSet {
        self.dependencies().rules()
    }
}
