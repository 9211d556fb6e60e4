use std::fmt;

use dependency_rules::{FieldValueSource, evaluate};
use serde_json::{Map, Value, json};

use crate::dependencies::{Dependencies, HasDependencies};

/// Model or resource attributes, keyed by attribute name.
pub type Attributes = Map<String, Value>;

/// Extra key/value pairs merged over a field's serialized form.
pub type Meta = Map<String, Value>;

/// Work a field defers until every field of the form has been filled.
pub type FillCallback = Box<dyn FnOnce(&mut Attributes) + Send>;

/// Minimal form-field contract the container delegates to.
///
/// Host fields implement this so containers can be built and tested without
/// the host framework present.
pub trait Field: fmt::Debug + Send + Sync {
    fn component(&self) -> &str;

    fn name(&self) -> &str;

    fn attribute(&self) -> &str;

    /// Serialized form consumed by the renderer.
    fn json_serialize(&self) -> Value;

    /// Copies the submitted value into `model`, optionally deferring work.
    fn fill(&self, request: &dyn FieldValueSource, model: &mut Attributes)
    -> Option<FillCallback>;

    fn resolve(&mut self, resource: &Attributes);

    fn resolve_for_display(&mut self, resource: &Attributes);

    /// Whether this field's own dependency rules hold. Fields without rules are always shown.
    fn dependencies_satisfied(&self, _values: &dyn FieldValueSource) -> bool {
        true
    }

    /// Child fields of grouping fields; empty for leaf fields.
    fn nested_fields(&self) -> &[Box<dyn Field>] {
        &[]
    }
}

/// Derives an attribute name from a display name: `"Field 1"` becomes `"field_1"`.
pub fn attribute_from_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Plain value field, usable as a container child or as a gated field on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicField {
    component: String,
    name: String,
    attribute: String,
    value: Option<Value>,
    meta: Meta,
    dependencies: Dependencies,
}

impl BasicField {
    pub const DEFAULT_COMPONENT: &'static str = "text-field";

    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            component: Self::DEFAULT_COMPONENT.to_string(),
            attribute: attribute_from_name(&name),
            name,
            value: None,
            meta: Meta::new(),
            dependencies: Dependencies::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Merges `meta` into the existing meta; later keys win.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta.extend(meta);
        self
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Meta as serialized, including registered dependencies.
    pub fn meta(&self) -> Meta {
        let mut meta = self.meta.clone();
        if !self.dependencies.rules().is_empty() {
            meta.insert("dependencies".into(), self.dependencies.rules().to_value());
        }
        meta
    }
}

impl HasDependencies for BasicField {
    fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    fn dependencies_mut(&mut self) -> &mut Dependencies {
        &mut self.dependencies
    }
}

impl Field for BasicField {
    fn component(&self) -> &str {
        &self.component
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn json_serialize(&self) -> Value {
        json!({
            "component": self.component,
            "attribute": self.attribute,
            "name": self.name,
            "value": self.value,
            "meta": self.meta(),
        })
    }

    fn fill(
        &self,
        request: &dyn FieldValueSource,
        model: &mut Attributes,
    ) -> Option<FillCallback> {
        if let Some(value) = request.field_value(&self.attribute) {
            model.insert(self.attribute.clone(), value.clone());
        }
        None
    }

    fn resolve(&mut self, resource: &Attributes) {
        self.value = resource.get(&self.attribute).cloned();
    }

    fn resolve_for_display(&mut self, resource: &Attributes) {
        self.resolve(resource);
    }

    fn dependencies_satisfied(&self, values: &dyn FieldValueSource) -> bool {
        evaluate(self.dependencies.rules(), values)
    }
}
