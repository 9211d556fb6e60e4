use dependency_rules::{FieldValueSource, evaluate};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::dependencies::{Dependencies, HasDependencies};
use crate::field::{Attributes, Field, FillCallback, Meta};

/// Component name the renderer registers for containers.
pub const COMPONENT: &str = "nova-dependency-container";

/// A group of fields shown only while its dependency rules are satisfied.
#[derive(Debug, Default)]
pub struct DependencyContainer {
    fields: Vec<Box<dyn Field>>,
    dependencies: Dependencies,
    apply_to_fields: bool,
    panel: Option<String>,
    meta: Meta,
}

impl DependencyContainer {
    pub fn new<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Field>>,
    {
        Self {
            fields: fields.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Builds the child list lazily from a closure.
    pub fn from_fn<F, I>(build: F) -> Self
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = Box<dyn Field>>,
    {
        Self::new(build())
    }

    pub fn with_field(mut self, field: impl Field + 'static) -> Self {
        self.fields.push(Box::new(field));
        self
    }

    /// Asks the renderer to apply the dependencies to each child field.
    pub fn apply_to_fields(mut self) -> Self {
        self.apply_to_fields = true;
        self
    }

    pub fn applies_to_fields(&self) -> bool {
        self.apply_to_fields
    }

    pub fn with_panel(mut self, panel: impl Into<String>) -> Self {
        self.panel = Some(panel.into());
        self
    }

    pub fn panel(&self) -> Option<&str> {
        self.panel.as_deref()
    }

    /// Merges `meta` over the serialized descriptor; later keys win.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta.extend(meta);
        self
    }

    pub fn fields(&self) -> &[Box<dyn Field>] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [Box<dyn Field>] {
        &mut self.fields
    }

    pub fn show_on_index(&self) -> bool {
        false
    }

    pub fn show_on_detail(&self) -> bool {
        false
    }

    /// Whether the group should be visible for the given sibling values.
    pub fn is_satisfied_by<S>(&self, values: &S) -> bool
    where
        S: FieldValueSource + ?Sized,
    {
        evaluate(self.dependencies.rules(), values)
    }

    /// Fills every child with a non-empty attribute, then runs the deferred callbacks in order.
    pub fn fill(&self, request: &dyn FieldValueSource, model: &mut Attributes) {
        let callbacks = self
            .fields
            .iter()
            .filter(|field| !field.attribute().is_empty())
            .filter_map(|field| field.fill(request, model))
            .collect::<Vec<FillCallback>>();

        tracing::trace!(
            fields = self.fields.len(),
            deferred = callbacks.len(),
            "filled dependency container"
        );
        for callback in callbacks {
            callback(model);
        }
    }

    pub fn resolve(&mut self, resource: &Attributes) {
        for field in &mut self.fields {
            field.resolve(resource);
        }
    }

    pub fn resolve_for_display(&mut self, resource: &Attributes) {
        for field in &mut self.fields {
            field.resolve_for_display(resource);
        }
    }

    /// Descriptor consumed by the renderer.
    pub fn json_serialize(&self) -> Value {
        let mut descriptor = Map::new();
        descriptor.insert("component".into(), Value::from(COMPONENT));
        descriptor.insert("prefixComponent".into(), Value::Bool(true));
        descriptor.insert("indexName".into(), Value::from(""));
        descriptor.insert("name".into(), Value::from(""));
        descriptor.insert("attribute".into(), Value::from(""));
        descriptor.insert("value".into(), Value::Null);
        descriptor.insert(
            "panel".into(),
            self.panel.clone().map(Value::String).unwrap_or(Value::Null),
        );
        descriptor.insert("sortable".into(), Value::Bool(false));
        descriptor.insert("nullable".into(), Value::Bool(false));
        descriptor.insert("readonly".into(), Value::Bool(false));
        descriptor.insert("textAlign".into(), Value::from("left"));
        descriptor.insert("visible".into(), Value::Bool(true));
        descriptor.insert("withLabel".into(), Value::Bool(false));
        descriptor.insert(
            "fields".into(),
            Value::Array(self.fields.iter().map(|field| field.json_serialize()).collect()),
        );
        descriptor.insert("dependencies".into(), self.dependencies.rules().to_value());
        descriptor.insert("applyToFields".into(), Value::Bool(self.apply_to_fields));
        descriptor.extend(self.meta.clone());
        Value::Object(descriptor)
    }
}

impl HasDependencies for DependencyContainer {
    fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    fn dependencies_mut(&mut self) -> &mut Dependencies {
        &mut self.dependencies
    }
}

/// Containers nest: a container is itself a field with an empty attribute.
impl Field for DependencyContainer {
    fn component(&self) -> &str {
        COMPONENT
    }

    fn name(&self) -> &str {
        ""
    }

    fn attribute(&self) -> &str {
        ""
    }

    fn json_serialize(&self) -> Value {
        DependencyContainer::json_serialize(self)
    }

    fn fill(
        &self,
        request: &dyn FieldValueSource,
        model: &mut Attributes,
    ) -> Option<FillCallback> {
        DependencyContainer::fill(self, request, model);
        None
    }

    fn resolve(&mut self, resource: &Attributes) {
        DependencyContainer::resolve(self, resource);
    }

    fn resolve_for_display(&mut self, resource: &Attributes) {
        DependencyContainer::resolve_for_display(self, resource);
    }

    fn dependencies_satisfied(&self, values: &dyn FieldValueSource) -> bool {
        self.is_satisfied_by(values)
    }

    fn nested_fields(&self) -> &[Box<dyn Field>] {
        &self.fields
    }
}

impl Serialize for DependencyContainer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.json_serialize().serialize(serializer)
    }
}
