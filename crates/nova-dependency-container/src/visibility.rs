use dependency_rules::FieldValueSource;

use crate::container::DependencyContainer;
use crate::field::Field;

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Maps every child attribute of `container` to whether it is currently shown.
///
/// A child is shown when the container's rules and the child's own rules hold.
/// Nested containers have no attribute; their children are reported instead
/// and are hidden whenever any enclosing container is hidden.
pub fn resolve_visibility<S>(container: &DependencyContainer, values: &S) -> VisibilityMap
where
    S: FieldValueSource + ?Sized,
{
    let mut map = VisibilityMap::new();
    let values: &dyn FieldValueSource = &values;
    collect(
        container.fields(),
        container.is_satisfied_by(values),
        values,
        &mut map,
    );
    map
}

fn collect(
    fields: &[Box<dyn Field>],
    parent_visible: bool,
    values: &dyn FieldValueSource,
    map: &mut VisibilityMap,
) {
    for field in fields {
        let visible = parent_visible && field.dependencies_satisfied(values);
        if !field.attribute().is_empty() {
            map.insert(field.attribute().to_string(), visible);
        }
        collect(field.nested_fields(), visible, values, map);
    }
}
