use nova_dependency_container::{
    BasicField, COMPONENT, DependencyContainer, DependencyRule, Field, HasDependencies, Meta,
    resolve_visibility,
};
use serde_json::{Value, json};

fn two_fields() -> Vec<Box<dyn Field>> {
    vec![
        Box::new(BasicField::new("Field 1")),
        Box::new(BasicField::new("Field 2")),
    ]
}

#[test]
fn builds_from_a_field_list() {
    let container = DependencyContainer::new(two_fields());
    assert_eq!(container.fields().len(), 2);
    assert_eq!(container.fields()[1].attribute(), "field_2");
    assert!(container.dependency_rules().is_empty());
    assert!(!container.applies_to_fields());
}

#[test]
fn builds_from_a_closure() {
    let container = DependencyContainer::from_fn(two_fields);
    assert_eq!(container.fields().len(), 2);
    assert_eq!(container.fields()[0].name(), "Field 1");
}

#[test]
fn depends_on_registers_an_equals_rule() {
    let container = DependencyContainer::new(two_fields()).depends_on("field1", "value");
    assert_eq!(
        container.json_serialize()["dependencies"],
        json!([{ "field": "field1", "value": "value" }])
    );
}

#[test]
fn every_registration_method_keeps_its_order() {
    let container = DependencyContainer::new(two_fields())
        .depends_on("field1", "value1")
        .depends_on_not("field2", "value2")
        .depends_on_in("field3", ["value3", "value4"])
        .depends_on_not_in("field4", ["value5", "value6"])
        .depends_on_empty("field5")
        .depends_on_not_empty("field6")
        .depends_on_null_or_zero("field7");

    assert_eq!(container.dependency_rules().len(), 8);
    assert_eq!(
        container.json_serialize()["dependencies"],
        json!([
            { "field": "field1", "value": "value1" },
            { "field": "field2", "not": "value2" },
            { "field": "field3", "value": "value3" },
            { "field": "field3", "value": "value4" },
            { "field": "field4", "notIn": ["value5", "value6"] },
            { "field": "field5", "empty": true },
            { "field": "field6", "notEmpty": true },
            { "field": "field7", "nullOrZero": true },
        ])
    );
}

#[test]
fn duplicate_registrations_are_ignored() {
    let container = DependencyContainer::default()
        .depends_on("status", "active")
        .depends_on_not_empty("title")
        .depends_on("status", "active")
        .depends_on_not_empty("title")
        .depends_on_in("status", ["active"]);
    assert_eq!(
        container.dependency_rules().as_slice(),
        &[
            DependencyRule::equals("status", "active"),
            DependencyRule::not_empty("title"),
        ]
    );
}

#[test]
fn equal_values_of_different_types_are_distinct_rules() {
    let container = DependencyContainer::default()
        .depends_on("count", 1)
        .depends_on("count", "1");
    assert_eq!(container.dependency_rules().len(), 2);
}

#[test]
fn apply_to_fields_sets_the_flag() {
    let container = DependencyContainer::new(two_fields()).apply_to_fields();
    assert!(container.applies_to_fields());
    assert_eq!(container.json_serialize()["applyToFields"], json!(true));
}

#[test]
fn descriptor_carries_renderer_keys() {
    let container = DependencyContainer::new(two_fields())
        .with_panel("Details")
        .depends_on("status", "active");

    insta::assert_json_snapshot!(container.json_serialize(), @r#"
    {
      "applyToFields": false,
      "attribute": "",
      "component": "nova-dependency-container",
      "dependencies": [
        {
          "field": "status",
          "value": "active"
        }
      ],
      "fields": [
        {
          "attribute": "field_1",
          "component": "text-field",
          "meta": {},
          "name": "Field 1",
          "value": null
        },
        {
          "attribute": "field_2",
          "component": "text-field",
          "meta": {},
          "name": "Field 2",
          "value": null
        }
      ],
      "indexName": "",
      "name": "",
      "nullable": false,
      "panel": "Details",
      "prefixComponent": true,
      "readonly": false,
      "sortable": false,
      "textAlign": "left",
      "value": null,
      "visible": true,
      "withLabel": false
    }
    "#);
}

#[test]
fn serialize_matches_json_serialize() {
    let container = DependencyContainer::new(two_fields()).depends_on_empty("notes");
    assert_eq!(
        serde_json::to_value(&container).unwrap(),
        container.json_serialize()
    );
}

#[test]
fn extra_meta_is_merged_last() {
    let container = DependencyContainer::default().with_meta(Meta::from_iter([
        ("helpText".to_string(), json!("Shown when active")),
        ("component".to_string(), json!("custom-container")),
    ]));
    let descriptor = container.json_serialize();
    assert_eq!(descriptor["helpText"], "Shown when active");
    assert_eq!(descriptor["component"], "custom-container");
    assert_eq!(Field::component(&container), COMPONENT);
}

#[test]
fn containers_nest() {
    let inner = DependencyContainer::new(vec![
        Box::new(BasicField::new("Reason")) as Box<dyn Field>,
    ])
    .depends_on("status", "rejected");
    let outer = DependencyContainer::default()
        .with_field(BasicField::new("Status"))
        .with_field(inner)
        .depends_on_not_empty("title");

    let descriptor = outer.json_serialize();
    let nested = &descriptor["fields"][1];
    assert_eq!(nested["component"], COMPONENT);
    assert_eq!(nested["fields"][0]["attribute"], "reason");
    assert_eq!(
        nested["dependencies"],
        json!([{ "field": "status", "value": "rejected" }])
    );

    let mut model = serde_json::Map::new();
    outer.fill(
        &json!({ "status": "rejected", "reason": "Duplicate" }),
        &mut model,
    );
    // nested containers have no attribute, so fill does not descend into them
    assert_eq!(Value::Object(model), json!({ "status": "rejected" }));
}

#[test]
fn resolve_reaches_nested_children() {
    let inner = DependencyContainer::default().with_field(BasicField::new("Reason"));
    let mut outer = DependencyContainer::default()
        .with_field(BasicField::new("Status"))
        .with_field(inner);

    let resource = serde_json::Map::from_iter([
        ("status".to_string(), json!("rejected")),
        ("reason".to_string(), json!("Duplicate")),
    ]);
    outer.resolve_for_display(&resource);

    let descriptor = outer.json_serialize();
    assert_eq!(descriptor["fields"][0]["value"], "rejected");
    assert_eq!(descriptor["fields"][1]["fields"][0]["value"], "Duplicate");
}

#[test]
fn satisfaction_drives_visibility() {
    let container = DependencyContainer::new(two_fields())
        .depends_on("status", "active")
        .depends_on_not_empty("title");

    let values = json!({ "status": "active", "title": "Hello" });
    assert!(container.is_satisfied_by(&values));
    assert!(resolve_visibility(&container, &values).values().all(|shown| *shown));

    let values = json!({ "status": "active", "title": "" });
    assert!(!container.is_satisfied_by(&values));
    assert!(resolve_visibility(&container, &values).values().all(|shown| !shown));
}
