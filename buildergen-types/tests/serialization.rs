use buildergen_types::{
    Annotation, FieldDeclaration, GeneratedClass, GeneratedMember, Modifier, PrimitiveType,
    SourceClass, TypeRef, schema,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn source_class_defaults_schema_and_optional_parts() {
    let source: SourceClass = serde_json::from_value(json!({
        "name": "Person",
        "fields": [
            { "name": "name", "type": "String" },
            {
                "name": "age",
                "type": "int",
                "modifiers": ["private", "final"],
                "annotations": [{ "name": "Min", "arguments": "0" }],
                "doc_comment": "/** Age in years. */"
            }
        ]
    }))
    .expect("source class parses");

    assert_eq!(source.schema, schema::BUILDERGEN_SOURCE_V1);
    assert_eq!(source.package, None);
    assert_eq!(source.fields.len(), 2);

    let age = source.field("age").expect("age field");
    assert_eq!(age.ty, TypeRef::Primitive(PrimitiveType::Int));
    assert!(age.is_final());
    assert_eq!(age.annotations[0].text(), "@Min(0)");
    assert_eq!(age.doc_comment.as_deref(), Some("/** Age in years. */"));
    assert!(source.field("missing").is_none());
}

#[test]
fn source_class_rejects_bad_type_text() {
    let err = serde_json::from_value::<SourceClass>(json!({
        "name": "Person",
        "fields": [{ "name": "tags", "type": "List<" }]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("unexpected end"));
}

#[test]
fn generated_members_are_tagged_by_kind() {
    let mut class = GeneratedClass::new("PersonBuilder");
    class.members.push(GeneratedMember::Field(
        FieldDeclaration::new("person", TypeRef::class("Person")).with_modifier(Modifier::Private),
    ));

    let value = serde_json::to_value(&class).unwrap();
    assert_eq!(value["schema"], schema::BUILDERGEN_CLASS_V1);
    assert_eq!(value["members"][0]["kind"], "field");
    assert_eq!(value["members"][0]["type"], "Person");
    assert_eq!(value["members"][0]["modifiers"], json!(["private"]));

    let back: GeneratedClass = serde_json::from_value(value).unwrap();
    assert_eq!(back, class);
}

#[test]
fn field_builders_do_not_duplicate_modifiers() {
    let mut field = FieldDeclaration::new("count", TypeRef::Primitive(PrimitiveType::Int))
        .with_modifier(Modifier::Final)
        .with_modifier(Modifier::Final)
        .with_annotation(Annotation::new("NotNull"));

    assert_eq!(field.modifiers, vec![Modifier::Final]);
    assert!(field.remove_modifier(Modifier::Final));
    assert!(!field.remove_modifier(Modifier::Final));
    assert!(!field.is_final());
}
