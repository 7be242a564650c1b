use crate::error::{CreationFailure, SynthesisError};
use crate::materializer::FieldMaterializer;
use crate::naming;
use crate::ports::TargetLocation;
use buildergen_types::{
    ConstructorDecl, FieldDeclaration, GeneratedClass, GeneratedMember, MethodDecl, Modifier,
    Parameter, Statement, TypeRef,
};
use tracing::debug;

/// Assembles builder classes.
///
/// Member order: backing field, field declarations, private constructor, static factory,
/// one `with` setter per field, `build()`.
#[derive(Debug, Clone, Default)]
pub struct BuilderClassSynthesizer {
    materializer: Option<FieldMaterializer>,
}

impl BuilderClassSynthesizer {
    /// Fields are embedded exactly as supplied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields are embedded as materialized copies.
    pub fn with_materializer(materializer: FieldMaterializer) -> Self {
        Self {
            materializer: Some(materializer),
        }
    }

    pub fn materializer(&self) -> Option<&FieldMaterializer> {
        self.materializer.as_ref()
    }

    /// Create `builder_class` at `location` and fill it.
    ///
    /// The first failing insertion aborts; members already inserted stay where they are
    /// and the caller decides what to do with the partial class.
    ///
    /// A builder may not share its source class's name: the builder would shadow the type
    /// it builds.
    pub fn synthesize(
        &self,
        source_class: &str,
        builder_class: &str,
        fields: &[FieldDeclaration],
        location: &mut dyn TargetLocation,
    ) -> Result<GeneratedClass, SynthesisError> {
        if builder_class == source_class {
            return Err(SynthesisError::new(
                builder_class,
                CreationFailure::NameCollision {
                    name: builder_class.to_string(),
                },
            ));
        }
        let id = location
            .create_class(builder_class)
            .map_err(|failure| SynthesisError::new(builder_class, failure))?;
        debug!(
            class = builder_class,
            source = source_class,
            location = location.describe().as_str(),
            "created builder class"
        );

        for member in self.members(source_class, builder_class, fields) {
            location
                .add_member(id, member)
                .map_err(|failure| SynthesisError::new(builder_class, failure))?;
        }

        let class = location
            .class(id)
            .cloned()
            .ok_or_else(|| {
                SynthesisError::new(builder_class, CreationFailure::UnknownClass { id })
            })?;
        debug!(
            class = builder_class,
            members = class.members.len(),
            "builder class complete"
        );
        Ok(class)
    }

    /// The ordered members of the builder, independent of any location.
    pub fn members(
        &self,
        source_class: &str,
        builder_class: &str,
        fields: &[FieldDeclaration],
    ) -> Vec<GeneratedMember> {
        let source_field = naming::backing_field_name(source_class);
        let source_ty = TypeRef::class(source_class);
        let builder_ty = TypeRef::class(builder_class);

        let mut members = Vec::with_capacity(2 * fields.len() + 4);
        members.push(GeneratedMember::Field(
            FieldDeclaration::new(&source_field, source_ty.clone())
                .with_modifier(Modifier::Private),
        ));

        for field in fields {
            let declared = match &self.materializer {
                Some(m) => m.materialize(field),
                None => field.clone(),
            };
            members.push(GeneratedMember::Field(declared));
        }

        members.push(GeneratedMember::Constructor(ConstructorDecl {
            modifiers: vec![Modifier::Private],
            params: vec![],
            body: vec![],
        }));
        members.push(GeneratedMember::Method(factory_method(
            source_class,
            builder_class,
            &builder_ty,
        )));
        members.extend(
            fields
                .iter()
                .map(|f| GeneratedMember::Method(with_setter(f, &builder_ty))),
        );
        members.push(GeneratedMember::Method(build_method(
            &source_field,
            &source_ty,
            fields,
        )));
        members
    }
}

fn factory_method(source_class: &str, builder_class: &str, builder_ty: &TypeRef) -> MethodDecl {
    MethodDecl {
        modifiers: vec![Modifier::Public, Modifier::Static],
        return_type: builder_ty.clone(),
        name: naming::factory_method_name(source_class),
        params: vec![],
        body: vec![Statement::Return {
            value: format!("new {builder_class}()"),
        }],
    }
}

fn with_setter(field: &FieldDeclaration, builder_ty: &TypeRef) -> MethodDecl {
    MethodDecl {
        modifiers: vec![Modifier::Public],
        return_type: builder_ty.clone(),
        name: naming::with_setter_name(&field.name),
        params: vec![Parameter::new(&field.name, field.ty.clone())],
        body: vec![
            Statement::Assign {
                target: format!("this.{}", field.name),
                value: field.name.clone(),
            },
            Statement::Return {
                value: "this".to_string(),
            },
        ],
    }
}

fn build_method(
    source_field: &str,
    source_ty: &TypeRef,
    fields: &[FieldDeclaration],
) -> MethodDecl {
    let mut body = Vec::with_capacity(fields.len() + 2);
    body.push(Statement::Assign {
        target: source_field.to_string(),
        value: format!("new {}()", source_ty.presentable_text()),
    });
    body.extend(fields.iter().map(|f| Statement::Invoke {
        receiver: source_field.to_string(),
        method: naming::bean_setter_name(&f.name),
        args: vec![f.name.clone()],
    }));
    body.push(Statement::Return {
        value: source_field.to_string(),
    });

    MethodDecl {
        modifiers: vec![Modifier::Public],
        return_type: source_ty.clone(),
        name: "build".to_string(),
        params: vec![],
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materializer::DefaultValueStyle;
    use crate::ports::{ClassId, InMemoryLocation};
    use buildergen_types::{Annotation, Expression, MemberKind, PrimitiveType};
    use pretty_assertions::assert_eq;

    fn person_fields() -> Vec<FieldDeclaration> {
        vec![
            FieldDeclaration::new("name", TypeRef::class("String"))
                .with_modifier(Modifier::Private),
            FieldDeclaration::new("age", TypeRef::Primitive(PrimitiveType::Int))
                .with_modifier(Modifier::Private),
        ]
    }

    fn body_text(method: &MethodDecl) -> Vec<String> {
        method.body.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn person_builder_end_to_end() {
        let mut loc = InMemoryLocation::new("src");
        let class = BuilderClassSynthesizer::new()
            .synthesize("Person", "PersonBuilder", &person_fields(), &mut loc)
            .expect("synthesis succeeds");

        assert_eq!(class.name, "PersonBuilder");
        assert_eq!(
            class.member_kinds(),
            vec![
                MemberKind::Field,
                MemberKind::Field,
                MemberKind::Field,
                MemberKind::Constructor,
                MemberKind::Method,
                MemberKind::Method,
                MemberKind::Method,
                MemberKind::Method,
            ]
        );

        let backing = class.fields().next().unwrap();
        assert_eq!(backing.name, "person");
        assert_eq!(backing.ty, TypeRef::class("Person"));
        assert_eq!(backing.modifiers, vec![Modifier::Private]);
        assert_eq!(backing.initializer, None);

        let ctor = class.constructors().next().unwrap();
        assert_eq!(ctor.modifiers, vec![Modifier::Private]);
        assert!(ctor.params.is_empty());

        let factory = class.method("aPerson").unwrap();
        assert_eq!(factory.modifiers, vec![Modifier::Public, Modifier::Static]);
        assert_eq!(factory.return_type, TypeRef::class("PersonBuilder"));
        assert_eq!(body_text(factory), vec!["return new PersonBuilder();"]);

        let with_name = class.method("withName").unwrap();
        assert_eq!(with_name.params, vec![Parameter::new("name", TypeRef::class("String"))]);
        assert_eq!(body_text(with_name), vec!["this.name = name;", "return this;"]);

        let with_age = class.method("withAge").unwrap();
        assert_eq!(
            with_age.params,
            vec![Parameter::new("age", TypeRef::Primitive(PrimitiveType::Int))]
        );

        let build = class.method("build").unwrap();
        assert_eq!(build.return_type, TypeRef::class("Person"));
        assert_eq!(
            body_text(build),
            vec![
                "person = new Person();",
                "person.setName(name);",
                "person.setAge(age);",
                "return person;",
            ]
        );

        assert_eq!(loc.class_named("PersonBuilder"), Some(&class));
    }

    #[test]
    fn setters_follow_input_order() {
        let mut fields = person_fields();
        fields.reverse();
        let members = BuilderClassSynthesizer::new().members("Person", "PersonBuilder", &fields);
        let names: Vec<_> = members.iter().filter_map(GeneratedMember::name).collect();
        assert_eq!(
            names,
            vec!["person", "age", "name", "aPerson", "withAge", "withName", "build"]
        );
    }

    #[test]
    fn empty_selection_still_builds() {
        let members = BuilderClassSynthesizer::new().members("Order", "OrderBuilder", &[]);
        let names: Vec<_> = members.iter().map(GeneratedMember::name).collect();
        assert_eq!(names, vec![Some("order"), None, Some("aOrder"), Some("build")]);
    }

    #[test]
    fn builder_named_after_source_collides() {
        let mut loc = InMemoryLocation::new("src");
        let err = BuilderClassSynthesizer::new()
            .synthesize("Person", "Person", &person_fields(), &mut loc)
            .unwrap_err();
        assert_eq!(
            err.failure,
            CreationFailure::NameCollision {
                name: "Person".to_string()
            }
        );
        assert_eq!(loc.classes().count(), 0);
    }

    #[test]
    fn raw_fields_are_embedded_as_is() {
        let field = FieldDeclaration::new("id", TypeRef::class("Long"))
            .with_modifier(Modifier::Final)
            .with_annotation(Annotation::new("Id"));
        let members =
            BuilderClassSynthesizer::new().members("Order", "OrderBuilder", &[field.clone()]);
        assert_eq!(members[1], GeneratedMember::Field(field));
    }

    #[test]
    fn materializer_sanitizes_embedded_fields() {
        let field = FieldDeclaration::new("id", TypeRef::class("Long"))
            .with_modifier(Modifier::Final)
            .with_annotation(Annotation::new("Id"))
            .with_doc_comment("/** key */");
        let synth = BuilderClassSynthesizer::with_materializer(FieldMaterializer::new(
            DefaultValueStyle::Expression,
        ));
        let members = synth.members("Order", "OrderBuilder", &[field]);
        let embedded = members[1].as_field().unwrap();
        assert!(embedded.modifiers.is_empty());
        assert!(embedded.annotations.is_empty());
        assert_eq!(embedded.doc_comment, None);
        assert_eq!(embedded.initializer, Some(Expression::new("1L")));

        let setter = members[4].as_method().unwrap();
        assert_eq!(setter.name, "withId");
        assert_eq!(setter.params[0].ty, TypeRef::class("Long"));
    }

    #[test]
    fn collision_fails_before_any_insertion() {
        let mut loc = InMemoryLocation::new("src").with_existing(["PersonBuilder"]);
        let err = BuilderClassSynthesizer::new()
            .synthesize("Person", "PersonBuilder", &person_fields(), &mut loc)
            .unwrap_err();
        assert_eq!(err.class_name, "PersonBuilder");
        assert!(matches!(err.failure, CreationFailure::NameCollision { .. }));
        assert_eq!(loc.classes().count(), 0);
    }

    /// Rejects every insertion after the first `accept` members.
    struct RejectAfter {
        inner: InMemoryLocation,
        accept: usize,
        seen: usize,
    }

    impl TargetLocation for RejectAfter {
        fn describe(&self) -> String {
            self.inner.describe()
        }

        fn create_class(&mut self, name: &str) -> Result<ClassId, CreationFailure> {
            self.inner.create_class(name)
        }

        fn add_member(
            &mut self,
            class: ClassId,
            member: GeneratedMember,
        ) -> Result<(), CreationFailure> {
            if self.seen == self.accept {
                return Err(CreationFailure::MemberRejected {
                    member: member.name().unwrap_or("constructor").to_string(),
                    reason: "quota".to_string(),
                });
            }
            self.seen += 1;
            self.inner.add_member(class, member)
        }

        fn class(&self, class: ClassId) -> Option<&GeneratedClass> {
            self.inner.class(class)
        }
    }

    #[test]
    fn insertion_failure_aborts_without_rollback() {
        let mut loc = RejectAfter {
            inner: InMemoryLocation::new("src"),
            accept: 2,
            seen: 0,
        };
        let err = BuilderClassSynthesizer::new()
            .synthesize("Person", "PersonBuilder", &person_fields(), &mut loc)
            .unwrap_err();
        assert_eq!(
            err.failure,
            CreationFailure::MemberRejected {
                member: "age".to_string(),
                reason: "quota".to_string()
            }
        );

        let partial = loc.inner.class_named("PersonBuilder").unwrap();
        assert_eq!(partial.members.len(), 2);
    }
}
