//! Rendering helpers for generated builder classes.
//!
//! - [`render_class`] prints compilable Java source.
//! - [`render_summary_md`] prints a short markdown report of what was generated.

use buildergen_types::{
    ConstructorDecl, FieldDeclaration, GeneratedClass, GeneratedMember, MemberKind, MethodDecl,
    Modifier, Parameter, Statement, TypeRef,
};
use std::collections::BTreeSet;

const INDENT: &str = "    ";

/// Render `class` as a Java compilation unit.
pub fn render_class(class: &GeneratedClass) -> String {
    render_class_with_imports(class, std::iter::empty::<String>())
}

/// Like [`render_class`], with additional imports (e.g. the source class when it lives in
/// another package).
pub fn render_class_with_imports<I, S>(class: &GeneratedClass, extra_imports: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut imports = collect_imports(class);
    imports.extend(extra_imports.into_iter().map(Into::into));
    let imports: BTreeSet<String> = imports
        .into_iter()
        .filter(|name| needs_import(name, class.package.as_deref()))
        .collect();

    let mut out = String::new();
    if let Some(package) = &class.package {
        out.push_str(&format!("package {package};\n\n"));
    }
    if !imports.is_empty() {
        for import in &imports {
            out.push_str(&format!("import {import};\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!("public class {} {{\n", class.name));
    for (i, member) in class.members.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match member {
            GeneratedMember::Field(f) => render_field(&mut out, f),
            GeneratedMember::Constructor(c) => render_constructor(&mut out, &class.name, c),
            GeneratedMember::Method(m) => render_method(&mut out, m),
        }
    }
    out.push_str("}\n");
    out
}

/// Markdown summary of a generated class, one row per member.
pub fn render_summary_md(class: &GeneratedClass) -> String {
    let mut out = String::new();
    out.push_str(&format!("# buildergen: {}\n\n", class.name));
    if let Some(package) = &class.package {
        out.push_str(&format!("- Package: `{package}`\n"));
    }
    let count = |kind| class.member_kinds().into_iter().filter(|k| *k == kind).count();
    out.push_str(&format!(
        "- Members: {} (fields {}, constructors {}, methods {})\n\n",
        class.members.len(),
        count(MemberKind::Field),
        count(MemberKind::Constructor),
        count(MemberKind::Method)
    ));

    if class.members.is_empty() {
        out.push_str("_No members._\n");
        return out;
    }

    out.push_str("| # | Kind | Member |\n|---|---|---|\n");
    for (i, member) in class.members.iter().enumerate() {
        let (kind, signature) = match member {
            GeneratedMember::Field(f) => {
                let init = f
                    .initializer
                    .as_ref()
                    .map(|e| format!(" = {}", e.text))
                    .unwrap_or_default();
                ("field", format!("{} {}{}", f.ty.declaration_text(), f.name, init))
            }
            GeneratedMember::Constructor(c) => (
                "constructor",
                format!("{}({})", class.name, param_list(&c.params)),
            ),
            GeneratedMember::Method(m) => (
                "method",
                format!(
                    "{} {}({})",
                    m.return_type.declaration_text(),
                    m.name,
                    param_list(&m.params)
                ),
            ),
        };
        out.push_str(&format!(
            "| {} | {} | `{}` |\n",
            i + 1,
            kind,
            signature.replace('|', "\\|")
        ));
    }
    out
}

fn collect_imports(class: &GeneratedClass) -> BTreeSet<String> {
    fn add_type(ty: &TypeRef, imports: &mut BTreeSet<String>) {
        imports.extend(ty.qualified_names());
    }

    let mut imports = BTreeSet::new();
    for member in &class.members {
        match member {
            GeneratedMember::Field(f) => {
                add_type(&f.ty, &mut imports);
                if let Some(init) = &f.initializer {
                    imports.extend(init.imports.iter().cloned());
                }
            }
            GeneratedMember::Constructor(c) => {
                for p in &c.params {
                    add_type(&p.ty, &mut imports);
                }
            }
            GeneratedMember::Method(m) => {
                add_type(&m.return_type, &mut imports);
                for p in &m.params {
                    add_type(&p.ty, &mut imports);
                }
            }
        }
    }
    imports
}

/// `java.lang` types and types from the class's own package are visible without an import.
/// Names without a lower-case package prefix (`Map.Entry`) cannot be imported at all.
fn needs_import(name: &str, package: Option<&str>) -> bool {
    let Some((owner, _)) = name.rsplit_once('.') else {
        return false;
    };
    let packaged = owner.chars().next().is_some_and(char::is_lowercase);
    packaged && owner != "java.lang" && Some(owner) != package
}

fn modifier_prefix(modifiers: &[Modifier]) -> String {
    modifiers
        .iter()
        .map(|m| format!("{} ", m.keyword()))
        .collect()
}

fn param_list(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", p.ty.declaration_text(), p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_field(out: &mut String, field: &FieldDeclaration) {
    if let Some(doc) = &field.doc_comment {
        for line in doc.lines() {
            out.push_str(INDENT);
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    for annotation in &field.annotations {
        out.push_str(&format!("{INDENT}{}\n", annotation.text()));
    }
    out.push_str(&format!(
        "{INDENT}{}{} {}",
        modifier_prefix(&field.modifiers),
        field.ty.declaration_text(),
        field.name
    ));
    if let Some(init) = &field.initializer {
        out.push_str(&format!(" = {}", init.text));
    }
    out.push_str(";\n");
}

fn render_constructor(out: &mut String, class_name: &str, ctor: &ConstructorDecl) {
    out.push_str(&format!(
        "{INDENT}{}{}({}) {{\n",
        modifier_prefix(&ctor.modifiers),
        class_name,
        param_list(&ctor.params)
    ));
    render_body(out, &ctor.body);
    out.push_str(&format!("{INDENT}}}\n"));
}

fn render_method(out: &mut String, method: &MethodDecl) {
    out.push_str(&format!(
        "{INDENT}{}{} {}({}) {{\n",
        modifier_prefix(&method.modifiers),
        method.return_type.declaration_text(),
        method.name,
        param_list(&method.params)
    ));
    render_body(out, &method.body);
    out.push_str(&format!("{INDENT}}}\n"));
}

fn render_body(out: &mut String, body: &[Statement]) {
    for stmt in body {
        out.push_str(&format!("{INDENT}{INDENT}{stmt}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildergen_types::{Annotation, Expression};
    use pretty_assertions::assert_eq;

    #[test]
    fn java_lang_and_same_package_are_not_imported() {
        assert!(!needs_import("java.lang.String", Some("com.example")));
        assert!(!needs_import("com.example.Person", Some("com.example")));
        assert!(!needs_import("Person", None));
        assert!(needs_import("java.util.UUID", Some("com.example")));
        assert!(needs_import("java.lang.reflect.Method", None));
        assert!(!needs_import("Map.Entry", Some("com.example")));
    }

    #[test]
    fn raw_field_keeps_doc_and_annotations() {
        let field = FieldDeclaration::new("id", TypeRef::class("Long"))
            .with_doc_comment("/**\n * Primary key.\n */")
            .with_annotation(Annotation::new("Id"))
            .with_modifier(Modifier::Private)
            .with_modifier(Modifier::Final)
            .with_initializer(Expression::new("0L"));
        let mut out = String::new();
        render_field(&mut out, &field);
        assert_eq!(
            out,
            "    /**\n     * Primary key.\n     */\n    @Id\n    private final Long id = 0L;\n"
        );
    }

    #[test]
    fn empty_class_has_header_and_brace() {
        let class = GeneratedClass::new("EmptyBuilder");
        assert_eq!(render_class(&class), "public class EmptyBuilder {\n}\n");
    }

    #[test]
    fn summary_lists_members_in_order() {
        let mut class = GeneratedClass::new("PersonBuilder");
        class.members.push(GeneratedMember::Field(FieldDeclaration::new(
            "person",
            TypeRef::class("Person"),
        )));
        class.members.push(GeneratedMember::Constructor(ConstructorDecl {
            modifiers: vec![Modifier::Private],
            params: vec![],
            body: vec![],
        }));
        let md = render_summary_md(&class);
        assert!(md.starts_with("# buildergen: PersonBuilder\n"));
        assert!(md.contains("- Members: 2 (fields 1, constructors 1, methods 0)"));
        assert!(md.contains("| 1 | field | `Person person` |"));
        assert!(md.contains("| 2 | constructor | `PersonBuilder()` |"));
    }

    #[test]
    fn summary_of_empty_class() {
        let md = render_summary_md(&GeneratedClass::new("X"));
        assert!(md.contains("_No members._"));
    }
}
