use crate::decl::{FieldDeclaration, Modifier};
use crate::ty::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A single statement in a generated body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    /// `<target> = <value>;`
    Assign { target: String, value: String },
    /// `<receiver>.<method>(<args>);`
    Invoke {
        receiver: String,
        method: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// `return <value>;`
    Return { value: String },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Assign { target, value } => write!(f, "{target} = {value};"),
            Statement::Invoke {
                receiver,
                method,
                args,
            } => write!(f, "{receiver}.{method}({});", args.join(", ")),
            Statement::Return { value } => write!(f, "return {value};"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,

    #[serde(default)]
    pub params: Vec<Parameter>,

    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,

    pub return_type: TypeRef,

    pub name: String,

    #[serde(default)]
    pub params: Vec<Parameter>,

    #[serde(default)]
    pub body: Vec<Statement>,
}

impl MethodDecl {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Constructor,
    Method,
}

/// A declaration synthesized for (and owned by) a generated class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratedMember {
    Field(FieldDeclaration),
    Constructor(ConstructorDecl),
    Method(MethodDecl),
}

impl GeneratedMember {
    pub fn kind(&self) -> MemberKind {
        match self {
            GeneratedMember::Field(_) => MemberKind::Field,
            GeneratedMember::Constructor(_) => MemberKind::Constructor,
            GeneratedMember::Method(_) => MemberKind::Method,
        }
    }

    /// Declared name. Constructors are named after their class and report `None`.
    pub fn name(&self) -> Option<&str> {
        match self {
            GeneratedMember::Field(f) => Some(&f.name),
            GeneratedMember::Constructor(_) => None,
            GeneratedMember::Method(m) => Some(&m.name),
        }
    }

    pub fn as_field(&self) -> Option<&FieldDeclaration> {
        match self {
            GeneratedMember::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDecl> {
        match self {
            GeneratedMember::Method(m) => Some(m),
            _ => None,
        }
    }
}

/// A class produced by synthesis. Member order is significant and preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedClass {
    pub schema: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(default)]
    pub members: Vec<GeneratedMember>,
}

impl GeneratedClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: crate::schema::BUILDERGEN_CLASS_V1.to_string(),
            name: name.into(),
            package: None,
            members: vec![],
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.members.iter().filter_map(GeneratedMember::as_field)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(GeneratedMember::as_method)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods().find(|m| m.name == name)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.members.iter().filter_map(|m| match m {
            GeneratedMember::Constructor(c) => Some(c),
            _ => None,
        })
    }

    pub fn member_kinds(&self) -> Vec<MemberKind> {
        self.members.iter().map(GeneratedMember::kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_print_as_java() {
        let assign = Statement::Assign {
            target: "this.name".to_string(),
            value: "name".to_string(),
        };
        let invoke = Statement::Invoke {
            receiver: "person".to_string(),
            method: "setName".to_string(),
            args: vec!["name".to_string()],
        };
        let ret = Statement::Return {
            value: "this".to_string(),
        };
        assert_eq!(assign.to_string(), "this.name = name;");
        assert_eq!(invoke.to_string(), "person.setName(name);");
        assert_eq!(ret.to_string(), "return this;");
    }

    #[test]
    fn class_accessors_filter_by_kind() {
        let mut class = GeneratedClass::new("PersonBuilder");
        class.members.push(GeneratedMember::Field(FieldDeclaration::new(
            "person",
            TypeRef::class("Person"),
        )));
        class
            .members
            .push(GeneratedMember::Constructor(ConstructorDecl {
                modifiers: vec![Modifier::Private],
                params: vec![],
                body: vec![],
            }));
        class.members.push(GeneratedMember::Method(MethodDecl {
            modifiers: vec![Modifier::Public, Modifier::Static],
            return_type: TypeRef::class("PersonBuilder"),
            name: "aPerson".to_string(),
            params: vec![],
            body: vec![],
        }));

        assert_eq!(class.fields().count(), 1);
        assert_eq!(class.constructors().count(), 1);
        assert!(class.method("aPerson").is_some_and(MethodDecl::is_static));
        assert_eq!(
            class.member_kinds(),
            vec![MemberKind::Field, MemberKind::Constructor, MemberKind::Method]
        );
        assert_eq!(class.members[1].name(), None);
    }
}
