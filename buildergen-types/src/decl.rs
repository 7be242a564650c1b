use crate::ty::TypeRef;
use serde::{Deserialize, Serialize};

/// Java declaration modifiers that can appear on a field or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Transient,
    Volatile,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
        }
    }
}

/// An annotation as written on a declaration, e.g. `@Column(name = "id")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: None,
        }
    }

    pub fn text(&self) -> String {
        match &self.arguments {
            Some(args) => format!("@{}({})", self.name, args),
            None => format!("@{}", self.name),
        }
    }
}

/// Expression source text plus the imports it relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
}

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            imports: vec![],
        }
    }

    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }
}

/// A field as declared on a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expression>,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: vec![],
            annotations: vec![],
            doc_comment: None,
            initializer: None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if !self.has_modifier(modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_doc_comment(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = Some(doc.into());
        self
    }

    pub fn with_initializer(mut self, initializer: Expression) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_final(&self) -> bool {
        self.has_modifier(Modifier::Final)
    }

    /// Returns true if the modifier was present.
    pub fn remove_modifier(&mut self, modifier: Modifier) -> bool {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| *m != modifier);
        self.modifiers.len() != before
    }
}

/// The class a builder is generated for, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceClass {
    #[serde(default = "default_source_schema")]
    pub schema: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
}

fn default_source_schema() -> String {
    crate::schema::BUILDERGEN_SOURCE_V1.to_string()
}

impl SourceClass {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDeclaration>) -> Self {
        Self {
            schema: default_source_schema(),
            name: name.into(),
            package: None,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }
}
