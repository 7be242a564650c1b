use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Java primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Char,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// Simple name of the `java.lang` wrapper class.
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Byte => "Byte",
            PrimitiveType::Short => "Short",
            PrimitiveType::Int => "Integer",
            PrimitiveType::Long => "Long",
            PrimitiveType::Char => "Character",
            PrimitiveType::Float => "Float",
            PrimitiveType::Double => "Double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Extends(Box<TypeRef>),
    Super(Box<TypeRef>),
}

/// A declared Java type.
///
/// Class names may be package-qualified (`java.util.List`). The presentable text drops
/// qualifiers, which is the form type classification and rendering work on.
///
/// Serialized as its source text (`"java.util.Map<String, Integer>"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Class { name: String, args: Vec<TypeRef> },
    Array(Box<TypeRef>),
    Wildcard(Option<WildcardBound>),
}

impl TypeRef {
    pub fn class(name: impl Into<String>) -> Self {
        TypeRef::Class {
            name: name.into(),
            args: vec![],
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Class {
            name: name.into(),
            args,
        }
    }

    pub fn array_of(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Unqualified class name, without type arguments. `None` for primitives, arrays and
    /// wildcards.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeRef::Class { name, .. } => Some(name.rsplit('.').next().unwrap_or(name)),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }

    /// Innermost class names only: `Map<String, List<Integer>>`, `Entry<K, V>`, `int[]`.
    ///
    /// This is the form type classification works on.
    pub fn presentable_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, TextForm::Presentable);
        out
    }

    /// Type text as written in a declaration once the package is imported: package segments
    /// are dropped, enclosing classes are kept (`java.util.Map.Entry<K, V>` is `Map.Entry<K, V>`).
    pub fn declaration_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, TextForm::Declaration);
        out
    }

    /// Importable top-level classes referenced anywhere in this type.
    ///
    /// Only names with a package prefix qualify. Nested classes import their top-level
    /// class, so `java.util.Map.Entry` contributes `java.util.Map`.
    pub fn qualified_names(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_qualified(&mut out);
        out
    }

    fn collect_qualified(&self, out: &mut BTreeSet<String>) {
        match self {
            TypeRef::Primitive(_) | TypeRef::Wildcard(None) => {}
            TypeRef::Class { name, args } => {
                if let (Some(package), class_path) = split_package(name) {
                    let top = class_path.split('.').next().unwrap_or(class_path);
                    out.insert(format!("{package}.{top}"));
                }
                for arg in args {
                    arg.collect_qualified(out);
                }
            }
            TypeRef::Array(element) => element.collect_qualified(out),
            TypeRef::Wildcard(Some(WildcardBound::Extends(t) | WildcardBound::Super(t))) => {
                t.collect_qualified(out)
            }
        }
    }

    fn write_text(&self, out: &mut String, form: TextForm) {
        match self {
            TypeRef::Primitive(p) => out.push_str(p.keyword()),
            TypeRef::Class { name, args } => {
                match form {
                    TextForm::Qualified => out.push_str(name),
                    TextForm::Declaration => out.push_str(split_package(name).1),
                    TextForm::Presentable => out.push_str(self.simple_name().unwrap_or(name)),
                }
                if !args.is_empty() {
                    out.push('<');
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        arg.write_text(out, form);
                    }
                    out.push('>');
                }
            }
            TypeRef::Array(element) => {
                element.write_text(out, form);
                out.push_str("[]");
            }
            TypeRef::Wildcard(bound) => {
                out.push('?');
                match bound {
                    None => {}
                    Some(WildcardBound::Extends(t)) => {
                        out.push_str(" extends ");
                        t.write_text(out, form);
                    }
                    Some(WildcardBound::Super(t)) => {
                        out.push_str(" super ");
                        t.write_text(out, form);
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TextForm {
    Qualified,
    Declaration,
    Presentable,
}

/// Split a dotted class name into its package and class path.
///
/// Package segments are the leading lower-case ones; the last segment is always a class.
fn split_package(name: &str) -> (Option<&str>, &str) {
    let mut end = 0;
    for (i, segment) in name.match_indices('.') {
        let head = &name[end..i];
        if !head.chars().next().is_some_and(char::is_lowercase) {
            break;
        }
        end = i + segment.len();
    }
    if end == 0 {
        (None, name)
    } else {
        (Some(&name[..end - 1]), &name[end..])
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_text(&mut out, TextForm::Qualified);
        f.write_str(&out)
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(p: PrimitiveType) -> Self {
        TypeRef::Primitive(p)
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.to_string()
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeParseError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl FromStr for TypeRef {
    type Err = TypeParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(TypeParseError::Empty);
        }
        let mut parser = Parser {
            text,
            tokens,
            pos: 0,
        };
        let ty = parser.parse_type(false)?;
        if let Some((offset, tok)) = parser.tokens.get(parser.pos).cloned() {
            return Err(parser.unexpected(offset, &tok));
        }
        Ok(ty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("empty type expression")]
    Empty,

    #[error("unexpected `{found}` at offset {offset} in `{text}`")]
    Unexpected {
        text: String,
        found: String,
        offset: usize,
    },

    #[error("unexpected end of type expression `{text}`")]
    UnexpectedEnd { text: String },

    #[error("primitive `{keyword}` cannot be a type argument")]
    PrimitiveArgument { keyword: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Ident(String),
    Punct(char),
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Ident(s) => f.write_str(s),
            Tok::Punct(c) => write!(f, "{c}"),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}

fn tokenize(text: &str) -> Result<Vec<(usize, Tok)>, TypeParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '<' | '>' | ',' | '[' | ']' | '?' => tokens.push((offset, Tok::Punct(c))),
            c if is_ident_char(c) => {
                let mut ident = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    ident.push(next);
                    chars.next();
                }
                tokens.push((offset, Tok::Ident(ident)));
            }
            other => {
                return Err(TypeParseError::Unexpected {
                    text: text.to_string(),
                    found: other.to_string(),
                    offset,
                });
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<(usize, Tok)>,
    pos: usize,
}

impl Parser<'_> {
    fn next(&mut self) -> Result<(usize, Tok), TypeParseError> {
        let tok = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| TypeParseError::UnexpectedEnd {
                text: self.text.to_string(),
            })?;
        self.pos += 1;
        Ok(tok)
    }

    fn eat(&mut self, punct: char) -> bool {
        if matches!(self.tokens.get(self.pos), Some((_, Tok::Punct(c))) if *c == punct) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.tokens.get(self.pos), Some((_, Tok::Ident(s))) if s == keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self, offset: usize, tok: &Tok) -> TypeParseError {
        TypeParseError::Unexpected {
            text: self.text.to_string(),
            found: tok.to_string(),
            offset,
        }
    }

    fn parse_type(&mut self, in_args: bool) -> Result<TypeRef, TypeParseError> {
        let (offset, tok) = self.next()?;
        let mut ty = match tok {
            Tok::Punct('?') if in_args => {
                let bound = if self.eat_keyword("extends") {
                    Some(WildcardBound::Extends(Box::new(self.parse_type(false)?)))
                } else if self.eat_keyword("super") {
                    Some(WildcardBound::Super(Box::new(self.parse_type(false)?)))
                } else {
                    None
                };
                return Ok(TypeRef::Wildcard(bound));
            }
            Tok::Ident(name) => match PrimitiveType::from_keyword(&name) {
                Some(p) => TypeRef::Primitive(p),
                None => {
                    let valid = name.split('.').all(|segment| {
                        segment
                            .chars()
                            .next()
                            .is_some_and(|c| !c.is_ascii_digit())
                    });
                    if !valid {
                        return Err(self.unexpected(offset, &Tok::Ident(name)));
                    }
                    let args = if self.eat('<') {
                        self.parse_args()?
                    } else {
                        vec![]
                    };
                    TypeRef::Class { name, args }
                }
            },
            other => return Err(self.unexpected(offset, &other)),
        };

        while self.eat('[') {
            let (offset, tok) = self.next()?;
            if tok != Tok::Punct(']') {
                return Err(self.unexpected(offset, &tok));
            }
            ty = TypeRef::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn parse_args(&mut self) -> Result<Vec<TypeRef>, TypeParseError> {
        let mut args = Vec::new();
        loop {
            let arg = self.parse_type(true)?;
            if let TypeRef::Primitive(p) = arg {
                return Err(TypeParseError::PrimitiveArgument {
                    keyword: p.keyword().to_string(),
                });
            }
            args.push(arg);

            let (offset, tok) = self.next()?;
            match tok {
                Tok::Punct(',') => continue,
                Tok::Punct('>') => break,
                other => return Err(self.unexpected(offset, &other)),
            }
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> TypeRef {
        text.parse().expect("type parses")
    }

    #[test]
    fn primitives_parse_by_keyword() {
        for p in PrimitiveType::ALL {
            assert_eq!(parse(p.keyword()), TypeRef::Primitive(p));
        }
    }

    #[test]
    fn qualified_generic_presents_simple_names() {
        let ty = parse("java.util.Map<java.lang.String, java.util.List<Integer>>");
        assert_eq!(ty.simple_name(), Some("Map"));
        assert_eq!(ty.presentable_text(), "Map<String, List<Integer>>");
        assert_eq!(
            ty.to_string(),
            "java.util.Map<java.lang.String, java.util.List<Integer>>"
        );
    }

    #[test]
    fn qualified_names_walk_arguments_and_arrays() {
        let ty = parse("java.util.Set<java.util.UUID>[]");
        let names: Vec<_> = ty.qualified_names().into_iter().collect();
        assert_eq!(names, vec!["java.util.Set", "java.util.UUID"]);
    }

    #[test]
    fn nested_classes_keep_their_outer_class() {
        let ty = parse("java.util.Map.Entry<String, Integer>");
        assert_eq!(ty.presentable_text(), "Entry<String, Integer>");
        assert_eq!(ty.declaration_text(), "Map.Entry<String, Integer>");
        let names: Vec<_> = ty.qualified_names().into_iter().collect();
        assert_eq!(names, vec!["java.util.Map"]);

        let unqualified = parse("Map.Entry<String, Integer>");
        assert_eq!(unqualified.declaration_text(), "Map.Entry<String, Integer>");
        assert!(unqualified.qualified_names().is_empty());
    }

    #[test]
    fn declaration_text_drops_packages_only() {
        assert_eq!(parse("java.util.List<java.util.UUID>").declaration_text(), "List<UUID>");
        assert_eq!(parse("Address[]").declaration_text(), "Address[]");
        assert_eq!(split_package("com.acme.Outer.Inner"), (Some("com.acme"), "Outer.Inner"));
        assert_eq!(split_package("Outer.Inner"), (None, "Outer.Inner"));
        assert_eq!(split_package("String"), (None, "String"));
    }

    #[test]
    fn arrays_nest_outermost_last() {
        let ty = parse("int[][]");
        assert_eq!(
            ty,
            TypeRef::array_of(TypeRef::array_of(TypeRef::Primitive(PrimitiveType::Int)))
        );
        assert_eq!(ty.presentable_text(), "int[][]");
        assert!(ty.is_array());
        assert_eq!(ty.simple_name(), None);
    }

    #[test]
    fn wildcards_only_inside_arguments() {
        let ty = parse("List<? extends Number>");
        assert_eq!(ty.presentable_text(), "List<? extends Number>");
        assert_eq!(
            parse("Map<?, ? super Integer>").presentable_text(),
            "Map<?, ? super Integer>"
        );
        assert!("?".parse::<TypeRef>().is_err());
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(parse(" Map < String ,Integer > "), parse("Map<String, Integer>"));
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert_eq!("".parse::<TypeRef>(), Err(TypeParseError::Empty));
        assert!(matches!(
            "List<String".parse::<TypeRef>(),
            Err(TypeParseError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            "List<int>".parse::<TypeRef>(),
            Err(TypeParseError::PrimitiveArgument { keyword }) if keyword == "int"
        ));
        assert!(matches!(
            "int[5]".parse::<TypeRef>(),
            Err(TypeParseError::Unexpected { found, .. }) if found == "5"
        ));
        assert!(matches!(
            "java..List".parse::<TypeRef>(),
            Err(TypeParseError::Unexpected { .. })
        ));
        assert!(matches!(
            "String;".parse::<TypeRef>(),
            Err(TypeParseError::Unexpected { offset: 6, .. })
        ));
    }

    #[test]
    fn serializes_as_source_text() {
        let ty = parse("java.util.List<String>");
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(json, "\"java.util.List<String>\"");
        let back: TypeRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ty);
        assert!(serde_json::from_str::<TypeRef>("\"List<\"").is_err());
    }
}
