//! Naming conventions for generated members.

/// Reserved words and literals that cannot be used as Java identifiers.
pub const JAVA_RESERVED: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
    "_",
];

/// Upper-case the first character; the rest is unchanged.
///
/// The mapping is one character to one: a first character without a single-character
/// upper-case form (`ß`) is kept as is.
pub fn capitalize(name: &str) -> String {
    map_first(name, |c| single(c.to_uppercase()))
}

/// Lower-case the first character; the rest is unchanged.
pub fn uncapitalize(name: &str) -> String {
    map_first(name, |c| single(c.to_lowercase()))
}

fn map_first(name: &str, f: impl Fn(char) -> Option<char>) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => std::iter::once(f(first).unwrap_or(first))
            .chain(chars)
            .collect(),
        None => String::new(),
    }
}

fn single(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    let c = mapped.next()?;
    mapped.next().is_none().then_some(c)
}

/// Name of the builder's backing field and of the local built in `build()`.
pub fn backing_field_name(source_class: &str) -> String {
    uncapitalize(source_class)
}

/// Static factory name. Always `a` + class name, even for vowel-initial names.
pub fn factory_method_name(source_class: &str) -> String {
    format!("a{source_class}")
}

pub fn with_setter_name(field: &str) -> String {
    format!("with{}", capitalize(field))
}

/// Conventional JavaBean setter on the source class.
pub fn bean_setter_name(field: &str) -> String {
    format!("set{}", capitalize(field))
}

pub fn default_builder_name(source_class: &str, suffix: &str) -> String {
    format!("{source_class}{suffix}")
}

pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        return false;
    }
    !JAVA_RESERVED.contains(&name)
}
