use buildergen_types::{PrimitiveType, TypeRef};

/// Classification of a declared field type, used to pick a default initializer.
///
/// Variants are listed in match precedence order; [`classify`] returns the first that
/// applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    SmallInteger,
    LongInteger,
    Boolean,
    Float,
    Double,
    Text,
    Date,
    DateTime,
    Uuid,
    Set,
    List,
    Map,
    Array,
    Other,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 14] = [
        TypeCategory::SmallInteger,
        TypeCategory::LongInteger,
        TypeCategory::Boolean,
        TypeCategory::Float,
        TypeCategory::Double,
        TypeCategory::Text,
        TypeCategory::Date,
        TypeCategory::DateTime,
        TypeCategory::Uuid,
        TypeCategory::Set,
        TypeCategory::List,
        TypeCategory::Map,
        TypeCategory::Array,
        TypeCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TypeCategory::SmallInteger => "small-integer",
            TypeCategory::LongInteger => "long-integer",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Float => "float",
            TypeCategory::Double => "double",
            TypeCategory::Text => "text",
            TypeCategory::Date => "date",
            TypeCategory::DateTime => "date-time",
            TypeCategory::Uuid => "uuid",
            TypeCategory::Set => "set",
            TypeCategory::List => "list",
            TypeCategory::Map => "map",
            TypeCategory::Array => "array",
            TypeCategory::Other => "other",
        }
    }

    /// Human-readable match rule.
    pub fn rule(self) -> &'static str {
        match self {
            TypeCategory::SmallInteger => "int/Integer, short/Short, byte/Byte",
            TypeCategory::LongInteger => "long/Long",
            TypeCategory::Boolean => "boolean/Boolean",
            TypeCategory::Float => "float/Float",
            TypeCategory::Double => "double/Double",
            TypeCategory::Text => "type text is `String`",
            TypeCategory::Date => "type text is `Date`",
            TypeCategory::DateTime => "type text is `LocalDateTime`",
            TypeCategory::Uuid => "type text is `UUID`",
            TypeCategory::Set => "type text starts with `Set`",
            TypeCategory::List => "type text starts with `List`",
            TypeCategory::Map => "type text starts with `Map`",
            TypeCategory::Array => "type text contains `[]`",
            TypeCategory::Other => "anything else",
        }
    }
}

/// Classify a declared type.
///
/// Matching is textual on the presentable (unqualified) type text, so `Integer` and `int`
/// land in the same category and `Listener` counts as a list.
pub fn classify(ty: &TypeRef) -> TypeCategory {
    let primitive = ty.as_primitive();
    let text = ty.presentable_text();
    let is = |p: PrimitiveType| primitive == Some(p) || text == p.boxed_name();

    if is(PrimitiveType::Int) || is(PrimitiveType::Short) || is(PrimitiveType::Byte) {
        TypeCategory::SmallInteger
    } else if is(PrimitiveType::Long) {
        TypeCategory::LongInteger
    } else if is(PrimitiveType::Boolean) {
        TypeCategory::Boolean
    } else if is(PrimitiveType::Float) {
        TypeCategory::Float
    } else if is(PrimitiveType::Double) {
        TypeCategory::Double
    } else if text == "String" {
        TypeCategory::Text
    } else if text == "Date" {
        TypeCategory::Date
    } else if text == "LocalDateTime" {
        TypeCategory::DateTime
    } else if text == "UUID" {
        TypeCategory::Uuid
    } else if text.starts_with("Set") {
        TypeCategory::Set
    } else if text.starts_with("List") {
        TypeCategory::List
    } else if text.starts_with("Map") {
        TypeCategory::Map
    } else if text.contains("[]") {
        TypeCategory::Array
    } else {
        TypeCategory::Other
    }
}
