//! Type classification explanations for the `classify` and `list-categories` commands.

use anyhow::Context;
use buildergen_domain::{DefaultValueStyle, TypeCategory, classify, default_initializer};
use buildergen_types::TypeRef;
use serde::Serialize;

/// One representative declared type per category, in match order.
pub static CATEGORY_EXAMPLES: &[(TypeCategory, &str)] = &[
    (TypeCategory::SmallInteger, "int"),
    (TypeCategory::LongInteger, "Long"),
    (TypeCategory::Boolean, "boolean"),
    (TypeCategory::Float, "float"),
    (TypeCategory::Double, "Double"),
    (TypeCategory::Text, "String"),
    (TypeCategory::Date, "java.util.Date"),
    (TypeCategory::DateTime, "java.time.LocalDateTime"),
    (TypeCategory::Uuid, "java.util.UUID"),
    (TypeCategory::Set, "Set<String>"),
    (TypeCategory::List, "List<String>"),
    (TypeCategory::Map, "Map<String, Integer>"),
    (TypeCategory::Array, "int[][]"),
    (TypeCategory::Other, "Address"),
];

/// What the materializer would do with a declared type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeExplanation {
    #[serde(rename = "type")]
    pub type_text: String,
    pub presentable: String,
    pub category: &'static str,
    pub rule: &'static str,
    pub initializer: Option<String>,
    pub imports: Vec<String>,
}

pub fn explain_type(text: &str, style: DefaultValueStyle) -> anyhow::Result<TypeExplanation> {
    let ty: TypeRef = text
        .parse()
        .with_context(|| format!("parse type `{}`", text))?;
    Ok(explain(&ty, style))
}

fn explain(ty: &TypeRef, style: DefaultValueStyle) -> TypeExplanation {
    let category = classify(ty);
    let initializer = default_initializer(ty, style);
    TypeExplanation {
        type_text: ty.to_string(),
        presentable: ty.presentable_text(),
        category: category.label(),
        rule: category.rule(),
        imports: initializer
            .as_ref()
            .map(|e| e.imports.clone())
            .unwrap_or_default(),
        initializer: initializer.map(|e| e.text),
    }
}

/// Explanations for every category's example type, in match order.
pub fn category_table(style: DefaultValueStyle) -> Vec<TypeExplanation> {
    CATEGORY_EXAMPLES
        .iter()
        .filter_map(|(_, text)| text.parse::<TypeRef>().ok())
        .map(|ty| explain(&ty, style))
        .collect()
}
