use crate::category::{TypeCategory, classify};
use buildergen_types::{Expression, FieldDeclaration, Modifier, TypeRef};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

/// Length of generated random strings.
pub const RANDOM_TEXT_LEN: usize = 5;

/// Fixed length used when allocating default arrays.
pub const DEFAULT_ARRAY_LEN: usize = 5;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// How random defaults (text, UUID) are expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValueStyle {
    /// Emit expressions that produce a fresh value at runtime.
    #[default]
    Expression,
    /// Generate the value now and emit it as a literal.
    Literal,
}

/// Synthesize the default initializer for a declared type, or `None` when the type is
/// unclassified.
pub fn default_initializer(ty: &TypeRef, style: DefaultValueStyle) -> Option<Expression> {
    let expr = match classify(ty) {
        TypeCategory::SmallInteger => Expression::new("1"),
        TypeCategory::LongInteger => Expression::new("1L"),
        TypeCategory::Boolean => Expression::new("false"),
        TypeCategory::Float => Expression::new("2.4f"),
        TypeCategory::Double => Expression::new("1.4d"),
        TypeCategory::Text => match style {
            DefaultValueStyle::Expression => Expression::new(format!(
                "RandomStringUtils.randomAlphabetic({RANDOM_TEXT_LEN})"
            ))
            .with_import("org.apache.commons.lang3.RandomStringUtils"),
            DefaultValueStyle::Literal => {
                Expression::new(format!("\"{}\"", random_alphabetic(RANDOM_TEXT_LEN)))
            }
        },
        TypeCategory::Date => Expression::new("new Date()").with_import("java.util.Date"),
        TypeCategory::DateTime => {
            Expression::new("LocalDateTime.now()").with_import("java.time.LocalDateTime")
        }
        TypeCategory::Uuid => {
            let text = match style {
                DefaultValueStyle::Expression => "UUID.randomUUID()".to_string(),
                DefaultValueStyle::Literal => format!("UUID.fromString(\"{}\")", Uuid::new_v4()),
            };
            Expression::new(text).with_import("java.util.UUID")
        }
        TypeCategory::Set => Expression::new("new HashSet<>()").with_import("java.util.HashSet"),
        TypeCategory::List => {
            Expression::new("new ArrayList<>()").with_import("java.util.ArrayList")
        }
        TypeCategory::Map => Expression::new("new HashMap<>()").with_import("java.util.HashMap"),
        TypeCategory::Array => Expression::new(format!(
            "new {}",
            ty.declaration_text()
                .replacen("[]", &format!("[{DEFAULT_ARRAY_LEN}]"), 1)
        )),
        TypeCategory::Other => return None,
    };
    Some(expr)
}

fn random_alphabetic(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Produces builder-internal copies of source fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMaterializer {
    style: DefaultValueStyle,
}

impl FieldMaterializer {
    pub fn new(style: DefaultValueStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> DefaultValueStyle {
        self.style
    }

    /// Copy `field` without annotations, `final` or doc comment, and attach a default
    /// initializer chosen by its type. Unclassified types keep whatever initializer the
    /// copy already carried.
    pub fn materialize(&self, field: &FieldDeclaration) -> FieldDeclaration {
        let mut copy = field.clone();
        copy.annotations.clear();
        copy.remove_modifier(Modifier::Final);
        copy.doc_comment = None;

        if let Some(initializer) = default_initializer(&copy.ty, self.style) {
            trace!(
                field = copy.name.as_str(),
                initializer = initializer.text.as_str(),
                "attach default initializer"
            );
            copy.initializer = Some(initializer);
        }
        copy
    }

    /// Materialize every field of a group, preserving order.
    pub fn materialize_all<'a>(
        &self,
        fields: impl IntoIterator<Item = &'a FieldDeclaration>,
    ) -> Vec<FieldDeclaration> {
        fields.into_iter().map(|f| self.materialize(f)).collect()
    }
}
