//! Domain logic: turn a source class and a field selection into a builder class.
//!
//! This crate owns *what* is generated: default initializers, sanitized field copies, and
//! the ordered builder members. It does not own exclusive access to a shared model (that's
//! `buildergen-edit`) or how classes are printed (`buildergen-render`).

mod category;
mod error;
mod materializer;
pub mod naming;
mod ports;
mod synthesizer;

pub use category::{TypeCategory, classify};
pub use error::{CreationFailure, SynthesisError};
pub use materializer::{
    DEFAULT_ARRAY_LEN, DefaultValueStyle, FieldMaterializer, RANDOM_TEXT_LEN, default_initializer,
};
pub use ports::{ClassId, InMemoryLocation, TargetLocation};
pub use synthesizer::BuilderClassSynthesizer;
