//! Embeddable core library for buildergen.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into an editor plugin host or other process that owns a program model.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`ClassSource`](ports::ClassSource): load the source class description
//! - [`FieldSelector`](ports::FieldSelector): pick the fields the builder covers
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides default filesystem-backed and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_generate`](pipeline::run_generate): synthesize and render a builder class
//! - [`write_generated`](pipeline::write_generated): persist the rendered source

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-exported so embedders don't need buildergen-domain / buildergen-edit directly.
pub use buildergen_domain::{DefaultValueStyle, InMemoryLocation, TargetLocation};
pub use buildergen_edit::ProgramModel;
