//! # Map Style Diff
//!
//! Minimal update operations between two versions of a declarative map
//! style document.
//!
//! Given a previous and a next style document of the same schema version,
//! the diff engine produces an ordered sequence of semantically meaningful
//! operations (add/remove/update layer, source, paint property, layout
//! property, filter, camera parameters) that downstream consumers replay
//! against a live rendering engine instead of reloading the whole style.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of JSON values with deep
//!   structural equality
//! - [`style`] - The typed style document model (layers, sources, filters,
//!   property functions)
//! - [`reference`] - The schema/reference document enumerating valid
//!   properties and their metadata
//! - [`diff`] - The diff engine and its operation wire shape
//! - [`declass`] - Flattening class-scoped paint overlays
//! - [`migrate`] - One version step of the migration chain

pub mod declass;
pub mod diff;
pub mod migrate;
pub mod reference;
pub mod style;
pub mod value;

pub use declass::declassify;
pub use diff::{diff, Operation};
pub use migrate::{migrate, MigrateError};
pub use reference::{PropertyCategory, PropertyDescriptor, StyleReference};
pub use style::{
    FilterExpression, FunctionSpec, LayerSpec, LayerType, PropertyValue, SourceSpec, StyleDocument,
};
pub use value::Value;
