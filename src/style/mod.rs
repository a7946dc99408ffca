//! Style module - The typed map style document model.
//!
//! Layers, sources, filters, and property functions as closed tagged
//! unions over their wire forms.

mod document;
mod filter;
mod function;
mod layer;
mod source;

pub use document::*;
pub use filter::*;
pub use function::*;
pub use layer::*;
pub use source::*;
