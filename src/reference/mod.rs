//! Reference module - The schema/reference document model.
//!
//! This module provides property descriptors consumed by migration and by
//! anything else that needs per-property metadata.

mod descriptor;
mod latest;

pub use descriptor::*;
pub use latest::*;
