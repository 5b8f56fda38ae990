//! Schema metadata records
//!
//! Field names follow the Web API `EntityDefinitions` payload (PascalCase), so
//! the records can be deserialized directly from a metadata response.

mod attribute;
mod entity;
mod relationship;

pub use attribute::*;
pub use entity::*;
pub use relationship::*;
