//! Metadata sources
//!
//! The converter reads entity, attribute and relationship definitions through
//! the [`MetadataProvider`] trait. Lookups are synchronous and must be
//! side-effect free; a provider is expected to return a stable snapshot for the
//! duration of a conversion.

mod cached;
mod memory;

pub use cached::*;
pub use memory::*;

use std::sync::Arc;

use crate::error::MetadataError;
use crate::model::metadata::EntityMetadata;

/// Trait for metadata providers.
///
/// Implementations resolve entity metadata by logical name or by object type
/// code.
///
/// # Example
///
/// ```
/// use fetchxml_lib::metadata::{InMemoryMetadata, MetadataProvider};
/// use fetchxml_lib::model::metadata::EntityMetadata;
///
/// let metadata = InMemoryMetadata::new()
///     .with_entity(EntityMetadata::new("account", "accounts", "accountid").with_object_type_code(1));
///
/// assert!(metadata.is_connected());
/// assert_eq!(metadata.entity_by_type_code(1).unwrap().logical_name(), "account");
/// ```
pub trait MetadataProvider: Send + Sync {
    /// Returns `true` if the provider can serve lookups.
    fn is_connected(&self) -> bool;

    /// Retrieves an entity by logical name.
    fn entity(&self, logical_name: &str) -> Result<Arc<EntityMetadata>, MetadataError>;

    /// Retrieves an entity by object type code.
    fn entity_by_type_code(&self, code: i32) -> Result<Arc<EntityMetadata>, MetadataError>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for Arc<P> {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn entity(&self, logical_name: &str) -> Result<Arc<EntityMetadata>, MetadataError> {
        (**self).entity(logical_name)
    }

    fn entity_by_type_code(&self, code: i32) -> Result<Arc<EntityMetadata>, MetadataError> {
        (**self).entity_by_type_code(code)
    }
}
