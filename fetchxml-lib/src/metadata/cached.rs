//! Memoizing metadata provider using DashMap

use std::sync::Arc;

use dashmap::DashMap;

use super::MetadataProvider;
use crate::error::MetadataError;
use crate::model::metadata::EntityMetadata;

/// Wraps a provider and remembers every entity it returns.
///
/// Useful in front of a remote schema source. Failed lookups are not cached.
/// Thread-safe, so one instance can serve concurrent conversions.
///
/// # Example
///
/// ```
/// use fetchxml_lib::metadata::{CachedMetadata, InMemoryMetadata, MetadataProvider};
/// use fetchxml_lib::model::metadata::EntityMetadata;
///
/// let inner = InMemoryMetadata::new().with_entity(EntityMetadata::new("account", "accounts", "accountid"));
/// let cached = CachedMetadata::new(inner);
///
/// cached.entity("account").unwrap();
/// assert_eq!(cached.len(), 1);
/// ```
#[derive(Debug)]
pub struct CachedMetadata<P> {
    inner: P,
    by_name: DashMap<String, Arc<EntityMetadata>>,
    by_type_code: DashMap<i32, Arc<EntityMetadata>>,
}

impl<P: MetadataProvider> CachedMetadata<P> {
    /// Creates a new cache in front of `inner`.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            by_name: DashMap::new(),
            by_type_code: DashMap::new(),
        }
    }

    /// Returns the wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Returns the number of entities cached by logical name.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty() && self.by_type_code.is_empty()
    }

    /// Forgets all cached entities.
    pub fn clear(&self) {
        self.by_name.clear();
        self.by_type_code.clear();
    }

    fn remember(&self, entity: &Arc<EntityMetadata>) {
        self.by_name
            .insert(entity.logical_name().to_string(), Arc::clone(entity));
        if let Some(code) = entity.object_type_code() {
            self.by_type_code.insert(code, Arc::clone(entity));
        }
    }
}

impl<P: MetadataProvider> MetadataProvider for CachedMetadata<P> {
    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    fn entity(&self, logical_name: &str) -> Result<Arc<EntityMetadata>, MetadataError> {
        if let Some(entry) = self.by_name.get(logical_name) {
            return Ok(Arc::clone(entry.value()));
        }

        log::trace!("metadata cache miss for entity {}", logical_name);
        let entity = self.inner.entity(logical_name)?;
        self.remember(&entity);
        Ok(entity)
    }

    fn entity_by_type_code(&self, code: i32) -> Result<Arc<EntityMetadata>, MetadataError> {
        if let Some(entry) = self.by_type_code.get(&code) {
            return Ok(Arc::clone(entry.value()));
        }

        log::trace!("metadata cache miss for object type code {}", code);
        let entity = self.inner.entity_by_type_code(code)?;
        self.remember(&entity);
        Ok(entity)
    }
}
