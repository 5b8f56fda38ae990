//! Per-conversion state.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ConvertError;
use crate::metadata::MetadataProvider;
use crate::model::metadata::EntityMetadata;
use crate::query::fetchxml::Entity;

/// State shared by every pass of a single conversion.
///
/// Holds the metadata source, the root entity, and the two range variable
/// counters. Variable names are unique across the whole output URL, so the
/// counters live here rather than in any one pass.
pub(crate) struct Compilation<'a> {
    metadata: &'a dyn MetadataProvider,
    root: &'a Entity,
    entities: HashMap<String, Arc<EntityMetadata>>,
    next_lambda: u32,
    next_join: u32,
}

impl<'a> Compilation<'a> {
    pub(crate) fn new(metadata: &'a dyn MetadataProvider, root: &'a Entity) -> Self {
        Self {
            metadata,
            root,
            entities: HashMap::new(),
            next_lambda: 1,
            next_join: 1,
        }
    }

    /// The root `<entity>` of the query.
    pub(crate) fn root(&self) -> &'a Entity {
        self.root
    }

    /// Looks up an entity, remembering the result for this conversion.
    pub(crate) fn entity(&mut self, logical_name: &str) -> Result<Arc<EntityMetadata>, ConvertError> {
        if let Some(entity) = self.entities.get(logical_name) {
            return Ok(Arc::clone(entity));
        }

        let entity = self.metadata.entity(logical_name)?;
        self.entities
            .insert(logical_name.to_string(), Arc::clone(&entity));
        Ok(entity)
    }

    /// Looks up an entity by object type code.
    pub(crate) fn entity_by_type_code(&self, code: i32) -> Result<Arc<EntityMetadata>, ConvertError> {
        Ok(self.metadata.entity_by_type_code(code)?)
    }

    /// Allocates the next `x<N>` variable for an any/all condition.
    pub(crate) fn next_lambda_variable(&mut self) -> String {
        let id = self.next_lambda;
        self.next_lambda += 1;
        format!("x{}", id)
    }

    /// Allocates the next `o<N>` variable for an inner join on a collection.
    pub(crate) fn next_join_variable(&mut self) -> String {
        let id = self.next_join;
        self.next_join += 1;
        format!("o{}", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::InMemoryMetadata;

    #[test]
    fn test_counters_are_independent() {
        let metadata = InMemoryMetadata::new();
        let root = Entity::new("account");
        let mut ctx = Compilation::new(&metadata, &root);

        assert_eq!(ctx.next_lambda_variable(), "x1");
        assert_eq!(ctx.next_join_variable(), "o1");
        assert_eq!(ctx.next_lambda_variable(), "x2");
        assert_eq!(ctx.next_join_variable(), "o2");
    }

    #[test]
    fn test_entity_not_found() {
        let metadata = InMemoryMetadata::new();
        let root = Entity::new("account");
        let mut ctx = Compilation::new(&metadata, &root);

        assert!(ctx.entity("account").unwrap_err().is_not_found());
    }
}
