//! In-memory metadata provider

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use super::MetadataProvider;
use crate::error::MetadataError;
use crate::model::metadata::EntityMetadata;

/// A metadata provider backed by a fixed set of entity definitions.
///
/// Entities can be added programmatically or loaded from a Web API
/// `EntityDefinitions` response.
///
/// # Example
///
/// ```
/// use fetchxml_lib::metadata::{InMemoryMetadata, MetadataProvider};
///
/// let json = r#"{ "value": [
///     { "LogicalName": "account", "EntitySetName": "accounts", "PrimaryIdAttribute": "accountid" }
/// ] }"#;
///
/// let metadata = InMemoryMetadata::from_json(json).unwrap();
/// assert_eq!(metadata.entity("account").unwrap().collection_name().unwrap(), "accounts");
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryMetadata {
    entities: HashMap<String, Arc<EntityMetadata>>,
    connected: bool,
}

/// Accepted shapes of a serialized entity list.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntityDefinitions {
    Collection { value: Vec<EntityMetadata> },
    List(Vec<EntityMetadata>),
}

impl InMemoryMetadata {
    /// Creates a new, connected provider with no entities.
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            connected: true,
        }
    }

    /// Loads entities from JSON, either an `{"value": [...]}` response body or a
    /// bare array of entity definitions.
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let entities = match serde_json::from_str::<EntityDefinitions>(json)? {
            EntityDefinitions::Collection { value } => value,
            EntityDefinitions::List(list) => list,
        };
        Ok(entities.into_iter().fold(Self::new(), Self::with_entity))
    }

    /// Adds an entity, replacing any existing entity with the same logical name.
    pub fn with_entity(mut self, entity: EntityMetadata) -> Self {
        self.insert(entity);
        self
    }

    /// Sets whether the provider reports itself as connected.
    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    /// Adds an entity, replacing any existing entity with the same logical name.
    pub fn insert(&mut self, entity: EntityMetadata) {
        self.entities
            .insert(entity.logical_name().to_string(), Arc::new(entity));
    }

    /// Returns the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if there are no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for InMemoryMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataProvider for InMemoryMetadata {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn entity(&self, logical_name: &str) -> Result<Arc<EntityMetadata>, MetadataError> {
        self.entities
            .get(logical_name)
            .cloned()
            .ok_or_else(|| MetadataError::entity_not_found(logical_name))
    }

    fn entity_by_type_code(&self, code: i32) -> Result<Arc<EntityMetadata>, MetadataError> {
        self.entities
            .values()
            .find(|e| e.object_type_code() == Some(code))
            .cloned()
            .ok_or(MetadataError::TypeCodeNotFound { code })
    }
}
