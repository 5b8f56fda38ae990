//! Entity metadata types

use serde::Deserialize;
use serde::Serialize;

use super::AttributeMetadata;
use super::ManyToManyRelationship;
use super::OneToManyRelationship;
use crate::error::MetadataError;

/// Core entity information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityCore {
    /// The logical name of the entity (e.g., "account").
    pub logical_name: String,

    /// The entity set name used in Web API URLs (e.g., "accounts").
    #[serde(default)]
    pub entity_set_name: Option<String>,

    /// The logical collection name, used when no entity set name is available.
    #[serde(default)]
    pub logical_collection_name: Option<String>,

    /// The logical name of the primary ID attribute (e.g., "accountid").
    pub primary_id_attribute: String,

    /// The entity type code (object type code).
    #[serde(default)]
    pub object_type_code: Option<i32>,
}

/// Entity metadata including attributes and relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityMetadata {
    /// Core entity information (logical name, entity set name, etc.).
    #[serde(flatten)]
    pub core: EntityCore,

    /// All attributes of this entity.
    #[serde(default)]
    pub attributes: Vec<AttributeMetadata>,

    /// One-to-many relationships where this entity is the primary (referenced) entity.
    #[serde(default)]
    pub one_to_many_relationships: Vec<OneToManyRelationship>,

    /// Many-to-one relationships where this entity is the related (referencing) entity.
    #[serde(default)]
    pub many_to_one_relationships: Vec<OneToManyRelationship>,

    /// Many-to-many relationships this entity participates in.
    #[serde(default)]
    pub many_to_many_relationships: Vec<ManyToManyRelationship>,
}

impl EntityMetadata {
    /// Creates entity metadata with no attributes or relationships.
    pub fn new(
        logical_name: impl Into<String>,
        entity_set_name: impl Into<String>,
        primary_id_attribute: impl Into<String>,
    ) -> Self {
        Self {
            core: EntityCore {
                logical_name: logical_name.into(),
                entity_set_name: Some(entity_set_name.into()),
                logical_collection_name: None,
                primary_id_attribute: primary_id_attribute.into(),
                object_type_code: None,
            },
            attributes: Vec::new(),
            one_to_many_relationships: Vec::new(),
            many_to_one_relationships: Vec::new(),
            many_to_many_relationships: Vec::new(),
        }
    }

    /// Sets the object type code.
    pub fn with_object_type_code(mut self, code: i32) -> Self {
        self.core.object_type_code = Some(code);
        self
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, attribute: AttributeMetadata) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Adds a one-to-many relationship (this entity is the referenced side).
    pub fn with_one_to_many(mut self, relationship: OneToManyRelationship) -> Self {
        self.one_to_many_relationships.push(relationship);
        self
    }

    /// Adds a many-to-one relationship (this entity is the referencing side).
    pub fn with_many_to_one(mut self, relationship: OneToManyRelationship) -> Self {
        self.many_to_one_relationships.push(relationship);
        self
    }

    /// Adds a many-to-many relationship.
    pub fn with_many_to_many(mut self, relationship: ManyToManyRelationship) -> Self {
        self.many_to_many_relationships.push(relationship);
        self
    }

    /// Returns the logical name of the entity.
    pub fn logical_name(&self) -> &str {
        &self.core.logical_name
    }

    /// Returns the primary ID attribute name.
    pub fn primary_id_attribute(&self) -> &str {
        &self.core.primary_id_attribute
    }

    /// Returns the object type code, if known.
    pub fn object_type_code(&self) -> Option<i32> {
        self.core.object_type_code
    }

    /// Returns the collection name used in Web API URLs.
    ///
    /// Prefers the entity set name and falls back to the logical collection name.
    pub fn collection_name(&self) -> Result<&str, MetadataError> {
        self.core
            .entity_set_name
            .as_deref()
            .or(self.core.logical_collection_name.as_deref())
            .ok_or_else(|| MetadataError::MissingCollectionName {
                logical_name: self.core.logical_name.clone(),
            })
    }

    /// Finds an attribute by logical name.
    pub fn attribute(&self, logical_name: &str) -> Option<&AttributeMetadata> {
        self.attributes
            .iter()
            .find(|a| a.logical_name == logical_name)
    }
}
