//! Relationship metadata types

use serde::Deserialize;
use serde::Serialize;

/// Metadata for a one-to-many (or many-to-one) relationship.
///
/// This is used for both `OneToManyRelationships` and `ManyToOneRelationships`
/// collections on `EntityMetadata`. The perspective determines whether this
/// entity is the "one" or "many" side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneToManyRelationship {
    /// The schema name of the relationship (e.g., "contact_customer_accounts").
    pub schema_name: String,

    /// The logical name of the referenced (primary/"one" side) entity.
    pub referenced_entity: String,

    /// The logical name of the primary key attribute on the referenced entity.
    #[serde(default)]
    pub referenced_attribute: Option<String>,

    /// The logical name of the referencing (related/"many" side) entity.
    pub referencing_entity: String,

    /// The logical name of the lookup attribute on the referencing entity.
    pub referencing_attribute: String,

    /// The navigation property name on the referenced entity (collection).
    #[serde(default)]
    pub referenced_entity_navigation_property_name: Option<String>,

    /// The navigation property name on the referencing entity (single value).
    #[serde(default)]
    pub referencing_entity_navigation_property_name: Option<String>,
}

impl OneToManyRelationship {
    /// Creates a relationship from `referenced_entity.referenced_attribute` to
    /// `referencing_entity.referencing_attribute`.
    ///
    /// Navigation properties default to the schema name on the referenced side
    /// and the lookup attribute name on the referencing side.
    pub fn new(
        schema_name: impl Into<String>,
        referenced_entity: impl Into<String>,
        referenced_attribute: impl Into<String>,
        referencing_entity: impl Into<String>,
        referencing_attribute: impl Into<String>,
    ) -> Self {
        let schema_name = schema_name.into();
        let referencing_attribute = referencing_attribute.into();
        Self {
            referenced_entity_navigation_property_name: Some(schema_name.clone()),
            referencing_entity_navigation_property_name: Some(referencing_attribute.clone()),
            schema_name,
            referenced_entity: referenced_entity.into(),
            referenced_attribute: Some(referenced_attribute.into()),
            referencing_entity: referencing_entity.into(),
            referencing_attribute,
        }
    }

    /// Overrides the navigation property names.
    pub fn with_navigation_properties(
        mut self,
        referenced: impl Into<String>,
        referencing: impl Into<String>,
    ) -> Self {
        self.referenced_entity_navigation_property_name = Some(referenced.into());
        self.referencing_entity_navigation_property_name = Some(referencing.into());
        self
    }
}

/// Metadata for a many-to-many relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManyToManyRelationship {
    /// The schema name of the relationship.
    pub schema_name: String,

    /// The logical name of the first entity in the relationship.
    pub entity1_logical_name: String,

    /// The logical name of the second entity in the relationship.
    pub entity2_logical_name: String,

    /// The navigation property name on entity 1.
    #[serde(default)]
    pub entity1_navigation_property_name: Option<String>,

    /// The navigation property name on entity 2.
    #[serde(default)]
    pub entity2_navigation_property_name: Option<String>,

    /// The logical name of the intersect (junction) entity.
    pub intersect_entity_name: String,

    /// The attribute on the intersect entity referencing entity 1.
    #[serde(default)]
    pub entity1_intersect_attribute: Option<String>,

    /// The attribute on the intersect entity referencing entity 2.
    #[serde(default)]
    pub entity2_intersect_attribute: Option<String>,
}

/// One side of a many-to-many relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManyToManySide<'a> {
    /// The entity on this side.
    pub entity: &'a str,
    /// The intersect entity attribute referencing this side.
    pub intersect_attribute: Option<&'a str>,
    /// The navigation property from this side to the other.
    pub navigation_property: Option<&'a str>,
}

impl ManyToManyRelationship {
    /// Creates a many-to-many relationship. Both navigation properties default
    /// to the schema name.
    pub fn new<E1, A1, E2, A2>(
        schema_name: impl Into<String>,
        intersect_entity_name: impl Into<String>,
        entity1: (E1, A1),
        entity2: (E2, A2),
    ) -> Self
    where
        E1: Into<String>,
        A1: Into<String>,
        E2: Into<String>,
        A2: Into<String>,
    {
        let schema_name = schema_name.into();
        Self {
            entity1_navigation_property_name: Some(schema_name.clone()),
            entity2_navigation_property_name: Some(schema_name.clone()),
            schema_name,
            entity1_logical_name: entity1.0.into(),
            entity1_intersect_attribute: Some(entity1.1.into()),
            entity2_logical_name: entity2.0.into(),
            entity2_intersect_attribute: Some(entity2.1.into()),
            intersect_entity_name: intersect_entity_name.into(),
        }
    }

    /// Returns both orientations of the relationship as `(near, far)` pairs,
    /// entity 1 first.
    pub fn orientations(&self) -> [(ManyToManySide<'_>, ManyToManySide<'_>); 2] {
        let side1 = ManyToManySide {
            entity: &self.entity1_logical_name,
            intersect_attribute: self.entity1_intersect_attribute.as_deref(),
            navigation_property: self.entity1_navigation_property_name.as_deref(),
        };
        let side2 = ManyToManySide {
            entity: &self.entity2_logical_name,
            intersect_attribute: self.entity2_intersect_attribute.as_deref(),
            navigation_property: self.entity2_navigation_property_name.as_deref(),
        };
        [(side1, side2), (side2, side1)]
    }
}
