//! Metadata lookup errors

/// Errors returned by a [`MetadataProvider`](crate::metadata::MetadataProvider).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// No entity with this logical name.
    #[error("Entity '{logical_name}' not found")]
    EntityNotFound { logical_name: String },

    /// No entity with this object type code.
    #[error("Entity with object type code {code} not found")]
    TypeCodeNotFound { code: i32 },

    /// The entity has neither an entity set name nor a logical collection name.
    #[error("Entity '{logical_name}' has no collection name")]
    MissingCollectionName { logical_name: String },

    /// Metadata could not be loaded from its serialized form.
    #[error("Failed to load metadata: {message}")]
    Load { message: String },
}

impl MetadataError {
    /// Creates a new entity not found error.
    pub fn entity_not_found(logical_name: impl Into<String>) -> Self {
        Self::EntityNotFound {
            logical_name: logical_name.into(),
        }
    }
}

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Load {
            message: err.to_string(),
        }
    }
}
