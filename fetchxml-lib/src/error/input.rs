//! Malformed query input

/// Errors caused by a query that is malformed or inconsistent with the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The fetch has no `<entity>` element.
    #[error("Fetch must contain entity definition")]
    MissingEntity,

    /// The attribute does not exist on the entity.
    #[error("No metadata for attribute: {entity}.{attribute}")]
    UnknownAttribute { entity: String, attribute: String },

    /// A condition's `entityname` matches no link-entity in the query.
    #[error("Cannot find filter entity {entity_name}")]
    UnknownEntityName { entity_name: String },

    /// The operator requires a value but the condition has none.
    #[error("Condition on {attribute} with operator {operator} requires a value")]
    MissingValue { attribute: String, operator: String },

    /// The operator requires a specific number of `<value>` elements.
    #[error("Condition on {attribute} with operator {operator} requires {expected} values, found {found}")]
    ValueCount {
        attribute: String,
        operator: String,
        expected: usize,
        found: usize,
    },

    /// A literal could not be parsed as the attribute's type.
    #[error("Invalid {expected} value '{value}': {message}")]
    InvalidValue {
        value: String,
        expected: &'static str,
        message: String,
    },
}

impl InputError {
    /// Creates a new unknown attribute error.
    pub fn unknown_attribute(entity: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            entity: entity.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates a new invalid value error.
    pub fn invalid_value(value: impl Into<String>, expected: &'static str, message: impl ToString) -> Self {
        Self::InvalidValue {
            value: value.into(),
            expected,
            message: message.to_string(),
        }
    }
}
