//! Attribute metadata types

use serde::Deserialize;
use serde::Serialize;

/// Metadata for an entity attribute (column).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeMetadata {
    /// The logical name of the attribute (e.g., "name", "accountid").
    pub logical_name: String,

    /// The attribute type.
    pub attribute_type: AttributeType,

    /// For lookup attributes, the targets (entity logical names).
    ///
    /// Carried for callers inspecting the schema. Links are resolved from the
    /// relationship records, never from this list.
    #[serde(default)]
    pub targets: Vec<String>,

    /// For managed properties, the type of the wrapped `Value`.
    #[serde(default)]
    pub value_attribute_type_code: Option<AttributeType>,
}

impl AttributeMetadata {
    /// Creates attribute metadata of the given type.
    pub fn new(logical_name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            logical_name: logical_name.into(),
            attribute_type,
            targets: Vec::new(),
            value_attribute_type_code: None,
        }
    }

    /// Creates a lookup attribute pointing at the given entities.
    pub fn lookup<I, S>(logical_name: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            ..Self::new(logical_name, AttributeType::Lookup)
        }
    }

    /// Creates a managed property wrapping a value of the given type.
    pub fn managed_property(logical_name: impl Into<String>, value_type: AttributeType) -> Self {
        Self {
            value_attribute_type_code: Some(value_type),
            ..Self::new(logical_name, AttributeType::ManagedProperty)
        }
    }

    /// Returns true if this is a lookup attribute.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self.attribute_type,
            AttributeType::Lookup | AttributeType::Customer | AttributeType::Owner
        )
    }

    /// Returns true if this is a managed property.
    pub fn is_managed_property(&self) -> bool {
        self.attribute_type == AttributeType::ManagedProperty
    }

    /// Returns the type that literal values for this attribute are written in.
    ///
    /// Managed properties compare against their wrapped `Value`.
    pub fn value_type(&self) -> AttributeType {
        match (self.attribute_type, self.value_attribute_type_code) {
            (AttributeType::ManagedProperty, Some(inner)) => inner,
            (other, _) => other,
        }
    }

    /// Returns the Web API property name for this attribute.
    ///
    /// Lookups are exposed as `_<name>_value`.
    pub fn property_name(&self) -> String {
        if self.is_lookup() {
            format!("_{}_value", self.logical_name)
        } else {
            self.logical_name.clone()
        }
    }
}

/// Attribute type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    /// Boolean (true/false).
    Boolean,
    /// Customer lookup (account or contact).
    Customer,
    /// Date and time.
    DateTime,
    /// Decimal number.
    Decimal,
    /// Double-precision floating point.
    Double,
    /// Integer.
    Integer,
    /// Lookup to another entity.
    Lookup,
    /// Multi-line text.
    Memo,
    /// Currency value.
    Money,
    /// Owner lookup (user or team).
    Owner,
    /// Party list (activity parties).
    PartyList,
    /// Option set (picklist).
    Picklist,
    /// State (statecode).
    State,
    /// Status (statuscode).
    Status,
    /// Single-line text.
    String,
    /// Unique identifier (GUID).
    Uniqueidentifier,
    /// Virtual attribute (computed).
    Virtual,
    /// Big integer.
    BigInt,
    /// Managed property.
    ManagedProperty,
    /// Entity name.
    EntityName,
    /// Any type this crate does not distinguish.
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_name() {
        assert_eq!(
            AttributeMetadata::lookup("primarycontactid", ["contact"]).property_name(),
            "_primarycontactid_value"
        );
        assert_eq!(
            AttributeMetadata::new("ownerid", AttributeType::Owner).property_name(),
            "_ownerid_value"
        );
        assert_eq!(
            AttributeMetadata::new("name", AttributeType::String).property_name(),
            "name"
        );
    }

    #[test]
    fn test_managed_property_value_type() {
        let attr = AttributeMetadata::managed_property("iscustomizable", AttributeType::Boolean);
        assert!(attr.is_managed_property());
        assert_eq!(attr.value_type(), AttributeType::Boolean);

        let attr = AttributeMetadata::new("revenue", AttributeType::Money);
        assert_eq!(attr.value_type(), AttributeType::Money);
    }

    #[test]
    fn test_unknown_attribute_type_deserializes() {
        let attr: AttributeMetadata =
            serde_json::from_str(r#"{ "LogicalName": "rules", "AttributeType": "CalendarRules" }"#).unwrap();
        assert_eq!(attr.attribute_type, AttributeType::Other);
    }
}
