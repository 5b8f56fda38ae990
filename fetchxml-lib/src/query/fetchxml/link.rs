//! FetchXML `<link-entity>` elements.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use super::Attribute;
use super::EntityNode;
use super::Filter;
use super::Order;
use crate::error::UnsupportedError;

/// The `link-type` of a link-entity.
///
/// `Inner` and `Outer` are joins. The any/all kinds only make sense on a
/// link-entity placed inside a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LinkType {
    /// Inner join (default).
    #[default]
    Inner,
    /// Left outer join.
    Outer,
    Any,
    All,
    NotAny,
    NotAll,
}

impl LinkType {
    /// Returns the FetchXML token for this link type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Outer => "outer",
            Self::Any => "any",
            Self::All => "all",
            Self::NotAny => "not any",
            Self::NotAll => "not all",
        }
    }

    /// Returns `true` for `not any` and `not all`.
    pub fn is_negated(self) -> bool {
        matches!(self, Self::NotAny | Self::NotAll)
    }

    /// Returns the OData lambda operator, or `None` for joins.
    pub fn lambda(self) -> Option<&'static str> {
        match self {
            Self::Any | Self::NotAny => Some("any"),
            Self::All | Self::NotAll => Some("all"),
            Self::Inner | Self::Outer => None,
        }
    }

    /// Toggles the `not` prefix of an any/all link type.
    pub fn negate(self) -> Result<Self, UnsupportedError> {
        match self {
            Self::Any => Ok(Self::NotAny),
            Self::All => Ok(Self::NotAll),
            Self::NotAny => Ok(Self::Any),
            Self::NotAll => Ok(Self::All),
            Self::Inner | Self::Outer => Err(UnsupportedError::NonInvertibleLinkType {
                link_type: self.to_string(),
            }),
        }
    }
}

impl FromStr for LinkType {
    type Err = UnsupportedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "inner" => Ok(Self::Inner),
            "outer" => Ok(Self::Outer),
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            "not any" => Ok(Self::NotAny),
            "not all" => Ok(Self::NotAll),
            other => Err(UnsupportedError::LinkType {
                link_type: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LinkType {
    type Error = UnsupportedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LinkType> for String {
    fn from(link_type: LinkType) -> Self {
        link_type.as_str().to_string()
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `<link-entity>` element.
///
/// # Example
///
/// ```
/// use fetchxml_lib::query::fetchxml::{LinkEntity, LinkType};
///
/// let link = LinkEntity::new("contact", "contactid", "primarycontactid")
///     .link_type(LinkType::Outer)
///     .alias("pc")
///     .attribute("firstname");
/// assert_eq!(link.attributes[0].name, "firstname");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntity {
    /// Logical name of the joined entity.
    pub name: String,
    /// Attribute on the joined entity.
    pub from: String,
    /// Attribute on the parent entity.
    pub to: String,
    #[serde(default, rename = "link-type")]
    pub link_type: LinkType,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default, rename = "all-attributes")]
    pub all_attributes: bool,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub links: Vec<LinkEntity>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl LinkEntity {
    /// Creates an inner join to `name` on `name.from = parent.to`.
    pub fn new(name: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: from.into(),
            to: to.into(),
            link_type: LinkType::default(),
            alias: None,
            attributes: Vec::new(),
            all_attributes: false,
            filters: Vec::new(),
            links: Vec::new(),
            orders: Vec::new(),
        }
    }

    /// Sets the link type.
    pub fn link_type(mut self, link_type: LinkType) -> Self {
        self.link_type = link_type;
        self
    }

    /// Sets the alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds an attribute.
    pub fn attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Selects every attribute.
    pub fn all_attributes(mut self) -> Self {
        self.all_attributes = true;
        self
    }

    /// Adds a filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds a nested link-entity.
    pub fn link(mut self, link: LinkEntity) -> Self {
        self.links.push(link);
        self
    }

    /// Adds an order.
    pub fn order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// Returns `true` if the link-entity has any child elements.
    pub fn has_content(&self) -> bool {
        !self.attributes.is_empty()
            || self.all_attributes
            || !self.filters.is_empty()
            || !self.links.is_empty()
            || !self.orders.is_empty()
    }

    /// Returns `true` if a condition's `entityname` refers to this link.
    ///
    /// Matches the alias, or the entity name when there is no alias.
    pub fn is_referenced_by(&self, entity_name: &str) -> bool {
        match &self.alias {
            Some(alias) => alias == entity_name,
            None => self.name == entity_name,
        }
    }
}

impl EntityNode for LinkEntity {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn selects_all_attributes(&self) -> bool {
        self.all_attributes
    }

    fn filters(&self) -> &[Filter] {
        &self.filters
    }

    fn links(&self) -> &[LinkEntity] {
        &self.links
    }

    fn orders(&self) -> &[Order] {
        &self.orders
    }
}
