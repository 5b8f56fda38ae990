//! FetchXML `<entity>`, `<attribute>` and `<order>` elements.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use super::Filter;
use super::LinkEntity;
use crate::error::UnsupportedError;

/// Shared shape of `<entity>` and `<link-entity>`.
pub trait EntityNode {
    /// Logical name of the entity.
    fn name(&self) -> &str;
    fn attributes(&self) -> &[Attribute];
    /// Whether `<all-attributes/>` is present.
    fn selects_all_attributes(&self) -> bool;
    fn filters(&self) -> &[Filter];
    /// Structural joins.
    fn links(&self) -> &[LinkEntity];
    fn orders(&self) -> &[Order];
}

/// The root `<entity>` element.
///
/// # Example
///
/// ```
/// use fetchxml_lib::query::fetchxml::{Entity, Order};
///
/// let entity = Entity::new("account")
///     .attribute("name")
///     .order(Order::desc("createdon"));
/// assert!(entity.orders[0].descending);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
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

impl Entity {
    /// Creates an entity with no child elements.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            all_attributes: false,
            filters: Vec::new(),
            links: Vec::new(),
            orders: Vec::new(),
        }
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

    /// Adds a link-entity.
    pub fn link(mut self, link: LinkEntity) -> Self {
        self.links.push(link);
        self
    }

    /// Adds an order.
    pub fn order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }
}

impl EntityNode for Entity {
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

/// An aggregate function on an `<attribute>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AggregateType {
    /// Row count.
    Count,
    /// Count of distinct non-null values.
    CountColumn,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateType {
    /// Returns the FetchXML token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::CountColumn => "countcolumn",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl FromStr for AggregateType {
    type Err = UnsupportedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(Self::Count),
            "countcolumn" | "countdistinct" => Ok(Self::CountColumn),
            "sum" => Ok(Self::Sum),
            "avg" => Ok(Self::Avg),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(UnsupportedError::Aggregate {
                aggregate: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for AggregateType {
    type Error = UnsupportedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AggregateType> for String {
    fn from(aggregate: AggregateType) -> Self {
        aggregate.as_str().to_string()
    }
}

impl fmt::Display for AggregateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `<attribute>` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default, rename = "groupby")]
    pub group_by: bool,
    #[serde(default)]
    pub aggregate: Option<AggregateType>,
}

impl Attribute {
    /// Creates a plain attribute.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            group_by: false,
            aggregate: None,
        }
    }

    /// Sets the alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Marks the attribute as a group-by key.
    pub fn group_by(mut self) -> Self {
        self.group_by = true;
        self
    }

    /// Sets the aggregate function.
    pub fn aggregate(mut self, aggregate: AggregateType) -> Self {
        self.aggregate = Some(aggregate);
        self
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Attribute {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// An `<order>` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub attribute: String,
    #[serde(default)]
    pub descending: bool,
    /// Alias of a link-entity attribute. Not supported by the Web API.
    #[serde(default)]
    pub alias: Option<String>,
}

impl Order {
    /// Ascending order on `attribute`.
    pub fn asc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            descending: false,
            alias: None,
        }
    }

    /// Descending order on `attribute`.
    pub fn desc(attribute: impl Into<String>) -> Self {
        Self {
            descending: true,
            ..Self::asc(attribute)
        }
    }

    /// Sets the alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}
