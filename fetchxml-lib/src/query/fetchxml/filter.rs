//! FetchXML `<filter>` and `<condition>` elements.

use serde::Deserialize;
use serde::Serialize;

use super::ConditionOperator;
use super::LinkEntity;

/// How the children of a filter are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    And,
    Or,
}

impl FilterType {
    /// Returns the other combinator.
    pub fn flip(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }
}

/// A `<filter>` element.
///
/// Link-entities inside a filter are any/all sub-queries, not joins.
///
/// # Example
///
/// ```
/// use fetchxml_lib::query::fetchxml::{Condition, ConditionOperator, Filter};
///
/// let filter = Filter::and()
///     .condition(Condition::new("name", ConditionOperator::Eq).value("FXB"))
///     .filter(
///         Filter::or()
///             .condition(Condition::new("websiteurl", ConditionOperator::Eq).value("xrmtoolbox.com"))
///             .condition(Condition::new("websiteurl", ConditionOperator::Eq).value("fetchxmlbuilder.com")),
///     );
/// assert_eq!(filter.filters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    pub conditions: Vec<Condition>,
    pub filters: Vec<Filter>,
    pub links: Vec<LinkEntity>,
}

impl Filter {
    /// Creates an empty filter with the given combinator.
    pub fn new(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            ..Self::default()
        }
    }

    /// Creates an empty `and` filter.
    pub fn and() -> Self {
        Self::new(FilterType::And)
    }

    /// Creates an empty `or` filter.
    pub fn or() -> Self {
        Self::new(FilterType::Or)
    }

    /// Adds a condition.
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds a nested filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds an any/all sub-query.
    pub fn link(mut self, link: LinkEntity) -> Self {
        self.links.push(link);
        self
    }

    /// Returns `true` if the filter has no children at all.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.filters.is_empty() && self.links.is_empty()
    }
}

/// A `<condition>` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub attribute: String,
    pub operator: ConditionOperator,
    /// The `value` attribute.
    #[serde(default)]
    pub value: Option<String>,
    /// Nested `<value>` elements.
    #[serde(default)]
    pub values: Vec<String>,
    /// Alias or name of the link-entity the attribute belongs to.
    #[serde(default, rename = "entityname")]
    pub entity_name: Option<String>,
    /// Column to compare against instead of a literal.
    #[serde(default, rename = "valueof")]
    pub value_of: Option<String>,
}

impl Condition {
    /// Creates a condition without a value.
    pub fn new(attribute: impl Into<String>, operator: ConditionOperator) -> Self {
        Self {
            attribute: attribute.into(),
            operator,
            value: None,
            values: Vec::new(),
            entity_name: None,
            value_of: None,
        }
    }

    /// Sets the `value` attribute.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the nested `<value>` elements.
    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Points the condition at an attribute of another link-entity.
    pub fn entity_name(mut self, entity_name: impl Into<String>) -> Self {
        self.entity_name = Some(entity_name.into());
        self
    }

    /// Compares against another column instead of a literal.
    pub fn value_of(mut self, column: impl Into<String>) -> Self {
        self.value_of = Some(column.into());
        self
    }

    /// Returns the `value` attribute. An empty string is a value.
    pub fn literal(&self) -> Option<&str> {
        self.value.as_deref()
    }
}
