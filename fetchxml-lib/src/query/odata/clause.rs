//! OData `$expand`, `$orderby` and root query clauses.

use std::fmt;

use super::ODataFilterClause;
use super::join_filters;

/// A navigation property with its nested query options.
///
/// # Example
///
/// ```
/// use fetchxml_lib::query::odata::ODataLinkClause;
///
/// let mut expand = ODataLinkClause::new("primarycontactid");
/// assert_eq!(expand.to_odata(), "primarycontactid");
///
/// expand.select.push("firstname".to_string());
/// assert_eq!(expand.to_odata(), "primarycontactid($select=firstname)");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ODataLinkClause {
    pub property_name: String,
    pub select: Vec<String>,
    pub expand: Vec<ODataLinkClause>,
    pub filter: Vec<ODataFilterClause>,
}

impl ODataLinkClause {
    /// Creates a clause with no options.
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            ..Self::default()
        }
    }

    /// Returns the `$select`, `$expand` and `$filter` options in order.
    pub fn parts(&self) -> Vec<String> {
        let mut parts = Vec::new();

        if !self.select.is_empty() {
            parts.push(format!("$select={}", self.select.join(",")));
        }

        if !self.expand.is_empty() {
            let nested: Vec<_> = self.expand.iter().map(|e| e.to_odata()).collect();
            parts.push(format!("$expand={}", nested.join(",")));
        }

        if let Some(filter) = join_filters(&self.filter) {
            parts.push(format!("$filter={}", filter));
        }

        parts
    }

    /// Renders the clause as an `$expand` item.
    pub fn to_odata(&self) -> String {
        let parts = self.parts();
        if parts.is_empty() {
            self.property_name.clone()
        } else {
            format!("{}({})", self.property_name, parts.join(";"))
        }
    }
}

/// A single `$orderby` item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ODataOrderClause {
    pub property_name: String,
    pub descending: bool,
}

impl fmt::Display for ODataOrderClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.descending { "desc" } else { "asc" };
        write!(f, "{} {}", self.property_name, direction)
    }
}

/// The root entity set query.
///
/// Adds ordering, paging and aggregation to [`ODataLinkClause`]. When any
/// group or aggregate is present the query renders as a single `$apply`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ODataEntityClause {
    /// The entity set name, with select, expand and filter options.
    pub link: ODataLinkClause,
    pub top: Option<u32>,
    pub order_by: Vec<ODataOrderClause>,
    pub groups: Vec<String>,
    pub aggregates: Vec<String>,
}

impl ODataEntityClause {
    /// Creates a query over an entity set.
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            link: ODataLinkClause::new(collection_name),
            ..Self::default()
        }
    }

    /// Returns `true` if the query renders as `$apply`.
    pub fn is_aggregate(&self) -> bool {
        !self.groups.is_empty() || !self.aggregates.is_empty()
    }

    /// Returns the query string options in order.
    pub fn parts(&self) -> Vec<String> {
        if self.is_aggregate() {
            return vec![format!("$apply={}", self.apply())];
        }

        let mut parts = self.link.parts();

        if !self.order_by.is_empty() {
            let orders: Vec<_> = self.order_by.iter().map(ToString::to_string).collect();
            parts.push(format!("$orderby={}", orders.join(",")));
        }

        if let Some(top) = self.top {
            parts.push(format!("$top={}", top));
        }

        parts
    }

    /// Renders the transformation pipeline of an aggregate query.
    fn apply(&self) -> String {
        let groups = self.groups.join(",");
        let aggregates = self.aggregates.join(",");

        let transform = match (self.groups.is_empty(), self.aggregates.is_empty()) {
            (false, false) => format!("groupby(({}),aggregate({}))", groups, aggregates),
            (false, true) => format!("groupby(({}))", groups),
            _ => format!("aggregate({})", aggregates),
        };

        match join_filters(&self.link.filter) {
            Some(filter) => format!("filter({})/{}", filter, transform),
            None => transform,
        }
    }

    /// Renders the full URL below `org_url`.
    pub fn to_url(&self, org_url: &str) -> String {
        let base = format!("{}/{}", org_url.trim_end_matches('/'), self.link.property_name);
        let parts = self.parts();
        if parts.is_empty() {
            base
        } else {
            format!("{}?{}", base, parts.join("&"))
        }
    }
}
