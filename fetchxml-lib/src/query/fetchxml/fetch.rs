//! The root `<fetch>` element.

use serde::Deserialize;
use serde::Serialize;

use super::Entity;

/// A parsed FetchXML query.
///
/// # Example
///
/// ```
/// use fetchxml_lib::query::fetchxml::{Entity, Fetch};
///
/// let fetch = Fetch::new(Entity::new("account").attribute("name")).top(10);
/// assert_eq!(fetch.top, Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fetch {
    pub top: Option<u32>,
    /// Page size.
    pub count: Option<u32>,
    pub page: Option<u32>,
    pub aggregate: bool,
    pub datasource: Option<String>,
    pub entity: Option<Entity>,
}

impl Fetch {
    /// Creates a query over `entity`.
    pub fn new(entity: Entity) -> Self {
        Self {
            entity: Some(entity),
            ..Self::default()
        }
    }

    /// Limits the number of records.
    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    /// Sets the page size.
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Marks the query as an aggregate query.
    pub fn aggregate(mut self) -> Self {
        self.aggregate = true;
        self
    }

    /// Sets the data source.
    pub fn datasource(mut self, datasource: impl Into<String>) -> Self {
        self.datasource = Some(datasource.into());
        self
    }
}
