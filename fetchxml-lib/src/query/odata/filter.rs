//! OData `$filter` clause.

/// A parenthesized group of filter conditions.
///
/// Conditions are already-rendered OData expressions. Empty groups render as
/// nothing so that their parent can drop them.
///
/// # Example
///
/// ```
/// use fetchxml_lib::query::odata::ODataFilterClause;
///
/// let mut clause = ODataFilterClause::new(true);
/// clause.conditions.push("name eq 'FXB'".to_string());
/// clause.filters.push(ODataFilterClause::new(false));
///
/// assert_eq!(clause.to_odata().as_deref(), Some("(name eq 'FXB')"));
/// assert_eq!(ODataFilterClause::new(true).to_odata(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ODataFilterClause {
    /// `true` joins with `and`, `false` with `or`.
    pub and: bool,
    pub conditions: Vec<String>,
    pub filters: Vec<ODataFilterClause>,
}

impl ODataFilterClause {
    /// Creates an empty clause.
    pub fn new(and: bool) -> Self {
        Self {
            and,
            conditions: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Creates an `and` clause holding a single condition.
    pub fn single(condition: impl Into<String>) -> Self {
        Self {
            and: true,
            conditions: vec![condition.into()],
            filters: Vec::new(),
        }
    }

    /// Renders the clause, or `None` if nothing in it renders.
    pub fn to_odata(&self) -> Option<String> {
        let items: Vec<String> = self
            .conditions
            .iter()
            .filter(|c| !c.is_empty())
            .cloned()
            .chain(self.filters.iter().filter_map(ODataFilterClause::to_odata))
            .collect();

        if items.is_empty() {
            return None;
        }

        let separator = if self.and { " and " } else { " or " };
        Some(format!("({})", items.join(separator)))
    }
}

/// Renders a list of clauses joined by `and`, skipping empty ones.
pub fn join_filters(filters: &[ODataFilterClause]) -> Option<String> {
    let rendered: Vec<String> = filters.iter().filter_map(ODataFilterClause::to_odata).collect();
    if rendered.is_empty() {
        None
    } else {
        Some(rendered.join(" and "))
    }
}
