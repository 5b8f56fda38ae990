//! Unsupported query constructs

/// A FetchXML construct that has no equivalent in the Web API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnsupportedError {
    /// Only live data can be queried.
    #[error("Only live data is supported in Web API (datasource '{datasource}')")]
    DataSource { datasource: String },

    /// Later pages need `$skip`, which the Web API rejects.
    #[error(
        "Skipping to page {page} is not supported in Web API. Load the first page and follow the @odata.nextLink URLs to get to subsequent pages"
    )]
    Paging { page: u32 },

    /// Sorting on an attribute of a link-entity.
    #[error("OData queries do not support ordering on link entities. Please remove the sort on {alias}.{attribute}")]
    OrderOnLinkEntity { alias: String, attribute: String },

    /// A condition that targets a collection-valued link-entity through `entityname`.
    #[error("Cannot apply filter to child collection {navigation}")]
    ChildCollectionFilter { navigation: String },

    /// A condition more than one navigation property away from the root.
    #[error(
        "Cannot filter on nested link-entity {navigation}. Try rearranging your query to have filters in first-level link-entities only"
    )]
    NestedFilter { navigation: String },

    /// An inner join below the first level of single-valued navigation.
    #[error(
        "Cannot include inner join on nested link-entity {navigation}. Try rearranging your query to have inner joins on first-level link-entities only"
    )]
    NestedInnerJoin { navigation: String },

    /// No relationship in the metadata matches the link-entity.
    #[error("Cannot find metadata for relation {entity}.{to} => {link_entity}.{from}")]
    Relationship {
        entity: String,
        to: String,
        link_entity: String,
        from: String,
    },

    /// A many-to-many link-entity without exactly one nested link-entity.
    #[error("Invalid M:M-relation definition for OData on link-entity {link_entity}")]
    ManyToManyShape { link_entity: String },

    /// An operator token that is not part of FetchXML.
    #[error("Unsupported OData condition operator '{operator}'")]
    Operator { operator: String },

    /// A `link-type` value that is not part of FetchXML or has no OData form.
    #[error("Unsupported link-type '{link_type}'")]
    LinkType { link_type: String },

    /// An aggregate function that is not part of FetchXML.
    #[error("Unsupported aggregate type '{aggregate}'")]
    Aggregate { aggregate: String },

    /// An aggregate query with no group-by or aggregate attribute.
    #[error("Aggregate query on {entity} has no group-by or aggregate attributes")]
    EmptyAggregate { entity: String },

    /// An operator without a logical complement inside a negated link-entity.
    #[error("Cannot invert operator {operator}")]
    NonInvertibleOperator { operator: String },

    /// A link type without a logical complement inside a negated link-entity.
    #[error("Cannot invert link-type {link_type}")]
    NonInvertibleLinkType { link_type: String },

    /// A `like` pattern with wildcards anywhere but the start or end.
    #[error(
        "OData queries do not support complex LIKE wildcards. Only % at the start or end of the value is supported (value '{value}')"
    )]
    ComplexWildcard { value: String },

    /// A link-entity inside a filter whose link type is not any/all.
    #[error("link-type '{link_type}' cannot be used as a filter condition, expected any, all, not any or not all")]
    LinkTypeInFilter { link_type: String },

    /// A structural link-entity whose link type is only valid inside a filter.
    #[error("link-type '{link_type}' is only supported on link-entities inside a filter")]
    LinkTypeInJoin { link_type: String },

    /// The single-string form was used for a query that also needs a Prefer header.
    #[error("A Prefer header is required in addition to the URL")]
    PreferHeaderRequired,
}
