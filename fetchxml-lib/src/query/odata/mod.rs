//! OData query clauses.
//!
//! The converter builds these bottom-up and renders them once:
//!
//! - [`ODataEntityClause`] - the root entity set with `$top`, `$orderby` and `$apply`
//! - [`ODataLinkClause`] - a navigation property in `$expand`
//! - [`ODataFilterClause`] - a parenthesized `$filter` group
//! - [`format_value`] - FetchXML literal to OData literal

mod clause;
mod filter;
mod value;

pub use clause::*;
pub use filter::*;
pub use value::*;
