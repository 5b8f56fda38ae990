//! FetchXML query tree.
//!
//! An immutable representation of a parsed FetchXML document:
//!
//! - [`Fetch`] holds the query options and the root [`Entity`]
//! - [`Entity`] and [`LinkEntity`] share the [`EntityNode`] shape
//! - [`Filter`] and [`Condition`] describe the predicate tree
//!
//! Parsing XML text is left to the caller. Every type implements `serde`
//! so the tree can be deserialized from any format whose field names follow
//! the FetchXML attribute names.
//!
//! # Example
//!
//! ```
//! use fetchxml_lib::query::fetchxml::*;
//!
//! let fetch = Fetch::new(
//!     Entity::new("account")
//!         .attribute("name")
//!         .link(
//!             LinkEntity::new("contact", "parentcustomerid", "accountid")
//!                 .attribute("firstname")
//!                 .filter(Filter::and().condition(Condition::new("firstname", ConditionOperator::Eq).value("Mark"))),
//!         ),
//! );
//! assert_eq!(fetch.entity.unwrap().links.len(), 1);
//! ```

mod entity;
mod fetch;
mod filter;
mod link;
mod operator;

pub use entity::*;
pub use fetch::*;
pub use filter::*;
pub use link::*;
pub use operator::*;
