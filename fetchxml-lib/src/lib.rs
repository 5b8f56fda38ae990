//! FetchXML to Dataverse Web API conversion
//!
//! Compiles a parsed FetchXML query tree into the equivalent OData v4 query URL
//! for the Dataverse Web API, resolving relationships and attribute types through
//! a [`metadata::MetadataProvider`].
//!
//! # Example
//!
//! ```
//! use fetchxml_lib::FetchXmlConverter;
//! use fetchxml_lib::metadata::InMemoryMetadata;
//! use fetchxml_lib::model::metadata::{AttributeMetadata, AttributeType, EntityMetadata};
//! use fetchxml_lib::query::fetchxml::{Entity, Fetch};
//!
//! let metadata = InMemoryMetadata::new().with_entity(
//!     EntityMetadata::new("account", "accounts", "accountid")
//!         .with_attribute(AttributeMetadata::new("accountid", AttributeType::Uniqueidentifier))
//!         .with_attribute(AttributeMetadata::new("name", AttributeType::String)),
//! );
//!
//! let converter = FetchXmlConverter::builder()
//!     .org_url("https://example.crm.dynamics.com/api/data/v9.0")
//!     .metadata(metadata)
//!     .build();
//!
//! let fetch = Fetch::new(Entity::new("account").attribute("name"));
//! let url = converter.convert_to_url(&fetch).unwrap();
//! assert_eq!(url, "https://example.crm.dynamics.com/api/data/v9.0/accounts?$select=name");
//! ```

pub mod convert;
pub mod error;
pub mod metadata;
pub mod model;
pub mod query;

pub use convert::ConvertedQuery;
pub use convert::FetchXmlConverter;
pub use error::ConvertError;
