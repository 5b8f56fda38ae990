//! FetchXML to OData conversion
//!
//! [`FetchXmlConverter`] compiles a [`Fetch`] in a single pass over the tree:
//!
//! 1. Query options are validated and the root entity set is resolved
//! 2. Attributes become `$select`, or `$apply` for aggregate queries
//! 3. Filters become `$filter`, with link-entities inside a filter rendered
//!    as `any`/`all` expressions
//! 4. Structural link-entities become `$expand`
//! 5. Inner link-entities add filters that drop records without a match
//!
//! Each conversion owns its own state, so one converter can be shared across
//! threads.

mod assemble;
mod condition;
mod context;
mod filter;
mod join;
mod operator;
mod relationship;

pub use filter::invert_filter;

use std::sync::Arc;

use crate::error::ConvertError;
use crate::error::UnsupportedError;
use crate::metadata::MetadataProvider;
use crate::query::fetchxml::Fetch;

/// The result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedQuery {
    /// The full request URL.
    pub url: String,
    /// Values for the `Prefer` request header, e.g. `odata.maxpagesize=50`.
    pub prefer_headers: Vec<String>,
}

/// Converts FetchXML queries to Dataverse Web API URLs.
///
/// This converter is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```
/// use fetchxml_lib::FetchXmlConverter;
/// use fetchxml_lib::metadata::InMemoryMetadata;
/// use fetchxml_lib::model::metadata::{AttributeMetadata, AttributeType, EntityMetadata};
/// use fetchxml_lib::query::fetchxml::{Entity, Fetch};
///
/// let metadata = InMemoryMetadata::new().with_entity(
///     EntityMetadata::new("account", "accounts", "accountid")
///         .with_attribute(AttributeMetadata::new("name", AttributeType::String)),
/// );
/// let converter = FetchXmlConverter::builder()
///     .org_url("https://example.crm.dynamics.com/api/data/v9.0")
///     .metadata(metadata)
///     .build();
///
/// let query = converter.convert(&Fetch::new(Entity::new("account").attribute("name")).count(50)).unwrap();
/// assert_eq!(query.prefer_headers, vec!["odata.maxpagesize=50"]);
/// ```
#[derive(Clone)]
pub struct FetchXmlConverter {
    org_url: String,
    metadata: Arc<dyn MetadataProvider>,
}

impl FetchXmlConverter {
    /// Creates a new builder for constructing a converter.
    pub fn builder() -> FetchXmlConverterBuilder<Missing, Missing> {
        FetchXmlConverterBuilder::new()
    }

    /// Returns the Web API base URL, e.g. `https://org.crm.dynamics.com/api/data/v9.2`.
    pub fn org_url(&self) -> &str {
        &self.org_url
    }

    /// Returns the metadata provider.
    pub fn metadata(&self) -> &Arc<dyn MetadataProvider> {
        &self.metadata
    }

    /// Converts a query to a URL and the `Prefer` headers it needs.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::NotConnected`] if the metadata provider is not connected
    /// - [`ConvertError::Unsupported`] if the query has no Web API equivalent
    /// - [`ConvertError::Input`] if the query is malformed
    /// - [`ConvertError::Metadata`] if an entity cannot be found
    pub fn convert(&self, fetch: &Fetch) -> Result<ConvertedQuery, ConvertError> {
        if !self.metadata.is_connected() {
            return Err(ConvertError::NotConnected);
        }

        let entity = fetch.entity.as_ref().map(|e| e.name.as_str()).unwrap_or_default();
        log::debug!("Converting FetchXML query on '{}'", entity);

        let query = assemble::assemble(&*self.metadata, fetch)?;
        let url = query.to_url(&self.org_url);

        let prefer_headers = fetch
            .count
            .map(|count| vec![format!("odata.maxpagesize={}", count)])
            .unwrap_or_default();

        log::debug!("Converted FetchXML query to {}", url);
        Ok(ConvertedQuery { url, prefer_headers })
    }

    /// Converts a query that needs nothing but the URL.
    ///
    /// Fails with [`UnsupportedError::PreferHeaderRequired`] if the query sets
    /// a page size, which can only be sent as a header.
    pub fn convert_to_url(&self, fetch: &Fetch) -> Result<String, ConvertError> {
        let query = self.convert(fetch)?;
        if !query.prefer_headers.is_empty() {
            return Err(UnsupportedError::PreferHeaderRequired.into());
        }
        Ok(query.url)
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`FetchXmlConverter`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `org_url` - The Web API base URL the entity set is appended to
/// - `metadata` - A [`MetadataProvider`] implementation
pub struct FetchXmlConverterBuilder<Url, Provider> {
    org_url: Url,
    metadata: Provider,
}

impl FetchXmlConverterBuilder<Missing, Missing> {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            org_url: Missing,
            metadata: Missing,
        }
    }
}

impl Default for FetchXmlConverterBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FetchXmlConverterBuilder<Missing, P> {
    /// Sets the Web API base URL.
    ///
    /// A trailing `/` is ignored.
    pub fn org_url(self, org_url: impl Into<String>) -> FetchXmlConverterBuilder<Set<String>, P> {
        FetchXmlConverterBuilder {
            org_url: Set(org_url.into()),
            metadata: self.metadata,
        }
    }
}

impl<U> FetchXmlConverterBuilder<U, Missing> {
    /// Sets the metadata provider.
    pub fn metadata<T: MetadataProvider + 'static>(
        self,
        provider: T,
    ) -> FetchXmlConverterBuilder<U, Set<Arc<dyn MetadataProvider>>> {
        FetchXmlConverterBuilder {
            org_url: self.org_url,
            metadata: Set(Arc::new(provider) as Arc<dyn MetadataProvider>),
        }
    }
}

impl FetchXmlConverterBuilder<Set<String>, Set<Arc<dyn MetadataProvider>>> {
    /// Builds the [`FetchXmlConverter`].
    ///
    /// This method is only available when both `org_url` and `metadata` have been set.
    pub fn build(self) -> FetchXmlConverter {
        FetchXmlConverter {
            org_url: self.org_url.0,
            metadata: self.metadata.0,
        }
    }
}
