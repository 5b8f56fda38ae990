//! Error types

mod input;
mod metadata;
mod unsupported;

pub use input::*;
pub use metadata::*;
pub use unsupported::*;

/// Errors that can occur while converting a FetchXML query.
///
/// Every variant is permanent: retrying the same conversion against the same
/// metadata produces the same error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// The metadata provider has no active connection.
    #[error("Must have an active connection to the metadata source to compose an OData query")]
    NotConnected,

    /// The query uses a construct the Web API cannot express.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedError),

    /// The query itself is malformed or refers to unknown schema items.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Metadata lookup failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl ConvertError {
    /// Returns `true` if the query shape cannot be represented in OData.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    /// Returns `true` if the query was malformed.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// Returns `true` if a requested entity could not be found in the metadata.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Metadata(MetadataError::EntityNotFound { .. } | MetadataError::TypeCodeNotFound { .. })
        )
    }
}
