//! Query models
//!
//! - [`fetchxml`] - the input FetchXML query tree
//! - [`odata`] - the OData clauses produced by the converter

pub mod fetchxml;
pub mod odata;
