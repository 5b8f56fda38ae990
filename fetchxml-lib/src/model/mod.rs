//! Typed models

pub mod metadata;
