//! Entity and metadata model of a linked-data record store.
//!
//! A [`Site`] owns collections; a [`Collection`] owns record types, views,
//! lists, fields, field groups, vocabularies and user permission records, and
//! derives a JSON-LD context from them. Everything is persisted through a
//! [`BlobStore`](store::BlobStore).

pub mod collection;
pub mod config;
pub mod entity;
pub mod error;
pub mod identifiers;
pub mod json_ld;
pub mod layout;
pub mod model;
pub mod site;
pub mod store;

pub use collection::Collection;
pub use error::EntityError;
pub use site::Site;
