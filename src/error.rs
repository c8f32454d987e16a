use thiserror::Error;

/// Distinctions callers act upon. Carried inside [`anyhow::Error`]; use
/// `err.downcast_ref::<EntityError>()` to tell them apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// The identifier does not match the identifier grammar. Raised before
    /// any storage is touched.
    #[error("invalid entity identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("entity {type_id}/{entity_id} not found")]
    NotFound { type_id: String, entity_id: String },

    /// `rename` refused to replace an entity that is already stored.
    #[error("entity {type_id}/{entity_id} already exists")]
    AlreadyExists { type_id: String, entity_id: String },

    /// `remove` or `rename` refused to act: the stored type tag or the computed
    /// directory did not match what the kind expects.
    #[error("entity {entity_id} has unexpected type {found_type:?} or path {dir}")]
    TypeOrPathMismatch {
        entity_id: String,
        found_type: Option<String>,
        dir: String,
    },

    /// A field description whose render type and value mode have no JSON-LD
    /// treatment.
    #[error("field {field_id}: unexpected value mode {value_mode} for render type {render_type}")]
    ConfigurationInconsistency {
        field_id: String,
        render_type: String,
        value_mode: String,
    },

    #[error("entity body at {0} is not a JSON object")]
    InvalidBody(String),
}

impl EntityError {
    pub fn is_not_found(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref(), Some(EntityError::NotFound { .. }))
    }
}
