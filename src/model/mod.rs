//! Metadata entity kinds stored inside a collection.

mod annalist_user;
mod field_ref;
mod placement;
mod record_field;
mod record_group;
mod record_list;
mod record_type;
mod record_view;
mod record_vocab;

use serde_json::Value;

use crate::entity::Values;
use crate::identifiers::{RDFS_COMMENT, RDFS_LABEL};

pub use annalist_user::{AnnalistUser, AnnalistUserKind, REQUIRED_USER_KEYS};
pub use field_ref::FieldRef;
pub use placement::Placement;
pub use record_field::{RecordField, RecordFieldKind};
pub use record_group::{RecordGroup, RecordGroupKind};
pub use record_list::{RecordList, RecordListKind};
pub use record_type::{RecordType, RecordTypeKind};
pub use record_view::{RecordView, RecordViewKind};
pub use record_vocab::{RecordVocab, RecordVocabKind};

/// Label defaults to the id, comment to nothing.
pub(crate) fn labelled(entity_id: &str) -> Values {
    let mut values = Values::new();
    values.insert(RDFS_LABEL.to_owned(), Value::from(entity_id));
    values.insert(RDFS_COMMENT.to_owned(), Value::from(""));
    values
}
