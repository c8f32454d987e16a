use crate::entity::{Entity, EntityKind, Migration, Values};
use crate::identifiers::{
    ANNAL_RECORD_TYPE, ANNAL_VIEW, ANNAL_VIEW_ENTITY_TYPE, ANNAL_VIEW_FIELDS,
};
use crate::layout;

use super::FieldRef;
use super::field_ref::field_refs;

#[derive(Debug, Clone, Copy)]
pub struct RecordViewKind;

impl EntityKind for RecordViewKind {
    const TYPE_ID: &'static str = layout::VIEW_TYPEID;
    const TYPE_URI: &'static str = ANNAL_VIEW;
    const PATH: &'static str = layout::COLL_VIEW_PATH;
    const ALT_PATH: &'static str = layout::SITE_VIEW_PATH;
    const FILE: &'static str = layout::VIEW_META_FILE;
    const LEGACY_FILES: &'static [&'static str] = &[layout::ENTITY_OLD_DATA_FILE];
    const ENTITY_REF: &'static str = "_view/{id}";
    const AFFECTS_CONTEXT: bool = true;
    const MIGRATIONS: &'static [Migration] = &[Migration::Rename {
        from: ANNAL_RECORD_TYPE,
        to: ANNAL_VIEW_ENTITY_TYPE,
    }];

    fn default_values(entity_id: &str) -> Values {
        super::labelled(entity_id)
    }
}

/// Form layout: which fields of an entity are shown and where.
pub type RecordView = Entity<RecordViewKind>;

impl RecordView {
    pub fn field_refs(&self) -> Vec<FieldRef> {
        field_refs(self.values(), ANNAL_VIEW_FIELDS)
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.get_str(ANNAL_VIEW_ENTITY_TYPE)
    }
}
