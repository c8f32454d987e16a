use crate::entity::{Entity, EntityKind, Migration, Values};
use crate::identifiers::{
    ANNAL_FIELD_GROUP, ANNAL_GROUP_ENTITY_TYPE, ANNAL_GROUP_FIELDS, ANNAL_RECORD_TYPE,
};
use crate::layout;

use super::FieldRef;
use super::field_ref::field_refs;

#[derive(Debug, Clone, Copy)]
pub struct RecordGroupKind;

impl EntityKind for RecordGroupKind {
    const TYPE_ID: &'static str = layout::GROUP_TYPEID;
    const TYPE_URI: &'static str = ANNAL_FIELD_GROUP;
    const PATH: &'static str = layout::COLL_GROUP_PATH;
    const ALT_PATH: &'static str = layout::SITE_GROUP_PATH;
    const FILE: &'static str = layout::GROUP_META_FILE;
    const LEGACY_FILES: &'static [&'static str] = &[layout::ENTITY_OLD_DATA_FILE];
    const ENTITY_REF: &'static str = "_group/{id}";
    const AFFECTS_CONTEXT: bool = true;
    const MIGRATIONS: &'static [Migration] = &[Migration::Rename {
        from: ANNAL_RECORD_TYPE,
        to: ANNAL_GROUP_ENTITY_TYPE,
    }];

    fn default_values(entity_id: &str) -> Values {
        super::labelled(entity_id)
    }
}

/// A reusable group of fields, repeated inside a view.
pub type RecordGroup = Entity<RecordGroupKind>;

impl RecordGroup {
    pub fn field_refs(&self) -> Vec<FieldRef> {
        field_refs(self.values(), ANNAL_GROUP_FIELDS)
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.get_str(ANNAL_GROUP_ENTITY_TYPE)
    }
}
