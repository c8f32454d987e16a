use crate::entity::{Entity, EntityKind, Values};
use crate::identifiers::{ANNAL_URI, ANNAL_VOCABULARY};
use crate::layout;

#[derive(Debug, Clone, Copy)]
pub struct RecordVocabKind;

impl EntityKind for RecordVocabKind {
    const TYPE_ID: &'static str = layout::VOCAB_TYPEID;
    const TYPE_URI: &'static str = ANNAL_VOCABULARY;
    const PATH: &'static str = layout::COLL_VOCAB_PATH;
    const ALT_PATH: &'static str = layout::SITE_VOCAB_PATH;
    const FILE: &'static str = layout::VOCAB_META_FILE;
    const LEGACY_FILES: &'static [&'static str] = &[layout::ENTITY_OLD_DATA_FILE];
    const ENTITY_REF: &'static str = "_vocab/{id}";
    const AFFECTS_CONTEXT: bool = true;

    fn default_values(entity_id: &str) -> Values {
        super::labelled(entity_id)
    }
}

/// Namespace declaration: the entity id is the prefix.
pub type RecordVocab = Entity<RecordVocabKind>;

impl RecordVocab {
    pub fn namespace_uri(&self) -> Option<&str> {
        self.get_str(ANNAL_URI)
    }
}
