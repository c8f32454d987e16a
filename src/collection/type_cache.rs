use std::collections::HashMap;

use bimap::BiMap;

use crate::model::RecordType;

/// Record types of a collection, looked up by id or by type URI.
///
/// The id/URI pairing lives in a single bidirectional map, so neither
/// direction can outlive the other.
#[derive(Debug, Default)]
pub(crate) struct TypeCache {
    uris: BiMap<String, String>,
    types: HashMap<String, RecordType>,
}

impl TypeCache {
    /// Insert or replace a type. A URI already claimed by another type moves
    /// to this one.
    pub(crate) fn put(&mut self, record_type: RecordType) {
        let type_id = record_type.id().to_owned();
        self.evict(&type_id);
        self.uris
            .insert(type_id.clone(), record_type.get_uri().to_owned());
        self.types.insert(type_id, record_type);
    }

    pub(crate) fn evict(&mut self, type_id: &str) -> Option<RecordType> {
        self.uris.remove_by_left(type_id);
        self.types.remove(type_id)
    }

    pub(crate) fn by_id(&self, type_id: &str) -> Option<&RecordType> {
        self.types.get(type_id)
    }

    pub(crate) fn by_uri(&self, type_uri: &str) -> Option<&RecordType> {
        let type_id = self.uris.get_by_right(type_uri)?;
        self.types.get(type_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.types.len()
    }
}
