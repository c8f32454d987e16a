use crate::entity::{Entity, EntityKind, Migration, Values};
use crate::identifiers::{
    ANNAL_DEFAULT_VIEW, ANNAL_DISPLAY_TYPE, ANNAL_LIST, ANNAL_LIST_ENTITY_SELECTOR,
    ANNAL_LIST_ENTITY_TYPE, ANNAL_LIST_FIELDS, ANNAL_RECORD_TYPE,
};
use crate::layout;

use super::FieldRef;
use super::field_ref::field_refs;

#[derive(Debug, Clone, Copy)]
pub struct RecordListKind;

impl EntityKind for RecordListKind {
    const TYPE_ID: &'static str = layout::LIST_TYPEID;
    const TYPE_URI: &'static str = ANNAL_LIST;
    const PATH: &'static str = layout::COLL_LIST_PATH;
    const ALT_PATH: &'static str = layout::SITE_LIST_PATH;
    const FILE: &'static str = layout::LIST_META_FILE;
    const LEGACY_FILES: &'static [&'static str] = &[layout::ENTITY_OLD_DATA_FILE];
    const ENTITY_REF: &'static str = "_list/{id}";
    const MIGRATIONS: &'static [Migration] = &[Migration::Rename {
        from: ANNAL_RECORD_TYPE,
        to: ANNAL_LIST_ENTITY_TYPE,
    }];

    fn default_values(entity_id: &str) -> Values {
        super::labelled(entity_id)
    }
}

/// Columns and selection of a listing of entities.
pub type RecordList = Entity<RecordListKind>;

impl RecordList {
    pub fn field_refs(&self) -> Vec<FieldRef> {
        field_refs(self.values(), ANNAL_LIST_FIELDS)
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.get_str(ANNAL_LIST_ENTITY_TYPE)
    }

    /// `List` or `Grid`.
    pub fn display_type(&self) -> Option<&str> {
        self.get_str(ANNAL_DISPLAY_TYPE)
    }

    pub fn default_view(&self) -> Option<&str> {
        self.get_str(ANNAL_DEFAULT_VIEW)
    }

    pub fn entity_selector(&self) -> Option<&str> {
        self.get_str(ANNAL_LIST_ENTITY_SELECTOR)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::{Value, json};

    use crate::entity::tests::test_store;
    use crate::entity::{Location, Resolver};
    use crate::model::Placement;

    use super::RecordList;

    #[test]
    fn stored_list_layout() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let coll = Resolver::new(
            store.clone(),
            Location::new("/annalist/c/testcoll/", "c/testcoll/"),
            None,
        );
        let values = json!({
            "annal:display_type": "List",
            "annal:default_view": "Default_view",
            "annal:list_entity_selector": "'annal:EntityData' in [@type]",
            "annal:list_fields": [
                {"annal:field_id": "_field/Entity_id", "annal:field_placement": "small:0,3"},
            ],
        });
        RecordList::create(&coll, "testlist", values.as_object().cloned().unwrap())?;

        let bytes = store
            .read("c/testcoll/d/_list/testlist/list_meta.jsonld")?
            .unwrap();
        let stored: Value = serde_json::from_slice(&bytes)?;
        assert_eq!(json!("_list/testlist"), stored["@id"]);
        assert_eq!(
            json!([{"@base": "../../"}, "../../coll_context.jsonld"]),
            stored["@context"]
        );
        assert_eq!(json!("_list"), stored["annal:type_id"]);

        let list = RecordList::load(&coll, "testlist", None)?.unwrap();
        assert_eq!(Some("Default_view"), list.default_view());
        assert_eq!(Some("List"), list.display_type());
        let refs = list.field_refs();
        assert_eq!(1, refs.len());
        let placement = Placement::parse(refs[0].placement.as_deref().unwrap_or_default());
        assert_eq!("small-3 columns", placement.field);
        Ok(())
    }
}
