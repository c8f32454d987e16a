use crate::entity::{Entity, EntityKind, Values};
use crate::identifiers::{ANNAL_TYPE_ENTITY, ANNAL_TYPE_LIST, ANNAL_TYPE_VIEW};
use crate::layout;

#[derive(Debug, Clone, Copy)]
pub struct RecordTypeKind;

impl EntityKind for RecordTypeKind {
    const TYPE_ID: &'static str = layout::TYPE_TYPEID;
    const TYPE_URI: &'static str = ANNAL_TYPE_ENTITY;
    const PATH: &'static str = layout::COLL_TYPE_PATH;
    const ALT_PATH: &'static str = layout::SITE_TYPE_PATH;
    const FILE: &'static str = layout::TYPE_META_FILE;
    const LEGACY_FILES: &'static [&'static str] = &[layout::ENTITY_OLD_DATA_FILE];
    const ENTITY_REF: &'static str = "_type/{id}";

    fn default_values(entity_id: &str) -> Values {
        super::labelled(entity_id)
    }
}

/// Describes a class of records in a collection.
pub type RecordType = Entity<RecordTypeKind>;

impl RecordType {
    pub fn type_view(&self) -> Option<&str> {
        self.get_str(ANNAL_TYPE_VIEW)
    }

    pub fn type_list(&self) -> Option<&str> {
        self.get_str(ANNAL_TYPE_LIST)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use crate::entity::tests::test_store;
    use crate::entity::{Location, Resolver};
    use crate::identifiers::{ANNAL_URI, RDFS_COMMENT};

    use super::RecordType;

    #[test]
    fn uri_falls_back_to_url() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let coll = Resolver::new(store, Location::new("/annalist/c/coll1/", "c/coll1/"), None);
        let values = json!({ANNAL_URI: "ex:Thing", "annal:type_view": "Default_view"});
        let t1 = RecordType::create(&coll, "t1", values.as_object().cloned().unwrap())?;
        assert_eq!("ex:Thing", t1.get_uri());
        assert_eq!(Some("Default_view"), t1.type_view());
        assert_eq!("t1", t1.label());
        assert_eq!(Some(""), t1.get_str(RDFS_COMMENT));

        let t2 = RecordType::create(&coll, "t2", Default::default())?;
        assert_eq!("/annalist/c/coll1/d/_type/t2/", t2.get_uri());
        Ok(())
    }

    #[test]
    fn loads_body_from_old_file_name() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let coll = Resolver::new(
            store.clone(),
            Location::new("/annalist/c/coll1/", "c/coll1/"),
            None,
        );
        store.write(
            "c/coll1/d/_type/t1/entity-data.jsonld",
            json!({ANNAL_URI: "ex:Old"}).to_string().as_bytes(),
        )?;
        let t1 = RecordType::load(&coll, "t1", None)?.unwrap();
        assert_eq!("ex:Old", t1.get_uri());
        assert!(store.contains("c/coll1/d/_type/t1/type_meta.jsonld")?);
        assert!(!store.contains("c/coll1/d/_type/t1/entity-data.jsonld")?);
        Ok(())
    }
}
