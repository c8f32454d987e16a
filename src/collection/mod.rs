//! A collection: the aggregate root of a tenant's metadata.
//!
//! Every child lookup goes through a [`Resolver`] so definitions stored in the
//! site-data collection show through wherever a collection has none of its
//! own. The site-data collection resolves against itself, so its built-in
//! definitions stored under the alternate templates are visible there too.
//! Record types are additionally cached in memory once any type lookup has
//! happened.

mod context;
mod type_cache;

use std::cell::RefCell;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::entity::{Entity, EntityKind, Location, Parent, Resolver, Values, valid_id};
use crate::identifiers::{
    ANNAL_COLLECTION, ANNAL_DEFAULT_LIST, ANNAL_TYPE, ANNAL_USER, ANNAL_USER_PERMISSIONS,
    ANNAL_USER_URI, RDFS_COMMENT, RDFS_LABEL,
};
use crate::layout;
use crate::model::{
    AnnalistUser, AnnalistUserKind, RecordField, RecordFieldKind, RecordGroup, RecordGroupKind,
    RecordList, RecordListKind, RecordType, RecordTypeKind, RecordView, RecordViewKind,
    RecordVocab, RecordVocabKind,
};
use crate::site::Site;
use crate::store::BlobStore;

use self::type_cache::TypeCache;

pub const DEFAULT_USER_PERMISSIONS: &[&str] = &["VIEW"];

#[derive(Debug, Clone, Copy)]
pub struct CollectionKind;

impl EntityKind for CollectionKind {
    const TYPE_ID: &'static str = layout::COLL_TYPEID;
    const TYPE_URI: &'static str = ANNAL_COLLECTION;
    const PATH: &'static str = layout::SITE_COLL_PATH;
    const ALT_PATH: &'static str = layout::SITE_COLL_PATH;
    const FILE: &'static str = layout::COLL_META_FILE;
    const ENTITY_REF: &'static str = "../";
    const CONTEXT_BASE: &'static str = layout::COLL_CONTEXT_BASE;
    const CONTEXT_REF: &'static str = layout::COLL_CONTEXT_REF;

    fn default_values(entity_id: &str) -> Values {
        crate::model::labelled(entity_id)
    }
}

pub struct Collection {
    entity: Entity<CollectionKind>,
    resolver: Resolver,
    // None until the first type lookup
    type_cache: RefCell<Option<TypeCache>>,
}

impl Parent for Collection {
    fn store(&self) -> &Arc<dyn BlobStore> {
        self.resolver.store()
    }

    fn location(&self) -> &Location {
        self.resolver.location()
    }
}

impl Collection {
    fn from_entity(site: &Site, entity: Entity<CollectionKind>) -> Collection {
        // Writes only ever use the primary templates, so the site data's
        // built-ins are read-only even from the site-data collection itself.
        let resolver = Resolver::new(
            site.store().clone(),
            entity.location().clone(),
            Some(site.site_data()),
        );
        Collection {
            entity,
            resolver,
            type_cache: RefCell::new(None),
        }
    }

    pub fn create(site: &Site, coll_id: &str, meta: Values) -> Result<Collection> {
        info!(target: "collection", coll_id, "creating collection");
        let entity = Entity::<CollectionKind>::create(site, coll_id, meta)?;
        Ok(Collection::from_entity(site, entity))
    }

    pub fn load(site: &Site, coll_id: &str) -> Result<Option<Collection>> {
        let entity = Entity::<CollectionKind>::load(site, coll_id, None)?;
        Ok(entity.map(|entity| Collection::from_entity(site, entity)))
    }

    pub fn exists(site: &Site, coll_id: &str) -> Result<bool> {
        Entity::<CollectionKind>::exists(site, coll_id, None)
    }

    pub fn id(&self) -> &str {
        self.entity.id()
    }

    pub fn url(&self) -> &str {
        self.entity.url()
    }

    pub fn dir(&self) -> &str {
        self.entity.dir()
    }

    pub fn label(&self) -> &str {
        self.entity.label()
    }

    pub fn entity(&self) -> &Entity<CollectionKind> {
        &self.entity
    }

    pub fn is_site_data(&self) -> bool {
        self.id() == layout::SITEDATA_ID
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Create or replace a child entity.
    ///
    /// Record types written this way are dropped from the type cache and
    /// reloaded on next lookup; [`Collection::add_type`] keeps the cache
    /// warm instead.
    pub fn add<K: EntityKind>(&self, entity_id: &str, values: Values) -> Result<Entity<K>> {
        debug!(
            target: "collection",
            coll_id = self.id(),
            type_id = K::TYPE_ID,
            entity_id,
            "add"
        );
        let entity = Entity::<K>::create(self, entity_id, values)?;
        if K::TYPE_ID == RecordTypeKind::TYPE_ID {
            self.evict_type(entity_id);
        }
        self.update_context::<K>()?;
        Ok(entity)
    }

    /// Look a child up locally, then in the site data.
    pub fn get<K: EntityKind>(&self, entity_id: &str) -> Result<Option<Entity<K>>> {
        Ok(self.resolver.find::<K>(entity_id)?.into_option())
    }

    pub fn remove<K: EntityKind>(&self, entity_id: &str) -> Result<()> {
        debug!(
            target: "collection",
            coll_id = self.id(),
            type_id = K::TYPE_ID,
            entity_id,
            "remove"
        );
        if K::TYPE_ID == RecordTypeKind::TYPE_ID {
            self.evict_type(entity_id);
        }
        Entity::<K>::remove(self, entity_id)?;
        self.update_context::<K>()
    }

    /// Give a local child a new id, moving anything stored alongside it.
    pub fn rename<K: EntityKind>(&self, old_id: &str, new_id: &str) -> Result<Entity<K>> {
        info!(
            target: "collection",
            coll_id = self.id(),
            type_id = K::TYPE_ID,
            old_id,
            new_id,
            "rename"
        );
        let entity = Entity::<K>::rename(self, old_id, new_id)?;
        if K::TYPE_ID == RecordTypeKind::TYPE_ID {
            self.evict_type(old_id);
            self.evict_type(new_id);
        }
        self.update_context::<K>()?;
        Ok(entity)
    }

    /// Children of one kind, loaded as the sequence is consumed. Ids are
    /// listed when this is called; entities that vanish in the meantime are
    /// skipped.
    pub fn children<K: EntityKind>(
        &self,
        include_alt: bool,
    ) -> Result<impl Iterator<Item = Result<Entity<K>>> + '_> {
        let ids = self.resolver.child_ids::<K>(include_alt)?;
        Ok(ids
            .into_iter()
            .filter(|id| id != layout::INITIAL_VALUES_ID)
            .filter_map(move |id| self.get::<K>(&id).transpose()))
    }

    fn update_context<K: EntityKind>(&self) -> Result<()> {
        if K::AFFECTS_CONTEXT {
            self.generate_coll_jsonld_context()?;
        }
        Ok(())
    }

    // Record types

    fn load_types(&self) -> Result<()> {
        if self.type_cache.borrow().is_some() {
            return Ok(());
        }
        let mut cache = TypeCache::default();
        for type_id in self.resolver.child_ids::<RecordTypeKind>(true)? {
            if let Some(record_type) = self.get::<RecordTypeKind>(&type_id)? {
                cache.put(record_type);
            }
        }
        debug!(target: "collection", coll_id = self.id(), count = cache.len(), "type cache loaded");
        *self.type_cache.borrow_mut() = Some(cache);
        Ok(())
    }

    fn evict_type(&self, type_id: &str) {
        if let Some(cache) = self.type_cache.borrow_mut().as_mut() {
            cache.evict(type_id);
        }
    }

    pub fn types(
        &self,
        include_alt: bool,
    ) -> Result<impl Iterator<Item = Result<RecordType>> + '_> {
        let ids = self.resolver.child_ids::<RecordTypeKind>(include_alt)?;
        Ok(ids
            .into_iter()
            .filter(|id| id != layout::INITIAL_VALUES_ID)
            .filter_map(move |id| self.get_type(&id).transpose()))
    }

    pub fn add_type(&self, type_id: &str, type_meta: Values) -> Result<RecordType> {
        let record_type = self.add::<RecordTypeKind>(type_id, type_meta)?;
        if let Some(cache) = self.type_cache.borrow_mut().as_mut() {
            cache.put(record_type.clone());
        }
        Ok(record_type)
    }

    /// Cached type, else whatever storage holds now.
    pub fn get_type(&self, type_id: &str) -> Result<Option<RecordType>> {
        self.load_types()?;
        let cached = self
            .type_cache
            .borrow()
            .as_ref()
            .and_then(|cache| cache.by_id(type_id).cloned());
        if cached.is_some() {
            return Ok(cached);
        }
        if !self.resolver.exists::<RecordTypeKind>(type_id)? {
            return Ok(None);
        }
        info!(target: "collection", coll_id = self.id(), type_id, "type not cached, loading");
        let record_type = self.get::<RecordTypeKind>(type_id)?;
        if let (Some(record_type), Some(cache)) =
            (&record_type, self.type_cache.borrow_mut().as_mut())
        {
            cache.put(record_type.clone());
        }
        Ok(record_type)
    }

    /// Reverse lookup from type URI. Consults the cache only: it is empty
    /// until `get_type` or `types` has been called on this collection, and
    /// types created elsewhere since then are not seen.
    pub fn get_uri_type(&self, type_uri: &str) -> Option<RecordType> {
        self.type_cache
            .borrow()
            .as_ref()
            .and_then(|cache| cache.by_uri(type_uri).cloned())
    }

    pub fn remove_type(&self, type_id: &str) -> Result<()> {
        self.remove::<RecordTypeKind>(type_id)
    }

    // Record views

    pub fn views(
        &self,
        include_alt: bool,
    ) -> Result<impl Iterator<Item = Result<RecordView>> + '_> {
        self.children::<RecordViewKind>(include_alt)
    }

    pub fn add_view(&self, view_id: &str, view_meta: Values) -> Result<RecordView> {
        self.add::<RecordViewKind>(view_id, view_meta)
    }

    pub fn get_view(&self, view_id: &str) -> Result<Option<RecordView>> {
        self.get::<RecordViewKind>(view_id)
    }

    pub fn remove_view(&self, view_id: &str) -> Result<()> {
        self.remove::<RecordViewKind>(view_id)
    }

    // Record lists

    pub fn lists(
        &self,
        include_alt: bool,
    ) -> Result<impl Iterator<Item = Result<RecordList>> + '_> {
        self.children::<RecordListKind>(include_alt)
    }

    pub fn add_list(&self, list_id: &str, list_meta: Values) -> Result<RecordList> {
        self.add::<RecordListKind>(list_id, list_meta)
    }

    pub fn get_list(&self, list_id: &str) -> Result<Option<RecordList>> {
        self.get::<RecordListKind>(list_id)
    }

    pub fn remove_list(&self, list_id: &str) -> Result<()> {
        self.remove::<RecordListKind>(list_id)
    }

    // Fields, field groups and vocabularies

    pub fn fields(
        &self,
        include_alt: bool,
    ) -> Result<impl Iterator<Item = Result<RecordField>> + '_> {
        self.children::<RecordFieldKind>(include_alt)
    }

    pub fn add_field(&self, field_id: &str, field_meta: Values) -> Result<RecordField> {
        self.add::<RecordFieldKind>(field_id, field_meta)
    }

    pub fn get_field(&self, field_id: &str) -> Result<Option<RecordField>> {
        self.get::<RecordFieldKind>(field_id)
    }

    pub fn remove_field(&self, field_id: &str) -> Result<()> {
        self.remove::<RecordFieldKind>(field_id)
    }

    pub fn groups(
        &self,
        include_alt: bool,
    ) -> Result<impl Iterator<Item = Result<RecordGroup>> + '_> {
        self.children::<RecordGroupKind>(include_alt)
    }

    pub fn add_group(&self, group_id: &str, group_meta: Values) -> Result<RecordGroup> {
        self.add::<RecordGroupKind>(group_id, group_meta)
    }

    pub fn get_group(&self, group_id: &str) -> Result<Option<RecordGroup>> {
        self.get::<RecordGroupKind>(group_id)
    }

    pub fn remove_group(&self, group_id: &str) -> Result<()> {
        self.remove::<RecordGroupKind>(group_id)
    }

    pub fn vocabs(
        &self,
        include_alt: bool,
    ) -> Result<impl Iterator<Item = Result<RecordVocab>> + '_> {
        self.children::<RecordVocabKind>(include_alt)
    }

    pub fn add_vocab(&self, vocab_id: &str, vocab_meta: Values) -> Result<RecordVocab> {
        self.add::<RecordVocabKind>(vocab_id, vocab_meta)
    }

    pub fn get_vocab(&self, vocab_id: &str) -> Result<Option<RecordVocab>> {
        self.get::<RecordVocabKind>(vocab_id)
    }

    pub fn remove_vocab(&self, vocab_id: &str) -> Result<()> {
        self.remove::<RecordVocabKind>(vocab_id)
    }

    // Users

    pub fn create_user_permissions(
        &self,
        user_id: &str,
        user_uri: &str,
        user_name: &str,
        user_description: &str,
        user_permissions: &[&str],
    ) -> Result<AnnalistUser> {
        let mut values = Values::new();
        values.insert(ANNAL_TYPE.to_owned(), Value::from(ANNAL_USER));
        values.insert(RDFS_LABEL.to_owned(), Value::from(user_name));
        values.insert(RDFS_COMMENT.to_owned(), Value::from(user_description));
        values.insert(ANNAL_USER_URI.to_owned(), Value::from(user_uri));
        values.insert(
            ANNAL_USER_PERMISSIONS.to_owned(),
            Value::from(user_permissions.to_vec()),
        );
        self.add::<AnnalistUserKind>(user_id, values)
    }

    /// The user's record, only when it is complete and was issued to
    /// `user_uri`. Any other outcome is `None`.
    pub fn get_user_permissions(
        &self,
        user_id: &str,
        user_uri: &str,
    ) -> Result<Option<AnnalistUser>> {
        let user = self.get::<AnnalistUserKind>(user_id)?;
        debug!(
            target: "collection",
            coll_id = self.id(),
            user_id,
            user_uri,
            found = user.is_some(),
            "get_user_permissions"
        );
        Ok(user.filter(|user| user.has_required_keys() && user.user_uri() == Some(user_uri)))
    }

    // Default list

    pub fn set_default_list(&mut self, list_id: &str) -> Result<()> {
        self.entity.set(ANNAL_DEFAULT_LIST, list_id);
        self.entity.save()
    }

    /// The default list id, if it still names a list.
    pub fn get_default_list(&self) -> Result<Option<String>> {
        let Some(list_id) = self.entity.get_str(ANNAL_DEFAULT_LIST) else {
            return Ok(None);
        };
        if valid_id(list_id) && self.resolver.exists::<RecordListKind>(list_id)? {
            return Ok(Some(list_id.to_owned()));
        }
        warn!(target: "collection", coll_id = self.id(), list_id, "default list does not exist");
        Ok(None)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use serde_json::{Value, json};

    use crate::entity::tests::test_store;
    use crate::entity::{Entity, Values};
    use crate::error::EntityError;
    use crate::model::{RecordList, RecordType, RecordTypeKind};
    use crate::site::Site;
    use crate::store::BlobStore;

    use super::{Collection, DEFAULT_USER_PERMISSIONS};

    pub(crate) fn values(v: Value) -> Values {
        v.as_object().cloned().unwrap_or_default()
    }

    pub(crate) fn test_site(store: &Arc<dyn BlobStore>) -> Result<(Site, Collection)> {
        let site = Site::new(store.clone(), "/annalist/");
        site.add_collection("_annalist_site", values(json!({"rdfs:label": "Site data"})))?;
        let coll = site.add_collection(
            "testcoll",
            values(json!({"rdfs:label": "Test collection"})),
        )?;
        Ok((site, coll))
    }

    /// Write a definition straight into the site data.
    pub(crate) fn site_entity(store: &Arc<dyn BlobStore>, path: &str, body: Value) -> Result<()> {
        store.write(
            &format!("c/_annalist_site/_annalist_collection/{path}"),
            body.to_string().as_bytes(),
        )
    }

    #[test]
    fn create_and_load() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (site, coll) = test_site(&store)?;
        assert_eq!("/annalist/c/testcoll/", coll.url());
        assert!(!coll.is_site_data());
        assert!(Collection::exists(&site, "testcoll")?);
        let loaded = Collection::load(&site, "testcoll")?.unwrap();
        assert_eq!("Test collection", loaded.label());
        assert!(Collection::load(&site, "_annalist_site")?.unwrap().is_site_data());
        assert!(Collection::load(&site, "nocoll")?.is_none());
        Ok(())
    }

    #[test]
    fn type_cache_follows_add_and_remove() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        assert!(coll.get_uri_type("ex:T1").is_none());
        assert!(coll.get_type("t1")?.is_none());

        coll.add_type("t1", values(json!({"annal:uri": "ex:T1"})))?;
        assert_eq!(
            Some("t1".to_owned()),
            coll.get_uri_type("ex:T1").map(|t| t.id().to_owned())
        );
        assert!(coll.get_type("t1")?.is_some());

        coll.remove_type("t1")?;
        assert!(coll.get_uri_type("ex:T1").is_none());
        assert!(coll.get_type("t1")?.is_none());
        Ok(())
    }

    #[test]
    fn removed_type_reappears_from_site_data() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        site_entity(
            &store,
            "types/Default_type/type_meta.jsonld",
            json!({"annal:type": "annal:Type"}),
        )?;
        coll.add_type("Default_type", values(json!({"rdfs:label": "Local"})))?;
        assert_eq!("Local", coll.get_type("Default_type")?.unwrap().label());
        coll.remove_type("Default_type")?;
        let inherited = coll.get_type("Default_type")?.unwrap();
        assert!(inherited.is_inherited());
        Ok(())
    }

    #[test]
    fn type_created_after_cache_is_found() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (site, coll) = test_site(&store)?;
        assert!(coll.get_type("t1")?.is_none());
        // Another request writes a type behind this collection's back
        let other = Collection::load(&site, "testcoll")?.unwrap();
        other.add_type("t1", values(json!({"annal:uri": "ex:T1"})))?;
        assert!(coll.get_uri_type("ex:T1").is_none());
        assert!(coll.get_type("t1")?.is_some());
        assert!(coll.get_uri_type("ex:T1").is_some());
        Ok(())
    }

    #[test]
    fn types_include_site_data_and_skip_placeholder() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        site_entity(&store, "types/Default_type/type_meta.jsonld", json!({}))?;
        coll.add_type("_initial_values", Values::new())?;
        coll.add_type("t1", Values::new())?;
        let ids = |include_alt| -> Result<Vec<String>> {
            coll.types(include_alt)?
                .map(|t| t.map(|t| t.id().to_owned()))
                .collect()
        };
        assert_eq!(vec!["t1"], ids(false)?);
        assert_eq!(vec!["t1", "Default_type"], ids(true)?);
        Ok(())
    }

    #[test]
    fn add_type_overwrites() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        coll.add_type("t1", values(json!({"rdfs:comment": "first"})))?;
        coll.add_type("t1", values(json!({"annal:uri": "ex:Second"})))?;
        let t1 = coll.get_type("t1")?.unwrap();
        assert_eq!(Some(""), t1.get_str("rdfs:comment"));
        assert_eq!("ex:Second", t1.get_uri());
        Ok(())
    }

    #[test]
    fn remove_type_with_unexpected_type_tag() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        coll.add_type("t1", values(json!({"annal:type": "annal:View"})))?;
        let err = coll.remove_type("t1").unwrap_err();
        assert!(matches!(
            err.downcast_ref(),
            Some(EntityError::TypeOrPathMismatch { .. })
        ));
        assert!(Entity::<RecordTypeKind>::exists(&coll, "t1", None)?);
        Ok(())
    }

    #[test]
    fn remove_missing_view_is_not_found() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        let err = coll.remove_view("nothing").unwrap_err();
        assert!(EntityError::is_not_found(&err));
        Ok(())
    }

    #[test]
    fn invalid_id_is_rejected() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        let err = coll.add_list("../escape", Values::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref(),
            Some(EntityError::InvalidIdentifier(_))
        ));
        assert!(coll.get_list("bad id").is_err());
        Ok(())
    }

    #[test]
    fn user_permissions_require_matching_uri() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        coll.create_user_permissions(
            "user1",
            "mailto:a@example.org",
            "User One",
            "Test user",
            DEFAULT_USER_PERMISSIONS,
        )?;
        assert!(
            coll.get_user_permissions("user1", "mailto:b@example.org")?
                .is_none()
        );
        let user = coll
            .get_user_permissions("user1", "mailto:a@example.org")?
            .unwrap();
        assert!(user.has_permission("VIEW"));
        assert!(!user.has_permission("CREATE"));
        assert!(coll.get_user_permissions("nobody", "mailto:a@example.org")?.is_none());
        Ok(())
    }

    #[test]
    fn user_permissions_require_all_keys() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        coll.add::<crate::model::AnnalistUserKind>(
            "user2",
            values(json!({
                "rdfs:label": "User Two",
                "annal:user_uri": "mailto:a@example.org",
                "annal:user_permissions": ["VIEW"],
            })),
        )?;
        assert!(coll.get_user_permissions("user2", "mailto:a@example.org")?.is_none());
        Ok(())
    }

    #[test]
    fn user_permissions_from_site_data() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        site_entity(
            &store,
            "users/_default_user_perms/user_meta.jsonld",
            json!({
                "rdfs:label": "Default permissions",
                "rdfs:comment": "",
                "annal:user_uri": "annal:User/_default_user_perms",
                "annal:user_permissions": ["VIEW"],
            }),
        )?;
        let user =
            coll.get_user_permissions("_default_user_perms", "annal:User/_default_user_perms")?;
        assert!(user.is_some_and(|u| u.is_inherited()));
        Ok(())
    }

    #[test]
    fn default_list() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (site, mut coll) = test_site(&store)?;
        assert_eq!(None, coll.get_default_list()?);

        coll.add_list("list1", Values::new())?;
        coll.set_default_list("list1")?;
        assert_eq!(Some("list1".to_owned()), coll.get_default_list()?);
        let reloaded = Collection::load(&site, "testcoll")?.unwrap();
        assert_eq!(Some("list1".to_owned()), reloaded.get_default_list()?);

        coll.remove_list("list1")?;
        assert_eq!(None, coll.get_default_list()?);

        site_entity(&store, "lists/Default_list/list_meta.jsonld", json!({}))?;
        coll.set_default_list("Default_list")?;
        assert_eq!(Some("Default_list".to_owned()), coll.get_default_list()?);
        Ok(())
    }

    #[test]
    fn lists_enumerate_local_then_site() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        site_entity(&store, "lists/Default_list/list_meta.jsonld", json!({}))?;
        coll.add_list("list1", Values::new())?;
        let lists: Vec<RecordList> = coll.lists(true)?.collect::<Result<_>>()?;
        let ids: Vec<&str> = lists.iter().map(|l| l.id()).collect();
        assert_eq!(vec!["list1", "Default_list"], ids);
        Ok(())
    }

    #[test]
    fn site_data_sees_its_builtins() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (site, _coll) = test_site(&store)?;
        site_entity(
            &store,
            "types/Default_type/type_meta.jsonld",
            json!({"annal:type": "annal:Type", "annal:uri": "annal:Default_type"}),
        )?;
        site_entity(&store, "lists/Default_list/list_meta.jsonld", json!({}))?;
        let site_data = Collection::load(&site, "_annalist_site")?.unwrap();
        assert!(site_data.is_site_data());
        assert!(site_data.get_type("Default_type")?.is_some());
        assert!(site_data.get_uri_type("annal:Default_type").is_some());
        let types: Vec<RecordType> = site_data.types(true)?.collect::<Result<_>>()?;
        assert_eq!(1, types.len());
        assert_eq!(1, site_data.lists(true)?.count());
        assert!(site_data.get_list("Default_list")?.is_some());

        // Built-ins stay where they are; the site data cannot remove them
        let err = site_data.remove_type("Default_type").unwrap_err();
        assert!(EntityError::is_not_found(&err));
        assert!(site_data.get_type("Default_type")?.is_some());
        Ok(())
    }

    #[test]
    fn rename_type_updates_cache() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let (_site, coll) = test_site(&store)?;
        coll.add_type("t1", values(json!({"annal:uri": "ex:T1"})))?;
        assert!(coll.get_type("t1")?.is_some());
        let renamed = coll.rename::<RecordTypeKind>("t1", "t2")?;
        assert_eq!("t2", renamed.id());
        assert!(coll.get_type("t1")?.is_none());
        assert!(coll.get_uri_type("ex:T1").is_none());
        assert!(coll.get_type("t2")?.is_some());
        assert_eq!(
            Some("t2".to_owned()),
            coll.get_uri_type("ex:T1").map(|t| t.id().to_owned())
        );
        Ok(())
    }
}
