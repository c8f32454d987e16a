//! Stored entities descended from a parent entity.
//!
//! An entity lives at `parent_dir + relpath(id)/` with its body document in a
//! kind-specific file inside that directory. An entity may additionally be
//! found under an alternate parent (the site-data collection) using the kind's
//! alternate template; that is how built-in definitions show up in every
//! collection without being copied.

mod fields;
mod ident;
mod migrate;
mod resolver;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value, json};
use tracing::{debug, error, info};

use crate::error::EntityError;
use crate::identifiers::{
    ANNAL_ID, ANNAL_TYPE, ANNAL_TYPE_ID, ANNAL_URI, ANNAL_URL, LD_BASE, LD_CONTEXT, LD_ID,
    LD_TYPE, RDFS_LABEL,
};
use crate::layout;
use crate::store::BlobStore;

pub use fields::{FieldPath, PathStep, enum_fields, get_field};
pub use ident::{IdAllocator, check_id, extract_entity_id, valid_id, valid_resource_name};
pub use migrate::{Migration, migrate_values};
pub use resolver::{Found, Resolver};

/// Body of an entity: an ordered map of CURIE keys to JSON values.
pub type Values = Map<String, Value>;

/// Where an entity (or a parent) is addressed and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub url: String,
    pub dir: String,
}

impl Location {
    pub fn new(url: impl Into<String>, dir: impl Into<String>) -> Location {
        Location {
            url: url.into(),
            dir: dir.into(),
        }
    }

    pub fn child(&self, relpath: &str) -> Location {
        Location {
            url: format!("{}{}/", self.url, relpath),
            dir: format!("{}{}/", self.dir, relpath),
        }
    }
}

/// Anything entities can be created under.
pub trait Parent {
    fn store(&self) -> &Arc<dyn BlobStore>;
    fn location(&self) -> &Location;
}

/// Fixed facts about one kind of stored entity.
pub trait EntityKind {
    /// Local type id (slug) used in URLs.
    const TYPE_ID: &'static str;
    /// Type CURIE recorded as `annal:type`.
    const TYPE_URI: &'static str;
    /// Parent-relative directory template.
    const PATH: &'static str;
    /// Directory template used when read from the site-data collection.
    const ALT_PATH: &'static str;
    /// Body file name inside the entity directory.
    const FILE: &'static str;
    /// Body file names used by earlier layouts, tried in order when `FILE`
    /// is missing. A body found under one of these is moved to `FILE`.
    const LEGACY_FILES: &'static [&'static str] = &[];
    /// `@id` template written into the body, relative to `CONTEXT_BASE`.
    const ENTITY_REF: &'static str;
    const CONTEXT_BASE: &'static str = layout::CHILD_CONTEXT_BASE;
    const CONTEXT_REF: &'static str = layout::CHILD_CONTEXT_REF;
    /// Creating or removing one of these changes the collection's JSON-LD
    /// context.
    const AFFECTS_CONTEXT: bool = false;
    /// Applied once, in order, to every body read from storage.
    const MIGRATIONS: &'static [Migration] = &[];

    /// Values merged under a newly created body for keys it lacks.
    fn default_values(_entity_id: &str) -> Values {
        Values::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    Alternate,
}

pub struct Entity<K> {
    id: String,
    store: Arc<dyn BlobStore>,
    location: Location,
    alt_location: Option<Location>,
    source: Source,
    values: Values,
    _kind: PhantomData<K>,
}

impl<K: EntityKind> Entity<K> {
    /// Parent-relative directory of an entity.
    pub fn relpath(entity_id: &str) -> Result<String> {
        check_id(entity_id)?;
        let relpath = layout::expand(K::PATH, entity_id);
        debug!(target: "entity", type_id = K::TYPE_ID, entity_id, %relpath, "relpath");
        Ok(relpath)
    }

    /// Directory of an entity relative to an alternate parent.
    pub fn altpath(entity_id: &str) -> Result<String> {
        check_id(entity_id)?;
        Ok(layout::expand(K::ALT_PATH, entity_id))
    }

    /// Storage path of the body document of an entity.
    pub fn path(parent: &dyn Parent, entity_id: &str) -> Result<String> {
        let relpath = Self::relpath(entity_id)?;
        Ok(format!("{}{}/{}", parent.location().dir, relpath, K::FILE))
    }

    fn new(parent: &dyn Parent, entity_id: &str, altparent: Option<&Location>) -> Result<Self> {
        let location = parent.location().child(&Self::relpath(entity_id)?);
        let alt_location = match altparent {
            Some(alt) => Some(alt.child(&Self::altpath(entity_id)?)),
            None => None,
        };
        Ok(Entity {
            id: entity_id.to_owned(),
            store: parent.store().clone(),
            location,
            alt_location,
            source: Source::Primary,
            values: Values::new(),
            _kind: PhantomData,
        })
    }

    /// Write a new entity, replacing whatever is stored under the same id.
    pub fn create(parent: &dyn Parent, entity_id: &str, body: Values) -> Result<Self> {
        debug!(target: "entity", type_id = K::TYPE_ID, entity_id, "create");
        let mut entity = Self::new(parent, entity_id, None)?;
        let mut values = K::default_values(entity_id);
        values.extend(body);
        entity.set_values(values);
        entity.save()?;
        Ok(entity)
    }

    /// Load from the primary location, then from the alternate parent.
    /// Absence is `Ok(None)`.
    pub fn load(
        parent: &dyn Parent,
        entity_id: &str,
        altparent: Option<&Location>,
    ) -> Result<Option<Self>> {
        debug!(
            target: "entity",
            type_id = K::TYPE_ID,
            parent_dir = %parent.location().dir,
            entity_id,
            "load"
        );
        let mut entity = Self::new(parent, entity_id, altparent)?;
        match entity.load_values()? {
            Some(values) => {
                entity.set_values(values);
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    pub fn exists(
        parent: &dyn Parent,
        entity_id: &str,
        altparent: Option<&Location>,
    ) -> Result<bool> {
        let entity = Self::new(parent, entity_id, altparent)?;
        if entity.store.contains(&entity.body_path())? {
            return Ok(true);
        }
        for legacy in K::LEGACY_FILES {
            if entity.store.contains(&format!("{}{}", entity.dir(), legacy))? {
                return Ok(true);
            }
        }
        match entity.alt_body_path() {
            Some(path) => entity.store.contains(&path),
            None => Ok(false),
        }
    }

    /// Delete an entity and everything stored beneath it. Only the primary
    /// location is considered; inherited entities cannot be removed this way.
    pub fn remove(parent: &dyn Parent, entity_id: &str) -> Result<()> {
        debug!(target: "entity", type_id = K::TYPE_ID, entity_id, "remove");
        let Some(entity) = Self::load(parent, entity_id, None)? else {
            bail!(EntityError::NotFound {
                type_id: K::TYPE_ID.to_owned(),
                entity_id: entity_id.to_owned(),
            });
        };
        let found_type = entity.get_str(ANNAL_TYPE);
        let dir = entity.dir();
        if found_type == Some(K::TYPE_URI) && dir.starts_with(&parent.location().dir) {
            entity.store.delete_subtree(dir)?;
            return Ok(());
        }
        error!(
            target: "entity",
            expected_type = K::TYPE_URI,
            ?found_type,
            expected_dir = %parent.location().dir,
            dir,
            "refusing to remove entity"
        );
        Err(EntityError::TypeOrPathMismatch {
            entity_id: entity_id.to_owned(),
            found_type: found_type.map(str::to_owned),
            dir: dir.to_owned(),
        }
        .into())
    }

    /// Move an entity and everything stored beneath it to `new_id` under the
    /// same parent. An entity already stored as `new_id` is never replaced.
    pub fn rename(parent: &dyn Parent, old_id: &str, new_id: &str) -> Result<Self> {
        debug!(target: "entity", type_id = K::TYPE_ID, old_id, new_id, "rename");
        let target = Self::new(parent, new_id, None)?;
        let Some(old) = Self::load(parent, old_id, None)? else {
            bail!(EntityError::NotFound {
                type_id: K::TYPE_ID.to_owned(),
                entity_id: old_id.to_owned(),
            });
        };
        if !target.store.list_children(target.dir())?.is_empty() {
            error!(target: "entity", dir = target.dir(), "rename destination already exists");
            bail!(EntityError::AlreadyExists {
                type_id: K::TYPE_ID.to_owned(),
                entity_id: new_id.to_owned(),
            });
        }
        let base_dir = &parent.location().dir;
        for dir in [old.dir(), target.dir()] {
            if !dir.starts_with(base_dir) {
                error!(target: "entity", %base_dir, dir, "refusing to rename entity");
                bail!(EntityError::TypeOrPathMismatch {
                    entity_id: old_id.to_owned(),
                    found_type: old.get_str(ANNAL_TYPE).map(str::to_owned),
                    dir: dir.to_owned(),
                });
            }
        }
        old.store.rename_subtree(old.dir(), target.dir())?;
        let Some(mut renamed) = Self::load(parent, new_id, None)? else {
            bail!(EntityError::NotFound {
                type_id: K::TYPE_ID.to_owned(),
                entity_id: new_id.to_owned(),
            });
        };
        renamed.set(ANNAL_ID, new_id);
        renamed.save()?;
        Ok(renamed)
    }

    /// Candidate ids of this kind under `parent` and, after those, any further
    /// ids found under `altparent`.
    pub fn children(parent: &dyn Parent, altparent: Option<&Location>) -> Result<Vec<String>> {
        let store = parent.store();
        let mut ids = vec![];
        let local_dir = format!("{}{}", parent.location().dir, layout::template_dir(K::PATH));
        for name in store.list_children(&local_dir)? {
            if valid_id(&name) {
                ids.push(name);
            }
        }
        if let Some(alt) = altparent {
            let alt_dir = format!("{}{}", alt.dir, layout::template_dir(K::ALT_PATH));
            for name in store.list_children(&alt_dir)? {
                if valid_id(&name) && !ids.contains(&name) {
                    ids.push(name);
                }
            }
        }
        Ok(ids)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn type_id(&self) -> &'static str {
        K::TYPE_ID
    }

    pub fn type_uri(&self) -> &'static str {
        K::TYPE_URI
    }

    /// Primary URL. Inherited entities are presented as if they belonged to
    /// the collection they were looked up from.
    pub fn url(&self) -> &str {
        &self.location.url
    }

    /// URL of the location the body was actually read from.
    pub fn source_url(&self) -> &str {
        match (self.source, &self.alt_location) {
            (Source::Alternate, Some(alt)) => &alt.url,
            _ => &self.location.url,
        }
    }

    /// Primary storage directory.
    pub fn dir(&self) -> &str {
        &self.location.dir
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn is_inherited(&self) -> bool {
        self.source == Source::Alternate
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn into_values(self) -> Values {
        self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_owned(), value.into());
    }

    pub fn label(&self) -> &str {
        self.get_str(RDFS_LABEL).unwrap_or(&self.id)
    }

    /// Explicit `annal:uri`, else the entity's URL.
    pub fn get_uri(&self) -> &str {
        self.get_str(ANNAL_URI)
            .or_else(|| self.get_str(ANNAL_URL))
            .unwrap_or(&self.location.url)
    }

    /// Leaf values with their paths, descending into repeated field groups.
    pub fn enum_fields(&self) -> Vec<(FieldPath, &Value)> {
        enum_fields(&self.values)
    }

    pub fn get_field(&self, path: &[PathStep]) -> Option<&Value> {
        get_field(&self.values, path)
    }

    /// A blob kept beside the body, read from wherever the body was found.
    /// `None` when either is missing.
    pub fn resource(&self, name: &str) -> Result<Option<Vec<u8>>> {
        check_resource_name::<K>(name)?;
        let dir = match (self.source, &self.alt_location) {
            (Source::Alternate, Some(alt)) => &alt.dir,
            _ => &self.location.dir,
        };
        if !self.store.contains(&format!("{dir}{}", K::FILE))? {
            return Ok(None);
        }
        self.store.read(&format!("{dir}{name}"))
    }

    /// Store a blob beside the primary body. It goes wherever the entity
    /// goes: `remove` deletes it and `rename` moves it.
    pub fn write_resource(&self, name: &str, bytes: &[u8]) -> Result<()> {
        check_resource_name::<K>(name)?;
        debug!(
            target: "entity",
            type_id = K::TYPE_ID,
            entity_id = %self.id,
            name,
            "write resource"
        );
        self.store.write(&format!("{}{name}", self.location.dir), bytes)
    }

    /// Replace the values, filling in identity keys the supplied values lack.
    pub fn set_values(&mut self, values: Values) {
        self.values = values;
        self.augment(ANNAL_ID, Value::String(self.id.clone()));
        self.augment(ANNAL_TYPE_ID, Value::String(K::TYPE_ID.to_owned()));
        self.augment(ANNAL_TYPE, Value::String(K::TYPE_URI.to_owned()));
        self.augment(ANNAL_URL, Value::String(self.location.url.clone()));
    }

    fn augment(&mut self, key: &str, value: Value) {
        if !self.values.contains_key(key) {
            self.values.insert(key.to_owned(), value);
        }
    }

    /// Write the current values to the primary location.
    pub fn save(&self) -> Result<()> {
        let mut values = self.values.clone();
        values.insert(
            LD_ID.to_owned(),
            Value::String(layout::expand(K::ENTITY_REF, &self.id)),
        );
        values.insert(LD_TYPE.to_owned(), Value::Array(self.ld_types()));
        values.insert(
            LD_CONTEXT.to_owned(),
            json!([{ LD_BASE: K::CONTEXT_BASE }, K::CONTEXT_REF]),
        );
        values.insert(ANNAL_ID.to_owned(), Value::String(self.id.clone()));
        values.shift_remove(ANNAL_URL);
        let bytes = serde_json::to_vec_pretty(&values)
            .with_context(|| format!("unable to serialize entity {}", self.id))?;
        self.store.write(&self.body_path(), &bytes)?;
        Ok(())
    }

    fn ld_types(&self) -> Vec<Value> {
        let mut types = match self.values.get(LD_TYPE) {
            Some(Value::Array(types)) => types.clone(),
            Some(Value::String(ty)) => vec![Value::String(ty.clone())],
            _ => vec![],
        };
        if !types.iter().any(|t| t.as_str() == Some(K::TYPE_URI)) {
            types.push(Value::String(K::TYPE_URI.to_owned()));
        }
        types
    }

    fn body_path(&self) -> String {
        format!("{}{}", self.location.dir, K::FILE)
    }

    fn alt_body_path(&self) -> Option<String> {
        self.alt_location
            .as_ref()
            .map(|alt| format!("{}{}", alt.dir, K::FILE))
    }

    fn migrate_legacy_file(&self) -> Result<Option<Vec<u8>>> {
        for legacy in K::LEGACY_FILES {
            let old_path = format!("{}{}", self.location.dir, legacy);
            if let Some(bytes) = self.store.read(&old_path)? {
                let new_path = self.body_path();
                info!(target: "entity", %old_path, %new_path, "migrating body file");
                self.store.write(&new_path, &bytes)?;
                self.store.delete(&old_path)?;
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }

    fn load_values(&mut self) -> Result<Option<Values>> {
        let mut found = self
            .store
            .read(&self.body_path())?
            .map(|bytes| (self.body_path(), bytes, Source::Primary));
        if found.is_none() {
            found = self
                .migrate_legacy_file()?
                .map(|bytes| (self.body_path(), bytes, Source::Primary));
        }
        if found.is_none() {
            if let Some(path) = self.alt_body_path() {
                found = self
                    .store
                    .read(&path)?
                    .map(|bytes| (path, bytes, Source::Alternate));
            }
        }
        let Some((path, bytes, source)) = found else {
            return Ok(None);
        };
        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(err) => {
                error!(target: "entity", %path, %err, "error loading entity values");
                return Err(err).with_context(|| format!("unable to parse {path}"));
            }
        };
        let Value::Object(mut values) = body else {
            bail!(EntityError::InvalidBody(path));
        };
        migrate_values(K::MIGRATIONS, &mut values);
        values.insert(
            ANNAL_URL.to_owned(),
            Value::String(self.location.url.clone()),
        );
        self.source = source;
        Ok(Some(values))
    }
}

fn check_resource_name<K: EntityKind>(name: &str) -> Result<()> {
    let is_body = name == K::FILE || K::LEGACY_FILES.iter().any(|legacy| *legacy == name);
    if valid_resource_name(name) && !is_body {
        Ok(())
    } else {
        Err(EntityError::InvalidIdentifier(name.to_owned()).into())
    }
}

impl<K> Clone for Entity<K> {
    fn clone(&self) -> Self {
        Entity {
            id: self.id.clone(),
            store: self.store.clone(),
            location: self.location.clone(),
            alt_location: self.alt_location.clone(),
            source: self.source,
            values: self.values.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: EntityKind> fmt::Debug for Entity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("type_id", &K::TYPE_ID)
            .field("id", &self.id)
            .field("dir", &self.location.dir)
            .field("source", &self.source)
            .field("values", &self.values)
            .finish()
    }
}

impl<K> PartialEq for Entity<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.location == other.location && self.values == other.values
    }
}
