use std::sync::Arc;

use anyhow::Result;

use crate::store::BlobStore;

use super::{Entity, EntityKind, Location, Parent};

/// Outcome of looking an entity up in a collection and its inherited
/// site data.
pub enum Found<K> {
    Local(Entity<K>),
    Inherited(Entity<K>),
    Absent,
}

impl<K> Found<K> {
    pub fn into_option(self) -> Option<Entity<K>> {
        match self {
            Found::Local(entity) | Found::Inherited(entity) => Some(entity),
            Found::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Found::Absent)
    }
}

/// Looks entities up locally first, then under an inherited location.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn BlobStore>,
    local: Location,
    inherited: Option<Location>,
}

impl Parent for Resolver {
    fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    fn location(&self) -> &Location {
        &self.local
    }
}

impl Resolver {
    pub fn new(store: Arc<dyn BlobStore>, local: Location, inherited: Option<Location>) -> Self {
        Resolver {
            store,
            local,
            inherited,
        }
    }

    pub fn find<K: EntityKind>(&self, entity_id: &str) -> Result<Found<K>> {
        Ok(
            match Entity::<K>::load(self, entity_id, self.inherited.as_ref())? {
                Some(entity) if entity.is_inherited() => Found::Inherited(entity),
                Some(entity) => Found::Local(entity),
                None => Found::Absent,
            },
        )
    }

    pub fn find_local<K: EntityKind>(&self, entity_id: &str) -> Result<Option<Entity<K>>> {
        Entity::<K>::load(self, entity_id, None)
    }

    pub fn exists<K: EntityKind>(&self, entity_id: &str) -> Result<bool> {
        Entity::<K>::exists(self, entity_id, self.inherited.as_ref())
    }

    pub fn child_ids<K: EntityKind>(&self, include_inherited: bool) -> Result<Vec<String>> {
        let altparent = if include_inherited {
            self.inherited.as_ref()
        } else {
            None
        };
        Entity::<K>::children(self, altparent)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use crate::entity::tests::{Thing, test_store};
    use crate::entity::{Entity, Location, Values};

    use super::{Found, Resolver};

    #[test]
    fn find_local_then_inherited() -> Result<()> {
        let (_tmp, store) = test_store()?;
        let resolver = Resolver::new(
            store.clone(),
            Location::new("/annalist/c/coll1/", "c/coll1/"),
            Some(Location::new(
                "/annalist/c/_annalist_site/",
                "c/_annalist_site/",
            )),
        );
        store.write(
            "c/_annalist_site/things/site1/thing_meta.jsonld",
            json!({"rdfs:label": "site"}).to_string().as_bytes(),
        )?;
        Entity::<Thing>::create(&resolver, "local1", Values::new())?;

        assert!(matches!(resolver.find::<Thing>("local1")?, Found::Local(_)));
        assert!(matches!(
            resolver.find::<Thing>("site1")?,
            Found::Inherited(_)
        ));
        assert!(resolver.find::<Thing>("none")?.is_absent());
        assert!(resolver.find_local::<Thing>("site1")?.is_none());
        assert!(resolver.exists::<Thing>("site1")?);

        assert_eq!(vec!["local1"], resolver.child_ids::<Thing>(false)?);
        assert_eq!(
            vec!["local1", "site1"],
            resolver.child_ids::<Thing>(true)?
        );
        Ok(())
    }
}
