//! The root of everything stored: owns collections, including the site-data
//! collection that supplies built-in definitions to all others.

use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::info;

use crate::collection::{Collection, CollectionKind};
use crate::entity::{Entity, Location, Parent, Values};
use crate::layout::{INITIAL_VALUES_ID, SITE_COLL_PATH, SITEDATA_ID, expand};
use crate::store::BlobStore;

pub struct Site {
    store: Arc<dyn BlobStore>,
    location: Location,
}

impl Parent for Site {
    fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    fn location(&self) -> &Location {
        &self.location
    }
}

impl Site {
    /// Site rooted at the top of `store`, with entity URLs under `base_url`.
    pub fn new(store: Arc<dyn BlobStore>, base_url: &str) -> Site {
        let mut url = base_url.to_owned();
        if !url.ends_with('/') {
            url.push('/');
        }
        Site {
            store,
            location: Location::new(url, ""),
        }
    }

    pub fn url(&self) -> &str {
        &self.location.url
    }

    /// Where the site-data collection lives.
    pub fn site_data(&self) -> Location {
        self.location.child(&expand(SITE_COLL_PATH, SITEDATA_ID))
    }

    pub fn add_collection(&self, coll_id: &str, coll_meta: Values) -> Result<Collection> {
        Collection::create(self, coll_id, coll_meta)
    }

    pub fn get_collection(&self, coll_id: &str) -> Result<Option<Collection>> {
        Collection::load(self, coll_id)
    }

    /// Delete a collection and everything in it. The site-data collection is
    /// never removed.
    pub fn remove_collection(&self, coll_id: &str) -> Result<()> {
        if coll_id == SITEDATA_ID {
            bail!("refusing to remove site data collection");
        }
        Entity::<CollectionKind>::remove(self, coll_id)?;
        info!(target: "site", coll_id, "removed collection");
        Ok(())
    }

    /// Ordinary collections, loaded as the sequence is consumed.
    pub fn collections(&self) -> Result<impl Iterator<Item = Result<Collection>> + '_> {
        let ids = Entity::<CollectionKind>::children(self, None)?;
        Ok(ids
            .into_iter()
            .filter(|id| id != SITEDATA_ID && id != INITIAL_VALUES_ID)
            .filter_map(move |id| self.get_collection(&id).transpose()))
    }
}
