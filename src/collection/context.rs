use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::entity::{Parent, valid_id};
use crate::identifiers::LD_CONTEXT;
use crate::json_ld::{ContextBuilder, ContextConflict, field_context};
use crate::layout::{
    COLL_CONTEXT_FILE, COLL_META_CONTEXT_PATH, SITEDATA_CONTEXT_PATH, SITEDATA_ENUM_PATH,
};
use crate::model::FieldRef;

use super::Collection;

/// Places, relative to the collection directory, that receive a copy of the
/// context document. Enumerated values are read relative to the latter two.
const CONTEXT_PATHS: [&str; 3] = [
    COLL_META_CONTEXT_PATH,
    SITEDATA_CONTEXT_PATH,
    SITEDATA_ENUM_PATH,
];

impl Collection {
    /// Assemble the `@context` map from vocabularies and the fields used by
    /// views and groups, both local and inherited.
    pub fn get_coll_jsonld_context(&self) -> Result<(Map<String, Value>, Vec<ContextConflict>)> {
        let mut builder = ContextBuilder::new();
        for vocab in self.vocabs(true)? {
            let vocab = vocab?;
            match vocab.namespace_uri() {
                Some(uri) => builder.add_vocab(vocab.id(), uri),
                None => debug!(target: "context", vocab_id = vocab.id(), "vocabulary without URI"),
            }
        }
        for view in self.views(true)? {
            for field_ref in view?.field_refs() {
                self.add_field_ref(&mut builder, &field_ref)?;
            }
        }
        for group in self.groups(true)? {
            for field_ref in group?.field_refs() {
                self.add_field_ref(&mut builder, &field_ref)?;
            }
        }
        Ok(builder.finish())
    }

    fn add_field_ref(&self, builder: &mut ContextBuilder, field_ref: &FieldRef) -> Result<()> {
        let field_id = field_ref.field_id.as_str();
        if !valid_id(field_id) {
            warn!(target: "context", coll_id = self.id(), field_id, "invalid field reference");
            return Ok(());
        }
        let Some(field) = self.get_field(field_id)? else {
            debug!(target: "context", coll_id = self.id(), field_id, "no such field");
            return Ok(());
        };
        let fragment = field_context(field_id, field.render_type(), field.value_mode())?;
        let property_uri = field_ref.property_uri.as_deref().or(field.property_uri());
        if let Some(property_uri) = property_uri {
            builder.add_property(property_uri, fragment);
        }
        Ok(())
    }

    /// Rebuild the context and write every copy of it. Returns the
    /// conflicting property bindings that were found along the way.
    pub fn generate_coll_jsonld_context(&self) -> Result<Vec<ContextConflict>> {
        let (context, conflicts) = self.get_coll_jsonld_context()?;
        let document = json!({ LD_CONTEXT: context });
        let bytes = serde_json::to_vec_pretty(&document)
            .context("unable to serialize collection context")?;
        for path in CONTEXT_PATHS {
            let path = format!("{}{}{}", self.dir(), path, COLL_CONTEXT_FILE);
            self.store().write(&path, &bytes)?;
        }
        info!(
            target: "context",
            coll_id = self.id(),
            conflicts = conflicts.len(),
            "collection context generated"
        );
        Ok(conflicts)
    }

    /// The collection's own context document, as last generated.
    pub fn read_coll_jsonld_context(&self) -> Result<Option<Value>> {
        let path = format!(
            "{}{}{}",
            self.dir(),
            COLL_META_CONTEXT_PATH,
            COLL_CONTEXT_FILE
        );
        let Some(bytes) = self.store().read(&path)? else {
            return Ok(None);
        };
        let document = serde_json::from_slice(&bytes)
            .with_context(|| format!("unable to parse {path}"))?;
        Ok(Some(document))
    }
}
