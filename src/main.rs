use std::sync::Arc;

use anyhow::{Context, Result};
use annalist::config::Config;
use annalist::store::{BlobStore, KeyspaceStore};
use annalist::{Collection, Site};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let flags = xflags::parse_or_exit! {
        /// Path to the TOML configuration file
        optional -c,--config CONFIG: String
        /// One of: collections, types, context
        required command: String
        /// Collection id, for the types and context commands
        optional coll: String
    };
    let config = match &flags.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let keyspace = fjall::Config::new(&config.site.data_dir).open()?;
    let store: Arc<dyn BlobStore> = Arc::new(KeyspaceStore::new(keyspace)?);
    let site = Site::new(store, &config.site.base_url);
    info!(data_dir = %config.site.data_dir.display(), command = %flags.command, "opened site");

    match flags.command.as_str() {
        "collections" => {
            for coll in site.collections()? {
                let coll = coll?;
                println!("{}\t{}", coll.id(), coll.label());
            }
        }
        "types" => {
            let coll = open_collection(&site, flags.coll.as_deref())?;
            for record_type in coll.types(true)? {
                let record_type = record_type?;
                println!("{}\t{}", record_type.id(), record_type.get_uri());
            }
        }
        "context" => {
            let coll = open_collection(&site, flags.coll.as_deref())?;
            coll.generate_coll_jsonld_context()?;
            let context = coll
                .read_coll_jsonld_context()?
                .context("context document was not written")?;
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
        other => anyhow::bail!("unknown command {other}"),
    }
    Ok(())
}

fn open_collection(site: &Site, coll_id: Option<&str>) -> Result<Collection> {
    let coll_id = coll_id.context("a collection id is required")?;
    site.get_collection(coll_id)?
        .with_context(|| format!("collection {coll_id} does not exist"))
}
