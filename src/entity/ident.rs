use anyhow::Result;
use tracing::debug;

use crate::error::EntityError;

use super::{Entity, EntityKind, Parent};

/// Identifier grammar: one or more ASCII letters, digits, `_` or `-`.
pub fn valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

pub fn check_id(id: &str) -> Result<()> {
    if valid_id(id) {
        Ok(())
    } else {
        Err(EntityError::InvalidIdentifier(id.to_owned()).into())
    }
}

/// Name of a blob kept in an entity's directory: a single path segment.
pub fn valid_resource_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}

/// Final path segment of a reference such as `_field/Entity_id`.
pub fn extract_entity_id(reference: &str) -> &str {
    reference
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(reference)
}

/// Hands out zero-padded numeric ids not yet used under a parent.
///
/// The counter only moves forward past ids found to be taken, so the id it
/// returns is offered again until something is stored under it.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    last_id: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        IdAllocator { last_id: 1 }
    }
}

impl IdAllocator {
    pub fn starting_at(last_id: u64) -> IdAllocator {
        IdAllocator { last_id }
    }

    pub fn allocate<K: EntityKind>(&mut self, parent: &dyn Parent) -> Result<String> {
        loop {
            let id = format!("{:08}", self.last_id);
            if !Entity::<K>::exists(parent, &id, None)? {
                debug!(target: "entity", type_id = K::TYPE_ID, %id, "allocated id");
                return Ok(id);
            }
            self.last_id += 1;
        }
    }
}
