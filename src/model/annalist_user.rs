use serde_json::Value;

use crate::entity::{Entity, EntityKind};
use crate::identifiers::{
    ANNAL_USER, ANNAL_USER_PERMISSIONS, ANNAL_USER_URI, RDFS_COMMENT, RDFS_LABEL,
};
use crate::layout;

/// Keys a user record must carry before any permission is granted from it.
pub const REQUIRED_USER_KEYS: [&str; 4] =
    [RDFS_LABEL, RDFS_COMMENT, ANNAL_USER_URI, ANNAL_USER_PERMISSIONS];

#[derive(Debug, Clone, Copy)]
pub struct AnnalistUserKind;

// No default values: a record lacking required keys must stay incomplete.
impl EntityKind for AnnalistUserKind {
    const TYPE_ID: &'static str = layout::USER_TYPEID;
    const TYPE_URI: &'static str = ANNAL_USER;
    const PATH: &'static str = layout::COLL_USER_PATH;
    const ALT_PATH: &'static str = layout::SITE_USER_PATH;
    const FILE: &'static str = layout::USER_META_FILE;
    const LEGACY_FILES: &'static [&'static str] = &[layout::ENTITY_OLD_DATA_FILE];
    const ENTITY_REF: &'static str = "_user/{id}";
}

/// Permissions granted to an authenticated user within a collection.
pub type AnnalistUser = Entity<AnnalistUserKind>;

impl AnnalistUser {
    pub fn user_uri(&self) -> Option<&str> {
        self.get_str(ANNAL_USER_URI)
    }

    pub fn permissions(&self) -> Vec<&str> {
        match self.get(ANNAL_USER_PERMISSIONS) {
            Some(Value::Array(tokens)) => tokens.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(token)) => vec![token.as_str()],
            _ => vec![],
        }
    }

    pub fn has_permission(&self, token: &str) -> bool {
        self.permissions().contains(&token)
    }

    pub fn has_required_keys(&self) -> bool {
        REQUIRED_USER_KEYS.iter().all(|key| self.contains_key(key))
    }
}
