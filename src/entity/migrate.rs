use serde_json::Value;
use tracing::info;

use super::Values;

/// One step applied to a body as it is read from storage.
#[derive(Debug, Clone, Copy)]
pub enum Migration {
    /// Move the value under `from` to `to` unless `to` is already present.
    /// `from` is always dropped.
    Rename {
        from: &'static str,
        to: &'static str,
    },
    /// Fill `to`, when absent, from the rest of the body.
    Derive {
        to: &'static str,
        derive: fn(&Values) -> Option<Value>,
    },
}

/// Apply `migrations` in order. Reapplying to an already migrated body
/// changes nothing.
pub fn migrate_values(migrations: &[Migration], values: &mut Values) {
    for migration in migrations {
        match *migration {
            Migration::Rename { from, to } => {
                if let Some(value) = values.shift_remove(from) {
                    info!(target: "entity", from, to, "migrated property");
                    if !values.contains_key(to) {
                        values.insert(to.to_owned(), value);
                    }
                }
            }
            Migration::Derive { to, derive } => {
                if !values.contains_key(to) {
                    if let Some(value) = derive(values) {
                        values.insert(to.to_owned(), value);
                    }
                }
            }
        }
    }
}
