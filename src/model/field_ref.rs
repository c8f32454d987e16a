use serde_json::Value;

use crate::entity::{Values, extract_entity_id};
use crate::identifiers::{ANNAL_FIELD_ID, ANNAL_FIELD_PLACEMENT, ANNAL_PROPERTY_URI};

/// One entry of the ordered field list of a view, group or list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub field_id: String,
    /// Overrides the property URI declared by the field itself.
    pub property_uri: Option<String>,
    pub placement: Option<String>,
}

impl FieldRef {
    fn from_value(entry: &Value) -> Option<FieldRef> {
        let field_id = entry.get(ANNAL_FIELD_ID)?.as_str()?;
        let non_empty = |key: &str| {
            entry
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        Some(FieldRef {
            field_id: extract_entity_id(field_id).to_owned(),
            property_uri: non_empty(ANNAL_PROPERTY_URI),
            placement: non_empty(ANNAL_FIELD_PLACEMENT),
        })
    }
}

/// Entries of `key` that name a field. Anything else is skipped.
pub(crate) fn field_refs(values: &Values, key: &str) -> Vec<FieldRef> {
    match values.get(key) {
        Some(Value::Array(entries)) => entries.iter().filter_map(FieldRef::from_value).collect(),
        _ => vec![],
    }
}
