use serde_json::Value;

use crate::entity::{Entity, EntityKind, Migration, Values, extract_entity_id};
use crate::identifiers::{
    ANNAL_FIELD, ANNAL_FIELD_PLACEMENT, ANNAL_FIELD_REF_FIELD, ANNAL_FIELD_REF_RESTRICTION,
    ANNAL_FIELD_REF_TYPE, ANNAL_FIELD_RENDER_TYPE, ANNAL_FIELD_TARGET_TYPE,
    ANNAL_FIELD_VALUE_MODE, ANNAL_FIELD_VALUE_TYPE, ANNAL_OPTIONS_TYPEREF, ANNAL_PROPERTY_URI,
    ANNAL_RESTRICT_VALUES, ANNAL_TARGET_FIELD,
};
use crate::layout;

use super::Placement;

pub const VALUE_DIRECT: &str = "Value_direct";

#[derive(Debug, Clone, Copy)]
pub struct RecordFieldKind;

impl EntityKind for RecordFieldKind {
    const TYPE_ID: &'static str = layout::FIELD_TYPEID;
    const TYPE_URI: &'static str = ANNAL_FIELD;
    const PATH: &'static str = layout::COLL_FIELD_PATH;
    const ALT_PATH: &'static str = layout::SITE_FIELD_PATH;
    const FILE: &'static str = layout::FIELD_META_FILE;
    const LEGACY_FILES: &'static [&'static str] = &[layout::ENTITY_OLD_DATA_FILE];
    const ENTITY_REF: &'static str = "_field/{id}";
    const AFFECTS_CONTEXT: bool = true;
    const MIGRATIONS: &'static [Migration] = &[
        Migration::Rename {
            from: ANNAL_OPTIONS_TYPEREF,
            to: ANNAL_FIELD_REF_TYPE,
        },
        Migration::Rename {
            from: ANNAL_RESTRICT_VALUES,
            to: ANNAL_FIELD_REF_RESTRICTION,
        },
        Migration::Rename {
            from: ANNAL_TARGET_FIELD,
            to: ANNAL_FIELD_REF_FIELD,
        },
        Migration::Rename {
            from: ANNAL_FIELD_TARGET_TYPE,
            to: ANNAL_FIELD_VALUE_TYPE,
        },
        Migration::Derive {
            to: ANNAL_FIELD_VALUE_MODE,
            derive: direct_value_mode,
        },
    ];

    fn default_values(entity_id: &str) -> Values {
        let mut values = super::labelled(entity_id);
        values.insert(ANNAL_FIELD_VALUE_MODE.to_owned(), Value::from(VALUE_DIRECT));
        values
    }
}

fn direct_value_mode(_: &Values) -> Option<Value> {
    Some(Value::from(VALUE_DIRECT))
}

/// Describes how one property of an entity is presented and stored.
pub type RecordField = Entity<RecordFieldKind>;

impl RecordField {
    /// Render type name, with any `type_id/` prefix removed.
    pub fn render_type(&self) -> Option<&str> {
        self.get_str(ANNAL_FIELD_RENDER_TYPE).map(extract_entity_id)
    }

    pub fn value_mode(&self) -> &str {
        self.get_str(ANNAL_FIELD_VALUE_MODE)
            .map(extract_entity_id)
            .unwrap_or(VALUE_DIRECT)
    }

    pub fn value_type(&self) -> Option<&str> {
        self.get_str(ANNAL_FIELD_VALUE_TYPE)
    }

    pub fn property_uri(&self) -> Option<&str> {
        self.get_str(ANNAL_PROPERTY_URI).filter(|uri| !uri.is_empty())
    }

    pub fn ref_type(&self) -> Option<&str> {
        self.get_str(ANNAL_FIELD_REF_TYPE)
    }

    pub fn placement(&self) -> Placement {
        Placement::parse(self.get_str(ANNAL_FIELD_PLACEMENT).unwrap_or_default())
    }
}
