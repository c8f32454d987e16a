//! How field render types and value modes map onto JSON-LD term definitions.

use anyhow::Result;
use serde_json::{Value, json};

use crate::error::EntityError;
use crate::identifiers::{LD_CONTAINER, LD_ID, LD_LIST, LD_SET, LD_TYPE};

pub const VALUE_ENTITY: &str = "Value_entity";
pub const VALUE_FIELD: &str = "Value_field";
pub const VALUE_IMPORT: &str = "Value_import";
pub const VALUE_UPLOAD: &str = "Value_upload";

const LITERAL_RENDER_TYPES: &[&str] = &[
    "Text",
    "Textarea",
    "Codearea",
    "Showtext",
    "Markdown",
    "ShowMarkdown",
    "Placement",
    "CheckBox",
    "EntityId",
    "EntityTypeId",
];

const ID_RENDER_TYPES: &[&str] = &[
    "Identifier",
    "Enum",
    "Enum_optional",
    "Enum_choice",
    "Enum_choice_opt",
    "View_choice",
    "Type",
    "View",
    "List",
    "Field",
    "URILink",
    "URIImage",
    "URIImport",
    "FileUpload",
];

const SET_RENDER_TYPES: &[&str] = &["TokenSet", "RepeatGroup", "Group_Set", "Group_Set_Row"];

const LIST_RENDER_TYPES: &[&str] = &[
    "RepeatGroupRow",
    "RepeatListRow",
    "Group_Seq",
    "Group_Seq_Row",
];

const OBJECT_RENDER_TYPES: &[&str] = &["Group"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    /// Plain string value
    Literal,
    /// Reference to another resource
    Id,
    Set,
    List,
    /// Nested structure
    Object,
}

impl RenderKind {
    pub fn of(render_type: &str) -> Option<RenderKind> {
        let kinds = [
            (LITERAL_RENDER_TYPES, RenderKind::Literal),
            (ID_RENDER_TYPES, RenderKind::Id),
            (SET_RENDER_TYPES, RenderKind::Set),
            (LIST_RENDER_TYPES, RenderKind::List),
            (OBJECT_RENDER_TYPES, RenderKind::Object),
        ];
        kinds
            .into_iter()
            .find(|(names, _)| names.contains(&render_type))
            .map(|(_, kind)| kind)
    }
}

/// Term definition attached to a property URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyContext {
    Id,
    Set,
    List,
}

impl PropertyContext {
    pub fn ld_type(self) -> Option<&'static str> {
        match self {
            PropertyContext::Id => Some(LD_ID),
            _ => None,
        }
    }

    pub fn container(self) -> Option<&'static str> {
        match self {
            PropertyContext::Set => Some(LD_SET),
            PropertyContext::List => Some(LD_LIST),
            PropertyContext::Id => None,
        }
    }

    pub fn to_json(self) -> Value {
        match self {
            PropertyContext::Id => json!({ LD_TYPE: LD_ID }),
            PropertyContext::Set => json!({ LD_CONTAINER: LD_SET }),
            PropertyContext::List => json!({ LD_CONTAINER: LD_LIST }),
        }
    }
}

/// Term definition for a field's property, if it needs one.
///
/// Value modes that refer to other entities, imports or uploads take
/// precedence over the render type.
pub fn field_context(
    field_id: &str,
    render_type: Option<&str>,
    value_mode: &str,
) -> Result<Option<PropertyContext>> {
    let effective = match value_mode {
        VALUE_ENTITY | VALUE_FIELD => "Enum",
        VALUE_IMPORT => "URIImport",
        VALUE_UPLOAD => "FileUpload",
        _ => render_type.unwrap_or_default(),
    };
    match RenderKind::of(effective) {
        Some(RenderKind::Literal) | Some(RenderKind::Object) => Ok(None),
        Some(RenderKind::Id) => Ok(Some(PropertyContext::Id)),
        Some(RenderKind::Set) => Ok(Some(PropertyContext::Set)),
        Some(RenderKind::List) => Ok(Some(PropertyContext::List)),
        None => Err(EntityError::ConfigurationInconsistency {
            field_id: field_id.to_owned(),
            render_type: effective.to_owned(),
            value_mode: value_mode.to_owned(),
        }
        .into()),
    }
}
