//! Storage layout of a site.
//!
//! Templates use `{id}` as the only placeholder, and it may appear in the last
//! path segment only, so the directory holding all instances of a kind is the
//! template with its last segment dropped.

pub const SITEDATA_ID: &str = "_annalist_site";
pub const INITIAL_VALUES_ID: &str = "_initial_values";

pub const SITE_COLL_PATH: &str = "c/{id}";
pub const COLL_META_FILE: &str = "_annalist_collection/coll_meta.jsonld";
pub const COLL_CONTEXT_FILE: &str = "coll_context.jsonld";

// Context document copies, relative to the collection directory
pub const COLL_META_CONTEXT_PATH: &str = "d/";
pub const SITEDATA_CONTEXT_PATH: &str = "_annalist_collection/";
pub const SITEDATA_ENUM_PATH: &str = "_annalist_collection/enums/";

pub const TYPE_TYPEID: &str = "_type";
pub const COLL_TYPE_PATH: &str = "d/_type/{id}";
pub const SITE_TYPE_PATH: &str = "_annalist_collection/types/{id}";
pub const TYPE_META_FILE: &str = "type_meta.jsonld";

pub const VIEW_TYPEID: &str = "_view";
pub const COLL_VIEW_PATH: &str = "d/_view/{id}";
pub const SITE_VIEW_PATH: &str = "_annalist_collection/views/{id}";
pub const VIEW_META_FILE: &str = "view_meta.jsonld";

pub const LIST_TYPEID: &str = "_list";
pub const COLL_LIST_PATH: &str = "d/_list/{id}";
pub const SITE_LIST_PATH: &str = "_annalist_collection/lists/{id}";
pub const LIST_META_FILE: &str = "list_meta.jsonld";

pub const FIELD_TYPEID: &str = "_field";
pub const COLL_FIELD_PATH: &str = "d/_field/{id}";
pub const SITE_FIELD_PATH: &str = "_annalist_collection/fields/{id}";
pub const FIELD_META_FILE: &str = "field_meta.jsonld";

pub const GROUP_TYPEID: &str = "_group";
pub const COLL_GROUP_PATH: &str = "d/_group/{id}";
pub const SITE_GROUP_PATH: &str = "_annalist_collection/groups/{id}";
pub const GROUP_META_FILE: &str = "group_meta.jsonld";

pub const VOCAB_TYPEID: &str = "_vocab";
pub const COLL_VOCAB_PATH: &str = "d/_vocab/{id}";
pub const SITE_VOCAB_PATH: &str = "_annalist_collection/vocabs/{id}";
pub const VOCAB_META_FILE: &str = "vocab_meta.jsonld";

pub const USER_TYPEID: &str = "_user";
pub const COLL_USER_PATH: &str = "d/_user/{id}";
pub const SITE_USER_PATH: &str = "_annalist_collection/users/{id}";
pub const USER_META_FILE: &str = "user_meta.jsonld";

pub const COLL_TYPEID: &str = "_coll";

/// Body file name of collection children written by earlier layouts.
pub const ENTITY_OLD_DATA_FILE: &str = "entity-data.jsonld";

/// `@context` of a collection child body: base is the collection data
/// directory, context file sits alongside.
pub const CHILD_CONTEXT_BASE: &str = "../../";
pub const CHILD_CONTEXT_REF: &str = "../../coll_context.jsonld";
pub const COLL_CONTEXT_BASE: &str = "../d/";
pub const COLL_CONTEXT_REF: &str = "coll_context.jsonld";

/// Expand a `{id}` template.
pub fn expand(template: &str, id: &str) -> String {
    template.replace("{id}", id)
}

/// The directory holding every instance described by `template`.
pub fn template_dir(template: &str) -> &str {
    match template.rfind('/') {
        Some(pos) => &template[..=pos],
        None => "",
    }
}
