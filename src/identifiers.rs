//! CURIEs used as value keys and type tags in stored entity bodies.

pub const RDFS_LABEL: &str = "rdfs:label";
pub const RDFS_COMMENT: &str = "rdfs:comment";

// Identity keys injected into every body
pub const ANNAL_ID: &str = "annal:id";
pub const ANNAL_TYPE_ID: &str = "annal:type_id";
pub const ANNAL_TYPE: &str = "annal:type";
pub const ANNAL_URL: &str = "annal:url";
pub const ANNAL_URI: &str = "annal:uri";

// Entity type tags
pub const ANNAL_COLLECTION: &str = "annal:Collection";
pub const ANNAL_TYPE_ENTITY: &str = "annal:Type";
pub const ANNAL_VIEW: &str = "annal:View";
pub const ANNAL_LIST: &str = "annal:List";
pub const ANNAL_FIELD: &str = "annal:Field";
pub const ANNAL_FIELD_GROUP: &str = "annal:Field_group";
pub const ANNAL_VOCABULARY: &str = "annal:Vocabulary";
pub const ANNAL_USER: &str = "annal:User";

// Collection
pub const ANNAL_DEFAULT_LIST: &str = "annal:default_list";
pub const ANNAL_DEFAULT_VIEW: &str = "annal:default_view";

// Record type
pub const ANNAL_TYPE_VIEW: &str = "annal:type_view";
pub const ANNAL_TYPE_LIST: &str = "annal:type_list";

// Views, groups, lists
pub const ANNAL_VIEW_FIELDS: &str = "annal:view_fields";
pub const ANNAL_GROUP_FIELDS: &str = "annal:group_fields";
pub const ANNAL_LIST_FIELDS: &str = "annal:list_fields";
pub const ANNAL_VIEW_ENTITY_TYPE: &str = "annal:view_entity_type";
pub const ANNAL_LIST_ENTITY_TYPE: &str = "annal:list_entity_type";
pub const ANNAL_GROUP_ENTITY_TYPE: &str = "annal:group_entity_type";
pub const ANNAL_RECORD_TYPE: &str = "annal:record_type";
pub const ANNAL_DISPLAY_TYPE: &str = "annal:display_type";
pub const ANNAL_LIST_ENTITY_SELECTOR: &str = "annal:list_entity_selector";

// Fields
pub const ANNAL_FIELD_ID: &str = "annal:field_id";
pub const ANNAL_PROPERTY_URI: &str = "annal:property_uri";
pub const ANNAL_FIELD_PLACEMENT: &str = "annal:field_placement";
pub const ANNAL_FIELD_RENDER_TYPE: &str = "annal:field_render_type";
pub const ANNAL_FIELD_VALUE_MODE: &str = "annal:field_value_mode";
pub const ANNAL_FIELD_VALUE_TYPE: &str = "annal:field_value_type";
pub const ANNAL_FIELD_REF_TYPE: &str = "annal:field_ref_type";
pub const ANNAL_FIELD_REF_RESTRICTION: &str = "annal:field_ref_restriction";
pub const ANNAL_FIELD_REF_FIELD: &str = "annal:field_ref_field";

// Legacy field keys, read only through migration
pub const ANNAL_OPTIONS_TYPEREF: &str = "annal:options_typeref";
pub const ANNAL_RESTRICT_VALUES: &str = "annal:restrict_values";
pub const ANNAL_TARGET_FIELD: &str = "annal:target_field";
pub const ANNAL_FIELD_TARGET_TYPE: &str = "annal:field_target_type";

// Users
pub const ANNAL_USER_URI: &str = "annal:user_uri";
pub const ANNAL_USER_PERMISSIONS: &str = "annal:user_permissions";

// JSON-LD keywords
pub const LD_ID: &str = "@id";
pub const LD_TYPE: &str = "@type";
pub const LD_CONTEXT: &str = "@context";
pub const LD_BASE: &str = "@base";
pub const LD_CONTAINER: &str = "@container";
pub const LD_SET: &str = "@set";
pub const LD_LIST: &str = "@list";
