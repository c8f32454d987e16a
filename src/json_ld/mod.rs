//! JSON-LD context generation for collections.

mod context;
mod render_type;

pub use context::{ContextBuilder, ContextConflict};
pub use render_type::{
    PropertyContext, RenderKind, VALUE_ENTITY, VALUE_FIELD, VALUE_IMPORT, VALUE_UPLOAD,
    field_context,
};
