use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::identifiers::{ANNAL_TYPE, LD_CONTAINER, LD_ID, LD_TYPE};

use super::render_type::PropertyContext;

/// Prefixes of absolute URIs accepted as terms without a declared vocabulary.
const ABSOLUTE_SCHEMES: [&str; 3] = ["http", "https", "file"];

/// A property URI that was bound again with a different term definition.
/// The first binding is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConflict {
    pub property_uri: String,
    pub existing: Value,
    pub proposed: Option<PropertyContext>,
}

/// Accumulates a collection's `@context` map.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    context: Map<String, Value>,
    conflicts: Vec<ContextConflict>,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        ContextBuilder::new()
    }
}

impl ContextBuilder {
    /// Start from the fixed header terms.
    pub fn new() -> ContextBuilder {
        let mut context = Map::new();
        context.insert(ANNAL_TYPE.to_owned(), json!({ LD_TYPE: LD_ID }));
        for name in [
            "resource_name",
            "resource_type",
            "upload_name",
            "uploaded_file",
            "uploaded_size",
            "import_name",
        ] {
            context.insert(name.to_owned(), Value::String(format!("annal:{name}")));
        }
        context.insert(
            "import_url".to_owned(),
            json!({ LD_ID: "annal:import_url", LD_TYPE: LD_ID }),
        );
        ContextBuilder {
            context,
            conflicts: vec![],
        }
    }

    pub fn add_vocab(&mut self, prefix: &str, namespace_uri: &str) {
        debug!(target: "context", prefix, namespace_uri, "vocabulary prefix");
        self.context
            .insert(prefix.to_owned(), Value::String(namespace_uri.to_owned()));
    }

    /// Bind a property URI to a term definition.
    ///
    /// URIs without `:` are ignored. A URI is only bound when it has a term
    /// definition and its prefix is already a term or an absolute URI scheme.
    /// An existing binding is never replaced.
    pub fn add_property(&mut self, property_uri: &str, fragment: Option<PropertyContext>) {
        let Some((prefix, _)) = property_uri.split_once(':') else {
            return;
        };
        if let Some(existing) = self.context.get(property_uri) {
            let compatible = fragment.is_some_and(|f| {
                existing.get(LD_TYPE).and_then(Value::as_str) == f.ld_type()
                    && existing.get(LD_CONTAINER).and_then(Value::as_str) == f.container()
            });
            if !compatible {
                warn!(
                    target: "context",
                    property_uri,
                    ?fragment,
                    %existing,
                    "incompatible use of property"
                );
                self.conflicts.push(ContextConflict {
                    property_uri: property_uri.to_owned(),
                    existing: existing.clone(),
                    proposed: fragment,
                });
            }
            return;
        }
        let Some(fragment) = fragment else {
            return;
        };
        if self.context.contains_key(prefix) || ABSOLUTE_SCHEMES.contains(&prefix) {
            self.context
                .insert(property_uri.to_owned(), fragment.to_json());
        }
    }

    pub fn conflicts(&self) -> &[ContextConflict] {
        &self.conflicts
    }

    pub fn finish(self) -> (Map<String, Value>, Vec<ContextConflict>) {
        (self.context, self.conflicts)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{ContextBuilder, PropertyContext};

    #[test]
    fn header_terms_in_order() {
        let (context, conflicts) = ContextBuilder::new().finish();
        assert!(conflicts.is_empty());
        let keys: Vec<&str> = context.keys().map(String::as_str).collect();
        assert_eq!(
            vec![
                "annal:type",
                "resource_name",
                "resource_type",
                "upload_name",
                "uploaded_file",
                "uploaded_size",
                "import_name",
                "import_url",
            ],
            keys
        );
        assert_eq!(
            json!({"@id": "annal:import_url", "@type": "@id"}),
            context["import_url"]
        );
        assert_eq!(json!("annal:upload_name"), context["upload_name"]);
    }

    #[test]
    fn property_needs_known_prefix() {
        let mut builder = ContextBuilder::new();
        builder.add_vocab("ex", "http://example.org/ns#");
        builder.add_property("ex:status", Some(PropertyContext::Id));
        builder.add_property("other:thing", Some(PropertyContext::Id));
        builder.add_property("http://example.org/full", Some(PropertyContext::Set));
        builder.add_property("nocolon", Some(PropertyContext::Id));
        builder.add_property("ex:literal", None);
        let (context, conflicts) = builder.finish();
        assert!(conflicts.is_empty());
        assert_eq!(json!("http://example.org/ns#"), context["ex"]);
        assert_eq!(json!({"@type": "@id"}), context["ex:status"]);
        assert_eq!(
            json!({"@container": "@set"}),
            context["http://example.org/full"]
        );
        for absent in ["other:thing", "nocolon", "ex:literal"] {
            assert!(!context.contains_key(absent));
        }
    }

    #[test]
    fn first_binding_wins() {
        let mut builder = ContextBuilder::new();
        builder.add_vocab("ex", "http://example.org/ns#");
        builder.add_property("ex:tags", Some(PropertyContext::Set));
        builder.add_property("ex:tags", Some(PropertyContext::Set));
        assert!(builder.conflicts().is_empty());
        builder.add_property("ex:tags", Some(PropertyContext::List));
        builder.add_property("ex:tags", None);
        let (context, conflicts) = builder.finish();
        assert_eq!(json!({"@container": "@set"}), context["ex:tags"]);
        assert_eq!(2, conflicts.len());
        assert_eq!("ex:tags", conflicts[0].property_uri);
        assert_eq!(Some(PropertyContext::List), conflicts[0].proposed);
        assert_eq!(None, conflicts[1].proposed);
    }

    #[test]
    fn builtin_term_is_not_rebound() {
        let mut builder = ContextBuilder::new();
        builder.add_property("annal:type", Some(PropertyContext::Id));
        let (context, conflicts) = builder.finish();
        assert!(conflicts.is_empty());
        assert_eq!(Value::from("@id"), context["annal:type"]["@type"]);
    }
}
