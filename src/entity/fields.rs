use std::fmt;

use serde_json::Value;

use super::Values;

/// One step on the way from an entity body to a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => f.write_str(key),
            PathStep::Index(index) => write!(f, "[{index}]"),
        }
    }
}

pub type FieldPath = Vec<PathStep>;

/// Every leaf value of `values` with the path leading to it, in body order.
///
/// Arrays made up entirely of objects are repeated field groups and are
/// descended into, so an empty array yields nothing. Any other value is a
/// leaf.
pub fn enum_fields(values: &Values) -> Vec<(FieldPath, &Value)> {
    let mut fields = vec![];
    collect(&mut vec![], values, &mut fields);
    fields
}

fn collect<'a>(
    prefix: &mut FieldPath,
    values: &'a Values,
    out: &mut Vec<(FieldPath, &'a Value)>,
) {
    for (key, value) in values {
        prefix.push(PathStep::Key(key.clone()));
        match value {
            Value::Array(items) if items.iter().all(Value::is_object) => {
                for (index, item) in items.iter().enumerate() {
                    if let Value::Object(group) = item {
                        prefix.push(PathStep::Index(index));
                        collect(prefix, group, out);
                        prefix.pop();
                    }
                }
            }
            _ => out.push((prefix.clone(), value)),
        }
        prefix.pop();
    }
}

/// Follow a path produced by [`enum_fields`].
pub fn get_field<'a>(values: &'a Values, path: &[PathStep]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let PathStep::Key(key) = first else {
        return None;
    };
    let mut value = values.get(key)?;
    for step in rest {
        value = match step {
            PathStep::Key(key) => value.get(key.as_str())?,
            PathStep::Index(index) => value.get(*index)?,
        };
    }
    Some(value)
}
