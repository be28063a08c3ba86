//! Container label parsing
//!
//! `<prefix>a.b.c = v` becomes `{a: {b: {c: v}}}`. Values containing a comma
//! become string lists.

use super::types::{ConfigTree, ConfigValue};
use std::collections::BTreeMap;

/// Scalar or list value of a label
pub fn parse_label_value(value: &str) -> ConfigValue {
    if value.contains(',') {
        ConfigValue::List(value.split(',').map(str::to_string).collect())
    } else {
        ConfigValue::String(value.to_string())
    }
}

/// Assign `value` at the dot separated `nested_key`.
///
/// Missing intermediate maps are created and intermediate non-map values are
/// replaced. The last write to a key wins.
pub fn set_nested_value(tree: &mut ConfigTree, nested_key: &str, value: ConfigValue) {
    let mut segments: Vec<&str> = nested_key.split('.').collect();
    let leaf = segments.pop().unwrap_or_default();

    let mut node = tree;
    for segment in segments {
        node = node
            .entry(segment.to_string())
            .or_insert_with(|| ConfigValue::Map(ConfigTree::new()))
            .make_map();
    }
    node.insert(leaf.to_string(), value);
}

/// Merge the labels carrying `prefix` into `tree`
pub fn apply_labels(tree: &mut ConfigTree, prefix: &str, labels: &BTreeMap<String, String>) {
    for (key, value) in labels {
        let Some(nested_key) = key.strip_prefix(prefix) else {
            continue;
        };
        set_nested_value(tree, nested_key, parse_label_value(value));
    }
}
