//! Depth-first flattening of nested catalog records
//!
//! Walks mappings and sequences and yields every leaf together with the keys
//! that lead to it. Sequence elements do not extend the path: all elements of
//! `{"a": [{"b": 1}, {"b": 2}]}` land on `a.b`.

use crate::value::{FieldPath, LeafEntry, Scalar};
use serde_json::Value;

/// Flatten `node` into leaf entries, prefixing every path with `prefix`.
///
/// The returned iterator is lazy and holds no state shared with other calls;
/// calling `flatten` again restarts the walk from scratch.
///
/// A bare scalar passed as `node` yields a single entry whose path is just
/// `prefix`. That only happens for degenerate input.
pub fn flatten<'a>(node: &'a Value, prefix: &[&str]) -> Leaves<'a> {
    let path: FieldPath = prefix.iter().copied().collect();
    let depth = path.len();

    let mut leaves = Leaves {
        path,
        stack: Vec::new(),
        root: None,
    };

    match node {
        Value::Object(map) => leaves.stack.push(Frame {
            depth,
            children: Children::Object(map.iter()),
        }),
        Value::Array(items) => leaves.stack.push(Frame {
            depth,
            children: Children::Array(items.iter()),
        }),
        _ => leaves.root = Scalar::from_value(node),
    }

    leaves
}

/// Iterator over the leaves of a record, see [`flatten()`]
pub struct Leaves<'a> {
    path: FieldPath,
    stack: Vec<Frame<'a>>,
    root: Option<Scalar<'a>>,
}

struct Frame<'a> {
    /// Path length shared by every child of this container
    depth: usize,
    children: Children<'a>,
}

enum Children<'a> {
    Object(serde_json::map::Iter<'a>),
    Array(std::slice::Iter<'a, Value>),
}

impl<'a> Iterator for Leaves<'a> {
    type Item = LeafEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(value) = self.root.take() {
            return Some(LeafEntry {
                path: self.path.clone(),
                value,
            });
        }

        loop {
            let frame = self.stack.last_mut()?;
            let depth = frame.depth;

            let next = match &mut frame.children {
                Children::Object(entries) => entries.next().map(|(k, v)| (Some(k), v)),
                Children::Array(items) => items.next().map(|v| (None, v)),
            };

            let Some((key, child)) = next else {
                self.stack.pop();
                continue;
            };

            self.path.truncate(depth);
            if let Some(key) = key {
                self.path.push(key);
            }

            match child {
                Value::Object(map) => self.stack.push(Frame {
                    depth: self.path.len(),
                    children: Children::Object(map.iter()),
                }),
                Value::Array(items) => self.stack.push(Frame {
                    depth: self.path.len(),
                    children: Children::Array(items.iter()),
                }),
                _ => {
                    if let Some(value) = Scalar::from_value(child) {
                        return Some(LeafEntry {
                            path: self.path.clone(),
                            value,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collect(node: &Value) -> Vec<(String, String)> {
        flatten(node, &[])
            .map(|leaf| (leaf.path.dotted(), leaf.value.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_mapping_yields_nothing() {
        assert_eq!(flatten(&json!({}), &[]).count(), 0);
    }

    #[test]
    fn test_nested_mapping_yields_single_leaf() {
        let record = json!({"a": {"b": {"c": 5}}});
        let leaves: Vec<_> = flatten(&record, &[]).collect();

        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].path.segments(), &["a", "b", "c"]);
        assert_eq!(leaves[0].value, Scalar::from_value(&json!(5)).unwrap());
    }

    #[test]
    fn test_sequence_elements_share_path() {
        let record = json!({"a": [{"b": 1}, {"b": 2}]});
        assert_eq!(
            collect(&record),
            vec![
                ("a.b".to_string(), "1".to_string()),
                ("a.b".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_traversal_is_depth_first_in_key_order() {
        let record = json!({
            "uuid": "u",
            "negative": {
                "frame": "12",
                "lens": {"serial": "L1"},
                "caption": "Harbour"
            },
            "filename": "12-3.jpg"
        });

        let paths: Vec<String> = collect(&record).into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![
                "uuid",
                "negative.frame",
                "negative.lens.serial",
                "negative.caption",
                "filename"
            ]
        );
    }

    #[test]
    fn test_null_leaves_are_yielded() {
        let record = json!({"negative": {"notes": null}});
        let leaves: Vec<_> = flatten(&record, &[]).collect();
        assert_eq!(leaves.len(), 1);
        assert!(leaves[0].value.is_null());
    }

    #[test]
    fn test_empty_containers_yield_nothing() {
        let record = json!({"a": {}, "b": [], "c": 1});
        assert_eq!(collect(&record), vec![("c".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_prefix_and_bare_scalar() {
        let record = json!({"x": 1});
        let leaves: Vec<_> = flatten(&record, &["scan"]).collect();
        assert_eq!(leaves[0].path.dotted(), "scan.x");

        let bare = json!("loose");
        let leaves: Vec<_> = flatten(&bare, &["root"]).collect();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].path.dotted(), "root");
        assert_eq!(leaves[0].value, Scalar::Text("loose"));
    }

    #[test]
    fn test_flatten_is_restartable() {
        let record = json!({"a": [{"b": 1}, {"c": {"d": 2}}]});
        let first: Vec<_> = flatten(&record, &[]).collect();
        let second: Vec<_> = flatten(&record, &[]).collect();
        assert_eq!(first, second);
        assert_eq!(first[1].path.dotted(), "a.c.d");
    }
}
