//! Structural traversal over values.
//!
//! The walker decides what counts as a leaf and visits every leaf of a value
//! with the path that leads to it. Cyclic and shared containers are handled
//! with a `Visited` set that lives exactly as long as one top-level call.

use crate::path::{Key, Path};
use crate::value::Value;
use std::collections::HashSet;

/// Result of classifying a value for traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Leaf,
    Container,
}

/// Classify a value.
///
/// Only non-empty sequences and mappings are containers. Regexes, callables,
/// predicates and classes are always leaves. Empty containers are leaves so
/// that they are compared by equality instead of vanishing from a pattern.
pub fn classify(value: &Value) -> Shape {
    match value {
        Value::Seq(seq) if !seq.is_empty() => Shape::Container,
        Value::Map(map) if !map.is_empty() => Shape::Container,
        Value::Undefined
        | Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::String(_)
        | Value::Seq(_)
        | Value::Map(_)
        | Value::Regex(_)
        | Value::Func(_)
        | Value::Predicate(_)
        | Value::Class(_)
        | Value::Wildcard => Shape::Leaf,
    }
}

/// Container identities seen during one traversal.
#[derive(Debug, Default)]
pub struct Visited {
    seen: HashSet<usize>,
}

impl Visited {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id`. Returns `false` if it was already recorded.
    pub fn insert(&mut self, id: usize) -> bool {
        self.seen.insert(id)
    }
}

/// A value's structure with each leaf replaced by a transform result.
#[derive(Debug, Clone, PartialEq)]
pub enum Walked<T> {
    Leaf(T),
    Seq(Vec<Walked<T>>),
    Map(Vec<(String, Walked<T>)>),
}

/// Children to descend into, or `None` when `value` is handled as a leaf.
///
/// Records the container in `visited`, so a second arrival yields `None`.
fn descend(value: &Value, visited: &mut Visited) -> Option<Vec<(Key, Value)>> {
    if classify(value) == Shape::Leaf {
        return None;
    }
    match value.identity() {
        Some(id) if visited.insert(id) => value.children(),
        _ => None,
    }
}

/// Walk `value`, applying `transform` to every leaf with its path.
///
/// A container reached a second time in the same walk (through a cycle or a
/// shared reference) is handed to `transform` as a leaf instead of being
/// descended again.
pub fn walk<T, F>(value: &Value, mut transform: F) -> Walked<T>
where
    F: FnMut(&Value, &Path) -> T,
{
    let mut visited = Visited::new();
    let mut path = Path::new();
    walk_with(value, &mut transform, &mut path, &mut visited)
}

/// Walk with an explicit starting path and visited set.
pub fn walk_with<T, F>(
    value: &Value,
    transform: &mut F,
    path: &mut Path,
    visited: &mut Visited,
) -> Walked<T>
where
    F: FnMut(&Value, &Path) -> T,
{
    let Some(children) = descend(value, visited) else {
        return Walked::Leaf(transform(value, path));
    };

    let mut walk_child = |key: Key, child: &Value| {
        path.push(key);
        let walked = walk_with(child, transform, path, visited);
        path.pop();
        walked
    };
    match value {
        Value::Seq(_) => Walked::Seq(
            children
                .into_iter()
                .map(|(key, child)| walk_child(key, &child))
                .collect(),
        ),
        _ => Walked::Map(
            children
                .into_iter()
                .map(|(key, child)| (key.to_name(), walk_child(key, &child)))
                .collect(),
        ),
    }
}

/// Collect `transform` results for every leaf, in pre-order.
pub fn map_leaves<T, F>(value: &Value, mut transform: F) -> Vec<T>
where
    F: FnMut(&Value, &Path) -> T,
{
    fold_leaves(value, Vec::new(), |mut out, leaf, path| {
        out.push(transform(leaf, path));
        out
    })
}

/// Left fold over the leaves of `value`, in pre-order.
pub fn fold_leaves<A, F>(value: &Value, init: A, mut f: F) -> A
where
    F: FnMut(A, &Value, &Path) -> A,
{
    let mut visited = Visited::new();
    let mut path = Path::new();
    fold_with(value, init, &mut f, &mut path, &mut visited)
}

fn fold_with<A, F>(value: &Value, acc: A, f: &mut F, path: &mut Path, visited: &mut Visited) -> A
where
    F: FnMut(A, &Value, &Path) -> A,
{
    let Some(children) = descend(value, visited) else {
        return f(acc, value, path);
    };
    children.into_iter().fold(acc, |acc, (key, child)| {
        path.push(key);
        let acc = fold_with(&child, acc, f, path, visited);
        path.pop();
        acc
    })
}
