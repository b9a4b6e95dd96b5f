//! Pattern compilation.
//!
//! A pattern is decomposed by the walker into one test per leaf, each closed
//! over the path that leads to it. The compiled predicate resolves every path
//! against the target and requires all leaf tests to pass. A target lacking a
//! path is a plain non-match; only errors from user callables propagate.

use crate::error::MatchError;
use crate::path::{self, format_path, Path};
use crate::value::{Callable, Class, Value};
use crate::walk;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

type TestFn = dyn Fn(&[Value]) -> Result<bool, MatchError> + Send + Sync;

/// A compiled, reusable test over an argument tuple.
///
/// Predicates are cheap to clone and safe to share between threads. They are
/// side-effect free apart from whatever user callables they invoke.
#[derive(Clone)]
pub struct Predicate(Arc<TestFn>);

impl Predicate {
    /// Build a predicate from a raw test over the argument tuple.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&[Value]) -> Result<bool, MatchError> + Send + Sync + 'static,
    {
        Predicate(Arc::new(test))
    }

    /// Evaluate against an argument tuple.
    #[inline]
    pub fn test(&self, args: &[Value]) -> Result<bool, MatchError> {
        (self.0)(args)
    }

    /// Evaluate against a single value.
    #[inline]
    pub fn matches(&self, value: &Value) -> Result<bool, MatchError> {
        self.test(std::slice::from_ref(value))
    }

    pub fn ptr_eq(&self, other: &Predicate) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

/// The test applied at one leaf position.
#[derive(Debug, Clone)]
pub enum LeafTest {
    /// Wildcard, always passes
    Any,
    /// Target's textual form matches the regex
    Regex(Arc<Regex>),
    /// Target's class is the class or derives from it
    InstanceOf(Class),
    /// User callable applied to the resolved value, result coerced to bool
    Call(Callable),
    /// Compiled predicate applied to the whole argument tuple
    Raw(Predicate),
    /// Deep structural equality with the literal
    Equals(Value),
}

impl LeafTest {
    /// Check a resolved target against this test.
    ///
    /// `Raw` ignores the target; use `CompiledLeaf::evaluate` to route it the
    /// argument tuple.
    pub fn check(&self, target: &Value) -> Result<bool, MatchError> {
        match self {
            LeafTest::Any => Ok(true),
            LeafTest::Regex(re) => Ok(re.is_match(&target.to_text())),
            LeafTest::InstanceOf(class) => Ok(target.instance_of(class)),
            LeafTest::Call(callable) => callable
                .call(std::slice::from_ref(target))
                .map(|result| result.is_truthy())
                .map_err(MatchError::from_callback),
            LeafTest::Raw(predicate) => predicate.matches(target),
            LeafTest::Equals(expected) => Ok(expected.structural_eq(target)),
        }
    }
}

/// Turn one leaf of a pattern into its test.
pub fn normalize_leaf(leaf: &Value) -> LeafTest {
    match leaf {
        Value::Wildcard => LeafTest::Any,
        Value::Regex(re) => LeafTest::Regex(Arc::clone(re)),
        Value::Class(class) => LeafTest::InstanceOf(class.clone()),
        Value::Func(callable) => LeafTest::Call(callable.clone()),
        Value::Predicate(predicate) => LeafTest::Raw(predicate.clone()),
        other => LeafTest::Equals(other.clone()),
    }
}

/// A leaf test bound to its path in the pattern.
#[derive(Debug, Clone)]
pub struct CompiledLeaf {
    pub path: Path,
    pub test: LeafTest,
}

impl CompiledLeaf {
    pub fn new(leaf: &Value, path: &Path) -> Self {
        Self {
            path: path.clone(),
            test: normalize_leaf(leaf),
        }
    }

    /// Resolve this leaf's path against `root` and apply the test.
    ///
    /// A missing path is a non-match. Raw predicates skip resolution and see
    /// the full argument tuple.
    pub fn evaluate(&self, args: &[Value], root: &Value) -> Result<bool, MatchError> {
        if let LeafTest::Raw(predicate) = &self.test {
            return predicate.test(args);
        }
        match path::resolve(&self.path, root) {
            Ok(target) => self.test.check(&target),
            Err(missing) => {
                trace!("Leaf at {} absent from target", format_path(&missing.path));
                Ok(false)
            }
        }
    }
}

/// Compile a pattern into a predicate over its first argument.
///
/// Called with no arguments, the predicate matches against `Undefined`. A
/// pattern that is already a predicate value compiles to that predicate.
///
/// A container reached a second time while compiling one pattern, whether
/// through a cycle or because the same sub-pattern sits at two positions, is
/// not descended again. It becomes a single equality leaf, so wildcards,
/// regexes and classes inside that second occurrence are compared literally
/// rather than applied. Build a fresh sub-pattern for each position when they
/// must act as tests.
pub fn compile(pattern: &Value) -> Predicate {
    if let Value::Predicate(predicate) = pattern {
        return predicate.clone();
    }

    let leaves = compile_leaves(pattern);
    trace!("Compiled pattern {} into {} leaf tests", pattern, leaves.len());

    Predicate::new(move |args| {
        let undefined = Value::Undefined;
        let root = args.first().unwrap_or(&undefined);
        for leaf in &leaves {
            if !leaf.evaluate(args, root)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// Decompose a pattern into its leaf tests, in pre-order.
pub fn compile_leaves(pattern: &Value) -> Vec<CompiledLeaf> {
    walk::map_leaves(pattern, CompiledLeaf::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{classes, Map, Seq};
    use crate::ANY;
    use serde_json::json;

    fn matches(pattern: &Value, target: &Value) -> bool {
        compile(pattern).matches(target).unwrap()
    }

    #[test]
    fn test_literal_leaf() {
        assert!(matches(&Value::from(1), &Value::from(1)));
        assert!(!matches(&Value::from(1), &Value::from(2)));
        assert!(!matches(&Value::from(1), &Value::from("1")));
        assert!(matches(&Value::nan(), &Value::nan()));
        assert!(matches(&Value::Undefined, &Value::Undefined));
        assert!(!matches(&Value::Undefined, &Value::Null));
    }

    #[test]
    fn test_partial_mapping_match() {
        let pattern = Value::from(json!({"a": 1}));
        assert!(matches(&pattern, &Value::from(json!({"a": 1, "b": 2}))));
        assert!(!matches(&pattern, &Value::from(json!({"a": 2}))));
        assert!(!matches(&pattern, &Value::from(json!({"b": 1}))));
    }

    #[test]
    fn test_missing_path_is_non_match() {
        let pattern = Value::from(json!({"a": {"b": 2}}));
        assert!(!matches(&pattern, &Value::from(json!({}))));
        assert!(!matches(&pattern, &Value::from(json!({"a": 5}))));
        assert!(!matches(&pattern, &Value::Undefined));
    }

    #[test]
    fn test_regex_leaf() {
        let pattern = Value::map([("a", Value::regex("^banana").unwrap())]);
        assert!(matches(&pattern, &Value::from(json!({"a": "banana tree"}))));
        assert!(!matches(&pattern, &Value::from(json!({"a": "bunion tree"}))));

        let digits = Value::regex(r"^\d+$").unwrap();
        assert!(matches(&digits, &Value::from(42)));
    }

    #[test]
    fn test_class_leaf() {
        let point = Class::new("Point");
        let pattern = Value::map([("at", Value::Class(point.clone()))]);
        let target = Value::map([(
            "at",
            Value::Map(Map::instance(&point, [("x", Value::from(1))])),
        )]);

        assert!(matches(&pattern, &target));
        assert!(!matches(&pattern, &Value::from(json!({"at": {"x": 1}}))));
        assert!(matches(
            &Value::Class(classes::number()),
            &Value::from(3.5)
        ));
    }

    #[test]
    fn test_callable_leaf_coerces_result() {
        let positive = Value::func(|args| {
            Ok(Value::from(matches!(args.first(), Some(Value::Number(n)) if *n > 0.0)))
        });
        let pattern = Value::map([("n", positive)]);
        assert!(matches(&pattern, &Value::from(json!({"n": 3}))));
        assert!(!matches(&pattern, &Value::from(json!({"n": -3}))));

        let length = Value::func(|args| Ok(Value::from(args[0].to_text().len() as i64)));
        assert!(matches(&length, &Value::from("abc")));
        assert!(!matches(&length, &Value::from("")));
    }

    #[test]
    fn test_callable_fault_propagates() {
        let failing = Value::func(|_| Err(anyhow::anyhow!("predicate exploded")));
        let err = compile(&failing).test(&[]).unwrap_err();

        assert!(matches!(err, MatchError::Callback(_)));
        assert_eq!(err.to_string(), "predicate exploded");
    }

    #[test]
    fn test_wildcard_requires_position() {
        let pattern = Value::map([("a", ANY)]);
        assert!(matches(&pattern, &Value::from(json!({"a": null}))));
        assert!(!matches(&pattern, &Value::from(json!({"b": 1}))));
        assert!(matches(&ANY, &Value::Undefined));
    }

    #[test]
    fn test_empty_containers_compare_by_equality() {
        let empty_seq = Value::seq(vec![]);
        assert!(matches(&empty_seq, &Value::seq(vec![])));
        assert!(matches(&empty_seq, &Value::from(json!({}))));
        assert!(!matches(&empty_seq, &Value::from(json!({"a": 1}))));
        assert!(!matches(&empty_seq, &Value::from(json!([1]))));

        let pattern = Value::from(json!({"items": []}));
        assert!(matches(&pattern, &Value::from(json!({"items": []}))));
        assert!(!matches(&pattern, &Value::from(json!({"items": [1]}))));
    }

    #[test]
    fn test_cross_kind_containers() {
        let seq = Value::from(json!([1]));
        let map = Value::from(json!({"0": 1}));
        assert!(matches(&seq, &map));
        assert!(matches(&map, &seq));
    }

    #[test]
    fn test_cyclic_pattern_matches_itself() {
        let node = Map::from_entries([("id", Value::from(1))]);
        node.insert("next", node.clone());
        let value = Value::Map(node);

        let predicate = compile(&value);
        assert!(predicate.matches(&value).unwrap());
        // Reuse is stable.
        assert!(predicate.matches(&value).unwrap());
    }

    #[test]
    fn test_cyclic_pattern_against_distinct_cycle() {
        let a = Seq::new(vec![Value::from(1)]);
        a.push(a.clone());
        let b = Seq::new(vec![Value::from(1)]);
        b.push(b.clone());

        assert!(matches(&Value::Seq(a), &Value::Seq(b)));
    }

    #[test]
    fn test_shared_sub_pattern_second_use_is_literal() {
        let sub = || Value::map([("k", ANY)]);
        let shared = sub();
        let target = Value::from(json!({"a": {"k": 5}, "b": {"k": 5}}));

        let reused = Value::map([("a", shared.clone()), ("b", shared)]);
        assert!(!matches(&reused, &target));

        let leaves = compile_leaves(&reused);
        let paths: Vec<String> = leaves.iter().map(|l| format_path(&l.path)).collect();
        assert_eq!(paths, vec!["$.a.k", "$.b"]);
        assert!(matches!(leaves[1].test, LeafTest::Equals(_)));

        let fresh = Value::map([("a", sub()), ("b", sub())]);
        assert!(matches(&fresh, &target));
    }

    #[test]
    fn test_raw_predicate_leaf_sees_argument_tuple() {
        let second_is_two = Predicate::new(|args| {
            Ok(args.get(1).is_some_and(|v| v.same(&Value::from(2))))
        });
        let pattern = Value::map([("a", Value::from(1)), ("b", Value::Predicate(second_is_two))]);
        let predicate = compile(&pattern);

        let target = Value::from(json!({"a": 1}));
        assert!(predicate.test(&[target.clone(), Value::from(2)]).unwrap());
        assert!(!predicate.test(&[target, Value::from(3)]).unwrap());
    }

    #[test]
    fn test_predicate_pattern_compiles_to_itself() {
        let p = Predicate::new(|_| Ok(true));
        assert!(compile(&Value::Predicate(p.clone())).ptr_eq(&p));
    }

    #[test]
    fn test_compile_leaves_order() {
        let leaves = compile_leaves(&Value::from(json!({"a": [1, 2], "b": "x"})));
        let paths: Vec<String> = leaves.iter().map(|l| format_path(&l.path)).collect();
        assert_eq!(paths, vec!["$.a[0]", "$.a[1]", "$.b"]);
    }

    #[test]
    fn test_short_circuit_in_leaf_order() {
        let failing = Value::func(|_| Err(anyhow::anyhow!("should not run")));
        let pattern = Value::map([("a", Value::from(1)), ("b", failing)]);
        let predicate = compile(&pattern);

        assert!(!predicate
            .matches(&Value::from(json!({"a": 2, "b": 0})))
            .unwrap());
        assert!(predicate
            .matches(&Value::from(json!({"a": 1, "b": 0})))
            .is_err());
    }
}
