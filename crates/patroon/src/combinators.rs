//! Combinators for composing patterns.
//!
//! Supports conjunction (`every`), disjunction (`some`), negation (`not`) and
//! joint matching across several call arguments (`multi`), plus the
//! `instance_of` and `same` helpers. Every operand is an ordinary pattern
//! value; the results are predicates that can be used as patterns again.

use crate::compile::{compile, Predicate};
use crate::error::MatchError;
use crate::value::Value;

fn compile_all<I>(patterns: I) -> Vec<Predicate>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    patterns
        .into_iter()
        .map(|p| compile(&p.into()))
        .collect()
}

/// Matches when every operand matches. Operands run in order and stop at the
/// first miss; with no operands it always matches.
pub fn every<I>(patterns: I) -> Predicate
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let predicates = compile_all(patterns);
    Predicate::new(move |args| {
        for predicate in &predicates {
            if !predicate.test(args)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// Matches when any operand matches. Operands run in order and stop at the
/// first hit; with no operands it never matches.
pub fn some<I>(patterns: I) -> Predicate
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let predicates = compile_all(patterns);
    Predicate::new(move |args| {
        for predicate in &predicates {
            if predicate.test(args)? {
                return Ok(true);
            }
        }
        Ok(false)
    })
}

/// Negates a pattern.
pub fn not(pattern: impl Into<Value>) -> Predicate {
    let inner = compile(&pattern.into());
    Predicate::new(move |args| Ok(!inner.test(args)?))
}

/// Match the whole argument tuple at once.
///
/// The operands form one sequence pattern, matched against the arguments as a
/// sequence: `multi([ANY, x])` matches a call `(anything, x)` but not
/// `(x, anything)`.
pub fn multi<I>(patterns: I) -> Predicate
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let joint = compile(&Value::seq(patterns.into_iter().map(Into::<Value>::into)));
    Predicate::new(move |args| joint.matches(&Value::seq(args.iter().cloned())))
}

/// Type membership: matches values whose class is `class` or derives from it.
///
/// Fails with `NotAClass` when `class` is not a class value.
pub fn instance_of(class: &Value) -> Result<Predicate, MatchError> {
    match class {
        Value::Class(class) => {
            let class = class.clone();
            Ok(Predicate::new(move |args| {
                Ok(args.first().is_some_and(|v| v.instance_of(&class)))
            }))
        }
        other => Err(MatchError::NotAClass {
            found: format!("{} {}", other.kind().label(), other),
        }),
    }
}

/// Identity: matches only `value` itself, never a structurally equal copy.
///
/// Use this to match a class or container object itself, since a class in a
/// pattern otherwise means "instance of".
pub fn same(value: impl Into<Value>) -> Predicate {
    let expected = value.into();
    Predicate::new(move |args| Ok(args.first().is_some_and(|v| v.same(&expected))))
}
