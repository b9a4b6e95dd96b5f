//! First-match-wins dispatch over a compiled clause table.
//!
//! Patterns are compiled once when the table is built. Each call scans the
//! clauses in declaration order and runs the handler of the first clause whose
//! predicate holds; later clauses are never evaluated, so a narrow clause can
//! deliberately shadow a broader one declared after it.

use crate::compile::{compile, Predicate};
use crate::error::MatchError;
use crate::value::{Callable, Value};
use std::sync::Arc;
use tracing::{debug, trace};

/// What a clause produces when it matches.
#[derive(Debug, Clone)]
pub enum Handler {
    /// Called with the dispatch arguments
    Call(Callable),
    /// Returned as-is
    Value(Value),
}

impl Handler {
    /// Create a handler from a closure.
    pub fn call<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Handler::Call(Callable::new(f))
    }

    /// Produce the clause result for `args`.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, MatchError> {
        match self {
            Handler::Call(callable) => callable.call(args).map_err(MatchError::from_callback),
            Handler::Value(value) => Ok(value.clone()),
        }
    }
}

/// Callables are called; any other value is a constant result.
impl From<Value> for Handler {
    fn from(value: Value) -> Self {
        match value {
            Value::Func(callable) => Handler::Call(callable),
            Value::Predicate(predicate) => Handler::from(predicate),
            other => Handler::Value(other),
        }
    }
}

/// A predicate handler yields its verdict over the dispatch arguments.
impl From<Predicate> for Handler {
    fn from(predicate: Predicate) -> Self {
        Handler::call(move |args| Ok(Value::Bool(predicate.test(args)?)))
    }
}

impl From<Callable> for Handler {
    fn from(callable: Callable) -> Self {
        Handler::Call(callable)
    }
}

impl From<&str> for Handler {
    fn from(s: &str) -> Self {
        Handler::Value(Value::from(s))
    }
}

/// A compiled (predicate, handler) pair.
#[derive(Debug, Clone)]
pub struct Clause {
    pub predicate: Predicate,
    pub handler: Handler,
}

impl Clause {
    /// Compile `pattern` and pair it with `handler`.
    pub fn new(pattern: impl Into<Value>, handler: impl Into<Handler>) -> Self {
        Self {
            predicate: compile(&pattern.into()),
            handler: handler.into(),
        }
    }
}

/// Builder that pairs every pattern with its handler at the call site.
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    clauses: Vec<Clause>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause. Earlier clauses take precedence.
    pub fn clause(mut self, pattern: impl Into<Value>, handler: impl Into<Handler>) -> Self {
        self.clauses.push(Clause::new(pattern, handler));
        self
    }

    /// Append an already compiled clause.
    pub fn push(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn build(self) -> Dispatcher {
        debug!("Built clause table with {} clauses", self.clauses.len());
        Dispatcher {
            clauses: self.clauses.into(),
        }
    }
}

/// An immutable, compiled clause table.
///
/// Cloning shares the table. `Dispatcher` is `Send + Sync`; concurrent calls
/// are safe as long as callers do not mutate a value while it is being
/// matched.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    clauses: Arc<[Clause]>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Build from a flattened `pattern, handler, pattern, handler, ...` list.
    ///
    /// Fails with `UnevenClauses` when the list has odd length.
    pub fn from_flat(items: Vec<Value>) -> Result<Self, MatchError> {
        if items.len() % 2 != 0 {
            return Err(MatchError::UnevenClauses { len: items.len() });
        }

        let mut builder = DispatcherBuilder::new();
        let mut items = items.into_iter();
        while let (Some(pattern), Some(handler)) = (items.next(), items.next()) {
            builder = builder.clause(pattern, handler);
        }
        Ok(builder.build())
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Index of the first clause matching `args`, without running a handler.
    pub fn find(&self, args: &[Value]) -> Result<Option<usize>, MatchError> {
        for (index, clause) in self.clauses.iter().enumerate() {
            if clause.predicate.test(args)? {
                trace!("Clause {} matched", index);
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Run the handler of the first clause matching `args`.
    ///
    /// Fails with `NoMatch` when no clause matches. Errors from predicates or
    /// handlers are returned unchanged.
    pub fn dispatch(&self, args: &[Value]) -> Result<Value, MatchError> {
        match self.find(args)? {
            Some(index) => self.clauses[index].handler.invoke(args),
            None => {
                debug!("No clause matched {} arguments", args.len());
                Err(MatchError::NoMatch {
                    args: args.to_vec(),
                })
            }
        }
    }

    /// Dispatch a single argument.
    pub fn call(&self, arg: impl Into<Value>) -> Result<Value, MatchError> {
        self.dispatch(&[arg.into()])
    }

    /// Wrap this table as a callable, so it can serve as a handler or leaf
    /// predicate inside another table.
    pub fn to_callable(&self) -> Callable {
        let dispatcher = self.clone();
        Callable::new(move |args| Ok(dispatcher.dispatch(args)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ANY;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    #[test]
    fn test_constant_handlers() {
        let table = Dispatcher::builder()
            .clause(1, "one")
            .clause(2, "two")
            .build();

        assert!(table.call(2).unwrap().same(&Value::from("two")));
        assert!(table.call(3).unwrap_err().is_no_match());
    }

    #[test]
    fn test_callable_handler_receives_args() {
        let table = Dispatcher::builder()
            .clause(
                ANY,
                Handler::call(|args| Ok(Value::from(args.len() as i64))),
            )
            .build();

        let result = table
            .dispatch(&[Value::from(1), Value::from(2), Value::from(3)])
            .unwrap();
        assert!(result.same(&Value::from(3)));
    }

    #[test]
    fn test_from_flat_pairs_items() {
        let table = Dispatcher::from_flat(vec![
            Value::from(1),
            Value::from("one"),
            Value::from(2),
            Value::func(|args| Ok(Value::from(format!("got {}", args[0])))),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.call(1).unwrap().same(&Value::from("one")));
        assert!(table.call(2).unwrap().same(&Value::from("got 2")));
    }

    #[test]
    fn test_predicate_handler_is_called() {
        let table = Dispatcher::from_flat(vec![
            ANY,
            Value::Predicate(crate::combinators::some([1, 2])),
        ])
        .unwrap();

        assert!(table.call(1).unwrap().same(&Value::Bool(true)));
        assert!(table.call(3).unwrap().same(&Value::Bool(false)));
    }

    #[test]
    fn test_predicate_handler_fault_propagates() {
        let failing = Predicate::new(|_| Err(MatchError::NotAClass { found: "x".into() }));
        let table = Dispatcher::builder().clause(ANY, failing).build();

        let err = table.call(1).unwrap_err();
        assert!(matches!(err, MatchError::NotAClass { .. }));
    }

    #[test]
    fn test_from_flat_rejects_odd_length() {
        let err = Dispatcher::from_flat(vec![Value::from(1)]).unwrap_err();
        assert!(matches!(err, MatchError::UnevenClauses { len: 1 }));

        let err = Dispatcher::from_flat(vec![Value::from(1), Value::from(2), Value::from(3)])
            .unwrap_err();
        assert!(matches!(err, MatchError::UnevenClauses { len: 3 }));
    }

    #[test]
    fn test_empty_table_never_matches() {
        let table = Dispatcher::from_flat(vec![]).unwrap();
        assert!(table.is_empty());
        assert!(table.call(1).unwrap_err().is_no_match());
    }

    #[test]
    fn test_first_match_wins_and_shadows() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&later_calls);
        let table = Dispatcher::builder()
            .clause(Value::from(json!({"error": {"value": null}})), "null value")
            .clause(Value::map([("error", Value::map([("value", ANY)]))]), "narrow")
            .clause(
                Value::func(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Value::Bool(true))
                }),
                "broad",
            )
            .build();

        let result = table.call(Value::from(json!({"error": {"value": 20}}))).unwrap();
        assert!(result.same(&Value::from("narrow")));
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);

        let result = table.call(Value::from(json!({"other": 1}))).unwrap();
        assert!(result.same(&Value::from("broad")));
        assert_eq!(later_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_find_reports_index() {
        let table = Dispatcher::builder()
            .clause("a", "first")
            .clause(ANY, "fallback")
            .build();

        assert_eq!(table.find(&[Value::from("a")]).unwrap(), Some(0));
        assert_eq!(table.find(&[Value::from("b")]).unwrap(), Some(1));
    }

    #[test]
    fn test_handler_fault_propagates() {
        let table = Dispatcher::builder()
            .clause(ANY, Handler::call(|_| anyhow::bail!("handler failed")))
            .build();

        let err = table.call(1).unwrap_err();
        assert!(matches!(err, MatchError::Callback(_)));
        assert_eq!(err.to_string(), "handler failed");
    }

    #[test]
    fn test_predicate_fault_propagates_without_trying_later_clauses() {
        let table = Dispatcher::builder()
            .clause(Value::func(|_| anyhow::bail!("bad predicate")), "never")
            .clause(ANY, "fallback")
            .build();

        let err = table.dispatch(&[]).unwrap_err();
        assert_eq!(err.to_string(), "bad predicate");
    }

    #[test]
    fn test_nested_dispatcher_as_handler() {
        let inner = Dispatcher::builder().clause("x", "inner x").build();
        let outer = Dispatcher::builder()
            .clause(Value::regex("^x").unwrap(), inner.to_callable())
            .build();

        assert!(outer.call("x").unwrap().same(&Value::from("inner x")));
        // The inner table's NoMatch surfaces as-is, not wrapped.
        let err = outer.call("xy").unwrap_err();
        assert!(err.is_no_match());
        assert!(err.args().is_some_and(|args| args[0].same(&Value::from("xy"))));
    }

    #[test]
    fn test_dispatcher_is_shareable_across_threads() {
        let table = Dispatcher::builder()
            .clause(1, "one")
            .clause(ANY, "other")
            .build();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let table = table.clone();
                std::thread::spawn(move || table.call(i % 2).unwrap().to_text().into_owned())
            })
            .collect();
        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results, vec!["other", "one", "other", "one"]);
    }

    #[traced_test]
    #[test]
    fn test_no_match_is_logged() {
        let table = Dispatcher::builder().clause(1, "one").build();
        let _ = table.call(3);
        assert!(logs_contain("No clause matched 1 arguments"));
    }
}
