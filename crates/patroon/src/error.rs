//! Error types surfaced by clause tables and combinators.

use crate::value::Value;

/// Errors raised while building or evaluating a clause table.
///
/// `NoMatch` is the ordinary "nothing matched" outcome and is kept apart from
/// `Callback`, which carries whatever a user predicate or handler returned, so
/// callers can tell "nothing matched" from "something went wrong while
/// matching".
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// A flattened clause list did not alternate pattern and handler.
    #[error("clause list must alternate pattern and handler, got {len} items")]
    UnevenClauses { len: usize },

    /// No clause matched the arguments.
    #[error("no clause matched arguments {}", describe_args(.args))]
    NoMatch { args: Vec<Value> },

    /// A type-membership test was given something that is not a class.
    #[error("expected a class, got {found}")]
    NotAClass { found: String },

    /// A user predicate or handler failed. Passed through unchanged.
    #[error(transparent)]
    Callback(anyhow::Error),
}

impl MatchError {
    /// Wrap an error returned by a user callable.
    ///
    /// A `MatchError` coming back out of a callable (for example a nested
    /// dispatcher reporting `NoMatch`) is unwrapped rather than nested.
    pub fn from_callback(err: anyhow::Error) -> Self {
        match err.downcast::<MatchError>() {
            Ok(inner) => inner,
            Err(err) => MatchError::Callback(err),
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, MatchError::NoMatch { .. })
    }

    /// The arguments a failed dispatch was attempted with.
    pub fn args(&self) -> Option<&[Value]> {
        match self {
            MatchError::NoMatch { args } => Some(args),
            _ => None,
        }
    }
}

fn describe_args(args: &[Value]) -> String {
    let parts: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    format!("({})", parts.join(", "))
}
