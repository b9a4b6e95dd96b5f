//! Runtime pattern matching over dynamic values.
//!
//! A pattern is an ordinary [`Value`]: a literal, a nested sequence or
//! mapping, a regex, a class, a callable, the wildcard [`ANY`] or a compiled
//! [`Predicate`]. Patterns are compiled once into predicates and grouped into
//! a first-match-wins [`Dispatcher`].
//!
//! ```
//! use patroon::{Dispatcher, Value, ANY};
//!
//! let describe = Dispatcher::builder()
//!     .clause(Value::map([("status", Value::regex("^5").unwrap())]), "retry")
//!     .clause(Value::map([("status", ANY)]), "done")
//!     .build();
//!
//! let event = Value::map([("status", Value::from(503))]);
//! assert_eq!(describe.call(event).unwrap().to_text(), "retry");
//! ```
//!
//! # Module Structure
//!
//! - `value` - Dynamic value model, classes and structural equality
//! - `walk` - Structural walker over nested values (leaf transform, fold)
//! - `path` - Path keys and resolution against a root value
//! - `compile` - Pattern compiler (leaf normalization, AND of leaf tests)
//! - `combinators` - every / some / not / multi, plus instance_of and same
//! - `dispatch` - Clause tables with first-match-wins dispatch
//! - `error` - Error types
//! - `config` - Clause tables loaded from YAML or JSON

pub mod combinators;
pub mod compile;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod path;
pub mod value;
pub mod walk;

pub use combinators::{every, instance_of, multi, not, same, some};
pub use compile::{compile, Predicate};
pub use config::{ClauseConfig, ConfigError, TableConfig};
pub use dispatch::{Clause, Dispatcher, DispatcherBuilder, Handler};
pub use error::MatchError;
pub use path::{Key, Path, PathMissing};
pub use value::{classes, Callable, Class, Kind, Map, Seq, Value};

/// The wildcard: matches anything present at its position.
pub const ANY: Value = Value::Wildcard;
