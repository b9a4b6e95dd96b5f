//! Dynamic value model shared by patterns and match targets.
//!
//! This module provides:
//! - `Value` - the tagged value enum (primitives, containers, regex, callables, classes)
//! - `Seq` / `Map` - shared, interiorly mutable containers that may reference themselves
//! - `Callable` - user functions used as leaf predicates and clause handlers
//! - `Class` - type-like values with single inheritance, plus the builtin classes
//!
//! Containers are reference counted. Cloning a `Seq` or `Map` clones the handle,
//! not the contents, and both handles share one identity. Cyclic containers are
//! never freed.

use crate::compile::Predicate;
use crate::path::{self, Key};
use indexmap::IndexMap;
use parking_lot::RwLock;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Coarse value kind, used for diagnostics and classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Undefined,
    Null,
    Bool,
    Number,
    String,
    Seq,
    Map,
    Regex,
    Callable,
    Class,
    Wildcard,
}

impl Kind {
    /// Get the label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Undefined => "undefined",
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Seq => "sequence",
            Kind::Map => "mapping",
            Kind::Regex => "regex",
            Kind::Callable => "callable",
            Kind::Class => "class",
            Kind::Wildcard => "wildcard",
        }
    }
}

/// A dynamic value.
///
/// Patterns and match targets share this representation: a pattern is just a
/// value whose leaves are interpreted as tests.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent marker, distinct from every other value including `Null`.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    /// `NaN` doubles as the not-a-number marker.
    Number(f64),
    String(Arc<str>),
    Seq(Seq),
    Map(Map),
    Regex(Arc<Regex>),
    Func(Callable),
    /// A compiled predicate carried as a value. Evaluated against the whole
    /// argument tuple instead of a path-resolved slice.
    Predicate(Predicate),
    Class(Class),
    /// Matches anything wherever it appears in a pattern.
    Wildcard,
}

impl Value {
    /// Create a sequence value.
    pub fn seq(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(Seq::new(items.into_iter().collect()))
    }

    /// Create a mapping value from key/value pairs, keeping insertion order.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(Map::from_entries(entries))
    }

    /// Create a string value.
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Arc::from(s.as_ref()))
    }

    /// Compile a regular expression into a regex value.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Value::Regex(Arc::new(Regex::new(pattern)?)))
    }

    /// Wrap a closure as a callable value.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Value::Func(Callable::new(f))
    }

    /// The not-a-number marker.
    pub fn nan() -> Self {
        Value::Number(f64::NAN)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Seq(_) => Kind::Seq,
            Value::Map(_) => Kind::Map,
            Value::Regex(_) => Kind::Regex,
            Value::Func(_) | Value::Predicate(_) => Kind::Callable,
            Value::Class(_) => Kind::Class,
            Value::Wildcard => Kind::Wildcard,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Identity of the shared container allocation, `None` for non-containers.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Seq(seq) => Some(seq.id()),
            Value::Map(map) => Some(map.id()),
            _ => None,
        }
    }

    /// Number of children for containers, `None` otherwise.
    pub fn container_len(&self) -> Option<usize> {
        match self {
            Value::Seq(seq) => Some(seq.len()),
            Value::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Snapshot of a container's children as (key, child) pairs.
    ///
    /// Sequence keys are indices, mapping keys are names in insertion order.
    /// Returns `None` for non-containers.
    pub fn children(&self) -> Option<Vec<(Key, Value)>> {
        match self {
            Value::Seq(seq) => Some(
                seq.snapshot()
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (Key::Index(i), v))
                    .collect(),
            ),
            Value::Map(map) => Some(
                map.snapshot()
                    .into_iter()
                    .map(|(k, v)| (Key::Name(k), v))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Boolean coercion used for callable leaf results.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Textual form used when a regex leaf tests a target.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) => Cow::Borrowed(&**s),
            other => {
                let mut out = String::new();
                let mut stack = Vec::new();
                write_text(other, &mut out, &mut stack);
                Cow::Owned(out)
            }
        }
    }

    /// The runtime class of this value.
    pub fn class_of(&self) -> Class {
        match self {
            Value::Undefined => classes::undefined(),
            Value::Null => classes::null(),
            Value::Bool(_) => classes::boolean(),
            Value::Number(_) => classes::number(),
            Value::String(_) => classes::string(),
            Value::Seq(_) => classes::array(),
            Value::Map(map) => map.class().unwrap_or_else(classes::object),
            Value::Regex(_) => classes::regexp(),
            Value::Func(_) | Value::Predicate(_) | Value::Class(_) => classes::function(),
            Value::Wildcard => classes::wildcard(),
        }
    }

    /// Check if this value's class is `class` or derives from it.
    pub fn instance_of(&self, class: &Class) -> bool {
        self.class_of().is_subclass_of(class)
    }

    /// Pure identity comparison.
    ///
    /// Containers, callables, predicates, classes and regexes compare by
    /// allocation. Numbers compare by bit pattern, except that every `NaN`
    /// is the same value.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined)
            | (Value::Null, Value::Null)
            | (Value::Wildcard, Value::Wildcard) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Regex(a), Value::Regex(b)) => Arc::ptr_eq(a, b),
            (Value::Func(a), Value::Func(b)) => a.ptr_eq(b),
            (Value::Predicate(a), Value::Predicate(b)) => a.ptr_eq(b),
            (Value::Class(a), Value::Class(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Deep structural equality, independent of container kind and identity.
    ///
    /// `[1]` equals `{"0": 1}`, and `[]` equals `{}`. Cyclic values terminate:
    /// a pair of containers already under comparison is assumed equal.
    pub fn structural_eq(&self, other: &Value) -> bool {
        let mut assumed = HashSet::new();
        structural_eq_inner(self, other, &mut assumed)
    }

    /// Convert plain data to JSON. Returns `None` for cyclic values and for
    /// values with no JSON form (regexes, callables, classes, the wildcard,
    /// non-finite numbers).
    pub fn to_json(&self) -> Option<serde_json::Value> {
        let mut stack = Vec::new();
        to_json_inner(self, &mut stack)
    }
}

fn structural_eq_inner(a: &Value, b: &Value, assumed: &mut HashSet<(usize, usize)>) -> bool {
    match (a.identity(), b.identity()) {
        (Some(id_a), Some(id_b)) => {
            if id_a == id_b || !assumed.insert((id_a, id_b)) {
                return true;
            }
            if a.container_len() != b.container_len() {
                return false;
            }
            let Some(children) = a.children() else {
                return false;
            };
            children.iter().all(|(key, child_a)| {
                let name = Key::Name(key.to_name());
                path::child(b, &name)
                    .is_some_and(|child_b| structural_eq_inner(child_a, &child_b, assumed))
            })
        }
        (Some(_), None) | (None, Some(_)) => false,
        (None, None) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
            (Value::Regex(x), Value::Regex(y)) => x.as_str() == y.as_str(),
            _ => a.same(b),
        },
    }
}

fn to_json_inner(value: &Value, stack: &mut Vec<usize>) -> Option<serde_json::Value> {
    use serde_json::Value as Json;

    match value {
        Value::Null => Some(Json::Null),
        Value::Bool(b) => Some(Json::Bool(*b)),
        Value::Number(n) => serde_json::Number::from_f64(*n).map(Json::Number),
        Value::String(s) => Some(Json::String(s.to_string())),
        Value::Seq(_) | Value::Map(_) => {
            let id = value.identity()?;
            if stack.contains(&id) {
                return None;
            }
            stack.push(id);
            let out = match value {
                Value::Seq(seq) => seq
                    .snapshot()
                    .iter()
                    .map(|v| to_json_inner(v, stack))
                    .collect::<Option<Vec<_>>>()
                    .map(Json::Array),
                Value::Map(map) => map
                    .snapshot()
                    .into_iter()
                    .map(|(k, v)| to_json_inner(&v, stack).map(|j| (k, j)))
                    .collect::<Option<serde_json::Map<_, _>>>()
                    .map(Json::Object),
                _ => None,
            };
            stack.pop();
            out
        }
        _ => None,
    }
}

fn write_text(value: &Value, out: &mut String, stack: &mut Vec<usize>) {
    match value {
        Value::Undefined => out.push_str("undefined"),
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::String(s) => out.push_str(s),
        Value::Seq(seq) => {
            // Joined with commas; nil and revisited elements render empty.
            if stack.contains(&seq.id()) {
                return;
            }
            stack.push(seq.id());
            for (i, item) in seq.snapshot().iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if !item.is_nil() {
                    write_text(item, out, stack);
                }
            }
            stack.pop();
        }
        Value::Map(_) => out.push_str("[object Object]"),
        Value::Regex(re) => {
            out.push('/');
            out.push_str(re.as_str());
            out.push('/');
        }
        Value::Func(_) | Value::Predicate(_) => out.push_str("function"),
        Value::Class(class) => {
            out.push_str("class ");
            out.push_str(class.name());
        }
        Value::Wildcard => out.push('_'),
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // Exponent form with an explicit sign on positive exponents: 1e+21, 1.5e-7.
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        }
    } else {
        n.to_string()
    }
}

fn write_repr(value: &Value, f: &mut fmt::Formatter<'_>, stack: &mut Vec<usize>) -> fmt::Result {
    if let Some(id) = value.identity() {
        if stack.contains(&id) {
            return f.write_str("[Circular]");
        }
        stack.push(id);
        let result = match value {
            Value::Seq(seq) => {
                f.write_str("[")?;
                for (i, item) in seq.snapshot().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_repr(item, f, stack)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                if let Some(class) = map.class() {
                    write!(f, "{} ", class.name())?;
                }
                f.write_str("{")?;
                for (i, (key, item)) in map.snapshot().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: ")?;
                    write_repr(item, f, stack)?;
                }
                f.write_str("}")
            }
            _ => Ok(()),
        };
        stack.pop();
        return result;
    }

    match value {
        Value::String(s) => write!(f, "{:?}", &**s),
        Value::Regex(re) => write!(f, "/{}/", re.as_str()),
        Value::Func(_) => f.write_str("<function>"),
        Value::Predicate(_) => f.write_str("<predicate>"),
        Value::Class(class) => write!(f, "<class {}>", class.name()),
        other => f.write_str(&other.to_text()),
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_repr(self, f, &mut Vec::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_repr(self, f, &mut Vec::new())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(Seq::new(items))
    }
}

impl From<Regex> for Value {
    fn from(re: Regex) -> Self {
        Value::Regex(Arc::new(re))
    }
}

impl From<Seq> for Value {
    fn from(seq: Seq) -> Self {
        Value::Seq(seq)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Callable> for Value {
    fn from(f: Callable) -> Self {
        Value::Func(f)
    }
}

impl From<Predicate> for Value {
    fn from(p: Predicate) -> Self {
        Value::Predicate(p)
    }
}

impl From<Class> for Value {
    fn from(c: Class) -> Self {
        Value::Class(c)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::from(s),
            Json::Array(items) => Value::seq(items.into_iter().map(Value::from)),
            Json::Object(entries) => {
                Value::map(entries.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

/// Ordered sequence with shared identity.
#[derive(Clone, Default)]
pub struct Seq(Arc<RwLock<Vec<Value>>>);

impl Seq {
    pub fn new(items: Vec<Value>) -> Self {
        Seq(Arc::new(RwLock::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.write().push(value.into());
    }

    /// Replace the element at `index`. Returns `false` when out of bounds.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> bool {
        match self.0.write().get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Clone the current elements out, releasing the lock before returning.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.read().clone()
    }

    pub fn ptr_eq(&self, other: &Seq) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

#[derive(Default)]
struct MapData {
    class: Option<Class>,
    entries: IndexMap<String, Value>,
}

/// Insertion-ordered string-keyed mapping with shared identity.
///
/// A mapping may be tagged with a `Class`, which makes it an instance of that
/// class for type-membership tests.
#[derive(Clone, Default)]
pub struct Map(Arc<RwLock<MapData>>);

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Map(Arc::new(RwLock::new(MapData {
            class: None,
            entries,
        })))
    }

    /// Create an instance of `class` with the given fields.
    pub fn instance<K, I>(class: &Class, entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map = Self::from_entries(entries);
        map.0.write().class = Some(class.clone());
        map
    }

    pub fn class(&self) -> Option<Class> {
        self.0.read().class.clone()
    }

    pub fn len(&self) -> usize {
        self.0.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.read().entries.get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().entries.contains_key(key)
    }

    /// Insert or replace an entry, returning the previous value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.write().entries.insert(key.into(), value.into())
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.read().entries.keys().cloned().collect()
    }

    /// Clone the current entries out, releasing the lock before returning.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.0
            .read()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Map) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

type CallFn = dyn Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync;

/// A user function. Used as a leaf predicate (called with the resolved value)
/// or as a clause handler (called with the dispatch arguments).
#[derive(Clone)]
pub struct Callable(Arc<CallFn>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Callable(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> anyhow::Result<Value> {
        (self.0)(args)
    }

    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable")
    }
}

#[derive(Debug)]
struct ClassDef {
    name: String,
    parent: Option<Class>,
}

/// A type-like value with single inheritance.
///
/// Classes compare by identity: two classes with the same name are distinct.
#[derive(Clone, Debug)]
pub struct Class(Arc<ClassDef>);

impl Class {
    /// Create a class deriving from the builtin `Object` class.
    pub fn new(name: impl Into<String>) -> Self {
        Self::extends(name, &classes::object())
    }

    /// Create a class deriving from `parent`.
    pub fn extends(name: impl Into<String>, parent: &Class) -> Self {
        Class(Arc::new(ClassDef {
            name: name.into(),
            parent: Some(parent.clone()),
        }))
    }

    fn root(name: &str) -> Self {
        Class(Arc::new(ClassDef {
            name: name.to_string(),
            parent: None,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// Check if this class is `ancestor` or derives from it.
    pub fn is_subclass_of(&self, ancestor: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class.ptr_eq(ancestor) {
                return true;
            }
            current = class.parent();
        }
        false
    }

    pub fn ptr_eq(&self, other: &Class) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Builtin classes, one per value kind.
///
/// `Array`, `RegExp` and `Function` derive from `Object`; the primitive
/// classes are roots.
pub mod classes {
    use super::Class;
    use once_cell::sync::Lazy;

    static OBJECT: Lazy<Class> = Lazy::new(|| Class::root("Object"));
    static ARRAY: Lazy<Class> = Lazy::new(|| Class::extends("Array", &OBJECT));
    static REGEXP: Lazy<Class> = Lazy::new(|| Class::extends("RegExp", &OBJECT));
    static FUNCTION: Lazy<Class> = Lazy::new(|| Class::extends("Function", &OBJECT));
    static UNDEFINED: Lazy<Class> = Lazy::new(|| Class::root("Undefined"));
    static NULL: Lazy<Class> = Lazy::new(|| Class::root("Null"));
    static BOOLEAN: Lazy<Class> = Lazy::new(|| Class::root("Boolean"));
    static NUMBER: Lazy<Class> = Lazy::new(|| Class::root("Number"));
    static STRING: Lazy<Class> = Lazy::new(|| Class::root("String"));
    static WILDCARD: Lazy<Class> = Lazy::new(|| Class::root("Wildcard"));

    pub fn object() -> Class {
        OBJECT.clone()
    }

    pub fn array() -> Class {
        ARRAY.clone()
    }

    pub fn regexp() -> Class {
        REGEXP.clone()
    }

    pub fn function() -> Class {
        FUNCTION.clone()
    }

    pub fn undefined() -> Class {
        UNDEFINED.clone()
    }

    pub fn null() -> Class {
        NULL.clone()
    }

    pub fn boolean() -> Class {
        BOOLEAN.clone()
    }

    pub fn number() -> Class {
        NUMBER.clone()
    }

    pub fn string() -> Class {
        STRING.clone()
    }

    pub fn wildcard() -> Class {
        WILDCARD.clone()
    }

    /// Look up a builtin class by its lowercase name (`"number"`, `"array"`, ...).
    pub fn lookup(name: &str) -> Option<Class> {
        let class = match name {
            "object" => object(),
            "array" => array(),
            "regexp" => regexp(),
            "function" => function(),
            "undefined" => undefined(),
            "null" => null(),
            "boolean" => boolean(),
            "number" => number(),
            "string" => string(),
            _ => return None,
        };
        Some(class)
    }
}
