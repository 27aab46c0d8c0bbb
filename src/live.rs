use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

/// A value read out of the inspected page.
///
/// Composite values (`Object`, `Array`, `Collection`) are shared handles:
/// cloning one yields another reference to the same underlying storage, so
/// graphs with aliasing and cycles can be built exactly like the page holds
/// them.
#[derive(Clone)]
pub enum Live {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    /// Arbitrary precision integer. Has no JSON representation.
    BigInt(i128),
    String(Rc<str>),
    Symbol(Rc<str>),
    /// A callable, identified by its name.
    Function(Rc<str>),
    Object(LiveObject),
    Array(LiveArray),
    /// Map- or set-like collection. Its entries are invisible to JSON.
    Collection(LiveArray),
    /// An accessor that throws when read, carrying the thrown message.
    Throwing(Rc<str>),
}

impl Live {
    pub fn string(value: impl Into<Rc<str>>) -> Self {
        Live::String(value.into())
    }

    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<Rc<str>>,
        I: IntoIterator<Item = (K, Live)>,
    {
        Live::Object(LiveObject::from_entries(entries))
    }

    pub fn array(items: impl IntoIterator<Item = Live>) -> Self {
        Live::Array(LiveArray::from_items(items))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Live::Undefined => "undefined",
            Live::Null => "null",
            Live::Bool(_) => "boolean",
            Live::Number(_) => "number",
            Live::BigInt(_) => "bigint",
            Live::String(_) => "string",
            Live::Symbol(_) => "symbol",
            Live::Function(_) => "function",
            Live::Object(_) => "object",
            Live::Array(_) => "array",
            Live::Collection(_) => "collection",
            Live::Throwing(_) => "accessor",
        }
    }

    /// Reference identity for composites, value equality is not considered.
    pub fn same(&self, other: &Live) -> bool {
        match (self.address(), other.address()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub(crate) fn address(&self) -> Option<usize> {
        match self {
            Live::Object(obj) => Some(obj.address()),
            Live::Array(arr) | Live::Collection(arr) => Some(arr.address()),
            _ => None,
        }
    }
}

impl fmt::Debug for Live {
    // Composites print their address only, printing contents could recurse forever.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Live::Undefined => write!(f, "undefined"),
            Live::Null => write!(f, "null"),
            Live::Bool(b) => write!(f, "{b}"),
            Live::Number(n) => write!(f, "{n}"),
            Live::BigInt(n) => write!(f, "{n}n"),
            Live::String(s) => write!(f, "{s:?}"),
            Live::Symbol(s) => write!(f, "Symbol({s})"),
            Live::Function(name) => write!(f, "[Function {name}]"),
            Live::Throwing(msg) => write!(f, "[Throws {msg:?}]"),
            other => write!(f, "[{} @{:#x}]", other.kind(), other.address().unwrap_or(0)),
        }
    }
}

/// Insertion-ordered property bag with shared ownership.
#[derive(Clone, Default)]
pub struct LiveObject(Rc<RefCell<Vec<(Rc<str>, Live)>>>);

impl LiveObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<Rc<str>>,
        I: IntoIterator<Item = (K, Live)>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self(Rc::new(RefCell::new(entries)))
    }

    /// Set a property, keeping its original position when it already exists.
    pub fn set(&self, key: impl Into<Rc<str>>, value: Live) {
        let key = key.into();
        let mut entries = self.0.borrow_mut();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<Live> {
        self.0
            .borrow()
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.clone())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Snapshot of the current entries.
    pub fn entries(&self) -> Vec<(Rc<str>, Live)> {
        self.0.borrow().clone()
    }

    fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

#[derive(Clone, Default)]
pub struct LiveArray(Rc<RefCell<Vec<Live>>>);

impl LiveArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = Live>) -> Self {
        Self(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn push(&self, value: Live) {
        self.0.borrow_mut().push(value);
    }

    pub fn get(&self, index: usize) -> Option<Live> {
        self.0.borrow().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn items(&self) -> Vec<Live> {
        self.0.borrow().clone()
    }

    fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

// Composites release their children through a work list so that dropping a
// deeply nested value does not recurse once per level.
impl Drop for LiveObject {
    fn drop(&mut self) {
        if let Some(entries) = Rc::get_mut(&mut self.0) {
            release(entries.get_mut().drain(..).map(|(_, value)| value).collect());
        }
    }
}

impl Drop for LiveArray {
    fn drop(&mut self) {
        if let Some(items) = Rc::get_mut(&mut self.0) {
            release(std::mem::take(items.get_mut()));
        }
    }
}

fn release(mut pending: Vec<Live>) {
    while let Some(mut value) = pending.pop() {
        match &mut value {
            Live::Object(obj) => {
                if let Some(entries) = Rc::get_mut(&mut obj.0) {
                    pending.extend(entries.get_mut().drain(..).map(|(_, v)| v));
                }
            }
            Live::Array(arr) | Live::Collection(arr) => {
                if let Some(items) = Rc::get_mut(&mut arr.0) {
                    pending.append(items.get_mut());
                }
            }
            _ => {}
        }
    }
}

impl From<bool> for Live {
    fn from(value: bool) -> Self {
        Live::Bool(value)
    }
}

impl From<f64> for Live {
    fn from(value: f64) -> Self {
        Live::Number(value)
    }
}

impl From<i32> for Live {
    fn from(value: i32) -> Self {
        Live::Number(value.into())
    }
}

impl From<&str> for Live {
    fn from(value: &str) -> Self {
        Live::String(value.into())
    }
}

impl From<String> for Live {
    fn from(value: String) -> Self {
        Live::String(value.into())
    }
}

impl From<LiveObject> for Live {
    fn from(value: LiveObject) -> Self {
        Live::Object(value)
    }
}

impl From<LiveArray> for Live {
    fn from(value: LiveArray) -> Self {
        Live::Array(value)
    }
}

/// Builds a fresh, acyclic graph from plain JSON.
impl From<&Value> for Live {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Live::Null,
            Value::Bool(b) => Live::Bool(*b),
            Value::Number(n) => Live::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Live::string(s.as_str()),
            Value::Array(items) => Live::array(items.iter().map(Live::from)),
            Value::Object(map) => Live::object(map.iter().map(|(k, v)| (k.as_str(), Live::from(v)))),
        }
    }
}
