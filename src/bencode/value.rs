use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::slice;

use bytes::Bytes;

use super::error::AccessError;

/// The tag of a [`Value`], used in accessor error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bytes,
    Integer,
    List,
    Dict,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bytes => "string",
            ValueKind::Integer => "integer",
            ValueKind::List => "list",
            ValueKind::Dict => "dictionary",
        };
        f.write_str(name)
    }
}

/// A bencode value.
///
/// Bencode has four data types: integers, byte strings, lists, and dictionaries.
/// `Null` is an extra, in-memory-only state: it is what an empty document
/// decodes to and what a freshly defaulted value holds, but it has no wire
/// representation and [`encode`](super::encode) rejects it.
///
/// Dictionaries are kept in a [`BTreeMap`], so iteration and encoding always
/// visit keys in ascending byte order no matter how they were inserted.
///
/// # Examples
///
/// ```
/// use btmeta::bencode::Value;
///
/// let int = Value::Integer(42);
/// let string = Value::string("hello");
/// let list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
///
/// assert_eq!(int.as_integer(), Some(42));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    /// No value. Never valid on the wire.
    #[default]
    Null,
    /// A signed 64-bit integer.
    Integer(i64),
    /// A byte string (may or may not be valid UTF-8).
    Bytes(Bytes),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary with byte string keys, ordered by key.
    Dict(BTreeMap<Bytes, Value>),
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Creates an empty list.
    pub fn new_list() -> Self {
        Value::List(Vec::new())
    }

    /// Creates an empty dictionary.
    pub fn new_dict() -> Self {
        Value::Dict(BTreeMap::new())
    }

    /// Returns the tag of this value.
    ///
    /// ```
    /// use btmeta::bencode::{Value, ValueKind};
    ///
    /// assert_eq!(Value::Integer(1).kind(), ValueKind::Integer);
    /// assert_eq!(Value::default().kind(), ValueKind::Null);
    /// ```
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Integer(_) => ValueKind::Integer,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Dict(_) => ValueKind::Dict,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a byte string, if it is one.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is a valid UTF-8 byte string.
    ///
    /// # Examples
    ///
    /// ```
    /// use btmeta::bencode::Value;
    ///
    /// assert_eq!(Value::string("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::Integer(42).as_str(), None);
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the value as a dictionary, if it is one.
    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    pub fn into_dict(self) -> Option<BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key in this value if it is a dictionary.
    ///
    /// Returns `None` if the value is not a dictionary or if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use btmeta::bencode::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }

    /// Returns `true` if this is a dictionary holding `key`.
    ///
    /// Any other tag, `Null` included, simply reports `false`.
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.get(key.as_ref()).is_some()
    }

    /// Number of elements in a list or dictionary.
    ///
    /// `Null` has length zero; strings and integers count as a single element.
    pub fn len(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Integer(_) | Value::Bytes(_) => 1,
            Value::List(l) => l.len(),
            Value::Dict(d) => d.len(),
        }
    }

    /// Returns `true` if [`len`](Self::len) is zero: `Null` and empty containers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn mismatch(&self, expected: ValueKind) -> AccessError {
        AccessError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Returns the raw bytes of a string value.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] if the value is not a string.
    pub fn bytes(&self) -> Result<&[u8], AccessError> {
        match self {
            Value::Bytes(b) => Ok(b),
            _ => Err(self.mismatch(ValueKind::Bytes)),
        }
    }

    /// Returns the integer payload.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] if the value is not an integer.
    pub fn integer(&self) -> Result<i64, AccessError> {
        match self {
            Value::Integer(i) => Ok(*i),
            _ => Err(self.mismatch(ValueKind::Integer)),
        }
    }

    /// Returns the elements of a list.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] if the value is not a list.
    pub fn list(&self) -> Result<&[Value], AccessError> {
        match self {
            Value::List(l) => Ok(l),
            _ => Err(self.mismatch(ValueKind::List)),
        }
    }

    /// Returns the entries of a dictionary.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] if the value is not a dictionary.
    pub fn dict(&self) -> Result<&BTreeMap<Bytes, Value>, AccessError> {
        match self {
            Value::Dict(d) => Ok(d),
            _ => Err(self.mismatch(ValueKind::Dict)),
        }
    }

    /// Iterates over the elements of a list in order.
    pub fn elements(&self) -> Result<slice::Iter<'_, Value>, AccessError> {
        self.list().map(|l| l.iter())
    }

    /// Iterates over the `(key, value)` pairs of a dictionary in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use btmeta::bencode::Value;
    ///
    /// let mut dict = Value::new_dict();
    /// dict.insert("zebra", 1i64).unwrap();
    /// dict.insert("apple", 2i64).unwrap();
    ///
    /// let keys: Vec<&[u8]> = dict.items().unwrap().map(|(k, _)| k.as_ref()).collect();
    /// assert_eq!(keys, [b"apple".as_slice(), b"zebra".as_slice()]);
    /// ```
    pub fn items(&self) -> Result<btree_map::Iter<'_, Bytes, Value>, AccessError> {
        self.dict().map(|d| d.iter())
    }

    /// Returns the list element at `index`.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] if the value is not a list, or
    /// [`AccessError::IndexOutOfBounds`] if `index` is past the end.
    pub fn at(&self, index: usize) -> Result<&Value, AccessError> {
        let list = self.list()?;
        list.get(index).ok_or(AccessError::IndexOutOfBounds {
            index,
            len: list.len(),
        })
    }

    /// Mutable counterpart of [`at`](Self::at). Never turns `Null` into a list.
    ///
    /// ```
    /// use btmeta::bencode::{decode, Value};
    ///
    /// let mut list = decode(b"li1ei2ee").unwrap();
    /// *list.at_mut(1).unwrap() = Value::string("two");
    /// assert_eq!(list.at(1).unwrap().as_str(), Some("two"));
    /// assert!(list.at_mut(2).is_err());
    /// ```
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value, AccessError> {
        match self {
            Value::List(l) => {
                let len = l.len();
                l.get_mut(index)
                    .ok_or(AccessError::IndexOutOfBounds { index, len })
            }
            other => Err(other.mismatch(ValueKind::List)),
        }
    }

    /// Returns the dictionary entry for `key`.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] if the value is not a dictionary, or
    /// [`AccessError::KeyNotFound`] if the key is absent.
    pub fn at_key(&self, key: impl AsRef<[u8]>) -> Result<&Value, AccessError> {
        let key = key.as_ref();
        self.dict()?.get(key).ok_or_else(|| key_not_found(key))
    }

    /// Mutable counterpart of [`at_key`](Self::at_key). Unlike
    /// [`entry`](Self::entry) it never inserts.
    pub fn at_key_mut(&mut self, key: impl AsRef<[u8]>) -> Result<&mut Value, AccessError> {
        let key = key.as_ref();
        match self {
            Value::Dict(d) => d.get_mut(key).ok_or_else(|| key_not_found(key)),
            other => Err(other.mismatch(ValueKind::Dict)),
        }
    }

    /// Appends to a list. A `Null` value first becomes an empty list.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] for any other non-list tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use btmeta::bencode::{encode, Value};
    ///
    /// let mut value = Value::Null;
    /// value.push("spam").unwrap();
    /// value.push(42i64).unwrap();
    /// assert_eq!(encode(&value).unwrap(), b"l4:spami42ee");
    ///
    /// assert!(Value::Integer(1).push(2i64).is_err());
    /// ```
    pub fn push(&mut self, value: impl Into<Value>) -> Result<(), AccessError> {
        if self.is_null() {
            *self = Value::new_list();
        }
        match self {
            Value::List(l) => {
                l.push(value.into());
                Ok(())
            }
            other => Err(other.mismatch(ValueKind::List)),
        }
    }

    /// Inserts into a dictionary, returning the previous value for `key`.
    /// A `Null` value first becomes an empty dictionary.
    pub fn insert(
        &mut self,
        key: impl AsRef<[u8]>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, AccessError> {
        let dict = self.dict_mut_or_init()?;
        Ok(dict.insert(Bytes::copy_from_slice(key.as_ref()), value.into()))
    }

    /// Returns the entry for `key`, inserting `Null` if it is absent.
    /// A `Null` value first becomes an empty dictionary.
    ///
    /// This is the building block for incremental construction of nested
    /// documents:
    ///
    /// ```
    /// use btmeta::bencode::{encode, Value};
    ///
    /// let mut torrent = Value::Null;
    /// torrent.entry("info")?.insert("name", "demo")?;
    /// torrent.entry("info")?.entry("files")?.push(Value::new_dict())?;
    /// assert_eq!(encode(&torrent).unwrap(), b"d4:infod5:filesldee4:name4:demoee");
    /// # Ok::<(), btmeta::bencode::AccessError>(())
    /// ```
    pub fn entry(&mut self, key: impl AsRef<[u8]>) -> Result<&mut Value, AccessError> {
        let dict = self.dict_mut_or_init()?;
        Ok(dict
            .entry(Bytes::copy_from_slice(key.as_ref()))
            .or_default())
    }

    /// Removes and returns the list element at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<Value, AccessError> {
        match self {
            Value::List(l) if index < l.len() => Ok(l.remove(index)),
            Value::List(l) => Err(AccessError::IndexOutOfBounds {
                index,
                len: l.len(),
            }),
            other => Err(other.mismatch(ValueKind::List)),
        }
    }

    /// Removes `key` from a dictionary, returning its value if it was present.
    pub fn remove_key(&mut self, key: impl AsRef<[u8]>) -> Result<Option<Value>, AccessError> {
        match self {
            Value::Dict(d) => Ok(d.remove(key.as_ref())),
            other => Err(other.mismatch(ValueKind::Dict)),
        }
    }

    /// Resets the payload while keeping the tag: strings become empty,
    /// integers become zero, containers lose their elements.
    pub fn clear(&mut self) {
        match self {
            Value::Null => {}
            Value::Integer(i) => *i = 0,
            Value::Bytes(b) => b.clear(),
            Value::List(l) => l.clear(),
            Value::Dict(d) => d.clear(),
        }
    }

    fn dict_mut_or_init(&mut self) -> Result<&mut BTreeMap<Bytes, Value>, AccessError> {
        if self.is_null() {
            *self = Value::new_dict();
        }
        match self {
            Value::Dict(d) => Ok(d),
            other => Err(other.mismatch(ValueKind::Dict)),
        }
    }
}

fn key_not_found(key: &[u8]) -> AccessError {
    AccessError::KeyNotFound(String::from_utf8_lossy(key).into_owned())
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(Bytes::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(d: BTreeMap<Bytes, Value>) -> Self {
        Value::Dict(d)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

/// Collects `(key, value)` pairs into a dictionary. Later duplicates win.
impl<K, V> FromIterator<(K, V)> for Value
where
    K: AsRef<[u8]>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Dict(
            iter.into_iter()
                .map(|(k, v)| (Bytes::copy_from_slice(k.as_ref()), v.into()))
                .collect(),
        )
    }
}
