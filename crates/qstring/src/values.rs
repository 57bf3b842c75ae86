//! The parameter collection: string keys mapped to ordered string lists.
//!
//! [`Values`] has the same shape a URL query parser produces. Percent-coding
//! and `&`/`=` splitting are delegated to `url::form_urlencoded` through
//! [`Values::parse`] and [`Values::encode`]; the decoder and encoder only
//! ever see already-decoded strings.

use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap};

use url::form_urlencoded;

/// Separator between a nested record's key and its fields' keys.
pub const NESTED_SEPARATOR: char = '.';

/// Multi-valued parameter collection.
///
/// Keys are case-sensitive. Iteration order is by key, which makes
/// [`Values::encode`] deterministic.
///
/// # Example
///
/// ```
/// use qstring::Values;
///
/// let values = Values::parse("names=foo&names=bar&limit=50");
/// assert_eq!(values.get("names"), Some(&["foo".to_string(), "bar".to_string()][..]));
/// assert_eq!(values.first("limit"), Some("50"));
/// assert_eq!(values.encode(), "limit=50&names=foo&names=bar");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values(BTreeMap<String, Vec<String>>);

impl Values {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Values::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query string.
    ///
    /// Repeated keys accumulate in order of appearance.
    pub fn parse(query: &str) -> Self {
        let mut values = Values::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            values.append(key, value);
        }
        values
    }

    /// Serializes to an `application/x-www-form-urlencoded` query string.
    ///
    /// Keys are emitted in sorted order; keys with no values are left out.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, list) in &self.0 {
            for value in list {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Returns every value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Returns the first value stored under `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.first().map(String::as_str)
    }

    /// Returns `true` if `key` has an entry, even an empty one.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Replaces the entry for `key` with the single `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Appends `value` to the entry for `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces the entry for `key` with `values`, returning the old list.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) -> Option<Vec<String>> {
        self.0.insert(key.into(), values)
    }

    /// Removes the entry for `key`.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.0.remove(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Extracts the entries below `prefix`.
    ///
    /// Every key of the form `prefix.rest` appears in the result as `rest`.
    /// Other keys are ignored.
    pub fn nested(&self, prefix: &str) -> Values {
        self.0
            .iter()
            .filter_map(|(key, list)| {
                let rest = key
                    .strip_prefix(prefix)?
                    .strip_prefix(NESTED_SEPARATOR)?;
                Some((rest.to_string(), list.clone()))
            })
            .collect()
    }

    /// Merges `nested` into this collection under `prefix`.
    ///
    /// Every key `k` of `nested` is stored as `prefix.k`, replacing any
    /// existing entry.
    pub fn extend_nested(&mut self, prefix: &str, nested: Values) {
        for (key, list) in nested {
            self.0
                .insert(format!("{}{}{}", prefix, NESTED_SEPARATOR, key), list);
        }
    }
}

impl<K, I, V> FromIterator<(K, I)> for Values
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut values = Values::new();
        for (key, list) in iter {
            let entry = values.0.entry(key.into()).or_default();
            entry.extend(list.into_iter().map(Into::into));
        }
        values
    }
}

impl IntoIterator for Values {
    type Item = (String, Vec<String>);
    type IntoIter = btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<BTreeMap<String, Vec<String>>> for Values {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Values(map)
    }
}

impl From<HashMap<String, Vec<String>>> for Values {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Values(map.into_iter().collect())
    }
}

impl From<Values> for BTreeMap<String, Vec<String>> {
    fn from(values: Values) -> Self {
        values.0
    }
}
