//! Ordered parameter multimap shared by the query codec, the pattern
//! matcher, and the dispatch chain.

use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;

/// Maximum number of parameters stored inline before spilling to the heap.
/// Most endpoints carry ≤4 path params plus a handful of query params.
pub const MAX_INLINE_PARAMS: usize = 8;

/// A parameter value: a scalar until the key repeats, then an array.
///
/// A repeated query key promotes the stored value from [`Single`] to a
/// two-element [`Multi`]; further repeats push onto the array, preserving
/// first-seen order of the values.
///
/// [`Single`]: ParamValue::Single
/// [`Multi`]: ParamValue::Multi
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A key that appeared exactly once
    Single(String),
    /// A key that appeared two or more times
    Multi(Vec<String>),
}

impl ParamValue {
    /// View the value as a single string.
    ///
    /// For [`ParamValue::Multi`] this is the last value written, matching the
    /// last-write-wins lookup used everywhere else in the crate.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(v) => Some(v.as_str()),
            ParamValue::Multi(vs) => vs.last().map(String::as_str),
        }
    }

    /// All values in first-seen order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(v) => vec![v.as_str()],
            ParamValue::Multi(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    pub(crate) fn push(&mut self, value: String) {
        match self {
            ParamValue::Single(first) => {
                let first = std::mem::take(first);
                *self = ParamValue::Multi(vec![first, value]);
            }
            ParamValue::Multi(vs) => vs.push(value),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Single(v) => serializer.serialize_str(v),
            ParamValue::Multi(vs) => vs.serialize(serializer),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

/// Ordered multimap of request parameters.
///
/// Keys keep their first-seen order under iteration; lookups return the last
/// value written for a name. Stored inline for up to [`MAX_INLINE_PARAMS`]
/// entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: SmallVec<[(String, ParamValue); MAX_INLINE_PARAMS]>,
}

impl ParamMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Get a parameter by name. Last write wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Get a parameter as a single string. Last write wins.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    /// Insert a scalar value, replacing any existing value for the name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set_value(name, ParamValue::Single(value.into()));
    }

    /// Insert a value wholesale, replacing any existing value for the name.
    ///
    /// Replacement happens in place, so the key keeps its original position
    /// in iteration order.
    pub fn set_value(&mut self, name: impl Into<String>, value: ParamValue) {
        let name = name.into();
        match self.entries.iter_mut().rfind(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Append a value under the query-string repeat rule: an absent key
    /// stores a scalar, a present key promotes to an array and pushes.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        match self.entries.iter_mut().rfind(|(k, _)| k == name) {
            Some((_, existing)) => existing.push(value.into()),
            None => self
                .entries
                .push((name.to_string(), ParamValue::Single(value.into()))),
        }
    }

    /// Overlay every entry of `other` onto this map (last writer wins).
    pub fn overlay(&mut self, other: &ParamMap) {
        for (name, value) in other.iter() {
            self.set_value(name, value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for ParamMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParamMap::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}
