use std::borrow::{Borrow, Cow};
use std::cmp::Eq;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// A binding value: a scalar string, an ordered list of scalars, or an
/// ordered sequence of string key/value pairs.
///
/// Nested composites (lists of lists, assocs of assocs) cannot be
/// constructed; RFC6570 leaves their expansion undefined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
    Assoc(Vec<(String, String)>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}
impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}
impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}
impl From<&[&str]> for Value {
    fn from(items: &[&str]) -> Self {
        Self::List(items.iter().map(|s| s.to_string()).collect())
    }
}
impl From<Vec<(String, String)>> for Value {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Assoc(pairs)
    }
}
impl From<Vec<(&str, &str)>> for Value {
    fn from(pairs: Vec<(&str, &str)>) -> Self {
        Self::Assoc(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Variable lookup used by [`UriTemplate::expand`](crate::UriTemplate::expand).
///
/// Returning `None` marks the variable as unbound; its contribution is
/// omitted from the expansion.
pub trait Vars {
    fn var(&self, name: &str) -> Option<Cow<'_, Value>>;
}

impl Vars for () {
    fn var(&self, _name: &str) -> Option<Cow<'_, Value>> {
        None
    }
}
impl<K> Vars for &HashMap<K, Value>
where
    K: Borrow<str> + Hash + Eq,
{
    fn var(&self, name: &str) -> Option<Cow<'_, Value>> {
        Some(Cow::Borrowed(self.get(name)?))
    }
}
impl<K> Vars for &HashMap<K, &str>
where
    K: Borrow<str> + Hash + Eq,
{
    fn var(&self, name: &str) -> Option<Cow<'_, Value>> {
        Some(Cow::Owned(Value::from(*self.get(name)?)))
    }
}
impl<K> Vars for &HashMap<K, String>
where
    K: Borrow<str> + Hash + Eq,
{
    fn var(&self, name: &str) -> Option<Cow<'_, Value>> {
        Some(Cow::Owned(Value::Scalar(self.get(name)?.clone())))
    }
}
impl<K> Vars for &BTreeMap<K, Value>
where
    K: Borrow<str> + Ord,
{
    fn var(&self, name: &str) -> Option<Cow<'_, Value>> {
        Some(Cow::Borrowed(self.get(name)?))
    }
}
impl<K> Vars for &BTreeMap<K, &str>
where
    K: Borrow<str> + Ord,
{
    fn var(&self, name: &str) -> Option<Cow<'_, Value>> {
        Some(Cow::Owned(Value::from(*self.get(name)?)))
    }
}
impl<K> Vars for &BTreeMap<K, String>
where
    K: Borrow<str> + Ord,
{
    fn var(&self, name: &str) -> Option<Cow<'_, Value>> {
        Some(Cow::Owned(Value::Scalar(self.get(name)?.clone())))
    }
}
impl Vars for &[(&str, Value)] {
    fn var(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| Cow::Borrowed(v))
    }
}
