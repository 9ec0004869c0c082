// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::types::{ErrorKind, MetricError, MetricResult};
use std::slice;

/// A single tag, either a `key:value` pair or a bare value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    KeyValue(String, String),
    Value(String),
}

/// Ordered set of Datadog style tags attached to a metric, event, or
/// service check.
///
/// Every tag in a set has the same shape: either all of them are
/// `key:value` pairs or all of them are bare values. The shape is chosen
/// when the set is created. Insertion order is kept and is the order in
/// which tags are written on the wire.
///
/// # Example
///
/// ```
/// use dogstatsd_client::TagSet;
///
/// let keyed = TagSet::keyed(vec![("region", "us-east-1"), ("env", "prod")]);
/// let bare = TagSet::bare(vec!["beta", "canary"]);
///
/// assert!(keyed.is_keyed());
/// assert_eq!(2, bare.len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagSet {
    Keyed(Vec<(String, String)>),
    Bare(Vec<String>),
}

impl TagSet {
    /// Create an empty set of tags.
    pub fn new() -> Self {
        TagSet::Bare(Vec::new())
    }

    /// Create a set of `key:value` tags.
    pub fn keyed<I, K, V>(tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        TagSet::Keyed(tags.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Create a set of bare value tags.
    pub fn bare<I, V>(tags: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        TagSet::Bare(tags.into_iter().map(Into::into).collect())
    }

    /// Create a set from individual tags that may have come from an untyped
    /// source, such as configuration.
    ///
    /// # Failures
    ///
    /// Returns an `InvalidInput` error if `key:value` tags and bare tags are
    /// mixed in the same set.
    pub fn from_tags<I>(tags: I) -> MetricResult<Self>
    where
        I: IntoIterator<Item = Tag>,
    {
        let mut out = TagSet::new();
        for tag in tags {
            out = out.with(tag)?;
        }

        Ok(out)
    }

    /// Append a `key:value` tag, keeping the set's shape.
    ///
    /// # Failures
    ///
    /// Returns an `InvalidInput` error if this set already holds bare tags.
    pub fn with_tag<K, V>(self, key: K, value: V) -> MetricResult<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.with(Tag::KeyValue(key.into(), value.into()))
    }

    /// Append a bare value tag, keeping the set's shape.
    ///
    /// # Failures
    ///
    /// Returns an `InvalidInput` error if this set already holds `key:value` tags.
    pub fn with_tag_value<V>(self, value: V) -> MetricResult<Self>
    where
        V: Into<String>,
    {
        self.with(Tag::Value(value.into()))
    }

    fn with(self, tag: Tag) -> MetricResult<Self> {
        match (self, tag) {
            (TagSet::Keyed(mut tags), Tag::KeyValue(k, v)) => {
                tags.push((k, v));
                Ok(TagSet::Keyed(tags))
            }
            (TagSet::Bare(mut tags), Tag::Value(v)) => {
                tags.push(v);
                Ok(TagSet::Bare(tags))
            }
            // An empty set takes on the shape of the first tag added
            (TagSet::Bare(tags), Tag::KeyValue(k, v)) if tags.is_empty() => Ok(TagSet::Keyed(vec![(k, v)])),
            (TagSet::Keyed(tags), Tag::Value(v)) if tags.is_empty() => Ok(TagSet::Bare(vec![v])),
            _ => Err(mixed_tags_error()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TagSet::Keyed(tags) => tags.len(),
            TagSet::Bare(tags) => tags.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if this set holds `key:value` tags (and is not empty).
    pub fn is_keyed(&self) -> bool {
        matches!(self, TagSet::Keyed(tags) if !tags.is_empty())
    }

    /// Iterate over tags in insertion order as `(key, value)` pairs where the
    /// key is absent for bare tags.
    pub fn iter(&self) -> TagIter<'_> {
        let inner = match self {
            TagSet::Keyed(tags) => IterInner::Keyed(tags.iter()),
            TagSet::Bare(tags) => IterInner::Bare(tags.iter()),
        };

        TagIter { inner }
    }

    /// Render each tag as it appears on the wire, `key:value` or `value`.
    pub fn to_strings(&self) -> Vec<String> {
        self.iter()
            .map(|(key, value)| match key {
                Some(key) => format!("{}:{}", key, value),
                None => value.to_string(),
            })
            .collect()
    }

    // Number of bytes used by keys, values, and separators when written
    pub(crate) fn kv_size(&self) -> usize {
        let entries: usize = self.iter().map(|(k, v)| k.map_or(0, |k| k.len() + 1) + v.len()).sum();
        entries + self.len().saturating_sub(1)
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = (Option<&'a str>, &'a str);
    type IntoIter = TagIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the tags of a `TagSet`, created by [`TagSet::iter`].
#[derive(Debug, Clone)]
pub struct TagIter<'a> {
    inner: IterInner<'a>,
}

#[derive(Debug, Clone)]
enum IterInner<'a> {
    Keyed(slice::Iter<'a, (String, String)>),
    Bare(slice::Iter<'a, String>),
}

impl<'a> Iterator for TagIter<'a> {
    type Item = (Option<&'a str>, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner {
            IterInner::Keyed(ref mut it) => it.next().map(|(k, v)| (Some(k.as_str()), v.as_str())),
            IterInner::Bare(ref mut it) => it.next().map(|v| (None, v.as_str())),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.inner {
            IterInner::Keyed(ref it) => it.size_hint(),
            IterInner::Bare(ref it) => it.size_hint(),
        }
    }
}

impl ExactSizeIterator for TagIter<'_> {}

impl Default for TagSet {
    fn default() -> Self {
        TagSet::new()
    }
}

fn mixed_tags_error() -> MetricError {
    MetricError::from((
        ErrorKind::InvalidInput,
        "Tags must be either all key-value pairs or all bare values",
    ))
}

#[cfg(test)]
mod tests {
    use super::{Tag, TagSet};
    use crate::types::ErrorKind;

    #[test]
    fn test_tag_set_new_is_empty() {
        let tags = TagSet::new();
        assert!(tags.is_empty());
        assert!(!tags.is_keyed());
    }

    #[test]
    fn test_tag_set_keyed_preserves_order() {
        let tags = TagSet::keyed(vec![("zeta", "1"), ("alpha", "2")]);
        assert_eq!(vec!["zeta:1", "alpha:2"], tags.to_strings());
    }

    #[test]
    fn test_tag_set_bare_preserves_order() {
        let tags = TagSet::bare(vec!["zeta", "alpha"]);
        assert_eq!(vec!["zeta", "alpha"], tags.to_strings());
    }

    #[test]
    fn test_tag_set_empty_takes_first_shape() {
        let tags = TagSet::new().with_tag("host", "web01").unwrap();
        assert!(tags.is_keyed());

        let tags = TagSet::keyed(Vec::<(String, String)>::new()).with_tag_value("beta").unwrap();
        assert_eq!(TagSet::bare(vec!["beta"]), tags);
    }

    #[test]
    fn test_tag_set_mixed_is_error() {
        let res = TagSet::keyed(vec![("host", "web01")]).with_tag_value("beta");
        assert_eq!(ErrorKind::InvalidInput, res.unwrap_err().kind());

        let res = TagSet::from_tags(vec![Tag::Value("beta".into()), Tag::KeyValue("a".into(), "b".into())]);
        assert_eq!(ErrorKind::InvalidInput, res.unwrap_err().kind());
    }

    #[test]
    fn test_tag_set_from_tags_same_shape() {
        let tags = TagSet::from_tags(vec![
            Tag::KeyValue("a".into(), "1".into()),
            Tag::KeyValue("b".into(), "2".into()),
        ])
        .unwrap();

        assert_eq!(TagSet::keyed(vec![("a", "1"), ("b", "2")]), tags);
    }

    #[test]
    fn test_tag_set_kv_size() {
        assert_eq!(0, TagSet::new().kv_size());
        assert_eq!("a:1,bb:22".len(), TagSet::keyed(vec![("a", "1"), ("bb", "22")]).kv_size());
        assert_eq!("x,yz".len(), TagSet::bare(vec!["x", "yz"]).kv_size());
    }

    #[test]
    fn test_tag_set_iter() {
        let keyed = TagSet::keyed(vec![("a", "1"), ("b", "2")]);
        let mut it = keyed.iter();
        assert_eq!(2, it.len());
        assert_eq!(Some((Some("a"), "1")), it.next());
        assert_eq!(Some((Some("b"), "2")), it.next());
        assert_eq!(None, it.next());

        let bare = TagSet::bare(vec!["x", "y"]);
        let collected: Vec<_> = (&bare).into_iter().collect();
        assert_eq!(vec![(None, "x"), (None, "y")], collected);
    }
}
