// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Encoding of metrics, events, and service checks into the DogStatsD
//! line format.
//!
//! Everything here is a pure function of its input. Nothing in this module
//! performs I/O or can fail.

use crate::check::ServiceCheck;
use crate::event::{Event, EventPayload};
use crate::tags::TagSet;
use std::fmt::{self, Write};

mod sample_rate;
mod sampler;

pub use self::sample_rate::SampleRate;
pub use self::sampler::{sample, sample_with};

const TAG_PREFIX: &str = "|#";

/// Type of metric that knows how to display itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Set,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MetricType::Counter => "c".fmt(f),
            MetricType::Gauge => "g".fmt(f),
            MetricType::Histogram => "h".fmt(f),
            MetricType::Set => "s".fmt(f),
        }
    }
}

/// Holder for primitive metric values that knows how to display itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MetricValue::Signed(v) => v.fmt(f),
            MetricValue::Unsigned(v) => v.fmt(f),
            MetricValue::Float(v) => v.fmt(f),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Signed(v)
    }
}

impl From<i32> for MetricValue {
    fn from(v: i32) -> Self {
        MetricValue::Signed(i64::from(v))
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        MetricValue::Unsigned(v)
    }
}

impl From<u32> for MetricValue {
    fn from(v: u32) -> Self {
        MetricValue::Unsigned(u64::from(v))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

/// A single observation of a metric waiting to be encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    name: String,
    value: MetricValue,
    kind: MetricType,
    rate: Option<SampleRate>,
}

impl MetricSample {
    pub fn new<S, V>(name: S, value: V, kind: MetricType) -> Self
    where
        S: Into<String>,
        V: Into<MetricValue>,
    {
        MetricSample {
            name: name.into(),
            value: value.into(),
            kind,
            rate: None,
        }
    }

    pub fn counter<S: Into<String>>(name: S, delta: i64) -> Self {
        Self::new(name, delta, MetricType::Counter)
    }

    pub fn gauge<S: Into<String>, V: Into<MetricValue>>(name: S, value: V) -> Self {
        Self::new(name, value, MetricType::Gauge)
    }

    pub fn histogram<S: Into<String>, V: Into<MetricValue>>(name: S, value: V) -> Self {
        Self::new(name, value, MetricType::Histogram)
    }

    pub fn set<S: Into<String>, V: Into<MetricValue>>(name: S, value: V) -> Self {
        Self::new(name, value, MetricType::Set)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> MetricValue {
        self.value
    }

    pub fn kind(&self) -> MetricType {
        self.kind
    }

    /// The rate this sample survived sampling at, if it was sampled at all.
    pub fn sample_rate(&self) -> Option<SampleRate> {
        self.rate
    }

    pub(crate) fn with_sample_rate(mut self, rate: SampleRate) -> Self {
        self.rate = Some(rate);
        self
    }
}

/// Render tags as the `|#...` suffix of a line, or an empty string when
/// there are no tags.
///
/// # Example
///
/// ```
/// use dogstatsd_client::TagSet;
/// use dogstatsd_client::format::build_tags;
///
/// assert_eq!("", build_tags(&TagSet::new()));
/// assert_eq!("|#a:1,b:2", build_tags(&TagSet::keyed(vec![("a", "1"), ("b", "2")])));
/// assert_eq!("|#a,b", build_tags(&TagSet::bare(vec!["a", "b"])));
/// ```
pub fn build_tags(tags: &TagSet) -> String {
    let mut out = String::with_capacity(tag_size_hint(tags));
    write_tags(&mut out, tags);
    out
}

fn write_tags(out: &mut String, tags: &TagSet) {
    if tags.is_empty() {
        return;
    }

    out.push_str(TAG_PREFIX);
    for (i, (key, value)) in tags.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if let Some(key) = key {
            out.push_str(key);
            out.push(':');
        }
        out.push_str(value);
    }
}

fn tag_size_hint(tags: &TagSet) -> usize {
    if tags.is_empty() {
        0
    } else {
        TAG_PREFIX.len() + tags.kv_size()
    }
}

/// Encode a metric sample with the given tags:
/// `<name>:<value>|<type>[|@<rate>][|#<tags>]`.
///
/// The `|@` annotation is only written for samples that went through
/// sampling at a rate other than 1.
pub fn encode_metric(sample: &MetricSample, tags: &TagSet) -> String {
    // name, ':', value, '|', type, sample rate, tags
    let size_hint = sample.name.len() + 1 + 20 + 1 + 1 + 10 + tag_size_hint(tags);
    let mut out = String::with_capacity(size_hint);

    let _ = write!(out, "{}:{}|{}", sample.name, sample.value, sample.kind);
    if let Some(rate) = sample.rate.filter(|r| !r.is_always()) {
        let _ = write!(out, "|@{}", rate);
    }

    write_tags(&mut out, tags);
    out
}

/// Encode an event for sending over UDP:
/// `_e{<title bytes>,<text bytes>}:<title>|<text>` followed by any set
/// optional fields (in the fixed order date, hostname, aggregation key,
/// priority, source type, alert type) and then tags.
///
/// The lengths in the header are UTF-8 byte lengths, not character counts.
///
/// # Example
///
/// ```
/// use dogstatsd_client::Event;
/// use dogstatsd_client::format::encode_event;
///
/// let event = Event::new("title", "text");
/// assert_eq!("_e{5,4}:title|text", encode_event(&event));
/// ```
pub fn encode_event(event: &Event) -> String {
    let opts = &event.options;
    let mut out = String::with_capacity(event.title.len() + event.text.len() + 64 + tag_size_hint(&event.tags));

    let _ = write!(
        out,
        "_e{{{},{}}}:{}|{}",
        event.title.len(),
        event.text.len(),
        event.title,
        event.text
    );

    if let Some(ref date) = opts.date_happened {
        let _ = write!(out, "|d:{}", date);
    }
    if let Some(ref hostname) = opts.hostname {
        let _ = write!(out, "|h:{}", hostname);
    }
    if let Some(ref key) = opts.aggregation_key {
        let _ = write!(out, "|k:{}", key);
    }
    if let Some(ref priority) = opts.priority {
        let _ = write!(out, "|p:{}", priority);
    }
    if let Some(ref source) = opts.source_type_name {
        let _ = write!(out, "|s:{}", source);
    }
    if let Some(ref alert) = opts.alert_type {
        let _ = write!(out, "|t:{}", alert);
    }

    write_tags(&mut out, &event.tags);
    out
}

/// Build the JSON body used to post an event to the Datadog HTTP API.
pub fn build_event_payload(event: &Event) -> EventPayload<'_> {
    let opts = &event.options;

    EventPayload {
        title: &event.title,
        text: &event.text,
        date_happened: opts.date_happened.as_ref(),
        hostname: opts.hostname.as_deref(),
        aggregation_key: opts.aggregation_key.as_deref(),
        priority: opts.priority.as_ref(),
        source_type_name: opts.source_type_name.as_deref(),
        alert_type: opts.alert_type.as_ref(),
        tags: event.tags.to_strings(),
    }
}

/// Encode a service check: `_sc|<name>|<status>` followed by the timestamp,
/// hostname, tags, and finally the message, each only if set.
///
/// # Example
///
/// ```
/// use dogstatsd_client::{ServiceCheck, ServiceCheckOptions, ServiceStatus, TagSet};
/// use dogstatsd_client::format::encode_service_check;
///
/// let check = ServiceCheck::new("name", ServiceStatus::Critical)
///     .with_options(ServiceCheckOptions::default().with_hostname("host"))
///     .with_tags(TagSet::keyed(vec![("tag1", "val1")]));
///
/// assert_eq!("_sc|name|2|h:host|#tag1:val1", encode_service_check(&check));
/// ```
pub fn encode_service_check(check: &ServiceCheck) -> String {
    let opts = &check.options;
    let mut out = String::with_capacity(check.name.len() + 48 + tag_size_hint(&check.tags));

    let _ = write!(out, "_sc|{}|{}", check.name, check.status);
    if let Some(ref timestamp) = opts.timestamp {
        let _ = write!(out, "|d:{}", timestamp);
    }
    if let Some(ref hostname) = opts.hostname {
        let _ = write!(out, "|h:{}", hostname);
    }

    write_tags(&mut out, &check.tags);

    if let Some(ref message) = opts.message {
        let _ = write!(out, "|m:{}", message);
    }

    out
}
