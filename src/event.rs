// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::tags::TagSet;
use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Point in time attached to an event or service check.
#[derive(PartialEq, Eq, Debug, Hash, Clone)]
pub enum Timestamp {
    /// Seconds since the Unix epoch.
    Unix(u64),
    /// Any other value, sent exactly as given.
    Raw(String),
}

impl Timestamp {
    pub(crate) fn parse(value: &str) -> Self {
        value
            .parse()
            .map(Timestamp::Unix)
            .unwrap_or_else(|_| Timestamp::Raw(value.to_string()))
    }
}

impl From<u64> for Timestamp {
    fn from(v: u64) -> Self {
        Timestamp::Unix(v)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Unix(v) => v.fmt(f),
            Timestamp::Raw(v) => v.fmt(f),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Timestamp::Unix(v) => serializer.serialize_u64(*v),
            Timestamp::Raw(v) => serializer.serialize_str(v),
        }
    }
}

/// The priority of an event.
///
/// See [Datadog](https://docs.datadoghq.com/developers/dogstatsd/).
#[derive(PartialEq, Eq, Debug, Hash, Clone)]
pub enum EventPriority {
    Low,
    Normal,
    /// A priority this client doesn't know about, sent as given.
    Other(String),
}

impl fmt::Display for EventPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventPriority::Low => "low".fmt(f),
            EventPriority::Normal => "normal".fmt(f),
            EventPriority::Other(v) => v.fmt(f),
        }
    }
}

impl FromStr for EventPriority {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "low" => EventPriority::Low,
            "normal" => EventPriority::Normal,
            other => EventPriority::Other(other.to_string()),
        })
    }
}

impl Serialize for EventPriority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The alert type of an event.
///
/// See [Datadog](https://docs.datadoghq.com/developers/dogstatsd/).
#[derive(PartialEq, Eq, Debug, Hash, Clone)]
pub enum EventAlertType {
    Error,
    Warning,
    Info,
    Success,
    /// An alert type this client doesn't know about, sent as given.
    Other(String),
}

impl fmt::Display for EventAlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventAlertType::Error => "error".fmt(f),
            EventAlertType::Warning => "warning".fmt(f),
            EventAlertType::Info => "info".fmt(f),
            EventAlertType::Success => "success".fmt(f),
            EventAlertType::Other(v) => v.fmt(f),
        }
    }
}

impl FromStr for EventAlertType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "error" => EventAlertType::Error,
            "warning" => EventAlertType::Warning,
            "info" => EventAlertType::Info,
            "success" => EventAlertType::Success,
            other => EventAlertType::Other(other.to_string()),
        })
    }
}

impl Serialize for EventAlertType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Optional fields of an event. Only fields that are set are written.
#[derive(PartialEq, Eq, Debug, Hash, Clone, Default)]
pub struct EventOptions {
    pub date_happened: Option<Timestamp>,
    pub hostname: Option<String>,
    pub aggregation_key: Option<String>,
    pub priority: Option<EventPriority>,
    pub source_type_name: Option<String>,
    pub alert_type: Option<EventAlertType>,
}

impl EventOptions {
    /// Build options from untyped key-value pairs using the Datadog field
    /// names (`date_happened`, `hostname`, `aggregation_key`, `priority`,
    /// `source_type_name`, `alert_type`).
    ///
    /// Unknown keys are ignored. Values of known keys are always kept: a
    /// `date_happened` that isn't a Unix timestamp, or a priority or alert
    /// type this client doesn't know about, is sent exactly as given.
    ///
    /// # Example
    ///
    /// ```
    /// use dogstatsd_client::{EventAlertType, EventOptions, EventPriority};
    ///
    /// let opts = EventOptions::from_pairs(vec![
    ///     ("priority", "low"),
    ///     ("hostname", "web01"),
    ///     ("not_supported", "whatever"),
    ///     ("alert_type", "custom"),
    /// ]);
    ///
    /// assert_eq!(Some(EventPriority::Low), opts.priority);
    /// assert_eq!(Some(EventAlertType::Other("custom".to_string())), opts.alert_type);
    /// assert_eq!(Some("web01".to_string()), opts.hostname);
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut opts = EventOptions::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "date_happened" => opts.date_happened = Some(Timestamp::parse(value)),
                "hostname" => opts.hostname = Some(value.to_string()),
                "aggregation_key" => opts.aggregation_key = Some(value.to_string()),
                "priority" => opts.priority = value.parse().ok(),
                "source_type_name" => opts.source_type_name = Some(value.to_string()),
                "alert_type" => opts.alert_type = value.parse().ok(),
                _ => {}
            }
        }

        opts
    }

    pub fn with_date_happened(mut self, timestamp: u64) -> Self {
        self.date_happened = Some(Timestamp::Unix(timestamp));
        self
    }

    pub fn with_hostname<S: Into<String>>(mut self, hostname: S) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_aggregation_key<S: Into<String>>(mut self, key: S) -> Self {
        self.aggregation_key = Some(key.into());
        self
    }

    pub fn with_priority(mut self, priority: EventPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_source_type_name<S: Into<String>>(mut self, name: S) -> Self {
        self.source_type_name = Some(name.into());
        self
    }

    pub fn with_alert_type(mut self, alert_type: EventAlertType) -> Self {
        self.alert_type = Some(alert_type);
        self
    }
}

/// Events are records sent to the Datadog event stream.
///
/// The text of an event may contain line breaks, they are sent verbatim.
#[derive(PartialEq, Eq, Debug, Hash, Clone)]
pub struct Event {
    pub title: String,
    pub text: String,
    pub options: EventOptions,
    pub tags: TagSet,
}

impl Event {
    pub fn new<T, X>(title: T, text: X) -> Self
    where
        T: Into<String>,
        X: Into<String>,
    {
        Event {
            title: title.into(),
            text: text.into(),
            options: EventOptions::default(),
            tags: TagSet::new(),
        }
    }

    pub fn with_options(mut self, options: EventOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }
}

/// JSON body of an event posted to the Datadog HTTP API.
///
/// Fields are serialized in the order declared here, optional fields are
/// skipped when unset, and tags are skipped when there are none.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct EventPayload<'a> {
    pub title: &'a str,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_happened: Option<&'a Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'a EventPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<&'a EventAlertType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{EventAlertType, EventOptions, EventPriority, Timestamp};

    #[test]
    fn test_event_options_from_pairs_all_fields() {
        let opts = EventOptions::from_pairs(vec![
            ("date_happened", "123"),
            ("hostname", "host"),
            ("aggregation_key", "abc"),
            ("priority", "normal"),
            ("source_type_name", "type"),
            ("alert_type", "warning"),
        ]);

        let expected = EventOptions::default()
            .with_date_happened(123)
            .with_hostname("host")
            .with_aggregation_key("abc")
            .with_priority(EventPriority::Normal)
            .with_source_type_name("type")
            .with_alert_type(EventAlertType::Warning);

        assert_eq!(expected, opts);
    }

    #[test]
    fn test_event_options_from_pairs_ignores_unknown_keys() {
        let opts = EventOptions::from_pairs(vec![("not_supported", "not")]);
        assert_eq!(EventOptions::default(), opts);
    }

    #[test]
    fn test_event_options_from_pairs_keeps_unrecognized_values() {
        let opts = EventOptions::from_pairs(vec![
            ("alert_type", "a_type"),
            ("priority", "high"),
            ("date_happened", "2024-01-01"),
        ]);

        assert_eq!(Some(EventAlertType::Other("a_type".to_string())), opts.alert_type);
        assert_eq!(Some(EventPriority::Other("high".to_string())), opts.priority);
        assert_eq!(Some(Timestamp::Raw("2024-01-01".to_string())), opts.date_happened);
    }

    #[test]
    fn test_timestamp_parse() {
        assert_eq!(Timestamp::Unix(1500000000), Timestamp::parse("1500000000"));
        assert_eq!(Timestamp::Raw("-5".to_string()), Timestamp::parse("-5"));
        assert_eq!("2024-01-01", Timestamp::parse("2024-01-01").to_string());
    }

    #[test]
    fn test_timestamp_serialize() {
        assert_eq!("123", serde_json::to_string(&Timestamp::Unix(123)).unwrap());
        assert_eq!(r#""soon""#, serde_json::to_string(&Timestamp::Raw("soon".to_string())).unwrap());
    }

    #[test]
    fn test_event_priority_from_str() {
        assert_eq!(Ok(EventPriority::Low), "low".parse::<EventPriority>());
        assert_eq!(Ok(EventPriority::Other("urgent".to_string())), "urgent".parse::<EventPriority>());
    }

    #[test]
    fn test_event_priority_display() {
        assert_eq!("low", EventPriority::Low.to_string());
        assert_eq!("normal", EventPriority::Normal.to_string());
    }

    #[test]
    fn test_event_alert_type_display() {
        assert_eq!("error", EventAlertType::Error.to_string());
        assert_eq!("warning", EventAlertType::Warning.to_string());
        assert_eq!("info", EventAlertType::Info.to_string());
        assert_eq!("success", EventAlertType::Success.to_string());
        assert_eq!("a_type", EventAlertType::Other("a_type".to_string()).to_string());
    }

    #[test]
    fn test_event_enums_serialize_as_strings() {
        assert_eq!(r#""low""#, serde_json::to_string(&EventPriority::Low).unwrap());
        assert_eq!(r#""high""#, serde_json::to_string(&EventPriority::Other("high".to_string())).unwrap());
        assert_eq!(r#""warning""#, serde_json::to_string(&EventAlertType::Warning).unwrap());
        assert_eq!(r#""a_type""#, serde_json::to_string(&EventAlertType::Other("a_type".to_string())).unwrap());
    }
}
