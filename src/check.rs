// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::event::Timestamp;
use crate::tags::TagSet;
use std::fmt;

/// Health status reported by a service check.
#[derive(PartialEq, Eq, Debug, Hash, Clone, Copy)]
pub enum ServiceStatus {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (*self as u8).fmt(f)
    }
}

/// Optional fields of a service check.
#[derive(PartialEq, Eq, Debug, Hash, Clone, Default)]
pub struct ServiceCheckOptions {
    pub timestamp: Option<Timestamp>,
    pub hostname: Option<String>,
    pub message: Option<String>,
}

impl ServiceCheckOptions {
    /// Build options from untyped key-value pairs (`timestamp`, `hostname`,
    /// `message`). Unknown keys are ignored. A timestamp that isn't a Unix
    /// timestamp is sent exactly as given.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut opts = ServiceCheckOptions::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "timestamp" => opts.timestamp = Some(Timestamp::parse(value)),
                "hostname" => opts.hostname = Some(value.to_string()),
                "message" => opts.message = Some(value.to_string()),
                _ => {}
            }
        }

        opts
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(Timestamp::Unix(timestamp));
        self
    }

    pub fn with_hostname<S: Into<String>>(mut self, hostname: S) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A discrete health status report for some named service.
#[derive(PartialEq, Eq, Debug, Hash, Clone)]
pub struct ServiceCheck {
    pub name: String,
    pub status: ServiceStatus,
    pub options: ServiceCheckOptions,
    pub tags: TagSet,
}

impl ServiceCheck {
    pub fn new<S: Into<String>>(name: S, status: ServiceStatus) -> Self {
        ServiceCheck {
            name: name.into(),
            status,
            options: ServiceCheckOptions::default(),
            tags: TagSet::new(),
        }
    }

    pub fn with_options(mut self, options: ServiceCheckOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ServiceCheckOptions, ServiceStatus, Timestamp};

    #[test]
    fn test_service_status_display() {
        assert_eq!("0", ServiceStatus::Ok.to_string());
        assert_eq!("1", ServiceStatus::Warning.to_string());
        assert_eq!("2", ServiceStatus::Critical.to_string());
        assert_eq!("3", ServiceStatus::Unknown.to_string());
    }

    #[test]
    fn test_service_check_options_from_pairs() {
        let opts = ServiceCheckOptions::from_pairs(vec![
            ("message", "disk full"),
            ("timestamp", "1500000000"),
            ("bogus", "value"),
        ]);

        assert_eq!(
            ServiceCheckOptions::default()
                .with_timestamp(1500000000)
                .with_message("disk full"),
            opts
        );
    }

    #[test]
    fn test_service_check_options_from_pairs_keeps_raw_timestamp() {
        let opts = ServiceCheckOptions::from_pairs(vec![("timestamp", "2024-01-01")]);
        assert_eq!(Some(Timestamp::Raw("2024-01-01".to_string())), opts.timestamp);
    }
}
