// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A DogStatsD client for Rust!
//!
//! `dogstatsd-client` emits metrics, events, and service checks to a
//! [DogStatsD](https://docs.datadoghq.com/developers/dogstatsd/) agent.
//!
//! ## Features
//!
//! * Support for emitting counters, gauges, histograms, and sets over UDP,
//!   with client side sampling.
//! * Support for Datadog style tags, either `key:value` pairs or bare labels.
//! * Support for events, sent over UDP or posted to the Datadog HTTP API.
//! * Support for service checks.
//! * A buffered client that batches lines into a single datagram.
//! * Support for alternate backends via the `MetricSink` trait.
//!
//! ## Install
//!
//! ```toml
//! [dependencies]
//! dogstatsd-client = "x.y.z"
//! ```
//!
//! ## Usage
//!
//! ### Simple Use
//!
//! Create a client that sends each line as its own UDP datagram to an agent
//! and emit a few metrics.
//!
//! ```rust,no_run
//! use dogstatsd_client::prelude::*;
//! use dogstatsd_client::{DogStatsdClient, SampleRate, TagSet, DEFAULT_PORT};
//!
//! let mut client = DogStatsdClient::builder()
//!     .with_server("metrics.example.com", DEFAULT_PORT)
//!     .build();
//!
//! let tags = TagSet::keyed(vec![("region", "us-east-1")]);
//!
//! // Emit metrics! Note that you'll probably want to actually handle any
//! // errors when you use this for real in your application.
//! client.increment("some.counter", &tags, SampleRate::ALWAYS).unwrap();
//! client.gauge("some.gauge", 7, &tags, SampleRate::ALWAYS).unwrap();
//! client.histogram("some.histogram", 12.5, &TagSet::new(), SampleRate::ALWAYS).unwrap();
//! ```
//!
//! ### Buffered Client
//!
//! Sending every line in its own datagram adds up when an application emits
//! a lot of metrics. `BufferedDogStatsdClient` collects lines and sends them
//! joined by newlines once a threshold is reached, and sends whatever is
//! left when it's closed or dropped.
//!
//! ```rust,no_run
//! use dogstatsd_client::prelude::*;
//! use dogstatsd_client::{DogStatsdClient, SampleRate, TagSet};
//!
//! let mut client = DogStatsdClient::builder()
//!     .with_server("metrics.example.com", 8125)
//!     .build_buffered(20);
//!
//! for i in 0..100 {
//!     client.gauge("queue.depth", i, &TagSet::new(), SampleRate::ALWAYS).unwrap();
//! }
//!
//! client.close().unwrap();
//! ```
//!
//! ### Events
//!
//! Events are sent over UDP by default. They can instead be posted to the
//! Datadog HTTP API, which requires an API key.
//!
//! ```rust,no_run
//! use dogstatsd_client::prelude::*;
//! use dogstatsd_client::{DogStatsdClient, Event, EventOptions, EventPriority, EventTransport};
//!
//! let mut client = DogStatsdClient::builder()
//!     .with_event_transport(EventTransport::Http)
//!     .with_api_key("my-api-key")
//!     .build();
//!
//! let event = Event::new("deploy", "version 1.2.3 is live")
//!     .with_options(EventOptions::default().with_priority(EventPriority::Low));
//!
//! client.event(&event).unwrap();
//! ```
//!
//! ### Custom Sinks
//!
//! Any `MetricSink` implementation can be used in place of UDP.
//!
//! ```rust
//! use std::io;
//! use dogstatsd_client::prelude::*;
//! use dogstatsd_client::{DogStatsdClient, MetricSink, SampleRate, TagSet};
//!
//! pub struct MyMetricSink;
//!
//! impl MetricSink for MyMetricSink {
//!     fn emit(&self, metric: &str) -> io::Result<usize> {
//!         // Your custom metric sink implementation goes here!
//!         Ok(metric.len())
//!     }
//! }
//!
//! let mut client = DogStatsdClient::from_sink(MyMetricSink);
//! client.increment("some.counter", &TagSet::new(), SampleRate::ALWAYS).unwrap();
//! ```

#![forbid(unsafe_code)]

pub const DEFAULT_PORT: u16 = 8125;

pub use self::buffered::BufferedDogStatsdClient;
pub use self::check::{ServiceCheck, ServiceCheckOptions, ServiceStatus};
pub use self::client::{DogStatsd, DogStatsdClient, DogStatsdClientBuilder, MetricBackend};
pub use self::config::{ClientConfig, EventTransport, TransportMode};
pub use self::event::{Event, EventAlertType, EventOptions, EventPayload, EventPriority, Timestamp};
pub use self::format::{MetricSample, MetricType, MetricValue, SampleRate};
pub use self::sinks::{FileMetricSink, MetricSink, NopMetricSink, SinkStats, SpyMetricSink, UdpMetricSink};
pub use self::tags::{Tag, TagIter, TagSet};
pub use self::types::{ErrorKind, MetricError, MetricResult};

mod buffered;
mod check;
mod client;
pub mod config;
mod event;
pub mod format;
pub mod prelude;
pub mod sinks;
mod tags;
mod types;
