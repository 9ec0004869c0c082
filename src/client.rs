// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::buffered::BufferedDogStatsdClient;
use crate::check::ServiceCheck;
use crate::config::{ClientConfig, EventTransport, TransportMode};
use crate::event::Event;
use crate::format::{self, MetricSample, MetricValue, SampleRate};
use crate::sinks::{
    self, FileMetricSink, HttpEventTarget, MetricSink, SinkStats, SocketStats, UdpMetricSink,
};
use crate::tags::TagSet;
use crate::types::{ErrorKind, MetricError, MetricResult};
use log::debug;
use std::fmt;
use std::panic::RefUnwindSafe;
use std::sync::Arc;

/// Something that can deliver already encoded DogStatsD lines.
///
/// This is the seam every client type implements. The operations for
/// emitting metrics, events, and service checks are provided on top of it
/// by the [`DogStatsd`] trait.
pub trait MetricBackend {
    /// Send a fully formed line (or newline joined batch of lines) and
    /// return it unchanged.
    ///
    /// A buffered client may hold on to the line and only transmit it
    /// later; the returned value is always what the caller passed in,
    /// regardless of what was transmitted during the call.
    fn send<'a>(&mut self, line: &'a str) -> MetricResult<&'a str>;

    /// Settings of this client.
    fn config(&self) -> &ClientConfig;

    /// Key used when posting events to the Datadog HTTP API.
    fn api_key(&self) -> &str {
        &self.config().api_key
    }
}

/// Operations for emitting metrics, events, and service checks.
///
/// Every metric operation goes through [`DogStatsd::parse_and_send`]: the
/// samples are thinned according to the sample rate, and each surviving
/// sample is encoded with the tags and sent as its own line. If nothing
/// survives sampling, nothing is sent.
///
/// # Example
///
/// ```
/// use std::convert::TryFrom;
/// use dogstatsd_client::prelude::*;
/// use dogstatsd_client::{DogStatsdClient, NopMetricSink, SampleRate, TagSet};
///
/// let mut client = DogStatsdClient::from_sink(NopMetricSink);
/// let tags = TagSet::keyed(vec![("region", "us-west-1")]);
///
/// client.increment("some.counter", &tags, SampleRate::ALWAYS).unwrap();
/// client.gauge("some.gauge", 4.5, &tags, SampleRate::ALWAYS).unwrap();
/// client.histogram("some.histogram", 23, &TagSet::new(), SampleRate::try_from(0.5).unwrap()).unwrap();
/// ```
pub trait DogStatsd: MetricBackend {
    /// Sample, encode, and send each of the given samples with the given
    /// tags, one line per surviving sample.
    fn parse_and_send(&mut self, samples: Vec<MetricSample>, tags: &TagSet, rate: SampleRate) -> MetricResult<()> {
        let samples = format::sample(samples, rate);
        if samples.is_empty() {
            return Ok(());
        }

        for sample in &samples {
            let line = format::encode_metric(sample, tags);
            self.send(&line)?;
        }

        Ok(())
    }

    fn histogram<V>(&mut self, name: &str, value: V, tags: &TagSet, rate: SampleRate) -> MetricResult<()>
    where
        V: Into<MetricValue>,
    {
        self.parse_and_send(vec![MetricSample::histogram(name, value)], tags, rate)
    }

    fn gauge<V>(&mut self, name: &str, value: V, tags: &TagSet, rate: SampleRate) -> MetricResult<()>
    where
        V: Into<MetricValue>,
    {
        self.parse_and_send(vec![MetricSample::gauge(name, value)], tags, rate)
    }

    fn set<V>(&mut self, name: &str, value: V, tags: &TagSet, rate: SampleRate) -> MetricResult<()>
    where
        V: Into<MetricValue>,
    {
        self.parse_and_send(vec![MetricSample::set(name, value)], tags, rate)
    }

    fn counter(&mut self, name: &str, delta: i64, tags: &TagSet, rate: SampleRate) -> MetricResult<()> {
        self.parse_and_send(vec![MetricSample::counter(name, delta)], tags, rate)
    }

    fn increment(&mut self, name: &str, tags: &TagSet, rate: SampleRate) -> MetricResult<()> {
        self.counter(name, 1, tags, rate)
    }

    fn decrement(&mut self, name: &str, tags: &TagSet, rate: SampleRate) -> MetricResult<()> {
        self.counter(name, -1, tags, rate)
    }

    /// Send an event using the configured event transport.
    fn event(&mut self, event: &Event) -> MetricResult<()> {
        let transport = self.config().event_transport.clone();
        match transport {
            EventTransport::Udp => self.event_udp(event),
            EventTransport::Http => self.event_http(event),
            EventTransport::Unsupported(name) => Err(MetricError::from((
                ErrorKind::UnsupportedTransport,
                format!("Unsupported event transport: {}", name),
            ))),
        }
    }

    /// Send an event encoded as a DogStatsD line.
    fn event_udp(&mut self, event: &Event) -> MetricResult<()> {
        let line = format::encode_event(event);
        self.send(&line)?;
        Ok(())
    }

    /// Post an event to the Datadog HTTP API. Fails if the request can't be
    /// made or the API doesn't acknowledge the event.
    fn event_http(&self, event: &Event) -> MetricResult<()> {
        let config = self.config();
        let url = config.event_url();
        let target = HttpEventTarget::from_config(config, &url);
        sinks::send_http_event(&format::build_event_payload(event), target)
    }

    fn service_check(&mut self, check: &ServiceCheck) -> MetricResult<()> {
        let line = format::encode_service_check(check);
        self.send(&line)?;
        Ok(())
    }
}

/// Builder for creating and customizing `DogStatsdClient` instances.
///
/// Instances of the builder should be created by calling the `::builder()`
/// method on the `DogStatsdClient` struct.
///
/// # Example
///
/// ```
/// use dogstatsd_client::prelude::*;
/// use dogstatsd_client::{DogStatsdClient, EventTransport, TransportMode};
///
/// let client = DogStatsdClient::builder()
///     .with_server("127.0.0.1", 8125)
///     .with_transport(TransportMode::UdpBlocking)
///     .with_event_transport(EventTransport::Http)
///     .with_api_key("abc")
///     .build();
///
/// assert_eq!("abc", client.api_key());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DogStatsdClientBuilder {
    config: ClientConfig,
}

impl DogStatsdClientBuilder {
    pub fn with_server<S: Into<String>>(mut self, host: S, port: u16) -> Self {
        self.config = self.config.with_server(host, port);
        self
    }

    pub fn with_collector_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config = self.config.with_collector_url(url);
        self
    }

    pub fn with_event_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config = self.config.with_event_path(path);
        self
    }

    pub fn with_tls_verify(mut self, verify_peer: bool, verify_host: bool) -> Self {
        self.config = self.config.with_tls_verify(verify_peer, verify_host);
        self
    }

    pub fn with_transport(mut self, transport: TransportMode) -> Self {
        self.config = self.config.with_transport(transport);
        self
    }

    /// Send every line through the given sink instead of UDP.
    pub fn with_sink<T>(self, sink: T) -> Self
    where
        T: MetricSink + Send + Sync + RefUnwindSafe + 'static,
    {
        self.with_transport(TransportMode::Sink(Arc::new(sink)))
    }

    pub fn with_event_transport(mut self, transport: EventTransport) -> Self {
        self.config = self.config.with_event_transport(transport);
        self
    }

    pub fn with_api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.config = self.config.with_api_key(key);
        self
    }

    /// Construct a new `DogStatsdClient` instance based on current settings.
    pub fn build(self) -> DogStatsdClient {
        DogStatsdClient::new(self.config)
    }

    /// Construct a `BufferedDogStatsdClient` that flushes every `threshold`
    /// lines, based on current settings.
    pub fn build_buffered(self, threshold: usize) -> BufferedDogStatsdClient {
        BufferedDogStatsdClient::new(self.build(), threshold)
    }
}

/// Client that sends every line to the collector as soon as it's produced.
///
/// Each call to `send` results in exactly one transport call, using the
/// transport named in the client's configuration. For UDP this means one
/// datagram on a socket that only lives for the duration of the call.
///
/// Failures are returned to the caller. Nothing is retried.
///
/// # Example
///
/// ```no_run
/// use dogstatsd_client::prelude::*;
/// use dogstatsd_client::{DogStatsdClient, Event, SampleRate, ServiceCheck, ServiceStatus, TagSet};
///
/// let mut client = DogStatsdClient::builder()
///     .with_server("metrics.example.com", 8125)
///     .build();
///
/// client.increment("requests", &TagSet::bare(vec!["web"]), SampleRate::ALWAYS).unwrap();
/// client.event(&Event::new("deploy", "version 1.2.3 is live")).unwrap();
/// client.service_check(&ServiceCheck::new("app.up", ServiceStatus::Ok)).unwrap();
/// ```
pub struct DogStatsdClient {
    config: ClientConfig,
    stats: SocketStats,
}

impl DogStatsdClient {
    /// Create a client using the given settings.
    pub fn new(config: ClientConfig) -> Self {
        DogStatsdClient {
            config,
            stats: SocketStats::default(),
        }
    }

    /// Create a new builder starting from the default settings.
    pub fn builder() -> DogStatsdClientBuilder {
        DogStatsdClientBuilder::default()
    }

    /// Create a client with default settings that sends every line through
    /// the given sink.
    pub fn from_sink<T>(sink: T) -> Self
    where
        T: MetricSink + Send + Sync + RefUnwindSafe + 'static,
    {
        Self::builder().with_sink(sink).build()
    }

    /// Replace the settings of this client. Takes effect on the next send.
    pub fn set_config(&mut self, config: ClientConfig) {
        self.config = config;
    }

    /// Bytes and packets sent and dropped by this client so far.
    pub fn stats(&self) -> SinkStats {
        (&self.stats).into()
    }

    fn emit(&self, line: &str) -> MetricResult<usize> {
        let addr = (self.config.server_host.as_str(), self.config.server_port);
        let res = match self.config.transport {
            TransportMode::UdpBlocking => UdpMetricSink::blocking(addr).and_then(|s| s.emit(line)),
            TransportMode::UdpNonBlocking => UdpMetricSink::non_blocking(addr).and_then(|s| s.emit(line)),
            TransportMode::File(ref path) => FileMetricSink::new(path).emit(line),
            TransportMode::Sink(ref sink) => sink.emit(line),
            TransportMode::Unsupported(ref name) => {
                return Err(MetricError::from((
                    ErrorKind::UnsupportedTransport,
                    format!("Unsupported transport: {}", name),
                )));
            }
        };

        let written = self.stats.update(res, line.len())?;
        debug!("sent {} bytes via {:?}", written, self.config.transport);
        Ok(written)
    }
}

impl MetricBackend for DogStatsdClient {
    fn send<'a>(&mut self, line: &'a str) -> MetricResult<&'a str> {
        self.emit(line)?;
        Ok(line)
    }

    fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl DogStatsd for DogStatsdClient {}

impl fmt::Debug for DogStatsdClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DogStatsdClient {{ config: {:?}, stats: {:?} }}",
            self.config,
            self.stats()
        )
    }
}
