// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::sinks::MetricSink;
use crate::DEFAULT_PORT;
use std::convert::Infallible;
use std::fmt;
use std::panic::RefUnwindSafe;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_COLLECTOR_URL: &str = "https://app.datadoghq.com";
pub const DEFAULT_EVENT_PATH: &str = "/api/v1/events";

/// A caller supplied sink, shared so configurations stay cheap to clone.
pub type SharedSink = Arc<dyn MetricSink + Send + Sync + RefUnwindSafe>;

/// How metric lines (and events sent over UDP) are delivered.
#[derive(Clone)]
pub enum TransportMode {
    /// UDP using a socket that may block until the OS accepts the datagram.
    UdpBlocking,
    /// UDP using a socket that never blocks on a full send buffer.
    UdpNonBlocking,
    /// Append each line to a file.
    File(PathBuf),
    /// Hand each line to a caller supplied `MetricSink`.
    Sink(SharedSink),
    /// A transport name that wasn't recognized. Sending with this mode
    /// configured fails with an `UnsupportedTransport` error.
    Unsupported(String),
}

impl fmt::Debug for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::UdpBlocking => f.write_str("UdpBlocking"),
            TransportMode::UdpNonBlocking => f.write_str("UdpNonBlocking"),
            TransportMode::File(path) => f.debug_tuple("File").field(path).finish(),
            TransportMode::Sink(_) => f.write_str("Sink(...)"),
            TransportMode::Unsupported(name) => f.debug_tuple("Unsupported").field(name).finish(),
        }
    }
}

impl FromStr for TransportMode {
    type Err = Infallible;

    /// Parse `UDP_BLOCKING` or `UDP_NON_BLOCKING`. Any other name becomes
    /// `TransportMode::Unsupported` and is reported when sending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "UDP_BLOCKING" => TransportMode::UdpBlocking,
            "UDP_NON_BLOCKING" => TransportMode::UdpNonBlocking,
            other => TransportMode::Unsupported(other.to_string()),
        })
    }
}

/// How events are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTransport {
    /// Encode the event as a DogStatsD line and send it like a metric.
    Udp,
    /// Post the event as JSON to the Datadog HTTP API.
    Http,
    /// An event transport name that wasn't recognized. Sending an event with
    /// this configured fails with an `UnsupportedTransport` error.
    Unsupported(String),
}

impl FromStr for EventTransport {
    type Err = Infallible;

    /// Parse `UDP` or `HTTP` (`TCP` is accepted as an alias of `HTTP`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "UDP" => EventTransport::Udp,
            "HTTP" | "TCP" => EventTransport::Http,
            other => EventTransport::Unsupported(other.to_string()),
        })
    }
}

/// Settings for a client.
///
/// Every client owns its own copy. `ClientConfig::default()` gives the
/// standard settings: a DogStatsD agent on `localhost:8125` reached over
/// non-blocking UDP, events sent over UDP, and the public Datadog API with
/// full TLS verification for events sent over HTTP.
///
/// # Example
///
/// ```
/// use dogstatsd_client::{ClientConfig, EventTransport, TransportMode};
///
/// let config = ClientConfig::default()
///     .with_server("metrics.example.com", 9125)
///     .with_transport(TransportMode::UdpBlocking)
///     .with_event_transport(EventTransport::Http)
///     .with_api_key("abc");
///
/// assert_eq!("https://app.datadoghq.com/api/v1/events", config.event_url());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_host: String,
    pub server_port: u16,
    pub collector_base_url: String,
    pub event_path: String,
    pub tls_verify_host: bool,
    pub tls_verify_peer: bool,
    pub transport: TransportMode,
    pub event_transport: EventTransport,
    pub api_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            collector_base_url: DEFAULT_COLLECTOR_URL.to_string(),
            event_path: DEFAULT_EVENT_PATH.to_string(),
            tls_verify_host: true,
            tls_verify_peer: true,
            transport: TransportMode::UdpNonBlocking,
            event_transport: EventTransport::Udp,
            api_key: String::new(),
        }
    }
}

impl ClientConfig {
    pub fn with_server<S: Into<String>>(mut self, host: S, port: u16) -> Self {
        self.server_host = host.into();
        self.server_port = port;
        self
    }

    pub fn with_collector_url<S: Into<String>>(mut self, url: S) -> Self {
        self.collector_base_url = url.into();
        self
    }

    pub fn with_event_path<S: Into<String>>(mut self, path: S) -> Self {
        self.event_path = path.into();
        self
    }

    pub fn with_tls_verify(mut self, verify_peer: bool, verify_host: bool) -> Self {
        self.tls_verify_peer = verify_peer;
        self.tls_verify_host = verify_host;
        self
    }

    pub fn with_transport(mut self, transport: TransportMode) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_event_transport(mut self, transport: EventTransport) -> Self {
        self.event_transport = transport;
        self
    }

    pub fn with_api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.api_key = key.into();
        self
    }

    /// URL events are posted to, without the API key.
    pub fn event_url(&self) -> String {
        format!("{}{}", self.collector_base_url, self.event_path)
    }
}
