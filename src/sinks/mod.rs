// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Transports that deliver already encoded lines (or event payloads) to a
//! collector.

mod core;
mod file;
mod http;
mod spy;
mod udp;

pub(crate) use crate::sinks::core::SocketStats;
pub use crate::sinks::core::{MetricSink, NopMetricSink, SinkStats};
pub use crate::sinks::file::FileMetricSink;
pub use crate::sinks::http::{check_response, send_http_event, HttpEventTarget};
pub use crate::sinks::spy::SpyMetricSink;
pub use crate::sinks::udp::UdpMetricSink;
