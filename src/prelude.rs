// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Export the client traits for easy glob imports
//!
//! # Example
//!
//! ```
//! use dogstatsd_client::prelude::*;
//! use dogstatsd_client::{DogStatsdClient, NopMetricSink, SampleRate, TagSet};
//!
//! let mut client = DogStatsdClient::from_sink(NopMetricSink);
//!
//! client.increment("some.counter", &TagSet::new(), SampleRate::ALWAYS).unwrap();
//! client.gauge("some.gauge", 45, &TagSet::new(), SampleRate::ALWAYS).unwrap();
//! client.set("some.set", 67, &TagSet::new(), SampleRate::ALWAYS).unwrap();
//! client.histogram("some.histogram", 89, &TagSet::new(), SampleRate::ALWAYS).unwrap();
//! ```

pub use crate::client::{DogStatsd, MetricBackend};
