// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2020-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::sinks::core::MetricSink;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use std::io::{self, ErrorKind};

/// `MetricSink` implementation that writes every line to the `Sender` half
/// of a channel while callers are given ownership of the `Receiver` half.
///
/// This is not a general purpose sink, rather it's a sink meant for verifying
/// exactly what a client hands to its transport during the course of tests:
/// each message received corresponds to one transport call. By default, the
/// channel used is unbounded. The channel size can be limited using the
/// `with_capacity` method.
///
/// # Example
///
/// ```
/// use dogstatsd_client::prelude::*;
/// use dogstatsd_client::{BufferedDogStatsdClient, DogStatsdClient, SampleRate, SpyMetricSink, TagSet};
///
/// let (rx, sink) = SpyMetricSink::new();
/// let mut client = BufferedDogStatsdClient::new(DogStatsdClient::from_sink(sink), 2);
///
/// client.increment("a", &TagSet::new(), SampleRate::ALWAYS).unwrap();
/// client.increment("b", &TagSet::new(), SampleRate::ALWAYS).unwrap();
///
/// assert_eq!(b"a:1|c\nb:1|c".to_vec(), rx.try_recv().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct SpyMetricSink {
    sender: Sender<Vec<u8>>,
}

impl SpyMetricSink {
    pub fn new() -> (Receiver<Vec<u8>>, Self) {
        Self::with_queue_capacity(None)
    }

    pub fn with_capacity(queue: usize) -> (Receiver<Vec<u8>>, Self) {
        Self::with_queue_capacity(Some(queue))
    }

    fn with_queue_capacity(queue: Option<usize>) -> (Receiver<Vec<u8>>, Self) {
        let (tx, rx) = match queue {
            Some(cap) => bounded(cap),
            None => unbounded(),
        };

        (rx, SpyMetricSink { sender: tx })
    }
}

impl MetricSink for SpyMetricSink {
    fn emit(&self, metric: &str) -> io::Result<usize> {
        let bytes = metric.as_bytes();
        match self.sender.try_send(bytes.to_vec()) {
            Ok(_) => Ok(bytes.len()),
            Err(TrySendError::Full(_)) => Err(io::Error::new(ErrorKind::WouldBlock, "spy channel is full")),
            Err(TrySendError::Disconnected(_)) => Err(io::Error::new(ErrorKind::BrokenPipe, "spy channel is closed")),
        }
    }
}
