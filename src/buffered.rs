// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2017-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::client::{DogStatsd, DogStatsdClient, MetricBackend};
use crate::config::ClientConfig;
use crate::types::MetricResult;
use log::{debug, warn};

/// Client that holds encoded lines in memory and sends them as a single
/// newline joined batch.
///
/// Lines are appended to an in-memory buffer. Once the buffer holds
/// `threshold` lines, they're joined with `\n` and sent with one call to
/// the wrapped [`DogStatsdClient`]. Whatever is left in the buffer is sent
/// when the client is closed with [`BufferedDogStatsdClient::close`] or, as
/// a fallback, when it is dropped.
///
/// There is no timer. Lines may sit in the buffer indefinitely if the
/// threshold is never reached and the client is never closed or dropped.
///
/// If sending a batch fails, the lines in it are discarded and the error is
/// returned to the caller. They are not retried.
///
/// # Example
///
/// ```
/// use dogstatsd_client::prelude::*;
/// use dogstatsd_client::{BufferedDogStatsdClient, DogStatsdClient, SampleRate, SpyMetricSink, TagSet};
///
/// let (rx, sink) = SpyMetricSink::new();
/// let mut client = BufferedDogStatsdClient::new(DogStatsdClient::from_sink(sink), 3);
///
/// client.increment("name1", &TagSet::new(), SampleRate::ALWAYS).unwrap();
/// client.increment("name2", &TagSet::new(), SampleRate::ALWAYS).unwrap();
/// assert_eq!(2, client.buffer_size());
/// assert!(rx.try_recv().is_err());
///
/// client.close().unwrap();
/// assert_eq!(b"name1:1|c\nname2:1|c".to_vec(), rx.try_recv().unwrap());
/// ```
#[derive(Debug)]
pub struct BufferedDogStatsdClient {
    inner: DogStatsdClient,
    buffer: Vec<String>,
    threshold: usize,
}

impl BufferedDogStatsdClient {
    /// Number of lines buffered before a flush when no threshold is given.
    pub const DEFAULT_THRESHOLD: usize = 50;

    /// Wrap a client, flushing every `threshold` lines. A threshold of zero
    /// is treated as one, meaning every line is sent immediately.
    pub fn new(inner: DogStatsdClient, threshold: usize) -> Self {
        let threshold = threshold.max(1);
        BufferedDogStatsdClient {
            inner,
            buffer: Vec::with_capacity(threshold),
            threshold,
        }
    }

    /// Wrap a client using the default threshold.
    pub fn with_default_threshold(inner: DogStatsdClient) -> Self {
        Self::new(inner, Self::DEFAULT_THRESHOLD)
    }

    /// Number of lines currently waiting to be sent.
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Replace the settings of the wrapped client. Lines already buffered
    /// are sent using the new settings.
    pub fn set_config(&mut self, config: ClientConfig) {
        self.inner.set_config(config);
    }

    /// Send every buffered line as a single batch. Does nothing when the
    /// buffer is empty.
    ///
    /// The buffer is empty afterwards whether or not sending succeeded.
    pub fn flush(&mut self) -> MetricResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let batch = self.buffer.join("\n");
        let lines = self.buffer.len();
        self.buffer.clear();

        debug!("flushing {} buffered lines ({} bytes)", lines, batch.len());
        self.inner.send(&batch)?;
        Ok(())
    }

    /// Flush anything still buffered and consume the client.
    pub fn close(mut self) -> MetricResult<()> {
        self.flush()
    }
}

impl MetricBackend for BufferedDogStatsdClient {
    fn send<'a>(&mut self, line: &'a str) -> MetricResult<&'a str> {
        self.buffer.push(line.to_string());
        if self.buffer.len() >= self.threshold {
            self.flush()?;
        }

        Ok(line)
    }

    fn config(&self) -> &ClientConfig {
        self.inner.config()
    }
}

impl DogStatsd for BufferedDogStatsdClient {}

impl Drop for BufferedDogStatsdClient {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!("unable to flush buffered lines on drop: {}", e);
        }
    }
}
