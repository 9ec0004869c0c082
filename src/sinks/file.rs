// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::sinks::core::MetricSink;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Implementation of a `MetricSink` that appends every line, followed by a
/// newline, to a file.
///
/// The file is created if it doesn't exist, opened for each call to
/// `.emit()`, and closed again before returning. Useful for local
/// debugging or for handing metrics off to a separate shipper.
#[derive(Debug, Clone)]
pub struct FileMetricSink {
    path: PathBuf,
}

impl FileMetricSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileMetricSink {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetricSink for FileMetricSink {
    fn emit(&self, metric: &str) -> io::Result<usize> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(metric.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(metric.len() + 1)
    }
}
