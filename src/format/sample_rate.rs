// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::types::{ErrorKind, MetricError};
use std::fmt;

/// Represents the sample rate of a metric: the probability, between 0.0
/// (exclusive) and 1.0 (inclusive), that any single observation is sent.
///
/// > A float between 0 and 1, inclusive. Only works with COUNT, HISTOGRAM,
/// > DISTRIBUTION, and TIMER metrics. The default is 1, which samples 100% of the
/// > time.
/// > - via [DataDog](https://docs.datadoghq.com/developers/dogstatsd/datagram_shell)
///
/// # Example
///
/// ```
/// use std::convert::TryFrom;
/// use dogstatsd_client::SampleRate;
///
/// let rate = SampleRate::try_from(0.25).unwrap();
/// assert_eq!("0.25", rate.to_string());
/// assert!(SampleRate::try_from(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRate {
    value: f64,
}

impl SampleRate {
    /// Every observation is sent and no `|@` annotation is written.
    pub const ALWAYS: SampleRate = SampleRate { value: 1.0 };

    const PRECISION: usize = 6;

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_always(&self) -> bool {
        self.value == 1.0
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        SampleRate::ALWAYS
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.*}", Self::PRECISION, self.value);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

        // Rates that round to 0 or 1 at fixed precision fall back to the full value
        if trimmed == "0" || (trimmed == "1" && !self.is_always()) {
            self.value.fmt(f)
        } else {
            trimmed.fmt(f)
        }
    }
}

impl TryFrom<f64> for SampleRate {
    type Error = MetricError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        if rate > 0.0 && rate <= 1.0 {
            Ok(SampleRate { value: rate })
        } else {
            Err(MetricError::from((
                ErrorKind::InvalidInput,
                "Sample rate must be between 0.0 and 1.0",
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SampleRate;
    use crate::types::ErrorKind;

    #[test]
    fn test_sample_rate_display_trims_zeros() {
        assert_eq!("0.5", SampleRate::try_from(0.5).unwrap().to_string());
        assert_eq!("0.1", SampleRate::try_from(0.1).unwrap().to_string());
        assert_eq!("1", SampleRate::ALWAYS.to_string());
    }

    #[test]
    fn test_sample_rate_display_rounding() {
        assert_eq!("0.018519", SampleRate::try_from(1.0 / 54.0).unwrap().to_string());
    }

    #[test]
    fn test_sample_rate_display_tiny() {
        let rate = SampleRate::try_from(0.0000001).unwrap();
        assert_eq!("0.0000001", rate.to_string());
    }

    #[test]
    fn test_sample_rate_display_nearly_one() {
        let rate = SampleRate::try_from(0.9999995).unwrap();
        assert!(!rate.is_always());
        assert_eq!("0.9999995", rate.to_string());
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        for bad in [0.0, -0.5, 1.0001, f64::NAN] {
            let res = SampleRate::try_from(bad);
            assert_eq!(ErrorKind::InvalidInput, res.unwrap_err().kind(), "rate: {}", bad);
        }
    }
}
