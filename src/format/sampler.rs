// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::sample_rate::SampleRate;
use super::MetricSample;
use log::trace;
use rand::Rng;

/// Thin out `samples` according to `rate` using the thread local RNG.
///
/// See [`sample_with`] for the exact rules.
pub fn sample(samples: Vec<MetricSample>, rate: SampleRate) -> Vec<MetricSample> {
    sample_with(samples, rate, &mut rand::thread_rng())
}

/// Thin out `samples` according to `rate` using the given RNG.
///
/// When the rate is 1 every sample is returned untouched. Otherwise each
/// sample is considered independently: a uniform value in `[0, 1)` is drawn
/// and the sample is kept, annotated with the rate, if the draw is less than
/// or equal to the rate.
pub fn sample_with<R>(samples: Vec<MetricSample>, rate: SampleRate, rng: &mut R) -> Vec<MetricSample>
where
    R: Rng,
{
    if rate.is_always() {
        return samples;
    }

    samples
        .into_iter()
        .filter_map(|s| {
            let draw: f64 = rng.gen();
            if draw <= rate.value() {
                Some(s.with_sample_rate(rate))
            } else {
                trace!("dropped sample of {} at rate {}", s.name(), rate);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{sample, sample_with};
    use crate::format::{MetricSample, SampleRate};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn new_samples(n: usize) -> Vec<MetricSample> {
        (0..n).map(|i| MetricSample::counter(format!("some.counter.{}", i), 1)).collect()
    }

    #[test]
    fn test_sample_always_returns_input_unchanged() {
        let samples = new_samples(10);
        let sampled = sample(samples.clone(), SampleRate::ALWAYS);

        assert_eq!(samples, sampled);
        assert!(sampled.iter().all(|s| s.sample_rate().is_none()));
    }

    #[test]
    fn test_sample_annotates_kept_samples() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let rate = SampleRate::try_from(0.5).unwrap();
        let sampled = sample_with(new_samples(100), rate, &mut rng);

        assert!(sampled.iter().all(|s| s.sample_rate() == Some(rate)));
    }

    #[test]
    fn test_sample_converges_to_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let rate = SampleRate::try_from(0.5).unwrap();
        let trials = 1000;

        let kept: usize = (0..trials)
            .map(|_| sample_with(new_samples(100), rate, &mut rng).len())
            .sum();
        let average = kept as f64 / trials as f64;

        assert!((average - 50.0).abs() < 1.0, "average kept was {}", average);
    }

    #[test]
    fn test_sample_empty_input() {
        let rate = SampleRate::try_from(0.1).unwrap();
        assert!(sample(Vec::new(), rate).is_empty());
    }
}
