//! Sampler: one plausibility-checked reading per channel per tick.
//!
//! Wraps a [`TemperatureSource`] and turns every failure mode (read error,
//! NaN, out-of-band value) into an absent sample, so the alarm state
//! machine only ever sees trustworthy values or nothing.

use esc_common::sensor::source::TemperatureSource;
use esc_common::sensor::types::{Channel, PlausibleRange, Sample};
use tracing::trace;

/// Plausibility-filtering front of a temperature source.
pub struct Sampler {
    source: Box<dyn TemperatureSource>,
    band: PlausibleRange,
}

impl Sampler {
    /// Create a sampler over `source`, accepting readings inside `band`.
    pub fn new(source: Box<dyn TemperatureSource>, band: PlausibleRange) -> Self {
        Self { source, band }
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Accepted band.
    pub fn band(&self) -> PlausibleRange {
        self.band
    }

    /// Read one channel. Errors and implausible values yield `None`.
    pub fn sample(&mut self, channel: Channel) -> Sample {
        match self.source.read_temperature(channel) {
            Ok(value) => {
                let sample = self.band.accept(value);
                if sample.is_none() {
                    trace!("{channel}: discarding implausible reading {value}");
                }
                sample
            }
            Err(e) => {
                trace!("{channel}: {e}");
                None
            }
        }
    }

    /// Refresh the source and read channels `1..=count` in order.
    ///
    /// If the refresh fails every channel is absent for this tick.
    pub fn sample_all(&mut self, count: u16) -> Vec<Sample> {
        if let Err(e) = self.source.refresh() {
            trace!("{} refresh failed: {e}", self.source.name());
            return vec![None; usize::from(count)];
        }
        Channel::all(count).map(|ch| self.sample(ch)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_common::sensor::source::SampleError;
    use std::collections::HashMap;

    /// Source returning scripted raw values; missing channels are unavailable.
    struct ScriptedSource {
        values: HashMap<u16, f64>,
        fail_refresh: bool,
    }

    impl TemperatureSource for ScriptedSource {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn refresh(&mut self) -> Result<(), SampleError> {
            if self.fail_refresh {
                Err(SampleError::Io("link down".to_string()))
            } else {
                Ok(())
            }
        }

        fn read_temperature(&mut self, channel: Channel) -> Result<f64, SampleError> {
            self.values
                .get(&channel.index())
                .copied()
                .ok_or(SampleError::Unavailable(channel))
        }
    }

    fn sampler(values: &[(u16, f64)], fail_refresh: bool) -> Sampler {
        Sampler::new(
            Box::new(ScriptedSource {
                values: values.iter().copied().collect(),
                fail_refresh,
            }),
            PlausibleRange::default(),
        )
    }

    #[test]
    fn out_of_band_readings_become_absent() {
        let mut s = sampler(&[(1, 36.5), (2, 500.0), (3, -999.0), (4, f64::NAN)], false);
        assert_eq!(s.sample_all(5), vec![Some(36.5), None, None, None, None]);
    }

    #[test]
    fn failed_refresh_blanks_the_tick() {
        let mut s = sampler(&[(1, 36.5)], true);
        assert_eq!(s.sample_all(3), vec![None, None, None]);
    }

    #[test]
    fn source_name_is_exposed() {
        let s = sampler(&[], false);
        assert_eq!(s.source_name(), "scripted");
        assert_eq!(s.band(), PlausibleRange::default());
    }
}
