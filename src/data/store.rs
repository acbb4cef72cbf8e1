//! Last-known sample tracking per monitored role.

use std::collections::{BTreeMap, HashMap};

use super::Role;

/// The raw counter values captured in one observation.
pub type MetricValues = BTreeMap<String, f64>;

/// One recorded observation: the raw counters plus the wall-clock time
/// (unix milliseconds) at which the client observed them.
#[derive(Debug, Clone)]
pub struct Sample {
    pub timestamp_ms: u64,
    pub metrics: MetricValues,
}

/// Holds the most recent raw sample per role.
///
/// Exactly one sample is kept per role; `record` overwrites it
/// unconditionally. Entries are created lazily on the first observation and
/// never removed.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: HashMap<Role, Sample>,
}

impl SampleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored sample for `role`. Always succeeds.
    pub fn record(&mut self, role: Role, metrics: MetricValues, timestamp_ms: u64) {
        self.samples.insert(
            role,
            Sample {
                timestamp_ms,
                metrics,
            },
        );
    }

    /// Returns the previously recorded value and timestamp for a counter.
    ///
    /// `None` if the role has never been recorded, or if the recorded sample
    /// does not contain `counter` (a counter seen for the first time cannot
    /// anchor a rate).
    pub fn previous(&self, role: Role, counter: &str) -> Option<(f64, u64)> {
        let sample = self.samples.get(&role)?;
        let value = sample.metrics.get(counter)?;
        Some((*value, sample.timestamp_ms))
    }

    /// Returns the timestamp of the last sample for `role`, if any.
    pub fn last_seen(&self, role: Role) -> Option<u64> {
        self.samples.get(&role).map(|s| s.timestamp_ms)
    }
}
