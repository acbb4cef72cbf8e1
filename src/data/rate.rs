//! Counter-to-rate derivation.
//!
//! Converts two successive observations of a cumulative counter into a
//! per-second rate, using the wall-clock time the client observed each
//! sample. Anything that would make the rate undefined or negative (first
//! observation, duplicate timestamp, counter reset) resolves to `0.0` for
//! that cycle instead of propagating NaN or a negative value into a chart.

use tracing::warn;

use super::store::SampleStore;
use super::Role;

/// Derives per-second rates against the previous sample in a [`SampleStore`].
#[derive(Debug, Clone, Copy)]
pub struct RateCalculator<'a> {
    store: &'a SampleStore,
}

impl<'a> RateCalculator<'a> {
    /// Create a calculator reading previous samples from `store`.
    pub fn new(store: &'a SampleStore) -> Self {
        Self { store }
    }

    /// Returns the per-second rate of `counter` for `role`.
    ///
    /// The result is `0.0` when:
    /// - no prior sample exists for `(role, counter)` — the expected state on
    ///   first observation, not an error;
    /// - the time delta is zero or negative (duplicate sample or clock going
    ///   backwards);
    /// - the counter went backwards (process restart, overflow, or a scrape
    ///   race). The magnitude of the reset is not inferred; one sample is
    ///   dropped.
    pub fn rate(
        &self,
        role: Role,
        counter: &str,
        current_value: f64,
        current_timestamp_ms: u64,
    ) -> f64 {
        let Some((last_value, last_timestamp_ms)) = self.store.previous(role, counter) else {
            return 0.0;
        };

        let delta_ms = current_timestamp_ms as i64 - last_timestamp_ms as i64;
        if delta_ms <= 0 {
            warn!(
                role = %role,
                counter,
                delta_ms,
                "non-positive time delta between samples, rate forced to 0"
            );
            return 0.0;
        }

        if current_value < last_value {
            warn!(
                role = %role,
                counter,
                last_value,
                current_value,
                "counter went backwards (reset?), rate forced to 0"
            );
            return 0.0;
        }

        let delta_seconds = delta_ms as f64 / 1000.0;
        (current_value - last_value) / delta_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::MetricValues;

    fn store_with(counter: &str, value: f64, timestamp_ms: u64) -> SampleStore {
        let mut store = SampleStore::new();
        let mut metrics = MetricValues::new();
        metrics.insert(counter.to_string(), value);
        store.record(Role::Active, metrics, timestamp_ms);
        store
    }

    #[test]
    fn first_observation_yields_zero() {
        let store = SampleStore::new();
        let calc = RateCalculator::new(&store);
        let rate = calc.rate(Role::Active, "queries", 123.0, 1_000);
        assert_eq!(rate, 0.0);
        assert!(rate.is_finite());
    }

    #[test]
    fn steady_counter_yields_expected_rate() {
        let store = store_with("queries", 100.0, 0);
        let calc = RateCalculator::new(&store);
        assert_eq!(calc.rate(Role::Active, "queries", 150.0, 1_000), 50.0);
    }

    #[test]
    fn counter_reset_yields_zero_not_negative() {
        let store = store_with("queries", 1_000.0, 0);
        let calc = RateCalculator::new(&store);
        assert_eq!(calc.rate(Role::Active, "queries", 5.0, 3_000), 0.0);
    }

    #[test]
    fn zero_time_delta_yields_zero() {
        let store = store_with("queries", 100.0, 5_000);
        let calc = RateCalculator::new(&store);
        assert_eq!(calc.rate(Role::Active, "queries", 200.0, 5_000), 0.0);
    }

    #[test]
    fn negative_time_delta_yields_zero() {
        let store = store_with("queries", 100.0, 5_000);
        let calc = RateCalculator::new(&store);
        assert_eq!(calc.rate(Role::Active, "queries", 200.0, 4_000), 0.0);
    }

    #[test]
    fn unchanged_counter_yields_zero_rate() {
        let store = store_with("queries", 100.0, 0);
        let calc = RateCalculator::new(&store);
        assert_eq!(calc.rate(Role::Active, "queries", 100.0, 2_000), 0.0);
    }

    #[test]
    fn other_role_has_no_prior_sample() {
        let store = store_with("queries", 100.0, 0);
        let calc = RateCalculator::new(&store);
        assert_eq!(calc.rate(Role::Standby, "queries", 500.0, 1_000), 0.0);
    }

    #[test]
    fn fractional_intervals_divide_correctly() {
        let store = store_with("bytes", 0.0, 0);
        let calc = RateCalculator::new(&store);
        // 500ms elapsed, 10 units: 20 units/s
        assert_eq!(calc.rate(Role::Active, "bytes", 10.0, 500), 20.0);
    }
}
