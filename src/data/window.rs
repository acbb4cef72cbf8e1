//! Fixed-width sliding windows backing time-series charts.

use std::collections::VecDeque;

/// A set of time-aligned series with a fixed number of points each.
///
/// Every series always holds exactly `capacity` points, oldest first. A push
/// advances all series by one point together, so the series of one chart can
/// never drift out of alignment. Windows start pre-filled so a chart renders
/// a full axis from the first tick.
#[derive(Debug, Clone)]
pub struct SlidingWindowSeries {
    series: Vec<VecDeque<f64>>,
    capacity: usize,
    fill: f64,
}

impl SlidingWindowSeries {
    /// Create `series_count` series of `capacity` points, pre-filled with
    /// `fill`.
    ///
    /// # Panics
    ///
    /// Panics if `series_count` or `capacity` is zero; both are fixed,
    /// compile-time-known chart parameters.
    pub fn new(series_count: usize, capacity: usize, fill: f64) -> Self {
        assert!(series_count > 0, "a chart needs at least one series");
        assert!(capacity > 0, "a window needs at least one point");
        let series = (0..series_count)
            .map(|_| {
                let mut window = VecDeque::with_capacity(capacity);
                window.resize(capacity, fill);
                window
            })
            .collect();
        Self {
            series,
            capacity,
            fill,
        }
    }

    /// Number of series in this window set.
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Fixed number of points per series.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Advance every series by one point.
    ///
    /// `values[i]` becomes the newest point of series `i`; the oldest point
    /// of each series is evicted. If fewer values than series are given, the
    /// remaining series receive `0.0` for this tick. Extra values are
    /// ignored.
    pub fn push(&mut self, values: &[f64]) {
        for (i, window) in self.series.iter_mut().enumerate() {
            let value = values.get(i).copied().unwrap_or(0.0);
            window.pop_front();
            window.push_back(value);
        }
    }

    /// Replace the whole window of series `index` with `values`.
    ///
    /// Used when the server supplies a complete pre-aggregated window rather
    /// than a single new point. The length invariant is preserved: if
    /// `values` is longer than the capacity only the newest points are kept;
    /// if shorter, the window is left-padded with the fill value.
    pub fn replace(&mut self, index: usize, values: &[f64]) {
        let Some(window) = self.series.get_mut(index) else {
            return;
        };

        window.clear();
        if values.len() >= self.capacity {
            window.extend(values[values.len() - self.capacity..].iter().copied());
        } else {
            window.resize(self.capacity - values.len(), self.fill);
            window.extend(values.iter().copied());
        }
    }

    /// Current contents of every series, oldest point first.
    pub fn snapshot(&self) -> Vec<Vec<f64>> {
        self.series.iter().map(|w| w.iter().copied().collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_starts_full_of_fill_value() {
        let window = SlidingWindowSeries::new(2, 4, 0.0);
        assert_eq!(window.snapshot(), vec![vec![0.0; 4], vec![0.0; 4]]);
    }

    #[test]
    fn push_evicts_oldest_and_appends_newest() {
        let mut window = SlidingWindowSeries::new(1, 5, 0.0);
        for v in 1..=6 {
            window.push(&[v as f64]);
            assert_eq!(window.snapshot()[0].len(), 5);
        }
        assert_eq!(window.snapshot()[0], vec![2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn multi_series_push_advances_all_series_together() {
        let mut window = SlidingWindowSeries::new(2, 3, 0.0);
        window.push(&[1.0, 10.0]);
        window.push(&[2.0, 20.0]);

        let snap = window.snapshot();
        assert_eq!(snap[0], vec![0.0, 1.0, 2.0]);
        assert_eq!(snap[1], vec![0.0, 10.0, 20.0]);
        assert_eq!(snap[0].len(), snap[1].len());
    }

    #[test]
    fn short_push_fills_missing_series_with_zero() {
        let mut window = SlidingWindowSeries::new(2, 3, 1.0);
        window.push(&[5.0]);

        let snap = window.snapshot();
        assert_eq!(snap[0], vec![1.0, 1.0, 5.0]);
        assert_eq!(snap[1], vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn replace_exact_length_round_trips() {
        let mut window = SlidingWindowSeries::new(1, 30, 0.0);
        let values: Vec<f64> = (0..30).map(|i| i as f64).collect();
        window.replace(0, &values);
        assert_eq!(window.snapshot()[0], values);
    }

    #[test]
    fn replace_longer_input_keeps_newest_points() {
        let mut window = SlidingWindowSeries::new(1, 3, 0.0);
        window.replace(0, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(window.snapshot()[0], vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn replace_shorter_input_left_pads_with_fill() {
        let mut window = SlidingWindowSeries::new(1, 4, 0.0);
        window.replace(0, &[7.0, 8.0]);
        assert_eq!(window.snapshot()[0], vec![0.0, 0.0, 7.0, 8.0]);
    }

    #[test]
    fn replace_out_of_range_series_is_ignored() {
        let mut window = SlidingWindowSeries::new(1, 3, 0.0);
        window.replace(5, &[1.0, 2.0, 3.0]);
        assert_eq!(window.snapshot()[0], vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn replace_only_touches_named_series() {
        let mut window = SlidingWindowSeries::new(2, 2, 0.0);
        window.push(&[1.0, 2.0]);
        window.replace(0, &[9.0, 9.0]);

        let snap = window.snapshot();
        assert_eq!(snap[0], vec![9.0, 9.0]);
        assert_eq!(snap[1], vec![0.0, 2.0]);
    }
}
