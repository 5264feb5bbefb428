//! Year stepping and in-between values for animated playback.

use std::time::Duration;

use crate::models::TimeSeriesData;

/// Values from `start` towards `end` in steps of `step`, at most `max_len` long.
///
/// Both ends are included when the step lands on `end`. A zero step yields
/// just `start`.
pub fn year_range(start: i32, end: i32, max_len: usize, step: u32) -> Vec<i32> {
    if max_len == 0 {
        return Vec::new();
    }
    if step == 0 {
        return vec![start];
    }

    let span = (i64::from(end) - i64::from(start)).unsigned_abs();
    let count = (span / u64::from(step) + 1).min(max_len as u64);
    let signed_step = if end < start {
        -i64::from(step)
    } else {
        i64::from(step)
    };

    (0..count as i64)
        .map(|i| (i64::from(start) + i * signed_step) as i32)
        .collect()
}

/// Linear value between `start` and `end` after `elapsed` of `interval`.
///
/// Not clamped: elapsed times past the interval extrapolate.
pub fn interpolate_by_elapsed(elapsed: Duration, interval: Duration, start: f64, end: f64) -> f64 {
    if interval.is_zero() {
        return end;
    }
    let ratio = elapsed.as_secs_f64() / interval.as_secs_f64();
    start + (end - start) * ratio
}

/// Walks a time series one year per `frame` of animation time.
pub struct Playback<'a> {
    data: &'a TimeSeriesData,
    region_prefix: String,
    frame: Duration,
}

impl<'a> Playback<'a> {
    pub fn new(
        data: &'a TimeSeriesData,
        region_prefix: impl Into<String>,
        frame: Duration,
    ) -> Self {
        Self {
            data,
            region_prefix: region_prefix.into(),
            frame,
        }
    }

    /// Years shown, in order.
    pub fn years(&self) -> Vec<i32> {
        let meta = &self.data.meta;
        if meta.max_year < meta.min_year {
            return Vec::new();
        }
        year_range(meta.min_year, meta.max_year, usize::MAX, 1)
    }

    pub fn duration(&self) -> Duration {
        self.frame.saturating_mul(self.last_index())
    }

    /// Year on screen at `elapsed` (clamped to the last year).
    pub fn year_at(&self, elapsed: Duration) -> i32 {
        let (index, _) = self.position(elapsed);
        self.year_of(index)
    }

    /// Metric of the feature `natcode` at `elapsed` into the animation.
    ///
    /// Between two years with data the value moves linearly; when the next
    /// year has no value the current one is held.
    pub fn value_at(&self, natcode: &str, elapsed: Duration) -> Option<f64> {
        let (index, within) = self.position(elapsed);
        let year = self.year_of(index);
        let current = self
            .data
            .value_for_natcode(&self.region_prefix, natcode, year)?;

        if year >= self.data.meta.max_year {
            return Some(current);
        }
        match self
            .data
            .value_for_natcode(&self.region_prefix, natcode, year + 1)
        {
            Some(next) => Some(interpolate_by_elapsed(within, self.frame, current, next)),
            None => Some(current),
        }
    }

    /// Index of the last year; 0 for an empty or single-year series.
    fn last_index(&self) -> u32 {
        let meta = &self.data.meta;
        let span = i64::from(meta.max_year) - i64::from(meta.min_year);
        span.clamp(0, i64::from(u32::MAX)) as u32
    }

    fn year_of(&self, index: u32) -> i32 {
        (i64::from(self.data.meta.min_year) + i64::from(index)) as i32
    }

    /// Year index and time spent inside that year's frame.
    fn position(&self, elapsed: Duration) -> (u32, Duration) {
        let last = self.last_index();
        if self.frame.is_zero() {
            return (last, Duration::ZERO);
        }

        let index = elapsed.as_nanos() / self.frame.as_nanos();
        if index >= u128::from(last) {
            return (last, Duration::ZERO);
        }
        let index = index as u32;
        let within = elapsed.saturating_sub(self.frame * index);
        (index, within)
    }
}
