//! Daily sales series and the date windows that scope every transform

use crate::error::{ForecastError, Result};
use chrono::{Days, Months, NaiveDate};
use std::collections::BTreeMap;

/// Inclusive `[begin, end]` range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    begin: NaiveDate,
    end: NaiveDate,
}

impl Window {
    /// Create a window, rejecting `begin > end`
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Result<Self> {
        if begin > end {
            return Err(ForecastError::DegenerateWindow { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// The forecast horizon `(now, for_date]`
    pub fn after(now: NaiveDate, for_date: NaiveDate) -> Result<Self> {
        Self::new(calendar::days_after(now, 1)?, for_date)
    }

    /// First day of the window
    pub fn begin(&self) -> NaiveDate {
        self.begin
    }

    /// Last day of the window
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included
    pub fn len_days(&self) -> usize {
        (self.end - self.begin).num_days() as usize + 1
    }

    /// Whether `date` lies inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.begin <= date && date <= self.end
    }

    /// Every day of the window in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.begin.iter_days().take(self.len_days())
    }
}

/// Calendar shifts used to derive windows from a reference date.
///
/// Month and year shifts clamp to the last day of the target month, so
/// 2020-02-29 minus one year is 2019-02-28.
pub mod calendar {
    use super::*;

    fn out_of_range(date: NaiveDate, shift: String) -> ForecastError {
        ForecastError::DateOutOfRange { date, shift }
    }

    pub fn days_before(date: NaiveDate, days: u64) -> Result<NaiveDate> {
        date.checked_sub_days(Days::new(days))
            .ok_or_else(|| out_of_range(date, format!("-{} days", days)))
    }

    pub fn days_after(date: NaiveDate, days: u64) -> Result<NaiveDate> {
        date.checked_add_days(Days::new(days))
            .ok_or_else(|| out_of_range(date, format!("+{} days", days)))
    }

    pub fn months_before(date: NaiveDate, months: u32) -> Result<NaiveDate> {
        date.checked_sub_months(Months::new(months))
            .ok_or_else(|| out_of_range(date, format!("-{} months", months)))
    }

    /// Same month and day, one year earlier
    pub fn year_ago(date: NaiveDate) -> Result<NaiveDate> {
        months_before(date, 12)
    }
}

/// Ordered date → quantity series.
///
/// A raw series straight from the data source may be sparse; a missing day
/// means nothing was sold. Transforms never mutate their input and always
/// return a new series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    points: BTreeMap<NaiveDate, f64>,
}

impl TimeSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from raw `(date, quantity)` rows.
    ///
    /// Rows that repeat a date are summed.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut series = Self::new();
        for (date, value) in points {
            *series.points.entry(date).or_insert(0.0) += value;
        }
        series
    }

    /// Set the value for a date, returning the previous one
    pub fn insert(&mut self, date: NaiveDate, value: f64) -> Option<f64> {
        self.points.insert(date, value)
    }

    /// Value recorded for a date, if any
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points.get(&date).copied()
    }

    /// Value recorded for a date, `0.0` when absent
    pub fn value_or_zero(&self, date: NaiveDate) -> f64 {
        self.get(date).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest date in the series
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.keys().next().copied()
    }

    /// Latest date in the series
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.keys().next_back().copied()
    }

    /// Iterate `(date, value)` pairs in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().map(|(date, value)| (*date, *value))
    }

    /// Dates in ascending order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.keys().copied().collect()
    }

    /// Values in ascending date order
    pub fn values(&self) -> Vec<f64> {
        self.points.values().copied().collect()
    }

    /// Entries that fall inside the window
    pub fn slice(&self, window: &Window) -> TimeSeries {
        TimeSeries {
            points: self
                .points
                .range(window.begin()..=window.end())
                .map(|(date, value)| (*date, *value))
                .collect(),
        }
    }

    /// Arithmetic mean of the recorded values, `0.0` when empty
    pub fn mean(&self) -> f64 {
        series_math::mean(&self.values())
    }

    /// Sum of the recorded values
    pub fn sum(&self) -> f64 {
        self.points.values().sum()
    }

    /// Apply `f` to every value, keeping the dates
    pub fn map<F>(&self, f: F) -> TimeSeries
    where
        F: Fn(f64) -> f64,
    {
        TimeSeries {
            points: self
                .points
                .iter()
                .map(|(date, value)| (*date, f(*value)))
                .collect(),
        }
    }

    /// Dense copy over the window: one entry per day, absent days as `0.0`
    pub fn materialize(&self, window: &Window) -> TimeSeries {
        TimeSeries {
            points: window
                .days()
                .map(|day| (day, self.value_or_zero(day)))
                .collect(),
        }
    }

    /// Dense copy over the window, looking each output day `d` up as `remap(d)`.
    ///
    /// The output stays indexed by the window's own days. Remapping with
    /// [`calendar::year_ago`] gives a series on this year's calendar holding
    /// last year's quantities.
    pub fn materialize_with<F>(&self, window: &Window, remap: F) -> Result<TimeSeries>
    where
        F: Fn(NaiveDate) -> Result<NaiveDate>,
    {
        let points = window
            .days()
            .map(|day| Ok((day, self.value_or_zero(remap(day)?))))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(TimeSeries { points })
    }

    /// Values of both series on the dates they share inside the window
    pub fn aligned_values(&self, other: &TimeSeries, window: &Window) -> (Vec<f64>, Vec<f64>) {
        self.points
            .range(window.begin()..=window.end())
            .filter_map(|(date, value)| other.get(*date).map(|theirs| (*value, theirs)))
            .unzip()
    }
}

impl FromIterator<(NaiveDate, f64)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_rejects_reversed_bounds() {
        let err = Window::new(date(2020, 1, 2), date(2020, 1, 1)).unwrap_err();
        assert!(matches!(err, ForecastError::DegenerateWindow { .. }));
    }

    #[test]
    fn test_window_after_excludes_now() {
        let window = Window::after(date(2020, 1, 26), date(2020, 2, 26)).unwrap();
        assert_eq!(window.begin(), date(2020, 1, 27));
        assert_eq!(window.len_days(), 31);
        assert!(Window::after(date(2020, 1, 26), date(2020, 1, 26)).is_err());
    }

    #[test]
    fn test_year_ago_clamps_leap_day() {
        assert_eq!(calendar::year_ago(date(2020, 2, 29)).unwrap(), date(2019, 2, 28));
        assert_eq!(
            calendar::months_before(date(2020, 3, 31), 1).unwrap(),
            date(2020, 2, 29)
        );
    }

    #[test]
    fn test_shift_past_calendar_range() {
        let err = calendar::days_before(date(2020, 1, 1), u64::MAX / 2).unwrap_err();
        assert!(matches!(err, ForecastError::DateOutOfRange { .. }));
        assert!(calendar::months_before(date(2020, 1, 1), u32::MAX).is_err());
        assert!(Window::after(NaiveDate::MAX, NaiveDate::MAX).is_err());
    }

    #[test]
    fn test_duplicate_rows_are_summed() {
        let series = TimeSeries::from_points(vec![
            (date(2020, 1, 1), 2.0),
            (date(2020, 1, 1), 3.0),
        ]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(date(2020, 1, 1)), Some(5.0));
    }

    #[test]
    fn test_mean_of_empty_series() {
        assert_eq!(TimeSeries::new().mean(), 0.0);
    }
}
