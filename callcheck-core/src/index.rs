//! Trading-day index over a sparse price series.
//!
//! Maps arbitrary calendar dates (weekends, holidays, dates past the last
//! close) onto the first trading day on or after them. ISO dates parse into
//! `NaiveDate`, so ordering is chronological.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;

/// Ascending, strictly increasing trading days of one series.
///
/// Rebuilt from the series on every read; never cached across renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortedDates(Vec<NaiveDate>);

impl SortedDates {
    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NaiveDate> {
        self.0.get(index).copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.0.last().copied()
    }
}

/// Sorted trading days of `series`. Empty input yields an empty list.
pub fn sorted_dates(series: &PriceSeries) -> SortedDates {
    let mut dates: Vec<NaiveDate> = series.dates().collect();
    dates.sort_unstable();
    dates.dedup();
    SortedDates(dates)
}

/// Smallest index `i` with `sorted[i] >= target`, or `None` when the target
/// is after the last trading day (or the list is empty).
pub fn first_on_or_after(sorted: &SortedDates, target: NaiveDate) -> Option<usize> {
    let i = sorted.0.partition_point(|d| *d < target);
    (i < sorted.0.len()).then_some(i)
}

/// The trading day an event date resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDay {
    pub index: usize,
    pub date: NaiveDate,
    pub price: f64,
}

/// Outcome of aligning one requested date against one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub requested: NaiveDate,
    pub resolved: Option<ResolvedDay>,
}

impl AlignmentResult {
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    pub fn resolved_date(&self) -> Option<NaiveDate> {
        self.resolved.map(|r| r.date)
    }

    pub fn resolved_price(&self) -> Option<f64> {
        self.resolved.map(|r| r.price)
    }

    /// True when the event fell on a non-trading day and was moved forward.
    pub fn is_shifted(&self) -> bool {
        matches!(self.resolved, Some(r) if r.date != self.requested)
    }
}

/// Resolve `target` to its first trading day on or after it.
///
/// This is the single resolution shared by returns, verdicts and chart
/// annotations, so all three agree on which day was used.
pub fn align(series: &PriceSeries, sorted: &SortedDates, target: NaiveDate) -> AlignmentResult {
    let resolved = first_on_or_after(sorted, target).and_then(|index| {
        let date = sorted.0[index];
        series.get(date).map(|price| ResolvedDay { index, date, price })
    });
    AlignmentResult {
        requested: target,
        resolved,
    }
}
