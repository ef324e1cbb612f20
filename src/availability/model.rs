use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive-inclusive date interval during which a room cannot be occupied.
///
/// A range whose `end` precedes its `start` is malformed and never blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BlockedRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_malformed(&self) -> bool {
        self.end < self.start
    }

    /// Single-date test, inclusive on both bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        !self.is_malformed() && self.start <= date && date <= self.end
    }

    /// Stay overlap test. Touching a boundary (check-out on the first blocked
    /// day, or check-in on the last one) does not count.
    pub fn overlaps_stay(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        !self.is_malformed() && check_in < self.end && check_out > self.start
    }

    /// Month coverage test: any shared day at all counts.
    pub fn touches(&self, period_start: NaiveDate, period_end: NaiveDate) -> bool {
        !self.is_malformed() && self.start <= period_end && self.end >= period_start
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityModel {
    pub open_now: bool,
    pub first_open_date: Option<NaiveDate>,
    pub minimum_stay_months: Option<f64>,
    /// Advisory only; see `reservation::stay_length_issue`.
    pub maximum_stay_months: Option<f64>,
    pub blocked_ranges: Vec<BlockedRange>,
}

impl AvailabilityModel {
    pub fn open_now() -> Self {
        Self {
            open_now: true,
            ..Self::default()
        }
    }

    pub fn open_from(date: NaiveDate) -> Self {
        Self {
            first_open_date: Some(date),
            ..Self::default()
        }
    }

    pub fn with_minimum_stay(mut self, months: f64) -> Self {
        self.minimum_stay_months = Some(months);
        self
    }

    pub fn with_maximum_stay(mut self, months: f64) -> Self {
        self.maximum_stay_months = Some(months);
        self
    }

    pub fn with_blocked_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.blocked_ranges.push(BlockedRange::new(start, end));
        self
    }

    pub fn is_blocked_on(&self, date: NaiveDate) -> bool {
        self.blocked_ranges.iter().any(|range| range.contains(date))
    }

    pub fn is_stay_blocked(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.blocked_ranges
            .iter()
            .any(|range| range.overlaps_stay(check_in, check_out))
    }

    pub fn is_period_touched(&self, period_start: NaiveDate, period_end: NaiveDate) -> bool {
        self.blocked_ranges
            .iter()
            .any(|range| range.touches(period_start, period_end))
    }
}

/// A requested or proposed booking. At most one of `check_out` and
/// `duration_months` is the source of truth; the other is derived from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StayWindow {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub duration_months: Option<f64>,
}

impl StayWindow {
    pub fn new(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> Self {
        Self {
            check_in,
            check_out,
            duration_months: None,
        }
    }

    pub fn starting(check_in: NaiveDate) -> Self {
        Self::new(Some(check_in), None)
    }

    pub fn between(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self::new(Some(check_in), Some(check_out))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCell {
    pub year: i32,
    /// Zero-based, 0 = January.
    pub month_index: u32,
    pub is_selectable: bool,
}
