use chrono::{Datelike, NaiveDate};

use super::AvailabilityError;
use super::earliest::resolve_earliest_bookable;
use super::model::{AvailabilityModel, MonthCell};
use crate::calendar::DateError;
use crate::calendar::date_math::{add_months, end_of_month, start_of_month};

pub const DEFAULT_YEARS_TO_SHOW: u32 = 2;

/// Month-by-month availability for calendar browsing, starting at the month
/// of the earliest bookable date (or today's month when that is unknown).
///
/// Months are judged coarsely: any blocked day inside a month disqualifies
/// the whole month. A room with unknown availability has no selectable months.
pub fn build_month_grid(
    model: &AvailabilityModel,
    today: NaiveDate,
    years_to_show: u32,
) -> Result<Vec<MonthCell>, AvailabilityError> {
    let earliest = resolve_earliest_bookable(model, today);
    let first_month = start_of_month(earliest.unwrap_or(today));
    let month_count = years_to_show.saturating_mul(12);

    // Reject ranges past the calendar before producing any cells.
    let last_offset = i32::try_from(month_count.saturating_sub(1))
        .map_err(|_| DateError::InvalidDate(format!("{} + {} months", first_month, month_count)))?;
    add_months(first_month, last_offset)?;

    tracing::debug!(
        "Building {} month cells from {} (earliest bookable: {:?})",
        month_count,
        first_month,
        earliest
    );

    (0..month_count)
        .map(|offset| -> Result<MonthCell, AvailabilityError> {
            let month_start = add_months(first_month, offset as i32)?;
            let month_end = end_of_month(month_start);

            let opens_in_time = earliest.is_some_and(|earliest| month_end >= earliest);
            let is_selectable = opens_in_time && !model.is_period_touched(month_start, month_end);

            Ok(MonthCell {
                year: month_start.year(),
                month_index: month_start.month0(),
                is_selectable,
            })
        })
        .collect()
}

/// Proposed check-in when a month cell is picked: the first of the month, or
/// the earliest bookable date if that falls later. `None` for cells that are
/// not selectable.
pub fn select_month(cell: &MonthCell, model: &AvailabilityModel, today: NaiveDate) -> Option<NaiveDate> {
    if !cell.is_selectable {
        return None;
    }

    let earliest = resolve_earliest_bookable(model, today)?;
    let month_start = cell.first_day()?;
    Some(month_start.max(earliest))
}

impl MonthCell {
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month_index + 1, 1)
    }
}
