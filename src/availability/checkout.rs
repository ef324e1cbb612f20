use chrono::NaiveDate;

use super::AvailabilityError;
use crate::calendar::date_math::{add_days, add_months};

/// Days added for a trailing half month. Measured back from the month
/// boundary this spans fifteen inclusive days, the half-month threshold.
pub const HALF_MONTH_OFFSET_DAYS: u64 = 14;

pub fn is_valid_duration(duration_months: f64) -> bool {
    duration_months.is_finite()
        && duration_months >= 0.0
        && duration_months <= f64::from(i32::MAX)
        && (duration_months * 2.0).fract() == 0.0
}

/// Projects the check-out date for a stay of `duration_months` starting on
/// `check_in`. Durations must be non-negative multiples of 0.5.
pub fn project_checkout(check_in: NaiveDate, duration_months: f64) -> Result<NaiveDate, AvailabilityError> {
    if !is_valid_duration(duration_months) {
        return Err(AvailabilityError::InvalidDuration(duration_months));
    }

    let whole_months = duration_months.floor();
    let projected = add_months(check_in, whole_months as i32)?;

    if duration_months > whole_months {
        Ok(add_days(projected, HALF_MONTH_OFFSET_DAYS)?)
    } else {
        Ok(projected)
    }
}
