use chrono::NaiveDate;

use super::AvailabilityError;
use crate::calendar::date_math::{add_months, day_count};

/// Longest closing segment, in inclusive days, that counts as half a month.
pub const HALF_MONTH_THRESHOLD_DAYS: i64 = 15;

pub const DEFAULT_STAY_MONTHS: f64 = 1.0;

/// Converts a check-in/check-out pair into decimal months with half-month
/// granularity.
///
/// Whole calendar months are counted from the check-in. The closing segment,
/// which includes the month boundary day itself, adds half a month when it
/// spans at most fifteen days and a full month otherwise. The result never
/// drops below `minimum_stay_months`.
///
/// Boundaries are always `check_in + n months` rather than chained from the
/// previous boundary, and a check-out on a boundary day closes that month, so
/// June 1 to July 1 is exactly one month.
///
/// A missing or reversed pair yields the minimum stay, or one month when the
/// room has none.
pub fn resolve_duration(
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    minimum_stay_months: Option<f64>,
) -> Result<f64, AvailabilityError> {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return Ok(minimum_stay_months.unwrap_or(DEFAULT_STAY_MONTHS));
    };
    if check_out < check_in {
        return Ok(minimum_stay_months.unwrap_or(DEFAULT_STAY_MONTHS));
    }

    let mut months = 0.0;
    let mut cursor = check_in;
    let mut elapsed = 0;

    loop {
        let next_boundary = add_months(check_in, elapsed + 1)?;

        if check_out <= next_boundary {
            let segment_days = day_count(cursor, check_out);
            months += if segment_days <= HALF_MONTH_THRESHOLD_DAYS { 0.5 } else { 1.0 };
            break;
        }

        months += 1.0;
        elapsed += 1;
        cursor = next_boundary;
    }

    let measured = f64::max(months, 0.5);
    Ok(minimum_stay_months.map_or(measured, |minimum| minimum.max(measured)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::checkout::project_checkout;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn resolve(check_in: NaiveDate, check_out: NaiveDate) -> f64 {
        resolve_duration(Some(check_in), Some(check_out), None).unwrap()
    }

    #[test]
    fn sixteen_days_is_a_full_month() {
        assert_eq!(resolve(date(2024, 6, 1), date(2024, 6, 16)), 1.0);
    }

    #[test]
    fn fifteen_days_is_half_a_month() {
        assert_eq!(resolve(date(2024, 6, 1), date(2024, 6, 15)), 0.5);
    }

    #[test]
    fn same_day_stay_is_half_a_month() {
        assert_eq!(resolve(date(2024, 6, 1), date(2024, 6, 1)), 0.5);
    }

    #[test]
    fn boundary_day_closes_the_month() {
        assert_eq!(resolve(date(2024, 6, 1), date(2024, 7, 1)), 1.0);
        assert_eq!(resolve(date(2024, 6, 1), date(2024, 9, 1)), 3.0);
    }

    #[test]
    fn partial_trailing_segment_rounds_to_half_or_whole() {
        assert_eq!(resolve(date(2024, 6, 1), date(2024, 7, 15)), 1.5);
        assert_eq!(resolve(date(2024, 6, 1), date(2024, 7, 16)), 2.0);
        assert_eq!(resolve(date(2024, 6, 10), date(2024, 8, 24)), 2.5);
    }

    #[test]
    fn months_are_counted_from_check_in() {
        // Jan 31 + 2 months is Mar 31, not Feb 29 + 1 month.
        assert_eq!(resolve(date(2024, 1, 31), date(2024, 3, 31)), 2.0);
        assert_eq!(resolve(date(2024, 1, 31), date(2024, 2, 29)), 1.0);
    }

    #[test]
    fn minimum_stay_clamps_result() {
        let months = resolve_duration(Some(date(2024, 6, 1)), Some(date(2024, 6, 10)), Some(3.0)).unwrap();

        assert_eq!(months, 3.0);
    }

    #[test]
    fn longer_stay_is_not_clamped_down() {
        let months = resolve_duration(Some(date(2024, 6, 1)), Some(date(2024, 12, 1)), Some(3.0)).unwrap();

        assert_eq!(months, 6.0);
    }

    #[test]
    fn missing_or_reversed_dates_fall_back_to_minimum_stay() {
        assert_eq!(resolve_duration(None, Some(date(2024, 6, 1)), Some(2.0)).unwrap(), 2.0);
        assert_eq!(resolve_duration(Some(date(2024, 6, 1)), None, None).unwrap(), 1.0);
        assert_eq!(
            resolve_duration(Some(date(2024, 6, 10)), Some(date(2024, 6, 1)), None).unwrap(),
            1.0
        );
    }

    proptest! {
        #[test]
        fn duration_is_positive_multiple_of_half(
            start in 0i64..3000,
            length in 0i64..1500,
        ) {
            let check_in = date(2022, 1, 1) + chrono::TimeDelta::days(start);
            let check_out = check_in + chrono::TimeDelta::days(length);

            let months = resolve(check_in, check_out);

            prop_assert!(months >= 0.5);
            prop_assert_eq!((months * 2.0).fract(), 0.0);
        }

        #[test]
        fn projected_checkout_measures_back_within_half_month(
            start in 0i64..3000,
            halves in 1u32..120,
        ) {
            let check_in = date(2022, 1, 1) + chrono::TimeDelta::days(start);
            let duration = f64::from(halves) / 2.0;
            let check_out = project_checkout(check_in, duration).unwrap();

            let months = resolve(check_in, check_out);

            prop_assert!(months >= duration - 0.5);
            prop_assert!(months <= duration);
        }
    }
}
