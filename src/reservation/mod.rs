pub mod draft;
pub mod pricing;

use crate::availability::AvailabilityModel;

pub use draft::{GuestDetails, ReservationDraft, StaySource};
pub use pricing::{quote, PriceQuote};

#[derive(Debug, Clone, PartialEq)]
pub enum StayLengthIssue {
    BelowMinimum { minimum: f64, requested: f64 },
    AboveMaximum { maximum: f64, requested: f64 },
}

impl std::fmt::Display for StayLengthIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BelowMinimum { minimum, requested } => write!(
                f,
                "Stay of {} is shorter than the minimum of {}",
                format_months(*requested),
                format_months(*minimum)
            ),
            Self::AboveMaximum { maximum, requested } => write!(
                f,
                "Stay of {} is longer than the maximum of {}",
                format_months(*requested),
                format_months(*maximum)
            ),
        }
    }
}

/// Checks a requested stay length against the room's advertised limits.
/// The availability engine never enforces these itself.
pub fn stay_length_issue(model: &AvailabilityModel, requested: f64) -> Option<StayLengthIssue> {
    if let Some(minimum) = model.minimum_stay_months.filter(|minimum| requested < *minimum) {
        return Some(StayLengthIssue::BelowMinimum { minimum, requested });
    }
    if let Some(maximum) = model.maximum_stay_months.filter(|maximum| requested > *maximum) {
        return Some(StayLengthIssue::AboveMaximum { maximum, requested });
    }
    None
}

pub fn format_months(months: f64) -> String {
    let amount = if months.fract() == 0.0 {
        format!("{:.0}", months)
    } else {
        format!("{:.1}", months)
    };
    let unit = if months == 1.0 { "month" } else { "months" };
    format!("{} {}", amount, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stay_within_limits_has_no_issue() {
        let model = AvailabilityModel::open_now()
            .with_minimum_stay(3.0)
            .with_maximum_stay(12.0);

        assert_eq!(stay_length_issue(&model, 3.0), None);
        assert_eq!(stay_length_issue(&model, 12.0), None);
    }

    #[test]
    fn short_stay_is_below_minimum() {
        let model = AvailabilityModel::open_now().with_minimum_stay(3.0);

        assert_eq!(
            stay_length_issue(&model, 2.5),
            Some(StayLengthIssue::BelowMinimum { minimum: 3.0, requested: 2.5 })
        );
    }

    #[test]
    fn long_stay_is_above_maximum() {
        let model = AvailabilityModel::open_now().with_maximum_stay(6.0);

        let issue = stay_length_issue(&model, 6.5).unwrap();

        assert_eq!(issue, StayLengthIssue::AboveMaximum { maximum: 6.0, requested: 6.5 });
        assert_eq!(issue.to_string(), "Stay of 6.5 months is longer than the maximum of 6 months");
    }

    #[test]
    fn unlimited_room_accepts_any_length() {
        assert_eq!(stay_length_issue(&AvailabilityModel::open_now(), 48.0), None);
    }

    #[test]
    fn formats_whole_and_half_months() {
        assert_eq!(format_months(1.0), "1 month");
        assert_eq!(format_months(0.5), "0.5 months");
        assert_eq!(format_months(3.0), "3 months");
        assert_eq!(format_months(1.5), "1.5 months");
    }
}
