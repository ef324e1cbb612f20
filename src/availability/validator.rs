use chrono::NaiveDate;

use super::earliest::resolve_earliest_bookable;
use super::model::{AvailabilityModel, StayWindow};
use crate::calendar::date_math::is_before;

/// Whether a room can satisfy the requested stay window.
///
/// A window without a check-in is unconstrained and always matches. A room
/// with unknown availability never matches a dated request. A check-in alone
/// is rejected when it lands on a blocked day (inclusive bounds); a full
/// window is rejected when it truly overlaps a blocked range, where sharing
/// only a boundary day does not count.
pub fn matches(model: &AvailabilityModel, window: &StayWindow, today: NaiveDate) -> bool {
    let earliest = resolve_earliest_bookable(model, today);

    let Some(check_in) = window.check_in else {
        return true;
    };

    let Some(earliest) = earliest else {
        tracing::debug!("No resolvable earliest date; rejecting check-in {}", check_in);
        return false;
    };

    if is_before(check_in, earliest) {
        tracing::debug!("Check-in {} precedes earliest bookable date {}", check_in, earliest);
        return false;
    }

    match window.check_out {
        None => !model.is_blocked_on(check_in),
        Some(check_out) if is_before(check_out, check_in) => {
            tracing::debug!("Check-out {} precedes check-in {}", check_out, check_in);
            false
        }
        Some(check_out) => !model.is_stay_blocked(check_in, check_out),
    }
}
