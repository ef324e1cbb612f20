use chrono::NaiveDate;

use super::model::AvailabilityModel;

/// First date a room can be checked into, or `None` when the room has
/// neither an open-now flag nor a first-open date.
///
/// A first-open date that has already passed resolves to `today`.
pub fn resolve_earliest_bookable(model: &AvailabilityModel, today: NaiveDate) -> Option<NaiveDate> {
    if model.open_now {
        return Some(today);
    }

    model.first_open_date.map(|first_open| first_open.max(today))
}
