use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::checkout::is_valid_duration;
use crate::availability::{
    project_checkout, resolve_duration, resolve_earliest_bookable, AvailabilityError, StayWindow,
};
use crate::catalog::Room;

/// Which of check-out and duration the guest entered last. The other one is
/// derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaySource {
    Duration,
    CheckOut,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub id: Uuid,
    pub room_id: u64,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub duration_months: Option<f64>,
    pub source: StaySource,
    pub minimum_stay_months: Option<f64>,
    pub guest: GuestDetails,
    pub created_at: DateTime<Utc>,
}

impl ReservationDraft {
    pub fn new(room_id: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id,
            check_in: None,
            check_out: None,
            duration_months: None,
            source: StaySource::Duration,
            minimum_stay_months: None,
            guest: GuestDetails::default(),
            created_at: Utc::now(),
        }
    }

    /// Starts a draft at the room's earliest bookable date (today when that
    /// is unknown) for the room's minimum stay, rounded up to a half month.
    pub fn for_room(room: &Room, today: NaiveDate, default_minimum_stay: f64) -> Result<Self, AvailabilityError> {
        let availability = &room.availability;
        let check_in = resolve_earliest_bookable(availability, today).unwrap_or(today);
        let minimum = availability.minimum_stay_months.unwrap_or(default_minimum_stay);

        let mut draft = Self::new(room.id);
        draft.minimum_stay_months = availability.minimum_stay_months;
        draft.check_in = Some(check_in);
        draft.set_duration(round_up_to_half(minimum))?;
        Ok(draft)
    }

    pub fn window(&self) -> StayWindow {
        StayWindow {
            check_in: self.check_in,
            check_out: self.check_out,
            duration_months: self.duration_months,
        }
    }

    /// Moves the check-in. An authoritative check-out that would now fall
    /// before it is dropped, and the stay is re-projected from the last
    /// known duration instead.
    pub fn set_check_in(&mut self, check_in: NaiveDate) -> Result<(), AvailabilityError> {
        let mut updated = self.clone();
        updated.check_in = Some(check_in);
        if updated.source == StaySource::CheckOut
            && updated.check_out.is_some_and(|check_out| check_out < check_in)
        {
            tracing::debug!("Dropping check-out {:?} before new check-in {}", updated.check_out, check_in);
            updated.check_out = None;
            updated.source = StaySource::Duration;
        }
        updated.resync()?;
        *self = updated;
        Ok(())
    }

    /// Makes the duration authoritative and re-derives the check-out. The
    /// draft is left untouched when the duration is not a multiple of 0.5.
    pub fn set_duration(&mut self, duration_months: f64) -> Result<(), AvailabilityError> {
        if !is_valid_duration(duration_months) {
            return Err(AvailabilityError::InvalidDuration(duration_months));
        }

        let mut updated = self.clone();
        updated.duration_months = Some(duration_months);
        updated.source = StaySource::Duration;
        updated.resync()?;
        *self = updated;
        Ok(())
    }

    /// Makes the check-out authoritative and re-derives the duration. A
    /// check-out before the current check-in is rejected and the draft is
    /// left untouched.
    pub fn set_check_out(&mut self, check_out: NaiveDate) -> Result<(), AvailabilityError> {
        if let Some(check_in) = self.check_in.filter(|check_in| check_out < *check_in) {
            return Err(AvailabilityError::CheckOutBeforeCheckIn { check_in, check_out });
        }

        let mut updated = self.clone();
        updated.check_out = Some(check_out);
        updated.source = StaySource::CheckOut;
        updated.resync()?;
        *self = updated;
        Ok(())
    }

    fn resync(&mut self) -> Result<(), AvailabilityError> {
        match self.source {
            StaySource::Duration => {
                if let (Some(check_in), Some(months)) = (self.check_in, self.duration_months) {
                    self.check_out = Some(project_checkout(check_in, months)?);
                }
            }
            StaySource::CheckOut => {
                if self.check_out.is_some() {
                    self.duration_months = Some(resolve_duration(
                        self.check_in,
                        self.check_out,
                        self.minimum_stay_months,
                    )?);
                }
            }
        }
        Ok(())
    }
}

fn round_up_to_half(months: f64) -> f64 {
    if months.is_finite() && months > 0.0 {
        (months * 2.0).ceil() / 2.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityModel;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn room(availability: AvailabilityModel) -> Room {
        Room {
            id: 9,
            title: "Room with balcony".to_string(),
            city: "Valencia".to_string(),
            monthly_price: 500.0,
            currency_symbol: "€".to_string(),
            currency_code: "EUR".to_string(),
            lat: None,
            lng: None,
            property_type_name: None,
            room_type_name: None,
            is_verified: true,
            availability,
        }
    }

    #[test]
    fn duration_drives_check_out() {
        let mut draft = ReservationDraft::new(1);
        draft.set_check_in(date(2024, 6, 1)).unwrap();

        draft.set_duration(1.5).unwrap();

        assert_eq!(draft.check_out, Some(date(2024, 7, 15)));
        assert_eq!(draft.source, StaySource::Duration);
    }

    #[test]
    fn check_out_drives_duration() {
        let mut draft = ReservationDraft::new(1);
        draft.set_check_in(date(2024, 6, 1)).unwrap();

        draft.set_check_out(date(2024, 8, 10)).unwrap();

        assert_eq!(draft.duration_months, Some(2.5));
        assert_eq!(draft.source, StaySource::CheckOut);
    }

    #[test]
    fn moving_check_in_keeps_authoritative_duration() {
        let mut draft = ReservationDraft::new(1);
        draft.set_check_in(date(2024, 6, 1)).unwrap();
        draft.set_duration(2.0).unwrap();

        draft.set_check_in(date(2024, 6, 20)).unwrap();

        assert_eq!(draft.duration_months, Some(2.0));
        assert_eq!(draft.check_out, Some(date(2024, 8, 20)));
    }

    #[test]
    fn moving_check_in_keeps_authoritative_check_out() {
        let mut draft = ReservationDraft::new(1);
        draft.set_check_in(date(2024, 6, 1)).unwrap();
        draft.set_check_out(date(2024, 9, 1)).unwrap();

        draft.set_check_in(date(2024, 8, 20)).unwrap();

        assert_eq!(draft.check_out, Some(date(2024, 9, 1)));
        assert_eq!(draft.duration_months, Some(0.5));
    }

    #[test]
    fn check_in_past_check_out_falls_back_to_duration() {
        let mut draft = ReservationDraft::new(1);
        draft.set_check_in(date(2024, 6, 1)).unwrap();
        draft.set_check_out(date(2024, 9, 1)).unwrap();

        draft.set_check_in(date(2024, 10, 15)).unwrap();

        assert_eq!(draft.source, StaySource::Duration);
        assert_eq!(draft.duration_months, Some(3.0));
        assert_eq!(draft.check_out, Some(date(2025, 1, 15)));
    }

    #[test]
    fn check_in_on_check_out_day_keeps_check_out() {
        let mut draft = ReservationDraft::new(1);
        draft.set_check_in(date(2024, 6, 1)).unwrap();
        draft.set_check_out(date(2024, 9, 1)).unwrap();

        draft.set_check_in(date(2024, 9, 1)).unwrap();

        assert_eq!(draft.source, StaySource::CheckOut);
        assert_eq!(draft.check_out, Some(date(2024, 9, 1)));
    }

    #[test]
    fn check_out_before_check_in_is_rejected() {
        let mut draft = ReservationDraft::new(1);
        draft.set_check_in(date(2024, 6, 1)).unwrap();
        draft.set_duration(2.0).unwrap();
        let before = draft.clone();

        let result = draft.set_check_out(date(2024, 5, 1));

        assert_eq!(
            result,
            Err(AvailabilityError::CheckOutBeforeCheckIn {
                check_in: date(2024, 6, 1),
                check_out: date(2024, 5, 1),
            })
        );
        assert_eq!(draft, before);
    }

    #[test]
    fn check_out_never_precedes_check_in() {
        let mut draft = ReservationDraft::new(1);
        draft.set_duration(1.0).unwrap();
        let steps = [
            (date(2024, 6, 1), None),
            (date(2024, 6, 1), Some(date(2024, 9, 1))),
            (date(2024, 10, 15), None),
            (date(2024, 3, 1), Some(date(2024, 4, 20))),
            (date(2024, 12, 1), None),
        ];

        for (check_in, check_out) in steps {
            draft.set_check_in(check_in).unwrap();
            if let Some(check_out) = check_out {
                draft.set_check_out(check_out).unwrap();
            }
            assert!(draft.check_out.unwrap() >= draft.check_in.unwrap());
        }
    }

    #[test]
    fn invalid_duration_leaves_draft_unchanged() {
        let mut draft = ReservationDraft::new(1);
        draft.set_check_in(date(2024, 6, 1)).unwrap();
        draft.set_duration(2.0).unwrap();
        let before = draft.clone();

        let result = draft.set_duration(2.2);

        assert_eq!(result, Err(AvailabilityError::InvalidDuration(2.2)));
        assert_eq!(draft, before);
    }

    #[test]
    fn duration_without_check_in_waits_for_check_in() {
        let mut draft = ReservationDraft::new(1);
        draft.set_duration(3.0).unwrap();

        assert_eq!(draft.check_out, None);

        draft.set_check_in(date(2024, 6, 1)).unwrap();
        assert_eq!(draft.check_out, Some(date(2024, 9, 1)));
    }

    #[test]
    fn check_out_respects_room_minimum_stay() {
        let room = room(AvailabilityModel::open_now().with_minimum_stay(3.0));
        let mut draft = ReservationDraft::for_room(&room, date(2024, 6, 10), 1.0).unwrap();

        draft.set_check_out(date(2024, 7, 10)).unwrap();

        assert_eq!(draft.duration_months, Some(3.0));
    }

    #[test]
    fn draft_for_room_starts_at_earliest_bookable_date() {
        let room = room(AvailabilityModel::open_from(date(2024, 9, 1)).with_minimum_stay(2.0));

        let draft = ReservationDraft::for_room(&room, date(2024, 6, 10), 1.0).unwrap();

        assert_eq!(draft.room_id, 9);
        assert_eq!(draft.check_in, Some(date(2024, 9, 1)));
        assert_eq!(draft.duration_months, Some(2.0));
        assert_eq!(draft.check_out, Some(date(2024, 11, 1)));
    }

    #[test]
    fn draft_for_unknown_room_starts_today_with_default_stay() {
        let room = room(AvailabilityModel::default());

        let draft = ReservationDraft::for_room(&room, date(2024, 6, 10), 1.0).unwrap();

        assert_eq!(draft.check_in, Some(date(2024, 6, 10)));
        assert_eq!(draft.duration_months, Some(1.0));
        assert_eq!(draft.check_out, Some(date(2024, 7, 10)));
    }

    #[test]
    fn odd_minimum_stay_rounds_up_to_half_month() {
        let room = room(AvailabilityModel::open_now().with_minimum_stay(1.2));

        let draft = ReservationDraft::for_room(&room, date(2024, 6, 10), 1.0).unwrap();

        assert_eq!(draft.duration_months, Some(1.5));
    }

    #[test]
    fn window_mirrors_draft_dates() {
        let mut draft = ReservationDraft::new(1);
        draft.set_check_in(date(2024, 6, 1)).unwrap();
        draft.set_duration(1.0).unwrap();

        let window = draft.window();

        assert_eq!(window.check_in, Some(date(2024, 6, 1)));
        assert_eq!(window.check_out, Some(date(2024, 7, 1)));
        assert_eq!(window.duration_months, Some(1.0));
    }
}
