use chrono::NaiveDate;

use crate::availability::{matches, StayWindow};
use crate::catalog::Room;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub city: Option<String>,
    pub max_price: Option<f64>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl ListingFilter {
    pub fn window(&self) -> StayWindow {
        StayWindow::new(self.check_in, self.check_out)
    }

    pub fn accepts(&self, room: &Room, today: NaiveDate) -> bool {
        self.city_matches(room)
            && self.price_matches(room)
            && matches(&room.availability, &self.window(), today)
    }

    fn city_matches(&self, room: &Room) -> bool {
        match self.city.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(city) => room.city.to_lowercase().contains(&city.to_lowercase()),
        }
    }

    fn price_matches(&self, room: &Room) -> bool {
        self.max_price.is_none_or(|max| room.monthly_price <= max)
    }
}

pub fn filter_rooms<'a>(rooms: &'a [Room], filter: &ListingFilter, today: NaiveDate) -> Vec<&'a Room> {
    rooms.iter()
        .filter(|room| filter.accepts(room, today))
        .collect()
}
