pub mod availability;
pub mod calendar;
pub mod catalog;
pub mod listing;
pub mod reservation;
pub mod storage;

pub use availability::{
    build_month_grid, matches, project_checkout, resolve_duration, resolve_earliest_bookable,
    AvailabilityError, AvailabilityModel, BlockedRange, MonthCell, StayWindow,
};
pub use catalog::{Room, RoomCatalog};
