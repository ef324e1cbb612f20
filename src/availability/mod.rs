//! Availability and booking-window resolution.
//!
//! Every entry point takes "today" explicitly; nothing here reads the clock.

pub mod checkout;
pub mod duration;
pub mod earliest;
pub mod grid;
pub mod mapping;
pub mod model;
pub mod validator;

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::DateError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AvailabilityError {
    #[error("{0}")]
    InvalidDate(#[from] DateError),
    #[error("Invalid duration: {0} months (expected a non-negative multiple of 0.5)")]
    InvalidDuration(f64),
    #[error("Check-out {check_out} is before check-in {check_in}")]
    CheckOutBeforeCheckIn { check_in: NaiveDate, check_out: NaiveDate },
}

pub use checkout::project_checkout;
pub use duration::resolve_duration;
pub use earliest::resolve_earliest_bookable;
pub use grid::{build_month_grid, select_month, DEFAULT_YEARS_TO_SHOW};
pub use mapping::{map_availability, MappingError};
pub use model::{AvailabilityModel, BlockedRange, MonthCell, StayWindow};
pub use validator::matches;
