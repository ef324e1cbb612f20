use serde::{Deserialize, Serialize};

use crate::storage::config::BookingConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub monthly_price: f64,
    pub platform_fee: f64,
    /// Rent plus platform fee, due before moving in.
    pub first_month_total: f64,
    /// Deposit taken when the reservation is submitted.
    pub advance_payment: f64,
}

pub fn quote(monthly_price: f64, duration_months: f64, booking: &BookingConfig) -> PriceQuote {
    let platform_fee = monthly_price * booking.service_fee_percentage / 100.0;
    let advance_payment = monthly_price * duration_months * booking.advance_payment_percentage / 100.0;

    PriceQuote {
        monthly_price,
        platform_fee,
        first_month_total: monthly_price + platform_fee,
        advance_payment,
    }
}
