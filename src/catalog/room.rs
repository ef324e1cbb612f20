use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CatalogError;
use crate::availability::{map_availability, AvailabilityModel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: u64,
    pub title: String,
    pub city: String,
    pub monthly_price: f64,
    pub currency_symbol: String,
    pub currency_code: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub property_type_name: Option<String>,
    pub room_type_name: Option<String>,
    pub is_verified: bool,
    pub availability: AvailabilityModel,
}

#[derive(Debug, Deserialize)]
struct FeedRoom {
    id: Option<u64>,
    title: Option<String>,
    city: Option<String>,
    monthly_price: Option<f64>,
    currency_symbol: Option<String>,
    currency_code: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    property_type_name: Option<String>,
    room_type_name: Option<String>,
    is_verified: Option<bool>,
    #[serde(default)]
    availability: Value,
}

impl Room {
    /// Reads one room record from the feed. Fails only when the record is
    /// unreadable or has no id; an unusable availability block degrades to
    /// unknown availability.
    pub fn from_feed_record(record: &Value) -> Result<Self, CatalogError> {
        let feed_room = FeedRoom::deserialize(record)?;
        let id = feed_room.id
            .ok_or_else(|| CatalogError::ParseError("Missing room id".to_string()))?;

        let availability = map_availability(&feed_room.availability).unwrap_or_else(|e| {
            tracing::warn!("Room {} has unusable availability: {}", id, e);
            AvailabilityModel::default()
        });

        Ok(Self {
            id,
            title: feed_room.title.unwrap_or_default(),
            city: feed_room.city.unwrap_or_default(),
            monthly_price: feed_room.monthly_price.unwrap_or_default(),
            currency_symbol: feed_room.currency_symbol.unwrap_or_default(),
            currency_code: feed_room.currency_code.unwrap_or_default(),
            lat: feed_room.lat,
            lng: feed_room.lng,
            property_type_name: feed_room.property_type_name,
            room_type_name: feed_room.room_type_name,
            is_verified: feed_room.is_verified.unwrap_or(false),
            availability,
        })
    }
}
