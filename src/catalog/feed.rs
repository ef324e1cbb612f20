use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use super::{CatalogError, Room, RoomCatalog};

/// Extracts rooms from a feed payload. The feed is either a bare array of
/// room records or an object carrying them under `data`; anything else is
/// treated as an empty catalog.
pub fn parse_feed(payload: Value) -> Vec<Room> {
    let records = match payload {
        Value::Array(records) => records,
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(records)) => records,
            _ => {
                tracing::warn!("Feed object has no data array; returning no rooms");
                return Vec::new();
            }
        },
        other => {
            tracing::warn!("Unrecognized feed payload: {}", other);
            return Vec::new();
        }
    };

    records.iter()
        .filter_map(|record| match Room::from_feed_record(record) {
            Ok(room) => Some(room),
            Err(e) => {
                tracing::warn!("Skipping room record: {}", e);
                None
            }
        })
        .collect()
}

pub struct FeedClient {
    feed_url: String,
    client: reqwest::Client,
}

impl FeedClient {
    pub fn new(feed_url: String) -> Self {
        Self {
            feed_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RoomCatalog for FeedClient {
    async fn fetch_rooms(&self) -> Result<Vec<Room>, CatalogError> {
        tracing::info!("Fetching room feed from {}", self.feed_url);

        let response = self.client
            .get(&self.feed_url)
            .send()
            .await?;

        let status = response.status();
        tracing::info!("Room feed response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Failed to fetch rooms. Status: {}, Body: {}", status, body);
            return Err(CatalogError::RequestError(format!("Status {}: {}", status, body)));
        }

        let payload: Value = response.json().await?;
        let rooms = parse_feed(payload);

        tracing::info!("Fetched {} rooms", rooms.len());
        Ok(rooms)
    }
}

/// Room feed snapshot stored on disk.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl RoomCatalog for FileCatalog {
    async fn fetch_rooms(&self) -> Result<Vec<Room>, CatalogError> {
        tracing::info!("Reading room feed from {}", self.path.display());

        let content = tokio::fs::read_to_string(&self.path).await?;
        let payload: Value = serde_json::from_str(&content)?;
        Ok(parse_feed(payload))
    }
}
