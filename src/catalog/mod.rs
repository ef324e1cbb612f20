pub mod feed;
pub mod room;

use async_trait::async_trait;
use thiserror::Error;

pub use feed::{parse_feed, FeedClient, FileCatalog};
pub use room::Room;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Failed to read feed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid feed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Source of room records. Availability inside each room is already mapped.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomCatalog: Send + Sync {
    async fn fetch_rooms(&self) -> Result<Vec<Room>, CatalogError>;

    async fn fetch_room_by_id(&self, id: u64) -> Result<Option<Room>, CatalogError> {
        let rooms = self.fetch_rooms().await?;
        Ok(rooms.into_iter().find(|room| room.id == id))
    }
}
