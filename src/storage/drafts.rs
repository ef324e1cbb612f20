use std::path::Path;

use chrono::Utc;
use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

use crate::reservation::ReservationDraft;

#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Failed to prepare draft storage: {0}")]
    Io(#[from] std::io::Error),
}

/// Best-effort local store for in-progress reservations.
pub struct DraftStore {
    conn: Connection,
}

impl DraftStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self, DraftStoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = Self::new(Connection::open(path)?);
        store.initialize()?;
        Ok(store)
    }

    pub fn initialize(&self) -> Result<(), DraftStoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS drafts (
                id TEXT PRIMARY KEY,
                room_id INTEGER NOT NULL,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn store_draft(&self, draft: &ReservationDraft) -> Result<(), DraftStoreError> {
        let data = serde_json::to_string(draft)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO drafts (id, room_id, data, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                draft.id.to_string(),
                draft.room_id as i64,
                &data,
                Utc::now().to_rfc3339(),
            ],
        )?;
        tracing::debug!("Stored reservation draft {} for room {}", draft.id, draft.room_id);
        Ok(())
    }

    pub fn load_draft(&self, id: &Uuid) -> Result<Option<ReservationDraft>, DraftStoreError> {
        let mut stmt = self.conn.prepare("SELECT data FROM drafts WHERE id = ?1")?;
        let mut rows = stmt.query([id.to_string()])?;

        if let Some(row) = rows.next()? {
            let data: String = row.get(0)?;
            let draft: ReservationDraft = serde_json::from_str(&data)?;
            Ok(Some(draft))
        } else {
            Ok(None)
        }
    }

    pub fn list_drafts(&self) -> Result<Vec<ReservationDraft>, DraftStoreError> {
        let mut stmt = self.conn.prepare("SELECT data FROM drafts ORDER BY updated_at DESC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut drafts = Vec::new();
        for data in rows {
            let data = data?;
            match serde_json::from_str(&data) {
                Ok(draft) => drafts.push(draft),
                Err(e) => tracing::warn!("Skipping unreadable reservation draft: {}", e),
            }
        }
        Ok(drafts)
    }

    pub fn delete_draft(&self, id: &Uuid) -> Result<(), DraftStoreError> {
        self.conn.execute("DELETE FROM drafts WHERE id = ?1", [id.to_string()])?;
        Ok(())
    }
}
