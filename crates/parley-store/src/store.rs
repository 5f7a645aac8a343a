//! SQLite-backed append-only message log.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use parley_common::StorageError;
use rusqlite::{params, Connection, ErrorCode};
use tracing::{debug, info};

use crate::message::{MessageId, Role, StoredMessage};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    role TEXT NOT NULL,
    content TEXT NOT NULL,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
);
";

/// Durable conversation log for a single session.
///
/// Every method is one independent statement; there is no transaction
/// spanning calls.
pub struct MessageStore {
    conn: Mutex<Connection>,
    location: String,
}

/// Row as read from SQLite, before role/timestamp decoding.
type RawRow = (i64, String, String, String);

impl MessageStore {
    /// Open or create the database at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Unavailable(format!(
                        "failed to create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let conn = Connection::open(path).map_err(storage_error)?;
        let store = Self::with_connection(conn, path.display().to_string())?;
        info!(location = %store.location, "message store opened");
        Ok(store)
    }

    /// Volatile store, mostly for tests.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(storage_error)?;
        Self::with_connection(conn, ":memory:".into())
    }

    fn with_connection(conn: Connection, location: String) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA).map_err(storage_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
            location,
        })
    }

    /// Where the database lives (a file path or `:memory:`).
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Append one message; the store assigns id and timestamp.
    pub fn append(&self, role: Role, content: &str) -> Result<MessageId, StorageError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO messages (role, content) VALUES (?1, ?2)",
            params![role.as_str(), content],
        )
        .map_err(storage_error)?;
        let id = MessageId(conn.last_insert_rowid());
        debug!(id = id.0, role = role.as_str(), "message appended");
        Ok(id)
    }

    /// The last `min(n, count)` messages, oldest first.
    pub fn recent_window(&self, n: usize) -> Result<Vec<StoredMessage>, StorageError> {
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, role, content, timestamp FROM (
                    SELECT id, role, content, timestamp
                    FROM messages
                    ORDER BY id DESC
                    LIMIT ?1
                ) ORDER BY id ASC",
            )
            .map_err(storage_error)?;

        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(storage_error)?
            .collect::<Result<Vec<RawRow>, _>>()
            .map_err(storage_error)?;

        rows.into_iter().map(decode_row).collect()
    }

    /// Newest message, if any.
    pub fn last(&self) -> Result<Option<StoredMessage>, StorageError> {
        Ok(self.recent_window(1)?.pop())
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))
            .map_err(storage_error)?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Delete every message. Ids keep increasing afterwards.
    pub fn clear(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let removed = conn
            .execute("DELETE FROM messages", [])
            .map_err(storage_error)?;
        info!(removed, "message store cleared");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Unavailable("connection lock poisoned".into()))
    }

    #[cfg(test)]
    pub(crate) fn with_raw_connection<T>(&self, f: impl FnOnce(&Connection) -> T) -> T {
        let conn = self.conn.lock().unwrap();
        f(&conn)
    }
}

fn decode_row((id, role, content, timestamp): RawRow) -> Result<StoredMessage, StorageError> {
    let role = Role::from_str(&role)
        .ok_or_else(|| StorageError::Corrupt(format!("unknown role '{role}' in row {id}")))?;
    let timestamp = parse_timestamp(&timestamp)
        .ok_or_else(|| StorageError::Corrupt(format!("bad timestamp '{timestamp}' in row {id}")))?;
    Ok(StoredMessage {
        id: MessageId(id),
        role,
        content,
        timestamp,
    })
}

/// SQLite's `CURRENT_TIMESTAMP` is UTC `YYYY-MM-DD HH:MM:SS`.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn storage_error(e: rusqlite::Error) -> StorageError {
    if matches!(
        e,
        rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..)
    ) {
        return StorageError::Corrupt(e.to_string());
    }
    match e.sqlite_error_code() {
        Some(ErrorCode::NotADatabase) | Some(ErrorCode::DatabaseCorrupt) => {
            StorageError::Corrupt(e.to_string())
        }
        Some(ErrorCode::CannotOpen)
        | Some(ErrorCode::PermissionDenied)
        | Some(ErrorCode::ReadOnly)
        | Some(ErrorCode::DatabaseBusy)
        | Some(ErrorCode::DatabaseLocked)
        | Some(ErrorCode::SystemIoFailure)
        | Some(ErrorCode::DiskFull) => StorageError::Unavailable(e.to_string()),
        _ => StorageError::Query(e.to_string()),
    }
}
