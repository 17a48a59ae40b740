use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS indexes (
            name TEXT PRIMARY KEY,
            dimension INTEGER NOT NULL,
            metric TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS vectors (
            index_name TEXT NOT NULL,
            id TEXT NOT NULL,
            vector BLOB NOT NULL,
            metadata TEXT NOT NULL,
            PRIMARY KEY (index_name, id)
        );
        "
    ).map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
