use crate::domain::entities::record::{IndexedRecord, Match, RecordMetadata};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_index::{VectorIndex, VectorIndexProvider};
use crate::domain::values::index::{IndexDescription, IndexSpec, IndexStats};
use crate::domain::values::metric::Metric;
use crate::infrastructure::sqlite::migrations::run_migrations;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

type SharedConn = Arc<Mutex<Connection>>;

fn lock(conn: &SharedConn) -> Result<MutexGuard<'_, Connection>, DomainError> {
    conn.lock().map_err(|e| DomainError::Database(e.to_string()))
}

fn serialize_vector(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Local vector index kept in a SQLite file. Indexes are ready as soon as
/// they are created and queries scan every stored vector.
pub struct SqliteIndexProvider {
    conn: SharedConn,
}

impl SqliteIndexProvider {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let conn = Connection::open(path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        Self::open(":memory:")
    }

    fn with_connection(conn: Connection) -> Result<Self, DomainError> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn find(conn: &Connection, name: &str) -> Result<Option<IndexDescription>, DomainError> {
        let row = conn
            .query_row(
                "SELECT name, dimension, metric FROM indexes WHERE name = ?1",
                params![name],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, i64>(1)?,
                        r.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;
        row.map(|(name, dimension, metric)| {
            Ok::<_, DomainError>(IndexDescription {
                name,
                dimension: dimension as usize,
                metric: metric.parse().map_err(DomainError::Parse)?,
                host: String::new(),
                ready: true,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl VectorIndexProvider for SqliteIndexProvider {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn list_indexes(&self) -> Result<Vec<String>, DomainError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT name FROM indexes ORDER BY name")?;
        let names = stmt
            .query_map([], |r| r.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    async fn create_index(&self, spec: &IndexSpec) -> Result<(), DomainError> {
        let conn = lock(&self.conn)?;
        if Self::find(&conn, &spec.name)?.is_some() {
            return Err(DomainError::VectorIndex(format!(
                "Index {} already exists",
                spec.name
            )));
        }
        conn.execute(
            "INSERT INTO indexes (name, dimension, metric) VALUES (?1, ?2, ?3)",
            params![spec.name, spec.dimension as i64, spec.metric.to_string()],
        )?;
        Ok(())
    }

    async fn describe_index(&self, name: &str) -> Result<IndexDescription, DomainError> {
        let conn = lock(&self.conn)?;
        Self::find(&conn, name)?
            .ok_or_else(|| DomainError::VectorIndex(format!("Index {name} not found")))
    }

    async fn delete_index(&self, name: &str) -> Result<(), DomainError> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM vectors WHERE index_name = ?1", params![name])?;
        let removed = tx.execute("DELETE FROM indexes WHERE name = ?1", params![name])?;
        tx.commit()?;
        if removed == 0 {
            return Err(DomainError::VectorIndex(format!("Index {name} not found")));
        }
        Ok(())
    }

    async fn connect(
        &self,
        description: &IndexDescription,
    ) -> Result<Arc<dyn VectorIndex>, DomainError> {
        Ok(Arc::new(SqliteIndex {
            conn: Arc::clone(&self.conn),
            name: description.name.clone(),
            dimension: description.dimension,
            metric: description.metric,
        }))
    }
}

pub struct SqliteIndex {
    conn: SharedConn,
    name: String,
    dimension: usize,
    metric: Metric,
}

#[async_trait]
impl VectorIndex for SqliteIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn upsert(&self, records: &[IndexedRecord]) -> Result<usize, DomainError> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;
        for record in records {
            let metadata = serde_json::to_string(&record.metadata)
                .map_err(|e| DomainError::Parse(e.to_string()))?;
            tx.execute(
                "INSERT OR REPLACE INTO vectors (index_name, id, vector, metadata) VALUES (?1, ?2, ?3, ?4)",
                params![self.name, record.id, serialize_vector(&record.values), metadata],
            )
            .map_err(|e| DomainError::Database(format!("Failed to store vector: {e}")))?;
        }
        tx.commit()?;
        Ok(records.len())
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<Match>, DomainError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT id, vector, metadata FROM vectors WHERE index_name = ?1")?;
        let rows = stmt
            .query_map(params![self.name], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Vec<u8>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut matches: Vec<Match> = rows
            .into_iter()
            .map(|(id, blob, metadata)| {
                let stored = deserialize_vector(&blob);
                let metadata = if include_metadata {
                    serde_json::from_str::<RecordMetadata>(&metadata).ok()
                } else {
                    None
                };
                Match {
                    id,
                    score: self.metric.score(vector, &stored),
                    metadata,
                }
            })
            .collect();

        if self.metric.higher_is_closer() {
            matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        } else {
            matches.sort_by(|a, b| a.score.total_cmp(&b.score));
        }
        matches.truncate(top_k);
        Ok(matches)
    }

    async fn stats(&self) -> Result<IndexStats, DomainError> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM vectors WHERE index_name = ?1",
            params![self.name],
            |r| r.get(0),
        )?;
        Ok(IndexStats {
            dimension: self.dimension,
            total_vector_count: count as usize,
            namespace_vector_count: count as usize,
        })
    }

    async fn fetch_existing(&self, ids: &[String]) -> Result<Vec<String>, DomainError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT 1 FROM vectors WHERE index_name = ?1 AND id = ?2")?;
        let mut found = Vec::new();
        for id in ids {
            if stmt.exists(params![self.name, id])? {
                found.push(id.clone());
            }
        }
        Ok(found)
    }
}
