//! FIRESIGHT - Encrypted Audit Log
//!
//! Append-only SQLite store of completed analyses. Each row holds one
//! AEAD-sealed record; rows are never updated or deleted.

use std::path::Path;

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use tracing::debug;

use crate::crypto::AeadCipher;
use crate::error::{FireError, FireResult};
use crate::pipeline::AnalysisResult;

/// One decrypted audit row
#[derive(Debug)]
pub struct AuditRecord {
    /// Row id (auto-increment)
    pub id: i64,
    /// Wall-clock seconds since epoch at append time
    pub ts: f64,
    /// The recorded analysis
    pub result: AnalysisResult,
}

/// Append-only encrypted record store
pub struct AuditLog {
    conn: Mutex<Connection>,
    cipher: AeadCipher,
}

impl AuditLog {
    /// Open (or create) the audit database and ensure the schema exists
    pub fn open<P: AsRef<Path>>(db_path: P, cipher: AeadCipher) -> FireResult<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path.as_ref())?;
        let log = Self {
            conn: Mutex::new(conn),
            cipher,
        };
        log.initialize()?;
        Ok(log)
    }

    /// Idempotently create the logs table. Safe on every startup.
    pub fn initialize(&self) -> FireResult<()> {
        self.conn.lock().execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ts REAL NOT NULL,
                blob TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Seal one analysis result and insert it as a new row.
    /// Returns the row id.
    pub fn append(&self, result: &AnalysisResult) -> FireResult<i64> {
        let ts = Utc::now().timestamp_micros() as f64 / 1e6;

        let payload = serde_json::to_string(result)?;
        let blob = self.cipher.encrypt(&payload)?;

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO logs (ts, blob) VALUES (?1, ?2)",
            params![ts, blob],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, ts, "audit record appended");
        Ok(id)
    }

    /// Decrypt a single record by id
    pub fn record(&self, id: i64) -> FireResult<AuditRecord> {
        let conn = self.conn.lock();

        let (ts, blob): (f64, String) = conn
            .query_row(
                "SELECT ts, blob FROM logs WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|_| FireError::RecordNotFound(id))?;

        let payload = self.cipher.decrypt(&blob)?;
        let result: AnalysisResult = serde_json::from_str(&payload)?;

        Ok(AuditRecord { id, ts, result })
    }

    /// Decrypt all records, oldest first.
    ///
    /// A record that fails authentication aborts the listing rather
    /// than being skipped: a tampered row is never silently ignored.
    pub fn records(&self) -> FireResult<Vec<AuditRecord>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare("SELECT id, ts, blob FROM logs ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, ts, blob) = row?;
            let payload = self.cipher.decrypt(&blob)?;
            let result: AnalysisResult = serde_json::from_str(&payload)?;
            records.push(AuditRecord { id, ts, result });
        }

        Ok(records)
    }

    /// Number of stored records
    pub fn count(&self) -> FireResult<usize> {
        let count: i64 = self
            .conn
            .lock()
            .query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
