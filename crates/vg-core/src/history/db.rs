//! SQLite-backed download history (sqlx).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::{Path, PathBuf};

/// One download the user started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub url: String,
    pub filename: String,
    /// Unix milliseconds.
    pub recorded_at: i64,
}

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the history database, `~/.local/state/vg/history.db` by default.
#[derive(Clone)]
pub struct HistoryDb {
    pool: Pool<Sqlite>,
}

impl HistoryDb {
    /// Default location under the XDG state directory.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("vg")?;
        Ok(xdg_dirs.place_state_file("history.db")?)
    }

    /// Open (or create) the default history database.
    pub async fn open_default() -> Result<Self> {
        Self::open_at(Self::default_path()?).await
    }

    /// Open (or create) the database at `path`, creating parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;
        let db = HistoryDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS downloads (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT NOT NULL,
                filename TEXT NOT NULL,
                recorded_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Append one entry. Returns its id.
    pub async fn record(&self, url: &str, filename: &str, recorded_at: i64) -> Result<i64> {
        let id = sqlx::query(
            r#"
            INSERT INTO downloads (url, filename, recorded_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(url)
        .bind(filename)
        .bind(recorded_at)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        Ok(id)
    }

    /// Entries newest first, optionally capped at `limit`.
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<HistoryEntry>> {
        let limit = limit.map(i64::from).unwrap_or(-1);
        let rows = sqlx::query(
            r#"
            SELECT id, url, filename, recorded_at
            FROM downloads
            ORDER BY recorded_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(HistoryEntry {
                id: row.get("id"),
                url: row.get("url"),
                filename: row.get("filename"),
                recorded_at: row.get("recorded_at"),
            });
        }
        Ok(out)
    }

    /// Remove every entry. Returns the number removed.
    pub async fn clear(&self) -> Result<u64> {
        let done = sqlx::query("DELETE FROM downloads")
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<HistoryDb> {
    // Single connection so the pool never hands back a different empty DB.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = HistoryDb { pool };
    db.migrate().await?;
    Ok(db)
}
