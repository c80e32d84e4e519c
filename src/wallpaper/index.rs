use super::{Fingerprint, WallpaperRecord};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Current schema version, stored in `PRAGMA user_version`
const SCHEMA_VERSION: i64 = 1;

const CREATE_QUERY: &str = "CREATE TABLE IF NOT EXISTS wallpapers (
    name   TEXT PRIMARY KEY NOT NULL,
    mean_l REAL NOT NULL,
    mean_a REAL NOT NULL,
    mean_b REAL NOT NULL
)";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("wallpaper index: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("cannot create index directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("wallpaper index is corrupt: {0}")]
    Corrupt(String),
}

/// Persisted mapping from wallpaper identifier to color fingerprint.
///
/// The connection lives as long as this value; dropping it closes the store.
/// Only one writer is expected at a time.
pub struct ColorIndex {
    conn: Connection,
}

impl ColorIndex {
    /// Open (or create) the index stored in `path`.
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| PersistenceError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        debug!(path = %path.display(), "opening wallpaper index");
        Self::init(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, PersistenceError> {
        // Touches the file header, so a non-SQLite file fails here.
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if version > SCHEMA_VERSION {
            return Err(PersistenceError::Corrupt(format!(
                "schema version {version} is newer than supported version {SCHEMA_VERSION}"
            )));
        }

        conn.execute_batch(CREATE_QUERY)?;
        if version < SCHEMA_VERSION {
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }

        Ok(Self { conn })
    }

    /// Insert a record unless one already exists for `identifier`.
    ///
    /// Returns whether a row was written. An existing fingerprint is never
    /// replaced, even if the image behind the identifier has changed.
    pub fn upsert_if_absent(
        &self,
        identifier: &str,
        fingerprint: &Fingerprint,
    ) -> Result<bool, PersistenceError> {
        if !fingerprint.is_finite() {
            return Err(PersistenceError::Corrupt(format!(
                "refusing to store non-finite fingerprint for {identifier}"
            )));
        }

        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO wallpapers (name, mean_l, mean_a, mean_b)
             VALUES (?1, ?2, ?3, ?4)",
            params![identifier, fingerprint.l, fingerprint.a, fingerprint.b],
        )?;
        Ok(changed == 1)
    }

    pub fn contains(&self, identifier: &str) -> Result<bool, PersistenceError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM wallpapers WHERE name = ?1",
                [identifier],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    #[cfg(test)]
    pub fn get(&self, identifier: &str) -> Result<Option<WallpaperRecord>, PersistenceError> {
        let row = self
            .conn
            .query_row(
                "SELECT name, mean_l, mean_a, mean_b FROM wallpapers WHERE name = ?1",
                [identifier],
                |row| {
                    Ok(WallpaperRecord::new(
                        row.get::<_, String>(0)?,
                        Fingerprint::new(row.get(1)?, row.get(2)?, row.get(3)?),
                    ))
                },
            )
            .optional()?;

        row.map(check_record).transpose()
    }

    /// Every record, ordered by identifier.
    pub fn all(&self) -> Result<Vec<WallpaperRecord>, PersistenceError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, mean_l, mean_a, mean_b FROM wallpapers ORDER BY name")?;

        let rows = stmt.query_map([], |row| {
            Ok(WallpaperRecord::new(
                row.get::<_, String>(0)?,
                Fingerprint::new(row.get(1)?, row.get(2)?, row.get(3)?),
            ))
        })?;

        let mut records = Vec::new();
        for record in rows {
            records.push(check_record(record?)?);
        }
        Ok(records)
    }

    pub fn size(&self) -> Result<usize, PersistenceError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM wallpapers", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| PersistenceError::Corrupt(format!("negative row count {count}")))
    }
}

fn check_record(record: WallpaperRecord) -> Result<WallpaperRecord, PersistenceError> {
    if record.fingerprint.is_finite() {
        Ok(record)
    } else {
        Err(PersistenceError::Corrupt(format!(
            "non-finite fingerprint stored for {}",
            record.identifier
        )))
    }
}
