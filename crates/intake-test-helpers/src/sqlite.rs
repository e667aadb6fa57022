use crate::TestDb;
use std::borrow::Cow;
use tempfile::TempDir;
use thiserror::Error;

/// A file-backed sqlite database in a temporary directory. Unlike
/// `sqlite::memory:` it survives reconnects, so schema work can be checked
/// across separate connections.
pub struct SqliteDb {
    // We keep this around so it does not get dropped early
    #[allow(dead_code)]
    temp_dir: TempDir,
    uri: String,
}

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SqliteDb {
    pub fn new() -> Result<Self, SqliteError> {
        let temp_dir = TempDir::with_prefix("intake-sqlite-db")?;
        let path = temp_dir.path().join("db.sqlite");
        let path = path
            .to_str()
            .ok_or(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "database path is not valid utf-8",
            ))?
            .to_owned();
        let uri = format!("sqlite://{path}?mode=rwc");

        tracing::info!(uri = ?uri, "created sqlite test db");
        Ok(Self { temp_dir, uri })
    }
}

impl TestDb for SqliteDb {
    fn db_uri(&self) -> Cow<'_, str> {
        self.uri.as_str().into()
    }
}
