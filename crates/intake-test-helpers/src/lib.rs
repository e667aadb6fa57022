mod sqlite;

pub use sqlite::*;
use std::borrow::Cow;

/// A throwaway database a test can connect to.
pub trait TestDb {
    fn db_uri(&self) -> Cow<'_, str>;
}
