use crate::db::{CacheEntry, Shared};

use larder_core::{Error, Record, Result};

use std::{fmt, marker::PhantomData, sync::Arc};

/// A cached, prepared insert bound to one table and record type.
///
/// Obtained from [`Db::storer`](crate::Db::storer). Cheap to clone; clones
/// share the same prepared statement. Safe to use from multiple threads;
/// executions serialize on the connection.
pub struct Storer<R> {
    shared: Arc<Shared>,
    entry: Arc<CacheEntry>,
    _p: PhantomData<fn(R)>,
}

impl<R> Clone for Storer<R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            entry: self.entry.clone(),
            _p: PhantomData,
        }
    }
}

impl<R: Record> Storer<R> {
    pub(crate) fn new(shared: Arc<Shared>, entry: Arc<CacheEntry>) -> Self {
        Self {
            shared,
            entry,
            _p: PhantomData,
        }
    }

    /// The rendered INSERT statement text.
    pub fn sql(&self) -> &str {
        &self.entry.sql
    }

    /// Inserts one row with the record's current field values.
    ///
    /// Values are read in field declaration order and bound positionally, the
    /// same order the statement's placeholders were rendered in. Execution
    /// errors (constraint violations and the like) propagate verbatim.
    ///
    /// # Panics
    ///
    /// Panics if the record yields a different number of values than it
    /// declares fields: a broken `Record` implementation, not a runtime
    /// condition.
    pub fn store(&self, record: &R) -> Result<()> {
        let values = record.values();
        assert_eq!(
            values.len(),
            self.entry.mapping.len(),
            "record value count does not match its field descriptors"
        );

        let mut state = self.shared.state.lock().unwrap();
        let conn = state.conn.as_mut().ok_or_else(Error::closed)?;
        conn.execute(self.entry.statement, &values)?;
        Ok(())
    }
}

impl<R> fmt::Debug for Storer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storer").field("sql", &self.entry.sql).finish()
    }
}
