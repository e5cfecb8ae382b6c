use crate::{Retriever, Storer};

use larder_core::{
    driver::{Connection, StatementId},
    Error, FieldMapping, Record, Result, Value,
};
use larder_sql::{Serializer, Statement};

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tracing::debug;

/// A database handle: owns the connection and the per (table, record type)
/// cache of prepared insert statements.
///
/// Cloning produces another handle to the same connection and cache. The
/// cache key includes the table name, so storing the same record shape into
/// two tables prepares two distinct statements.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

pub(crate) struct Shared {
    pub(crate) state: Mutex<State>,
}

pub(crate) struct State {
    pub(crate) conn: Option<Box<dyn Connection>>,
    cache: HashMap<(String, TypeId), Arc<CacheEntry>>,
}

/// One cached prepared insert: the rendered SQL, the field ordering it was
/// built from, and the prepared-statement handle.
pub(crate) struct CacheEntry {
    pub(crate) sql: String,
    pub(crate) mapping: Arc<FieldMapping>,
    pub(crate) statement: StatementId,
}

impl Db {
    pub fn new(conn: impl Connection + 'static) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    conn: Some(Box::new(conn)),
                    cache: HashMap::new(),
                }),
            }),
        }
    }

    /// Connects to a PostgreSQL database using a connection URL.
    ///
    /// See [`PostgreSQL::connect`](larder_driver_postgresql::PostgreSQL::connect).
    #[cfg(feature = "postgresql")]
    pub fn connect(url: &str) -> Result<Self> {
        Ok(Self::new(larder_driver_postgresql::PostgreSQL::connect(
            url,
        )?))
    }

    /// Returns a storer for inserting `R` records into `table`.
    ///
    /// The first request for a (table, record type) pair renders the INSERT
    /// and prepares it on the connection; later requests reuse the cached
    /// statement. A preparation failure (say, the table does not exist yet)
    /// is returned to the caller and NOT cached, so a retry after fixing the
    /// schema succeeds. Concurrent first-time requests serialize on the
    /// cache lock: exactly one statement is prepared per pair.
    pub fn storer<R: Record>(&self, table: &str) -> Result<Storer<R>> {
        let mut state = self.shared.state.lock().unwrap();

        let key = (table.to_owned(), TypeId::of::<R>());
        if let Some(entry) = state.cache.get(&key) {
            debug!(table, "insert statement cache hit");
            return Ok(Storer::new(self.shared.clone(), entry.clone()));
        }

        let mapping = Arc::new(FieldMapping::of::<R>());
        let stmt = Statement::insert(table, mapping.column_names());

        let mut params = Vec::new();
        let sql = Serializer::postgresql().serialize(&stmt, &mut params);
        debug_assert!(params.is_empty(), "inserts bind values at execution time");

        let conn = state.conn.as_mut().ok_or_else(Error::closed)?;
        let statement = conn
            .prepare(&sql)
            .map_err(|err| Error::statement_preparation(table, err))?;

        debug!(table, sql = %sql, "prepared insert statement");

        let entry = Arc::new(CacheEntry {
            sql,
            mapping,
            statement,
        });
        state.cache.insert(key, entry.clone());

        Ok(Storer::new(self.shared.clone(), entry))
    }

    /// Runs a SELECT for `R` records in `table` matching all of `filters`
    /// (column = value equality, combined with AND), and returns a retriever
    /// over the result.
    ///
    /// Retrievers are never cached: every call executes a fresh query.
    /// Filter values are always bound parameters, never interpolated into
    /// the statement text.
    pub fn retriever<R: Record>(
        &self,
        table: &str,
        filters: &[(&str, Value)],
    ) -> Result<Retriever<R>> {
        let mapping = Arc::new(FieldMapping::of::<R>());
        let filters = filters
            .iter()
            .map(|(column, value)| ((*column).to_owned(), value.clone()))
            .collect();
        let stmt = Statement::select(table, mapping.column_names(), filters);

        let mut params = Vec::new();
        let sql = Serializer::postgresql().serialize(&stmt, &mut params);

        let mut state = self.shared.state.lock().unwrap();
        let conn = state.conn.as_mut().ok_or_else(Error::closed)?;
        let rows = conn
            .query(&sql, &params)
            .map_err(|err| Error::query_execution(table, err))?;

        debug!(table, sql = %sql, "executed select");

        Ok(Retriever::new(mapping, rows))
    }

    /// Runs raw statements outside the mapping layer (DDL, fixtures).
    pub fn batch_execute(&self, sql: &str) -> Result<()> {
        let mut state = self.shared.state.lock().unwrap();
        let conn = state.conn.as_mut().ok_or_else(Error::closed)?;
        conn.batch_execute(sql)
    }

    /// Drops every cached statement and closes the underlying connection.
    ///
    /// Closing is idempotent. After the first call, any other operation on
    /// this handle, or on a storer obtained from it, fails with a closed
    /// error.
    pub fn close(&self) -> Result<()> {
        let mut state = self.shared.state.lock().unwrap();
        state.cache.clear();
        match state.conn.take() {
            Some(mut conn) => conn.close(),
            None => Ok(()),
        }
    }
}
