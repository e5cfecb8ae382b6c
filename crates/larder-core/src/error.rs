use std::sync::Arc;

pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error produced by the mapping layer.
///
/// Cheap to clone and one pointer wide. The concrete kind is not exposed;
/// callers branch on the predicate methods (`is_end_of_results`, `is_closed`,
/// ...) and recover the underlying client error through
/// [`std::error::Error::source`].
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

struct ErrorInner {
    kind: ErrorKind,
    source: Option<BoxError>,
}

enum ErrorKind {
    /// The collaborator rejected a generated INSERT statement.
    StatementPreparation { table: String },

    /// A retrieval query failed to execute.
    QueryExecution { table: String },

    /// A result cell does not fit the record field it maps to.
    TypeConversion { from: String, to: String },

    /// Normal loop-termination signal: the retriever has no more rows.
    EndOfResults,

    /// Operation attempted after the owning handle was closed.
    Closed,

    /// Malformed or unsupported connection URL.
    InvalidConnectionUrl { detail: String },

    /// Underlying database client error, propagated verbatim.
    Driver,

    /// Bridge for errors carried through `anyhow`.
    Other(anyhow::Error),
}

impl Error {
    fn new(kind: ErrorKind, source: Option<BoxError>) -> Self {
        Self {
            inner: Arc::new(ErrorInner { kind, source }),
        }
    }

    pub fn statement_preparation(table: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::new(
            ErrorKind::StatementPreparation {
                table: table.into(),
            },
            Some(source.into()),
        )
    }

    pub fn query_execution(table: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::new(
            ErrorKind::QueryExecution {
                table: table.into(),
            },
            Some(source.into()),
        )
    }

    pub fn type_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::TypeConversion {
                from: from.into(),
                to: to.into(),
            },
            None,
        )
    }

    pub fn end_of_results() -> Self {
        Self::new(ErrorKind::EndOfResults, None)
    }

    pub fn closed() -> Self {
        Self::new(ErrorKind::Closed, None)
    }

    pub fn invalid_connection_url(detail: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidConnectionUrl {
                detail: detail.into(),
            },
            None,
        )
    }

    pub fn driver(source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Driver, Some(source.into()))
    }

    pub fn is_statement_preparation(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::StatementPreparation { .. })
    }

    pub fn is_query_execution(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::QueryExecution { .. })
    }

    pub fn is_type_conversion(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::TypeConversion { .. })
    }

    pub fn is_end_of_results(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::EndOfResults)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Closed)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.inner.kind {
            ErrorKind::Other(err) => Some(err.as_ref()),
            _ => self
                .inner
                .source
                .as_deref()
                .map(|source| source as &(dyn std::error::Error + 'static)),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match &self.inner.kind {
            StatementPreparation { table } => {
                write!(f, "failed to prepare insert statement for table `{table}`")?
            }
            QueryExecution { table } => {
                write!(f, "failed to execute query against table `{table}`")?
            }
            TypeConversion { from, to } => {
                return write!(f, "cannot convert {from} to {to}");
            }
            EndOfResults => return f.write_str("no more rows"),
            Closed => return f.write_str("connection is closed"),
            InvalidConnectionUrl { detail } => {
                return write!(f, "invalid connection URL: {detail}");
            }
            Driver => f.write_str("database error")?,
            Other(err) => return core::fmt::Display::fmt(err, f),
        }

        if let Some(source) = &self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::new(ErrorKind::Other(err), None)
    }
}
