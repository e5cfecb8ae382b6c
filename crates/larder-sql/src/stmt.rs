use larder_core::Value;

/// The statement shapes the mapping layer generates.
///
/// Pure data; rendering to SQL text happens in the
/// [`Serializer`](crate::Serializer).
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Insert),
    Select(Select),
}

/// `INSERT INTO <table> (<columns>) VALUES ($1, ..., $N)`
///
/// Values are bound at execution time; the placeholder for column `i`
/// (zero-based) is `$i+1`, so parameter order is exactly column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
}

/// `SELECT <columns> FROM <table> WHERE <k1> = $1 AND <k2> = $2 ...`
///
/// Filter values are always bound parameters, never interpolated literals.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub columns: Vec<String>,
    pub filters: Vec<(String, Value)>,
}

impl Statement {
    pub fn insert(table: impl Into<String>, columns: Vec<String>) -> Self {
        Insert {
            table: table.into(),
            columns,
        }
        .into()
    }

    pub fn select(
        table: impl Into<String>,
        columns: Vec<String>,
        filters: Vec<(String, Value)>,
    ) -> Self {
        Select {
            table: table.into(),
            columns,
            filters,
        }
        .into()
    }
}

impl From<Insert> for Statement {
    fn from(stmt: Insert) -> Self {
        Self::Insert(stmt)
    }
}

impl From<Select> for Statement {
    fn from(stmt: Select) -> Self {
        Self::Select(stmt)
    }
}
