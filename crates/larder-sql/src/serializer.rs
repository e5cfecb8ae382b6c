#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

use crate::stmt::{Insert, Select, Statement};

/// Serialize a statement to a SQL string.
///
/// Filter values are pushed into `params` as they are rendered, so the
/// placeholder numbering in the text and the positional parameter list can
/// never disagree. The dialect is PostgreSQL's: double-quoted identifiers and
/// 1-based `$n` placeholders.
#[derive(Debug, Default)]
pub struct Serializer {
    _private: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn postgresql() -> Self {
        Self::default()
    }

    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }
}

impl ToSql for &Statement {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Insert {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let table = Ident(&self.table);
        let columns = Comma(self.columns.iter().map(Ident));
        let placeholders = Comma((1..=self.columns.len()).map(Placeholder));

        fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" placeholders ")");
    }
}

impl ToSql for &Select {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let columns = Comma(self.columns.iter().map(Ident));

        fmt!(f, "SELECT " columns " FROM " Ident(&self.table));

        let mut sep = " WHERE ";
        for (key, value) in &self.filters {
            let placeholder = f.params.push(value);
            fmt!(f, sep Ident(key) " = " placeholder);
            sep = " AND ";
        }
    }
}
