//! An in-memory stand-in for the PostgreSQL collaborator.
//!
//! Understands exactly the SQL the mapping layer generates (quoted
//! identifiers, `$n` placeholders), enough to actually store and filter rows,
//! so store/retrieve round-trips run without a live server. Every call is
//! recorded in an operations log for assertions.

use larder_core::{
    driver::{Connection, Rows, StatementId},
    Error, Result, Value,
};

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// Operations observed by the mock, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOp {
    Prepare { sql: String },
    Execute { sql: String, params: Vec<Value> },
    Query { sql: String, params: Vec<Value> },
    BatchExecute { sql: String },
    Close,
}

#[derive(Default)]
struct MockState {
    tables: HashMap<String, Table>,
    statements: HashMap<StatementId, PreparedInsert>,
    next_statement: u64,
    ops: Vec<MockOp>,
}

#[derive(Default)]
struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

struct PreparedInsert {
    sql: String,
    table: String,
    columns: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MockConnection {
    state: Arc<Mutex<MockState>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the given column order.
    pub fn create_table(&self, name: &str, columns: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.tables.insert(
            name.to_owned(),
            Table {
                columns: columns.iter().map(|c| (*c).to_owned()).collect(),
                rows: Vec::new(),
            },
        );
    }

    /// Seeds one row, cells in the table's column order.
    pub fn seed_row(&self, table: &str, row: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        let table = state.tables.get_mut(table).expect("no such mock table");
        assert_eq!(row.len(), table.columns.len());
        table.rows.push(row);
    }

    /// Removes a table, as if dropped out from under the mapping layer.
    pub fn drop_table(&self, name: &str) {
        self.state.lock().unwrap().tables.remove(name);
    }

    /// All rows currently in a table, cells in the table's column order.
    pub fn table_rows(&self, table: &str) -> Vec<Vec<Value>> {
        let state = self.state.lock().unwrap();
        state.tables.get(table).expect("no such mock table").rows.clone()
    }

    /// The operations log so far.
    pub fn ops(&self) -> Vec<MockOp> {
        self.state.lock().unwrap().ops.clone()
    }

    /// How many statements have been prepared.
    pub fn prepare_count(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, MockOp::Prepare { .. }))
            .count()
    }
}

impl Connection for MockConnection {
    fn prepare(&mut self, sql: &str) -> Result<StatementId> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(MockOp::Prepare {
            sql: sql.to_owned(),
        });

        let (table, columns) = parse_insert(sql);
        if !state.tables.contains_key(&table) {
            return Err(Error::driver(format!(
                "relation \"{table}\" does not exist"
            )));
        }

        let id = StatementId::new(state.next_statement);
        state.next_statement += 1;
        state.statements.insert(
            id,
            PreparedInsert {
                sql: sql.to_owned(),
                table,
                columns,
            },
        );
        Ok(id)
    }

    fn execute(&mut self, statement: StatementId, params: &[Value]) -> Result<u64> {
        let mut state = self.state.lock().unwrap();

        let (sql, table_name, columns) = {
            let prepared = state
                .statements
                .get(&statement)
                .expect("statement was not prepared on this connection");
            (
                prepared.sql.clone(),
                prepared.table.clone(),
                prepared.columns.clone(),
            )
        };

        state.ops.push(MockOp::Execute {
            sql,
            params: params.to_vec(),
        });

        assert_eq!(params.len(), columns.len());

        let table = state
            .tables
            .get_mut(&table_name)
            .ok_or_else(|| Error::driver(format!("relation \"{table_name}\" does not exist")))?;

        // Align the positional parameters with the table's column order.
        let row = table
            .columns
            .iter()
            .map(|column| {
                columns
                    .iter()
                    .position(|c| c == column)
                    .map(|index| params[index].clone())
                    .unwrap_or(Value::Null)
            })
            .collect();
        table.rows.push(row);

        Ok(1)
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Rows> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(MockOp::Query {
            sql: sql.to_owned(),
            params: params.to_vec(),
        });

        let (table_name, columns, filter_keys) = parse_select(sql);
        assert_eq!(params.len(), filter_keys.len());

        let table = state
            .tables
            .get(&table_name)
            .ok_or_else(|| Error::driver(format!("relation \"{table_name}\" does not exist")))?;

        let column_index = |name: &str| {
            table
                .columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| Error::driver(format!("column \"{name}\" does not exist")))
        };

        let mut selected = Vec::with_capacity(columns.len());
        for column in &columns {
            selected.push(column_index(column)?);
        }
        let mut filters = Vec::with_capacity(filter_keys.len());
        for (key, value) in filter_keys.iter().zip(params) {
            filters.push((column_index(key)?, value));
        }

        let rows = table
            .rows
            .iter()
            .filter(|row| filters.iter().all(|(index, value)| row[*index] == **value))
            .map(|row| selected.iter().map(|index| row[*index].clone()).collect())
            .collect();

        Ok(Rows::from_vec(rows))
    }

    fn batch_execute(&mut self, sql: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(MockOp::BatchExecute {
            sql: sql.to_owned(),
        });
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.statements.clear();
        state.ops.push(MockOp::Close);
        Ok(())
    }
}

/// Quoted identifiers, in order of appearance.
fn idents(sql: &str) -> Vec<String> {
    sql.split('"')
        .enumerate()
        .filter(|(i, _)| i % 2 == 1)
        .map(|(_, ident)| ident.to_owned())
        .collect()
}

/// `INSERT INTO "t" ("a", "b") VALUES ($1, $2);` -> ("t", ["a", "b"])
fn parse_insert(sql: &str) -> (String, Vec<String>) {
    let mut idents = idents(sql).into_iter();
    let table = idents.next().expect("insert names no table");
    (table, idents.collect())
}

/// `SELECT "a", "b" FROM "t" WHERE "k" = $1;` -> ("t", ["a", "b"], ["k"])
fn parse_select(sql: &str) -> (String, Vec<String>, Vec<String>) {
    let (head, tail) = sql
        .split_once(" FROM ")
        .expect("select has no FROM clause");

    let columns = idents(head);
    let mut tail = idents(tail).into_iter();
    let table = tail.next().expect("select names no table");
    (table, columns, tail.collect())
}
