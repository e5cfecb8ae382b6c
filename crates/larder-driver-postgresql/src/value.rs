use larder_core::{Error, Result, Value as CoreValue};
use postgres::{
    types::{accepts, private::BytesMut, to_sql_checked, IsNull, ToSql, Type},
    Column, Row,
};

/// Bridges core values to libpq's binary parameter encoding.
#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

type ToSqlResult = std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>>;

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> ToSqlResult
    where
        Self: Sized,
    {
        match &self.0 {
            CoreValue::Bool(value) => value.to_sql(ty, out),
            CoreValue::I16(value) => {
                if *ty == Type::INT2 {
                    value.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    (*value as i32).to_sql(ty, out)
                } else if *ty == Type::INT8 {
                    (*value as i64).to_sql(ty, out)
                } else {
                    Err(unbindable(self, ty))
                }
            }
            CoreValue::I32(value) => {
                if *ty == Type::INT4 {
                    value.to_sql(ty, out)
                } else if *ty == Type::INT8 {
                    (*value as i64).to_sql(ty, out)
                } else {
                    Err(unbindable(self, ty))
                }
            }
            CoreValue::I64(value) => {
                if *ty == Type::INT8 {
                    value.to_sql(ty, out)
                } else {
                    Err(unbindable(self, ty))
                }
            }
            CoreValue::F32(value) => {
                if *ty == Type::FLOAT4 {
                    value.to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    (*value as f64).to_sql(ty, out)
                } else {
                    Err(unbindable(self, ty))
                }
            }
            CoreValue::F64(value) => {
                if *ty == Type::FLOAT8 {
                    value.to_sql(ty, out)
                } else {
                    Err(unbindable(self, ty))
                }
            }
            CoreValue::String(value) => value.to_sql(ty, out),
            CoreValue::Bytes(value) => value.to_sql(ty, out),
            CoreValue::Timestamp(value) => value.to_sql(ty, out),
            CoreValue::Null => Ok(IsNull::Yes),
        }
    }

    accepts!(
        BOOL,
        INT2,
        INT4,
        INT8,
        FLOAT4,
        FLOAT8,
        TEXT,
        VARCHAR,
        BPCHAR,
        TIMESTAMP,
        TIMESTAMPTZ,
        BYTEA
    );

    to_sql_checked!();
}

fn unbindable(value: &Value, ty: &Type) -> Box<dyn std::error::Error + Sync + Send> {
    format!("cannot bind {} value to a {ty} column", value.0.kind()).into()
}

/// Converts a result row into core values, one per selected column.
pub(crate) fn row_to_values(row: &Row) -> Result<Vec<CoreValue>> {
    let mut values = Vec::with_capacity(row.len());
    for (index, column) in row.columns().iter().enumerate() {
        values.push(cell_to_value(row, index, column)?);
    }
    Ok(values)
}

fn cell_to_value(row: &Row, index: usize, column: &Column) -> Result<CoreValue> {
    let ty = column.type_();

    if ty == &Type::BOOL {
        get(row, index, CoreValue::Bool)
    } else if ty == &Type::INT2 {
        get(row, index, CoreValue::I16)
    } else if ty == &Type::INT4 {
        get(row, index, CoreValue::I32)
    } else if ty == &Type::INT8 {
        get(row, index, CoreValue::I64)
    } else if ty == &Type::FLOAT4 {
        get(row, index, CoreValue::F32)
    } else if ty == &Type::FLOAT8 {
        get(row, index, CoreValue::F64)
    } else if ty == &Type::TEXT || ty == &Type::VARCHAR || ty == &Type::BPCHAR {
        get(row, index, CoreValue::String)
    } else if ty == &Type::TIMESTAMP || ty == &Type::TIMESTAMPTZ {
        get(row, index, CoreValue::Timestamp)
    } else if ty == &Type::BYTEA {
        get(row, index, CoreValue::Bytes)
    } else {
        Err(Error::type_conversion(ty.to_string(), "a record field"))
    }
}

fn get<'a, T>(row: &'a Row, index: usize, variant: fn(T) -> CoreValue) -> Result<CoreValue>
where
    T: postgres::types::FromSql<'a>,
{
    let cell = row
        .try_get::<usize, Option<T>>(index)
        .map_err(Error::driver)?;
    Ok(cell.map(variant).unwrap_or(CoreValue::Null))
}
