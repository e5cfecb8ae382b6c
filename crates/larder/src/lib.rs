mod db;
pub use db::Db;

mod retriever;
pub use retriever::Retriever;

mod storer;
pub use storer::Storer;

pub use larder_core::{
    driver, record, Connection, Error, FieldDescriptor, FieldMapping, FromValue, Record, Result,
    Value,
};

#[cfg(feature = "postgresql")]
pub use larder_driver_postgresql::{PostgreSQL, TlsMode};
