pub mod driver;
pub use driver::Connection;

mod error;
pub use error::{Error, Result};

pub mod mapping;
pub use mapping::FieldMapping;

mod record;
pub use record::{FieldDescriptor, Record};

mod value;
pub use value::{FromValue, Value};

mod macros;
