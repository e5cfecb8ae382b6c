pub mod mock;
pub use mock::{MockConnection, MockOp};

use larder::Db;

/// A database handle over a fresh in-memory mock, plus a handle to the mock
/// for seeding tables and inspecting what the mapping layer did to it.
pub fn mock_db() -> (Db, MockConnection) {
    let mock = MockConnection::new();
    let handle = mock.clone();
    (Db::new(mock), handle)
}
