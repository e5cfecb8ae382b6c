use larder::record;
use tests::{mock_db, MockOp};

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Row {
        id: i32,
    }
}

#[test]
fn operations_after_close_fail_closed() {
    let (db, mock) = mock_db();
    mock.create_table("t", &["id"]);

    let storer = db.storer::<Row>("t").unwrap();

    db.close().unwrap();
    assert!(mock.ops().contains(&MockOp::Close));

    // New storers, retrievers, raw statements: all closed.
    assert!(db.storer::<Row>("t").unwrap_err().is_closed());
    assert!(db.retriever::<Row>("t", &[]).unwrap_err().is_closed());
    assert!(db.batch_execute("SELECT 1").unwrap_err().is_closed());

    // A storer handed out before the close is closed too.
    assert!(storer.store(&Row { id: 1 }).unwrap_err().is_closed());
}

#[test]
fn close_is_idempotent() {
    let (db, mock) = mock_db();
    mock.create_table("t", &["id"]);

    db.close().unwrap();
    db.close().unwrap();

    let closes = mock
        .ops()
        .iter()
        .filter(|op| matches!(op, MockOp::Close))
        .count();
    assert_eq!(closes, 1);
}

#[test]
fn clones_share_the_closed_state() {
    let (db, mock) = mock_db();
    mock.create_table("t", &["id"]);

    let clone = db.clone();
    db.close().unwrap();

    assert!(clone.storer::<Row>("t").unwrap_err().is_closed());
}
