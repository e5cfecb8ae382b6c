use larder::{record, Value};
use pretty_assertions::assert_eq;
use tests::mock_db;

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Labeled {
        id: i32,
        #[column = "name"]
        sträng: String,
    }
}

#[test]
fn override_is_used_in_generated_statements() {
    let (db, mock) = mock_db();
    mock.create_table("t", &["id", "name"]);

    let storer = db.storer::<Labeled>("t").unwrap();
    assert_eq!(
        storer.sql(),
        "INSERT INTO \"t\" (\"id\", \"name\") VALUES ($1, $2);"
    );
    assert!(!storer.sql().contains("sträng"));
}

#[test]
fn value_round_trips_under_the_overridden_column() {
    let (db, mock) = mock_db();
    mock.create_table("t", &["id", "name"]);

    let storer = db.storer::<Labeled>("t").unwrap();
    storer
        .store(&Labeled {
            id: 1,
            sträng: "H.E.L.L".to_owned(),
        })
        .unwrap();

    // The cell landed in the `name` column of the underlying table.
    assert_eq!(
        mock.table_rows("t"),
        vec![vec![Value::from(1), Value::from("H.E.L.L")]]
    );

    // And filtering by the column name finds it again.
    let mut retriever = db
        .retriever::<Labeled>("t", &[("name", Value::from("H.E.L.L"))])
        .unwrap();
    let mut found = Labeled::default();
    retriever.retrieve(&mut found).unwrap();
    assert_eq!(found.sträng, "H.E.L.L");
}
