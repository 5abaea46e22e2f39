use covisit_db::schema::{CURRENT_VERSION, create_schema, open_database, open_memory};

#[test]
fn create_schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();

    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='entries'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
}

#[test]
fn open_database_creates_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("covisit.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute("INSERT INTO entries (id, name) VALUES (1, 'x')", [])
            .unwrap();
    }

    let conn = open_database(&path).unwrap();
    let version: i32 = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
