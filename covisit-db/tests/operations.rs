use covisit_client::CatalogEntry;
use covisit_db::*;

fn entry(id: i64, name: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
    }
}

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn insert_entry_and_check_existence() {
    let conn = open_memory().unwrap();
    insert_entry(&conn, &entry(730, "Counter-Strike 2")).unwrap();

    assert!(entry_exists(&conn, 730).unwrap());
    assert!(!entry_exists(&conn, 731).unwrap());
}

#[test]
fn insert_entry_is_idempotent() {
    let conn = open_memory().unwrap();
    insert_entry(&conn, &entry(730, "Counter-Strike 2")).unwrap();
    insert_entry(&conn, &entry(730, "Renamed Later")).unwrap();

    let name: String = conn
        .query_row("SELECT name FROM entries WHERE id = 730", [], |row| {
            row.get(0)
        })
        .unwrap();
    // Entries are immutable once fetched
    assert_eq!(name, "Counter-Strike 2");
}

#[test]
fn aggregate_preserves_order_and_duplicates() {
    let conn = open_memory().unwrap();
    insert_entry(&conn, &entry(10, "Half-Life")).unwrap();
    insert_review_aggregate(&conn, 10, &ids(&["u3", "u1", "u3", "u2"])).unwrap();

    let reviewers = reviewer_ids_for_entry(&conn, 10).unwrap();
    assert_eq!(reviewers, ids(&["u3", "u1", "u3", "u2"]));
}

#[test]
fn aggregate_resweep_replaces_previous_sequence() {
    let conn = open_memory().unwrap();
    insert_entry(&conn, &entry(10, "Half-Life")).unwrap();
    insert_review_aggregate(&conn, 10, &ids(&["u1", "u2"])).unwrap();
    insert_review_aggregate(&conn, 10, &ids(&["u9"])).unwrap();

    assert_eq!(reviewer_ids_for_entry(&conn, 10).unwrap(), ids(&["u9"]));
    let count: i64 = conn
        .query_row(
            "SELECT reviewer_count FROM review_aggregates WHERE entry_id = 10",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn linking_is_idempotent() {
    let conn = open_memory().unwrap();
    let reviewers = ids(&["u1", "u2", "u3"]);

    let first = link_reviewer_entries(&conn, 42, &reviewers).unwrap();
    assert_eq!(first, 3);

    let second = link_reviewer_entries(&conn, 42, &reviewers).unwrap();
    assert_eq!(second, 0);

    assert_eq!(entries_for_reviewer(&conn, "u1").unwrap(), vec![42]);
}

#[test]
fn links_only_grow() {
    let conn = open_memory().unwrap();
    link_reviewer_entries(&conn, 1, &ids(&["u1"])).unwrap();
    link_reviewer_entries(&conn, 2, &ids(&["u1"])).unwrap();
    link_reviewer_entries(&conn, 2, &ids(&["u1", "u2"])).unwrap();

    assert_eq!(entries_for_reviewer(&conn, "u1").unwrap(), vec![1, 2]);
    assert_eq!(entries_for_reviewer(&conn, "u2").unwrap(), vec![2]);
}

#[test]
fn replace_similarity_overwrites_old_ranking() {
    let conn = open_memory().unwrap();
    replace_similarity(&conn, 5, &[(7, 10), (9, 3)]).unwrap();
    replace_similarity(&conn, 5, &[(9, 4)]).unwrap();

    assert_eq!(similarity_for_entry(&conn, 5).unwrap(), vec![(9, 4)]);
}
