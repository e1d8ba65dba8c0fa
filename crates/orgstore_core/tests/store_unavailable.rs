use orgstore_core::{ErrorKind, ReferentialPolicy, Store, StoreConfig};
use rusqlite::Connection;

#[test]
fn exclusive_lock_held_elsewhere_surfaces_as_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("orgstore.sqlite3");
    let mut store = Store::open(&StoreConfig {
        db_path: db_path.clone(),
        referential_policy: ReferentialPolicy::Orphan,
        ..StoreConfig::default()
    })
    .unwrap();

    let holder = Connection::open(&db_path).unwrap();
    holder.execute_batch("BEGIN EXCLUSIVE;").unwrap();

    // Gives up after the store's busy timeout.
    match store.organizations() {
        Ok(_) => panic!("expected the locked database to be unavailable"),
        Err(err) => assert_eq!(err.kind(), ErrorKind::Unavailable, "{err}"),
    }

    holder.execute_batch("ROLLBACK;").unwrap();
    let organizations = store.organizations().unwrap();
    assert!(organizations.list_organizations().unwrap().is_empty());
}
