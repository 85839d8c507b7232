use crate::traits::KeyValueStore;
use crate::{MemoryStore, SqliteStore};

use super::create_test_store;

#[test]
fn sqlite_put_get_delete() {
    let (store, _temp_dir) = create_test_store();
    assert_eq!(store.get_value("missing").unwrap(), None);

    store.put_value("k", "v1").unwrap();
    store.put_value("k", "v2").unwrap();
    assert_eq!(store.get_value("k").unwrap().as_deref(), Some("v2"));

    assert!(store.delete_value("k").unwrap());
    assert!(!store.delete_value("k").unwrap());
    assert_eq!(store.get_value("k").unwrap(), None);
}

#[test]
fn sqlite_values_survive_reopen() {
    let (store, temp_dir) = create_test_store();
    store.put_value("basket", "[]").unwrap();
    drop(store);

    let reopened = SqliteStore::open(&temp_dir.path().join("nested").join("test.db")).unwrap();
    assert_eq!(reopened.get_value("basket").unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn sqlite_async_trait_delegates() {
    let (store, _temp_dir) = create_test_store();
    store.set("a", "1").await.unwrap();
    assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
    assert!(store.remove("a").await.unwrap());
    assert_eq!(store.get("a").await.unwrap(), None);
}

#[tokio::test]
async fn memory_store_behaves_like_sqlite() {
    let store = MemoryStore::new();
    assert_eq!(store.get("a").await.unwrap(), None);
    store.set("a", "1").await.unwrap();
    store.set("a", "2").await.unwrap();
    assert_eq!(store.get("a").await.unwrap().as_deref(), Some("2"));
    assert!(store.remove("a").await.unwrap());
    assert!(!store.remove("a").await.unwrap());
}
