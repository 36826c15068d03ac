use lucky_session::inmemory::InMemorySessionStore;
use lucky_session::store::SessionStore;
use lucky_session::{AttrValue, SessionId};

#[tokio::test]
async fn new_session_has_fresh_id_and_empty_attributes() {
    let store = InMemorySessionStore::new();

    let first = store.new_session();
    let second = store.new_session();

    assert!(first.is_new());
    assert!(first.attributes().is_empty());
    assert_ne!(first.id(), second.id(), "ids must be collision-resistant");

    // `new_session` must not touch the cache: the id is unknown to `load`.
    let probe = store.load(first.id()).await.expect("load");
    assert!(probe.attributes().is_empty());
}

#[tokio::test]
async fn save_then_load_roundtrips_attributes() {
    let store = InMemorySessionStore::new();

    let mut session = store.new_session();
    session.insert("lucky_num", 7);
    session.insert("greeted", true);
    store.save(&session, None).await.expect("save");

    let reloaded = store.load(session.id()).await.expect("load");
    assert!(!reloaded.is_new());
    assert!(!reloaded.is_dirty());
    assert_eq!(
        reloaded.get("lucky_num").and_then(AttrValue::as_int),
        Some(7)
    );
    assert_eq!(
        reloaded.get("greeted").and_then(AttrValue::as_bool),
        Some(true)
    );
}

#[tokio::test]
async fn load_miss_preserves_supplied_id() {
    let store = InMemorySessionStore::new();
    let ghost = SessionId::from("never-persisted");

    let session = store.load(&ghost).await.expect("load");

    assert_eq!(session.id(), &ghost);
    assert!(session.attributes().is_empty());
    assert!(!session.is_new(), "a miss degrades to an empty session, not a new one");
    assert!(!session.should_save());
}

#[tokio::test]
async fn attributes_saved_under_client_supplied_id_are_retrievable() {
    let store = InMemorySessionStore::new();
    let ghost = SessionId::from("cookie-from-elsewhere");

    let mut session = store.load(&ghost).await.expect("load");
    session.insert("lucky_num", 3);
    store.save(&session, None).await.expect("save");

    let reloaded = store.load(&ghost).await.expect("reload");
    assert_eq!(
        reloaded.get("lucky_num").and_then(AttrValue::as_int),
        Some(3)
    );
}

#[tokio::test]
async fn delete_removes_entry() {
    let store = InMemorySessionStore::new();

    let mut session = store.new_session();
    session.insert("lucky_num", 9);
    store.save(&session, None).await.expect("save");

    assert!(store.delete(session.id()).await.expect("delete"));
    assert!(!store.delete(session.id()).await.expect("second delete"));

    let gone = store.load(session.id()).await.expect("load after delete");
    assert!(gone.attributes().is_empty());
}
