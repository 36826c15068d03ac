use lucky_session::inmemory::InMemorySessionStore;
use lucky_session::store::SessionStore;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn inmemory_entry_expires_after_ttl() {
    let store = InMemorySessionStore::new();

    let mut session = store.new_session();
    session.insert("lucky_num", 5);
    store
        .save(&session, Some(Duration::from_millis(300)))
        .await
        .expect("save");

    let fresh = store.load(session.id()).await.expect("load before expiry");
    assert!(!fresh.attributes().is_empty());

    sleep(Duration::from_millis(600)).await;

    let stale = store.load(session.id()).await.expect("load after expiry");
    assert!(stale.attributes().is_empty(), "expired entry must read as a miss");
    assert_eq!(stale.id(), session.id());
}

#[tokio::test]
async fn zero_ttl_means_never_expire() {
    let store = InMemorySessionStore::new().with_default_ttl(Duration::from_millis(100));

    let mut session = store.new_session();
    session.insert("lucky_num", 8);
    store
        .save(&session, Some(Duration::ZERO))
        .await
        .expect("save");

    sleep(Duration::from_millis(400)).await;

    let still_there = store.load(session.id()).await.expect("load");
    assert!(!still_there.attributes().is_empty());
}

#[tokio::test]
async fn default_ttl_applies_when_save_gets_none() {
    let store = InMemorySessionStore::new().with_default_ttl(Duration::from_millis(200));

    let mut session = store.new_session();
    session.insert("lucky_num", 2);
    store.save(&session, None).await.expect("save");

    sleep(Duration::from_millis(500)).await;

    let stale = store.load(session.id()).await.expect("load");
    assert!(stale.attributes().is_empty());
}

#[cfg(feature = "redis")]
mod redis_ttl {
    use super::*;
    use lucky_session::redis_store::RedisSessionStore;
    use uuid::Uuid;

    fn redis_store() -> Option<RedisSessionStore> {
        let url = std::env::var("REDIS_URL").ok()?;
        let namespace = format!("SGS_test_{}_", Uuid::new_v4().simple());
        RedisSessionStore::from_url_with_namespace(url, namespace).ok()
    }

    #[tokio::test]
    async fn redis_expiry_respected() {
        let Some(store) = redis_store() else {
            eprintln!("Skipping redis_expiry_respected - REDIS_URL not set or invalid");
            return;
        };

        let mut session = store.new_session();
        session.insert("lucky_num", 4);
        store
            .save(&session, Some(Duration::from_secs(1)))
            .await
            .expect("save redis");

        let fresh = store.load(session.id()).await.expect("load redis");
        assert!(!fresh.attributes().is_empty());

        sleep(Duration::from_millis(1500)).await;

        let stale = store.load(session.id()).await.expect("load after expiry");
        assert!(stale.attributes().is_empty());
    }
}
