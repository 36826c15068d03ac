use criterion::{criterion_group, criterion_main, Criterion};
use lucky_session::inmemory::InMemorySessionStore;
use lucky_session::store::SessionStore;
use lucky_session::{Attributes, Session, SessionId};
use std::hint::black_box;
use tokio::runtime::Runtime;

fn inmemory_benches(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime");
    let store = InMemorySessionStore::new();

    c.bench_function("inmemory_save", |b| {
        let mut counter = 0u64;
        b.to_async(&rt).iter(|| {
            counter = counter.wrapping_add(1);
            let bucket = counter % 16;
            let mut session = Session::loaded(
                SessionId::from(format!("bench-save-{bucket}")),
                Attributes::new(),
            );
            session.insert("lucky_num", (counter % 10) as i64 + 1);
            let store = &store;
            async move {
                store.save(&session, None).await.expect("save");
            }
        })
    });

    let hit_id = SessionId::from("bench-load-hit");
    rt.block_on(async {
        let mut session = Session::loaded(hit_id.clone(), Attributes::new());
        session.insert("lucky_num", 7);
        store.save(&session, None).await.expect("seed");
    });
    c.bench_function("inmemory_load_hit", |b| {
        b.to_async(&rt).iter(|| async {
            let session = store.load(&hit_id).await.expect("load");
            black_box(session);
        })
    });

    let miss_id = SessionId::from("bench-load-miss");
    c.bench_function("inmemory_load_miss", |b| {
        b.to_async(&rt).iter(|| async {
            let session = store.load(&miss_id).await.expect("load");
            black_box(session);
        })
    });
}

criterion_group!(benches, inmemory_benches);
criterion_main!(benches);
