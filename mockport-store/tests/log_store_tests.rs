use chrono::{Duration, TimeZone, Utc};
use mockport_core::id::ValidId;
use mockport_core::log::LogRecordInput;
use mockport_core::repository::{LogReader, LogWriter};
use mockport_store::journal::{self, LogJournal};
use mockport_store::MemoryLogStore;
use std::sync::Arc;
use uuid::Uuid;

fn input(api_id: Uuid, status_code: u16) -> LogRecordInput {
    LogRecordInput {
        api_id,
        route_id: Uuid::new_v4(),
        method: "GET".into(),
        path: "/orders".into(),
        status_code,
        latency_ms: 100,
    }
}

/// Deterministic permutation of 0..n without pulling in an RNG.
fn scrambled(n: i64, stride: i64) -> Vec<i64> {
    (0..n).map(|i| (i * stride) % n).collect()
}

#[tokio::test]
async fn recent_is_strictly_descending_for_any_insertion_order() {
    let api = Uuid::new_v4();
    let base = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();

    for stride in [1, 7, 11, 13, 17, 29] {
        let store = MemoryLogStore::new();
        let records = scrambled(30, stride)
            .into_iter()
            .map(|offset| {
                input(api, 200).into_record(Uuid::new_v4(), base + Duration::milliseconds(offset))
            })
            .collect();
        store.restore(records).unwrap();

        let recent = store.recent(&ValidId::from(api), 10).await.unwrap();
        assert_eq!(recent.len(), 10);
        for pair in recent.windows(2) {
            assert!(
                pair[0].created_at > pair[1].created_at,
                "stride {stride}: {} !> {}",
                pair[0].created_at,
                pair[1].created_at
            );
        }
        assert_eq!(recent[0].created_at, base + Duration::milliseconds(29));
    }
}

#[tokio::test]
async fn recent_never_exceeds_limit() {
    let store = MemoryLogStore::new();
    let api = Uuid::new_v4();
    for n in 0..15 {
        let got = store.recent(&ValidId::from(api), 10).await.unwrap();
        assert_eq!(got.len(), n.min(10));
        store.append(input(api, 200)).await.unwrap();
    }
}

#[tokio::test]
async fn concurrent_appends_are_all_recorded() {
    let store = Arc::new(MemoryLogStore::new());
    let api = Uuid::new_v4();

    let mut handles = Vec::new();
    for i in 0..32u16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.append(input(api, 200 + i)).await.unwrap()
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    let all = store.recent(&ValidId::from(api), 100).await.unwrap();
    assert_eq!(all.len(), 32);
    for pair in all.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn journal_replay_restores_monitor_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls.jsonl");
    let api = Uuid::new_v4();

    let written = {
        let store = MemoryLogStore::with_journal(LogJournal::open(&path).unwrap());
        let mut ids = Vec::new();
        for status in [200, 500, 201] {
            ids.push(store.append(input(api, status)).await.unwrap().id);
        }
        ids
    };

    let restored = MemoryLogStore::new();
    let count = restored.restore(journal::replay(&path).unwrap()).unwrap();
    assert_eq!(count, 3);

    let recent = restored.recent(&ValidId::from(api), 10).await.unwrap();
    let ids: Vec<Uuid> = recent.iter().map(|r| r.id).collect();
    assert_eq!(ids, written.into_iter().rev().collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_journaled_appends_replay_in_memory_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls.jsonl");
    let api = Uuid::new_v4();
    let store = Arc::new(MemoryLogStore::with_journal(LogJournal::open(&path).unwrap()));

    let mut handles = Vec::new();
    for i in 0..24u16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.append(input(api, 200 + i)).await.unwrap()
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    let restored = MemoryLogStore::new();
    restored.restore(journal::replay(&path).unwrap()).unwrap();

    let live = store.recent(&ValidId::from(api), 100).await.unwrap();
    let replayed = restored.recent(&ValidId::from(api), 100).await.unwrap();
    assert_eq!(live.len(), 24);
    assert_eq!(live, replayed);
}
