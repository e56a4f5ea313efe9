//! Integration tests for the cache stack against a real `SQLite` file.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::thread;
use wikihop::models::CacheRecord;
use wikihop::source::StaticLinkSource;
use wikihop::storage::{ReferenceStore, SqliteReferenceStore};
use wikihop::LinkCache;

#[test]
fn lookups_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(StaticLinkSource::new().with_page(
        "Albert Einstein",
        &["Physics", "Ulm", "Category:Noise"],
        &["1879 births"],
    ));
    let store = Arc::new(SqliteReferenceStore::new(dir.path().join("pages.db")).unwrap());
    let cache = LinkCache::new(source.clone(), store);

    let first = cache.get_references("Albert Einstein");
    let second = cache.get_references("Albert Einstein");

    assert_eq!(first, second);
    assert_eq!(first, vec!["Physics", "Ulm", "1879 births"]);
    assert_eq!(source.resolve_calls(), 1);
}

#[test]
fn durable_tier_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pages.db");

    // First session fetches from the source and writes through
    {
        let source = Arc::new(StaticLinkSource::new().with_page("A", &["B"], &[]));
        let store = Arc::new(SqliteReferenceStore::new(&db_path).unwrap());
        let cache = LinkCache::new(source, store);
        assert_eq!(cache.get_references("A"), vec!["B"]);
    }

    // Second session has no source knowledge of A; the durable tier
    // must answer
    {
        let source = Arc::new(StaticLinkSource::new());
        let store = Arc::new(SqliteReferenceStore::new(&db_path).unwrap());
        let cache = LinkCache::new(source.clone(), store);
        assert_eq!(cache.get_references("A"), vec!["B"]);
        assert_eq!(source.resolve_calls(), 0);
    }
}

#[test]
fn not_found_is_not_persisted() {
    // A transient miss must not poison the durable cache across restarts
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pages.db");

    {
        let source = Arc::new(StaticLinkSource::new());
        let store = Arc::new(SqliteReferenceStore::new(&db_path).unwrap());
        let cache = LinkCache::new(source, store);
        assert!(cache.get_references("Flaky page").is_empty());
    }

    {
        let source = Arc::new(StaticLinkSource::new().with_page("Flaky page", &["B"], &[]));
        let store = Arc::new(SqliteReferenceStore::new(&db_path).unwrap());
        let cache = LinkCache::new(source, store);
        assert_eq!(cache.get_references("Flaky page"), vec!["B"]);
    }
}

#[test]
fn concurrent_workers_share_one_cache() {
    let dir = tempfile::tempdir().unwrap();
    let source = StaticLinkSource::new();
    for i in 0..32 {
        source.insert_page(&format!("T{i}"), &["X"], &[]);
    }
    let source = Arc::new(source);
    let store = Arc::new(SqliteReferenceStore::new(dir.path().join("pages.db")).unwrap());
    let cache = Arc::new(LinkCache::new(source, store));

    let mut handles = vec![];
    for worker in 0..4 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..32 {
                let topic = format!("T{}", (i + worker * 7) % 32);
                assert_eq!(cache.get_references(&topic), vec!["X"]);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = cache.stats();
    assert_eq!(stats.durable_records, Some(32));
}

#[test]
fn one_store_handle_per_worker_is_safe() {
    // Workers holding separate handles against the same database file must
    // tolerate interleaved reads and writes; WAL mode plus busy_timeout
    // carry this
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pages.db");
    // Create the schema before spawning workers
    drop(SqliteReferenceStore::new(&db_path).unwrap());

    let mut handles = vec![];
    for worker in 0..4u32 {
        let db_path = db_path.clone();
        handles.push(thread::spawn(move || {
            let store = SqliteReferenceStore::new(&db_path).unwrap();
            for i in 0..16 {
                let record = CacheRecord::new(format!("W{worker}-{i}"), vec!["X".to_string()]);
                store.save(&record).unwrap();
                let loaded = store.load(&record.topic).unwrap().unwrap();
                assert_eq!(loaded.references, vec!["X"]);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let store = SqliteReferenceStore::new(&db_path).unwrap();
    assert_eq!(store.count().unwrap(), 64);
}

#[test]
fn same_key_same_value_writes_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteReferenceStore::new(dir.path().join("pages.db")).unwrap();

    let record = CacheRecord::new("A", vec!["B".to_string()]);
    store.save(&record).unwrap();
    store.save(&record).unwrap();
    store.save(&record).unwrap();

    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.load("A").unwrap().unwrap().references, vec!["B"]);
}
