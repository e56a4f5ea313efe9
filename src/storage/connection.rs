//! Shared connection handling for the `SQLite` store.
//!
//! Provides utilities for managing `SQLite` connections with proper mutex
//! handling, poison recovery, and pragmas tuned for concurrent access.

use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};

/// Helper to acquire a mutex lock with poison recovery.
///
/// If the mutex is poisoned (due to a panic in a previous critical section),
/// we recover the inner value and log a warning. This prevents cascading
/// failures when one operation panics.
pub fn acquire_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            // Recover from poison - the connection state is still valid
            tracing::warn!("SQLite mutex was poisoned, recovering");
            metrics::counter!("wikihop_sqlite_mutex_poison_recovery_total").increment(1);
            poisoned.into_inner()
        }
    }
}

/// Configures a `SQLite` connection for concurrent cache access.
///
/// # Configuration Applied
///
/// - **WAL mode**: concurrent readers with a single writer, which matches
///   multiple search workers sharing one cache database
/// - **NORMAL synchronous**: balances durability with performance; the cache
///   can always be refetched, so full durability is not worth the fsyncs
/// - **`busy_timeout`**: waits up to 5 seconds for locks instead of failing
///   immediately with `SQLITE_BUSY`
pub fn configure_connection(conn: &Connection) {
    // journal_mode returns a string result which would make execute_batch
    // fail, so use pragma_update and ignore the returned value
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    let _ = conn.pragma_update(None, "busy_timeout", "5000");
}
