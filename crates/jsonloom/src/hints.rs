//! Sticky size hints.
//!
//! For every `(value type, symbol, resolver)` triple the façade remembers how
//! many symbols the last operation produced or consumed, and pre-sizes the
//! next buffer accordingly. This is a heuristic, not a correctness concern:
//! plain relaxed stores, last writer wins.

use std::any::TypeId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use dashmap::DashMap;

/// Starting guess before anything has been observed.
pub(crate) const DEFAULT_HINT: usize = 256;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Dir {
    Write,
    Read,
}

fn table() -> &'static DashMap<(TypeId, Dir), AtomicUsize> {
    static HINTS: OnceLock<DashMap<(TypeId, Dir), AtomicUsize>> = OnceLock::new();
    HINTS.get_or_init(DashMap::new)
}

/// The capacity to pre-size the next buffer for triple `K` with.
pub(crate) fn presize<K: 'static>(dir: Dir) -> usize {
    table()
        .get(&(TypeId::of::<K>(), dir))
        .map_or(DEFAULT_HINT, |hint| hint.load(Ordering::Relaxed))
}

/// Record the symbol count of a completed operation.
pub(crate) fn observe<K: 'static>(dir: Dir, symbols: usize) {
    table()
        .entry((TypeId::of::<K>(), dir))
        .or_insert_with(|| AtomicUsize::new(DEFAULT_HINT))
        .store(symbols, Ordering::Relaxed);
}
