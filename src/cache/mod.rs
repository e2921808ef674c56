//! Process-lifetime store of fetched instrument histories, keyed by ticker.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::core::InstrumentHistory;

/// A shared, ticker-addressed store of instrument histories.
///
/// Clones share the same storage, so a fetcher, a preloader and the rendering
/// layer can all hold one. Keys are case-sensitive and one entry exists per
/// ticker. There is no TTL and no automatic eviction; [`clear`](Self::clear)
/// purges everything.
///
/// Every operation is synchronous and holds the lock only for the map access,
/// so no caller ever waits across a suspension point. Reads hand out owned
/// copies; mutating a returned history never touches the stored entry.
#[derive(Debug, Clone, Default)]
pub struct HistoryCache {
    map: Arc<RwLock<HashMap<String, InstrumentHistory>>>,
}

impl HistoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored history for `ticker`, if any.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<InstrumentHistory> {
        let guard = self.map.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(ticker).cloned()
    }

    /// Stores `history` under `ticker`, replacing any previous entry.
    pub fn put(&self, ticker: impl Into<String>, history: InstrumentHistory) {
        let mut guard = self.map.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(ticker.into(), history);
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut guard = self.map.write().unwrap_or_else(PoisonError::into_inner);
        guard.clear();
    }

    /// Removes and returns the entry for `ticker`.
    pub fn remove(&self, ticker: &str) -> Option<InstrumentHistory> {
        let mut guard = self.map.write().unwrap_or_else(PoisonError::into_inner);
        guard.remove(ticker)
    }

    #[must_use]
    pub fn contains(&self, ticker: &str) -> bool {
        let guard = self.map.read().unwrap_or_else(PoisonError::into_inner);
        guard.contains_key(ticker)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let guard = self.map.read().unwrap_or_else(PoisonError::into_inner);
        guard.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached tickers, sorted.
    #[must_use]
    pub fn tickers(&self) -> Vec<String> {
        let guard = self.map.read().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<String> = guard.keys().cloned().collect();
        out.sort();
        out
    }
}
