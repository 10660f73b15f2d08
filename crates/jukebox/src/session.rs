//! Per-channel session state
//!
//! A session holds the last result set shown in a channel and the gong tracker for that
//! channel. Sessions are created on first use and live for the rest of the process.
//!
//! Locks are only held for the duration of a single read or write, never across an await, so
//! two commands running concurrently in the same channel can interleave and the last writer
//! wins. Commands in different channels never share state.

use std::{collections::HashMap, num::NonZeroUsize, sync::Arc};

use parking_lot::Mutex;

use crate::{
    catalog::{CatalogItem, ItemKind},
    gong::{VoteOutcome, VoteTracker},
};

/// The most recently displayed list of items, all of one kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    kind: Option<ItemKind>,
    items: Vec<CatalogItem>,
}

impl ResultSet {
    #[must_use]
    pub fn new(kind: ItemKind, items: Vec<CatalogItem>) -> Self {
        Self {
            kind: Some(kind),
            items,
        }
    }

    /// Kind of the last search, `None` if nothing has been searched yet
    #[must_use]
    pub fn kind(&self) -> Option<ItemKind> {
        self.kind
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items, but only if the set holds `kind`
    #[must_use]
    pub fn items_of(&self, kind: ItemKind) -> &[CatalogItem] {
        if self.kind == Some(kind) {
            &self.items
        } else {
            &[]
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    results: ResultSet,
    votes: VoteTracker,
}

impl Session {
    #[must_use]
    pub fn new(gong_limit: NonZeroUsize) -> Self {
        Self {
            results: ResultSet::default(),
            votes: VoteTracker::new(gong_limit),
        }
    }
}

/// Shared handle to one channel's session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    key: String,
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    pub fn new(key: impl Into<String>, session: Session) -> Self {
        Self {
            key: key.into(),
            inner: Arc::new(Mutex::new(session)),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Snapshot of the current result set
    #[must_use]
    pub fn results(&self) -> ResultSet {
        self.inner.lock().results.clone()
    }

    /// Snapshot of the current result set's items if it holds `kind`, otherwise empty
    #[must_use]
    pub fn results_of(&self, kind: ItemKind) -> Vec<CatalogItem> {
        self.inner.lock().results.items_of(kind).to_vec()
    }

    /// Replace the whole result set, whatever kind it held before
    pub fn replace_results(&self, kind: ItemKind, items: Vec<CatalogItem>) {
        tracing::trace!(
            session = %self.key,
            kind = %kind,
            count = items.len(),
            "replacing result set"
        );
        self.inner.lock().results = ResultSet::new(kind, items);
    }

    pub fn register_vote(&self, current_uri: &str, voter_id: &str) -> VoteOutcome {
        self.inner.lock().votes.register_vote(current_uri, voter_id)
    }

    #[must_use]
    pub fn gong_limit(&self) -> usize {
        self.inner.lock().votes.threshold()
    }
}

/// All sessions, keyed by chat channel
#[derive(Debug)]
pub struct SessionStore {
    gong_limit: NonZeroUsize,
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(gong_limit: NonZeroUsize) -> Self {
        Self {
            gong_limit,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Session for `key`, created empty on first use
    pub fn session(&self, key: &str) -> SessionHandle {
        self.sessions
            .lock()
            .entry(key.to_string())
            .or_insert_with(|| SessionHandle::new(key, Session::new(self.gong_limit)))
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
