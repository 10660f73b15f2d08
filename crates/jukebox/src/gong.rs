//! Dislike voting ("gong") for the currently playing track
//!
//! The tracker only learns about playback changes when someone votes: every vote carries the
//! URI the device reports as playing right now, and a URI that differs from the tracked one
//! starts a fresh count.

use std::{collections::HashSet, num::NonZeroUsize};

/// What happened to a single vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote was new and the threshold has not been reached yet
    Counted { count: usize, threshold: usize },
    /// This voter already voted for the tracked item; nothing changed
    Duplicate,
    /// This vote reached the threshold; the caller should skip the track
    ThresholdReached,
}

/// Distinct-voter counter for one playing item at a time
#[derive(Debug, Clone)]
pub struct VoteTracker {
    threshold: NonZeroUsize,
    tracked_uri: Option<String>,
    voters: HashSet<String>,
}

impl VoteTracker {
    #[must_use]
    pub fn new(threshold: NonZeroUsize) -> Self {
        Self {
            threshold,
            tracked_uri: None,
            voters: HashSet::new(),
        }
    }

    /// Record `voter_id`'s vote against `current_uri`
    pub fn register_vote(&mut self, current_uri: &str, voter_id: &str) -> VoteOutcome {
        if self.tracked_uri.as_deref() != Some(current_uri) {
            tracing::debug!(uri = current_uri, "now playing changed, resetting gong count");
            self.tracked_uri = Some(current_uri.to_string());
            self.voters.clear();
        }

        if !self.voters.insert(voter_id.to_string()) {
            return VoteOutcome::Duplicate;
        }

        let count = self.voters.len();
        if count >= self.threshold.get() {
            VoteOutcome::ThresholdReached
        } else {
            VoteOutcome::Counted {
                count,
                threshold: self.threshold.get(),
            }
        }
    }

    /// Number of distinct voters for the tracked item
    #[must_use]
    pub fn count(&self) -> usize {
        self.voters.len()
    }

    #[must_use]
    pub fn tracked_uri(&self) -> Option<&str> {
        self.tracked_uri.as_deref()
    }

    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold.get()
    }
}
