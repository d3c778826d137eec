//! Bounded list of recently recorded plays, newest first.

use std::collections::VecDeque;

use serde::Serialize;

use crate::dto::response::{PlayDetail, RecentPlay};

/// Maximum number of entries kept in the feed.
pub const FEED_CAPACITY: usize = 15;

/// A recorded play as shown in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub sequence_number: u32,
    pub quarter: u8,
    pub summary: String,
    pub yards: Option<i32>,
    pub is_touchdown: bool,
    pub is_interception: bool,
}

impl FeedEntry {
    /// Entry for a play just acknowledged by the service.
    pub fn recorded(
        sequence_number: u32,
        quarter: u8,
        summary: String,
        detail: Option<&PlayDetail>,
    ) -> Self {
        Self {
            sequence_number,
            quarter,
            summary,
            yards: detail.and_then(|detail| detail.yards),
            is_touchdown: detail.is_some_and(|detail| detail.is_touchdown),
            is_interception: detail.is_some_and(|detail| detail.is_interception),
        }
    }

    /// Signed yardage badge: `+12`, `-3`, `0`.
    pub fn yards_label(&self) -> Option<String> {
        self.yards.map(|yards| {
            if yards > 0 {
                format!("+{yards}")
            } else {
                yards.to_string()
            }
        })
    }
}

impl From<RecentPlay> for FeedEntry {
    fn from(play: RecentPlay) -> Self {
        Self {
            sequence_number: play.sequence_number,
            quarter: play.quarter,
            summary: play.summary,
            yards: play.yards,
            is_touchdown: play.is_touchdown,
            is_interception: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayFeed {
    entries: VecDeque<FeedEntry>,
    capacity: usize,
}

impl Default for PlayFeed {
    fn default() -> Self {
        Self::with_capacity(FEED_CAPACITY)
    }
}

impl PlayFeed {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert the newest entry, evicting the oldest beyond capacity.
    pub fn push_front(&mut self, entry: FeedEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Remove the newest entry; the rest of the feed is untouched.
    pub fn remove_newest(&mut self) -> Option<FeedEntry> {
        self.entries.pop_front()
    }

    /// Replace the feed with `entries`, given newest first.
    pub fn replace_with(&mut self, entries: impl IntoIterator<Item = FeedEntry>) {
        self.entries = entries.into_iter().take(self.capacity).collect();
    }

    pub fn entries(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
