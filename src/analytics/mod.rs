// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

pub mod ranking;
pub mod reports;

use std::path::Path;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::ingestion::{self, RawInteractionRow};
use crate::models::{Content, ContentKind, Interaction, Platform, PlatformError, User};
use crate::store::{IngestionQueue, OrderedIndex};

pub use ranking::{RecommendationWeights, SortOrder};

const DEFAULT_DELIMITER: u8 = b';';

/// Why a dequeued row could not be turned into an interaction.
#[derive(Debug, Error)]
enum RowError {
    #[error("user id {0:?} is not an integer")]
    InvalidUserId(String),
    #[error("content id {0:?} is not an integer")]
    InvalidContentId(String),
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// In-memory engagement analytics store.
///
/// Owns the platform registry, the two ordered indexes (contents and users)
/// and the queue of raw rows awaiting normalization. Single-threaded and
/// session-scoped: nothing here is persisted or shared.
pub struct EngagementAnalytics {
    platforms: IndexMap<String, Platform>,
    contents: OrderedIndex<i64, Content>,
    users: OrderedIndex<i64, User>,
    pending: IngestionQueue<RawInteractionRow>,
    next_platform_id: u32,
    next_interaction_id: u64,
    delimiter: u8,
}

impl EngagementAnalytics {
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            platforms: IndexMap::new(),
            contents: OrderedIndex::new(),
            users: OrderedIndex::new(),
            pending: IngestionQueue::new(),
            next_platform_id: 1,
            next_interaction_id: 1,
            delimiter,
        }
    }

    /// Register a platform by name, or return the already-registered one.
    /// A name maps to exactly one platform instance for the session.
    pub fn register_platform(&mut self, name: &str) -> Result<Platform, PlatformError> {
        let mut platform = Platform::new(name)?;
        if let Some(existing) = self.platforms.get(platform.name()) {
            return Ok(existing.clone());
        }
        platform.set_id(self.next_platform_id);
        self.next_platform_id += 1;
        self.platforms
            .insert(platform.name().to_string(), platform.clone());
        Ok(platform)
    }

    /// Registered platforms, in registration order.
    pub fn platforms(&self) -> Vec<&Platform> {
        self.platforms.values().collect()
    }

    /// Load raw rows from a delimited export into the ingestion queue.
    /// File-level errors are reported and swallowed; returns rows enqueued.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> usize {
        ingestion::read_rows(path.as_ref(), self.delimiter, &mut self.pending)
    }

    /// Drain the ingestion queue, normalizing each row and attaching the
    /// resulting interaction to its content and user aggregates. Rows that
    /// cannot be normalized are logged and skipped before any index
    /// mutation. Returns the number of interactions indexed.
    pub fn process_queue(&mut self) -> usize {
        let mut processed = 0;
        while let Some(row) = self.pending.dequeue() {
            match self.ingest_row(&row) {
                Ok(()) => processed += 1,
                Err(e) => warn!("Skipping row for user {:?}: {}", row.user_id, e),
            }
        }
        debug!("Indexed {} interactions", processed);
        processed
    }

    pub fn pending_rows(&self) -> usize {
        self.pending.len()
    }

    fn ingest_row(&mut self, row: &RawInteractionRow) -> Result<(), RowError> {
        let user_id: i64 = row
            .user_id
            .trim()
            .parse()
            .map_err(|_| RowError::InvalidUserId(row.user_id.clone()))?;
        let content_id: i64 = row
            .content_id
            .trim()
            .parse()
            .map_err(|_| RowError::InvalidContentId(row.content_id.clone()))?;
        let platform = self.register_platform(&row.platform)?;

        // lookup-or-create both aggregates; the name and category of a
        // content are fixed by the first row that mentions its id
        if !self.contents.contains_key(&content_id) {
            let kind = ContentKind::from_type_tag(&row.content_type);
            let content = Content::new(content_id, &row.content_name, &row.category, kind);
            self.contents.insert(content_id, content);
        }
        if !self.users.contains_key(&user_id) {
            self.users.insert(user_id, User::new(user_id));
        }

        let interaction = Interaction::new(
            self.next_interaction_id,
            user_id,
            content_id,
            &row.timestamp,
            &row.interaction_type,
            &row.watch_duration_seconds,
            &row.comment_text,
            Some(platform),
        );
        self.next_interaction_id += 1;

        if let Some(content) = self.contents.get_mut(&content_id) {
            content.add_interaction(interaction.clone());
        }
        if let Some(user) = self.users.get_mut(&user_id) {
            user.add_interaction(interaction);
        }
        Ok(())
    }

    pub fn content(&self, id: i64) -> Option<&Content> {
        self.contents.get(&id)
    }

    pub fn user(&self, id: i64) -> Option<&User> {
        self.users.get(&id)
    }

    /// All contents, ascending by id.
    pub fn contents(&self) -> Vec<&Content> {
        self.contents.values_in_order()
    }

    /// All users, ascending by id.
    pub fn users(&self) -> Vec<&User> {
        self.users.values_in_order()
    }
}

impl Default for EngagementAnalytics {
    fn default() -> Self {
        Self::new()
    }
}
