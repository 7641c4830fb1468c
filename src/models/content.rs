use indexmap::IndexMap;
use serde::Serialize;

use crate::models::interaction::{Interaction, InteractionKind};

/// Kinds counted toward a content's engagement total.
const ENGAGEMENT_KINDS: [InteractionKind; 4] = [
    InteractionKind::Like,
    InteractionKind::Share,
    InteractionKind::Comment,
    InteractionKind::ViewStart,
];

/// Content variant tag, carrying the variant-specific duration attribute.
#[derive(Debug, Clone, Serialize)]
pub enum ContentKind {
    Video { video_duration_secs: u64 },
    Podcast { episode_duration_secs: u64 },
    Article { reading_time_secs: u64 },
}

impl ContentKind {
    /// Parse a raw content-type tag, case-insensitively. Unknown or missing
    /// tags default to `Video`; durations start at 0.
    pub fn from_type_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "podcast" => Self::Podcast { episode_duration_secs: 0 },
            "article" => Self::Article { reading_time_secs: 0 },
            _ => Self::Video { video_duration_secs: 0 },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Video { .. } => "Video",
            Self::Podcast { .. } => "Podcast",
            Self::Article { .. } => "Article",
        }
    }
}

/// A piece of content and its owned interaction history.
///
/// Created lazily the first time an interaction references an unseen id and
/// never removed during a session; the only mutation afterwards is appending
/// interactions. Metrics are recomputed on every call.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    id: i64,
    name: String,
    category: String,
    kind: ContentKind,
    interactions: Vec<Interaction>,
}

impl Content {
    pub fn new(id: i64, name: &str, category: &str, kind: ContentKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            category: category.trim().to_lowercase(),
            kind,
            interactions: Vec::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category, lowercased and trimmed at construction.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn kind(&self) -> &ContentKind {
        &self.kind
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn add_interaction(&mut self, interaction: Interaction) {
        self.interactions.push(interaction);
    }

    /// Count of interactions whose kind is one of like, share, comment or
    /// view_start. The set deliberately differs from the user-side one.
    pub fn engagement_total(&self) -> u64 {
        self.interactions
            .iter()
            .filter(|i| ENGAGEMENT_KINDS.contains(&i.kind()))
            .count() as u64
    }

    /// Interaction counts grouped by kind, keyed in order of first occurrence.
    pub fn counts_by_kind(&self) -> IndexMap<InteractionKind, u64> {
        let mut counts = IndexMap::new();
        for interaction in &self.interactions {
            *counts.entry(interaction.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Total watch time, counting only positive durations.
    pub fn total_watch_secs(&self) -> u64 {
        self.interactions
            .iter()
            .map(Interaction::watch_duration_secs)
            .filter(|&d| d > 0)
            .sum()
    }

    /// Mean watch time over interactions with a positive duration, 0.0 when
    /// there are none.
    pub fn mean_watch_secs(&self) -> f64 {
        let durations: Vec<u64> = self
            .interactions
            .iter()
            .map(Interaction::watch_duration_secs)
            .filter(|&d| d > 0)
            .collect();
        if durations.is_empty() {
            return 0.0;
        }
        durations.iter().sum::<u64>() as f64 / durations.len() as f64
    }

    /// Non-empty comment texts in arrival order.
    pub fn comments(&self) -> Vec<&str> {
        self.interactions
            .iter()
            .map(Interaction::comment_text)
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Mean watched share of the video duration, as a percentage.
    ///
    /// Only meaningful for videos; `None` for other variants, `Some(0.0)`
    /// when the video duration is unknown.
    pub fn mean_watched_percent(&self) -> Option<f64> {
        match self.kind {
            ContentKind::Video { video_duration_secs } => {
                if video_duration_secs == 0 {
                    Some(0.0)
                } else {
                    Some(self.mean_watch_secs() / video_duration_secs as f64 * 100.0)
                }
            }
            _ => None,
        }
    }
}
