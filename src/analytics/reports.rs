// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::analytics::ranking::{quick_sort_by_key, score_by_category, RecommendationWeights, SortOrder};
use crate::analytics::EngagementAnalytics;
use crate::models::{Content, InteractionKind};

const NO_CONTENTS: &str = "No contents registered.";
const NO_USERS: &str = "No users registered.";
const NO_PLATFORMS: &str = "No platforms registered.";
const NO_PLATFORM_INTERACTIONS: &str = "No interactions registered on any platform.";

/// Render a duration as `H:MM:SS`.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

impl EngagementAnalytics {
    /// Engagement report over every content, sorted by engagement total
    /// descending; `top_n` truncates the ranking when given.
    pub fn content_engagement_report(&self, top_n: Option<usize>) -> String {
        let mut contents = self.contents();
        if contents.is_empty() {
            return NO_CONTENTS.to_string();
        }

        quick_sort_by_key(&mut contents, |c| c.engagement_total(), SortOrder::Descending);
        if let Some(n) = top_n {
            contents.truncate(n);
        }

        let mut out = String::from("=== Content engagement ===\n");
        for content in contents {
            let _ = writeln!(out, "\n{} (id {})", content.name(), content.id());
            let _ = writeln!(out, "Engagement total: {}", content.engagement_total());

            let counts = content.counts_by_kind();
            if !counts.is_empty() {
                let _ = writeln!(out, "Interactions by kind:");
                for (kind, count) in &counts {
                    let _ = writeln!(out, "  - {kind}: {count}");
                }
            }

            let total_watch = content.total_watch_secs();
            if total_watch > 0 {
                let _ = writeln!(
                    out,
                    "Total watch time: {} seconds ({})",
                    total_watch,
                    format_hms(total_watch)
                );
                let _ = writeln!(out, "Mean watch time: {:.2} seconds", content.mean_watch_secs());
            }

            let comments = content.comments();
            if !comments.is_empty() {
                let _ = writeln!(out, "Comments ({}):", comments.len());
                for (n, comment) in comments.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {comment}", n + 1);
                }
            }
        }
        out
    }

    /// Activity report over every user, in ascending id order.
    pub fn user_activity_report(&self) -> String {
        let users = self.users();
        if users.is_empty() {
            return NO_USERS.to_string();
        }

        let mut out = String::from("=== User activity ===\n");
        for user in users {
            let _ = writeln!(out, "\nUser {}", user.id());
            let _ = writeln!(out, "Interactions: {}", user.interactions().len());

            let counts = user.counts_by_kind();
            if !counts.is_empty() {
                let _ = writeln!(out, "Interactions by kind:");
                for (kind, count) in &counts {
                    let _ = writeln!(out, "  - {kind}: {count}");
                }
            }

            let total_watch = user.total_watch_secs();
            if total_watch > 0 {
                let _ = writeln!(
                    out,
                    "Total watch time: {} seconds ({})",
                    total_watch,
                    format_hms(total_watch)
                );
                let _ = writeln!(out, "Mean watch time: {:.2} seconds", user.mean_watch_secs());
            }

            let comments = user.comments();
            if !comments.is_empty() {
                let _ = writeln!(out, "Comments ({}):", comments.len());
                for (n, comment) in comments.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {comment}", n + 1);
                }
            }

            let distinct = user.distinct_contents();
            if !distinct.is_empty() {
                let _ = writeln!(out, "Distinct contents consumed: {}", distinct.len());
            }

            let top_platforms = user.top_platforms(5);
            if !top_platforms.is_empty() {
                let _ = writeln!(out, "Top platforms:");
                for (platform, count) in top_platforms {
                    let _ = writeln!(out, "  - {platform}: {count} interaction(s)");
                }
            }
        }
        out
    }

    /// Top `n` contents ranked by total watch time.
    pub fn top_contents_by_watch_time(&self, n: usize) -> String {
        let mut contents = self.contents();
        if contents.is_empty() {
            return NO_CONTENTS.to_string();
        }

        quick_sort_by_key(&mut contents, |c| c.total_watch_secs(), SortOrder::Descending);
        contents.truncate(n);

        let mut out = String::from("=== Top contents by watch time ===\n\n");
        for (rank, content) in contents.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} ({} watched)",
                rank + 1,
                content.name(),
                format_hms(content.total_watch_secs())
            );
        }
        out
    }

    /// Top `n` contents ranked by like count.
    pub fn top_liked_contents(&self, n: usize) -> String {
        self.top_by_kind(n, InteractionKind::Like, "Most liked contents", "like(s)")
    }

    /// Top `n` contents ranked by started views.
    pub fn top_viewed_contents(&self, n: usize) -> String {
        self.top_by_kind(n, InteractionKind::ViewStart, "Most viewed contents", "view(s)")
    }

    fn top_by_kind(&self, n: usize, kind: InteractionKind, title: &str, unit: &str) -> String {
        let mut contents = self.contents();
        if contents.is_empty() {
            return NO_CONTENTS.to_string();
        }

        let count_of = |content: &Content| -> u64 {
            content.counts_by_kind().get(&kind).copied().unwrap_or(0)
        };
        quick_sort_by_key(&mut contents, |c| count_of(c), SortOrder::Descending);
        contents.truncate(n);

        let mut out = format!("=== {title} ===\n\n");
        for (rank, content) in contents.iter().enumerate() {
            let _ = writeln!(out, "{}. {} - {} {unit}", rank + 1, content.name(), count_of(content));
        }
        out
    }

    /// The platform (or platforms, on a tie) with the most interactions.
    pub fn most_engaged_platforms(&self) -> String {
        let mut counts: IndexMap<String, u64> = IndexMap::new();
        for content in self.contents() {
            for interaction in content.interactions() {
                if let Some(platform) = interaction.platform() {
                    *counts.entry(platform.name().to_string()).or_insert(0) += 1;
                }
            }
        }
        if counts.is_empty() {
            return NO_PLATFORM_INTERACTIONS.to_string();
        }

        let max = counts.values().copied().max().unwrap_or(0);
        let mut out = String::from("=== Platforms with the most engagement ===\n\n");
        for (name, count) in &counts {
            if *count == max {
                let _ = writeln!(out, "{name}: {count} interaction(s)");
            }
        }
        out
    }

    /// Top `n` contents ranked by comment count, with the comments listed.
    pub fn most_commented_contents(&self, n: usize) -> String {
        let mut contents = self.contents();
        if contents.is_empty() {
            return NO_CONTENTS.to_string();
        }

        quick_sort_by_key(&mut contents, |c| c.comments().len(), SortOrder::Descending);
        contents.truncate(n);

        let mut out = String::from("=== Most commented contents ===\n");
        for (rank, content) in contents.iter().enumerate() {
            let comments = content.comments();
            let _ = writeln!(out, "\n{}. {} - {} comment(s)", rank + 1, content.name(), comments.len());
            for (idx, comment) in comments.iter().enumerate() {
                let _ = writeln!(out, "   {}. {comment}", idx + 1);
            }
        }
        out
    }

    /// Interaction totals grouped by content type.
    pub fn interactions_by_content_type(&self) -> String {
        let contents = self.contents();
        if contents.is_empty() {
            return NO_CONTENTS.to_string();
        }

        let mut totals: IndexMap<&'static str, u64> =
            IndexMap::from([("Video", 0), ("Podcast", 0), ("Article", 0)]);
        for content in contents {
            *totals.entry(content.kind().label()).or_insert(0) +=
                content.interactions().len() as u64;
        }

        let mut out = String::from("=== Interactions by content type ===\n\n");
        for (label, total) in &totals {
            let _ = writeln!(out, "{label}: {total} interaction(s)");
        }
        out
    }

    /// Mean watch time per registered platform, in registration order.
    pub fn mean_watch_time_per_platform(&self) -> String {
        let platforms = self.platforms();
        if platforms.is_empty() {
            return NO_PLATFORMS.to_string();
        }

        let mut out = String::from("=== Mean watch time per platform ===\n\n");
        for platform in platforms {
            let mut total = 0u64;
            let mut samples = 0u64;
            for content in self.contents() {
                for interaction in content.interactions() {
                    if interaction.platform() == Some(platform) && interaction.watch_duration_secs() > 0 {
                        total += interaction.watch_duration_secs();
                        samples += 1;
                    }
                }
            }
            if samples > 0 {
                let _ = writeln!(out, "{platform}: {:.2} seconds on average", total as f64 / samples as f64);
            } else {
                let _ = writeln!(out, "{platform}: no consumption data");
            }
        }
        out
    }

    /// Comments grouped per content, in ascending content-id order.
    pub fn comments_per_content(&self) -> String {
        let contents = self.contents();
        if contents.is_empty() {
            return NO_CONTENTS.to_string();
        }

        let mut out = String::from("=== Comments per content ===\n");
        for content in contents {
            let _ = writeln!(out, "\n{}", content.name());
            let comments = content.comments();
            if comments.is_empty() {
                let _ = writeln!(out, "  no comments");
            } else {
                for (idx, comment) in comments.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {comment}", idx + 1);
                }
            }
        }
        out
    }

    /// Contents listed alphabetically; the name key is compared
    /// case-insensitively.
    pub fn contents_by_name(&self, order: SortOrder) -> String {
        let mut contents = self.contents();
        if contents.is_empty() {
            return NO_CONTENTS.to_string();
        }

        quick_sort_by_key(&mut contents, |c| c.name().to_lowercase(), order);

        let title = match order {
            SortOrder::Ascending => "Contents A-Z",
            SortOrder::Descending => "Contents Z-A",
        };
        let mut out = format!("=== {title} ===\n\n");
        for (idx, content) in contents.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", idx + 1, content.name());
        }
        out
    }

    /// Contents whose name contains the search term, case-insensitively.
    pub fn search_contents_by_name(&self, term: &str) -> Vec<&Content> {
        let term = term.to_lowercase();
        self.contents()
            .into_iter()
            .filter(|c| c.name().to_lowercase().contains(&term))
            .collect()
    }

    /// Contents with at least one interaction on the named platform.
    pub fn contents_on_platform(&self, platform_name: &str) -> Vec<&Content> {
        let wanted = platform_name.trim().to_lowercase();
        self.contents()
            .into_iter()
            .filter(|content| {
                content.interactions().iter().any(|interaction| {
                    interaction
                        .platform()
                        .is_some_and(|p| p.name().to_lowercase() == wanted)
                })
            })
            .collect()
    }

    /// Distribution of interaction kinds per platform. Interactions without
    /// a platform are grouped under "Unknown".
    pub fn interaction_distribution_by_platform(&self) -> String {
        let mut distribution: IndexMap<String, IndexMap<InteractionKind, u64>> = IndexMap::new();
        for content in self.contents() {
            for interaction in content.interactions() {
                let name = interaction
                    .platform()
                    .map_or_else(|| "Unknown".to_string(), |p| p.name().to_string());
                let per_kind = distribution.entry(name).or_default();
                *per_kind.entry(interaction.kind()).or_insert(0) += 1;
            }
        }
        if distribution.is_empty() {
            return NO_PLATFORM_INTERACTIONS.to_string();
        }

        let mut out = String::from("=== Interaction distribution per platform ===\n");
        for (platform, kinds) in &distribution {
            let _ = writeln!(out, "\n{platform}:");
            for (kind, count) in kinds {
                let _ = writeln!(out, "  - {kind}: {count}");
            }
        }
        out
    }

    /// Recommend up to `top_n` contents for a category, ranked by the
    /// weighted engagement/watch-time score.
    pub fn recommend_by_category(
        &self,
        category: &str,
        top_n: usize,
        weights: RecommendationWeights,
    ) -> Vec<&Content> {
        let contents = self.contents();
        let mut scored = score_by_category(&contents, category, weights);
        scored.truncate(top_n);
        scored.into_iter().map(|(content, _)| content).collect()
    }
}
