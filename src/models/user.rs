// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::interaction::{Interaction, InteractionKind};
use crate::models::platform::Platform;

/// Kinds counted toward a user's engagement total. Unlike the content-side
/// set, view_start does not count here.
const ENGAGEMENT_KINDS: [InteractionKind; 3] = [
    InteractionKind::Like,
    InteractionKind::Share,
    InteractionKind::Comment,
];

/// A user and the interactions they performed, in arrival order.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: i64,
    interactions: Vec<Interaction>,
}

impl User {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            interactions: Vec::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn add_interaction(&mut self, interaction: Interaction) {
        self.interactions.push(interaction);
    }

    pub fn interactions_of_kind(&self, kind: InteractionKind) -> Vec<&Interaction> {
        self.interactions.iter().filter(|i| i.kind() == kind).collect()
    }

    /// Count of interactions whose kind is like, share or comment.
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

    pub fn total_watch_secs(&self) -> u64 {
        self.interactions
            .iter()
            .map(Interaction::watch_duration_secs)
            .filter(|&d| d > 0)
            .sum()
    }

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

    /// Ids of the distinct contents this user interacted with.
    pub fn distinct_contents(&self) -> BTreeSet<i64> {
        self.interactions.iter().map(Interaction::content_id).collect()
    }

    /// Total watch time spent on a given platform, positive durations only.
    pub fn watch_secs_on_platform(&self, platform: &Platform) -> u64 {
        self.interactions
            .iter()
            .filter(|i| i.platform() == Some(platform))
            .map(Interaction::watch_duration_secs)
            .filter(|&d| d > 0)
            .sum()
    }

    /// The `n` platforms this user interacted with most often, with their
    /// counts. Ties keep first-encountered order.
    pub fn top_platforms(&self, n: usize) -> Vec<(Platform, u64)> {
        let mut counts: IndexMap<Platform, u64> = IndexMap::new();
        for interaction in &self.interactions {
            if let Some(platform) = interaction.platform() {
                *counts.entry(platform.clone()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(Platform, u64)> = counts.into_iter().collect();
        // stable sort so equal counts stay in first-encountered order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(id: u64, content_id: i64, kind: &str, duration: &str, platform: Option<&str>) -> Interaction {
        let platform = platform.map(|name| Platform::new(name).unwrap());
        Interaction::new(id, 1, content_id, "2024-01-01T08:00:00", kind, duration, "", platform)
    }

    #[test]
    fn test_engagement_total_excludes_view_start() {
        let mut user = User::new(1);
        user.add_interaction(interaction(1, 10, "view_start", "60", None));
        user.add_interaction(interaction(2, 10, "like", "0", None));
        user.add_interaction(interaction(3, 11, "share", "0", None));
        user.add_interaction(interaction(4, 11, "comment", "0", None));
        user.add_interaction(interaction(5, 11, "vote", "0", None));
        assert_eq!(user.engagement_total(), 3);
    }

    #[test]
    fn test_distinct_contents() {
        let mut user = User::new(1);
        user.add_interaction(interaction(1, 10, "view_start", "0", None));
        user.add_interaction(interaction(2, 10, "like", "0", None));
        user.add_interaction(interaction(3, 11, "like", "0", None));
        let distinct = user.distinct_contents();
        assert_eq!(distinct.len(), 2);
        assert!(distinct.contains(&10) && distinct.contains(&11));
    }

    #[test]
    fn test_top_platforms_breaks_ties_by_first_encounter() {
        let mut user = User::new(1);
        user.add_interaction(interaction(1, 10, "like", "0", Some("Web")));
        user.add_interaction(interaction(2, 10, "like", "0", Some("Mobile")));
        user.add_interaction(interaction(3, 10, "like", "0", Some("Mobile")));
        user.add_interaction(interaction(4, 10, "like", "0", Some("TV")));

        let top = user.top_platforms(3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].0.name(), "Mobile");
        assert_eq!(top[0].1, 2);
        // Web and TV both have one interaction; Web was seen first
        assert_eq!(top[1].0.name(), "Web");
        assert_eq!(top[2].0.name(), "TV");
    }

    #[test]
    fn test_top_platforms_truncates() {
        let mut user = User::new(1);
        user.add_interaction(interaction(1, 10, "like", "0", Some("Web")));
        user.add_interaction(interaction(2, 10, "like", "0", Some("Mobile")));
        assert_eq!(user.top_platforms(1).len(), 1);
        assert!(user.top_platforms(0).is_empty());
    }

    #[test]
    fn test_watch_secs_on_platform() {
        let mut user = User::new(1);
        user.add_interaction(interaction(1, 10, "view_start", "100", Some("Web")));
        user.add_interaction(interaction(2, 10, "view_start", "40", Some("Mobile")));
        user.add_interaction(interaction(3, 10, "view_start", "0", Some("Web")));

        let web = Platform::new("Web").unwrap();
        assert_eq!(user.watch_secs_on_platform(&web), 100);
    }

    #[test]
    fn test_interactions_of_kind() {
        let mut user = User::new(1);
        user.add_interaction(interaction(1, 10, "like", "0", None));
        user.add_interaction(interaction(2, 10, "share", "0", None));
        user.add_interaction(interaction(3, 11, "like", "0", None));
        assert_eq!(user.interactions_of_kind(InteractionKind::Like).len(), 2);
        assert_eq!(user.interactions_of_kind(InteractionKind::Comment).len(), 0);
    }
}
