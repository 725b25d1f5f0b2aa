//! Share text for progress posts.
//!
//! A [`ShareTemplate`] renders a short post from the profile; the result is
//! wrapped in a [`ShareDraft`] that enforces the post length limit, and
//! handed to a [`SocialShare`] target as a compose URL.

mod target;

pub use target::{BrowserShare, SocialShare};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::ValidationError;
use crate::growth::{Forest, Stage};
use crate::session::UserStats;

/// Longest post the compose screen accepts, in characters.
pub const MAX_SHARE_CHARS: usize = 320;

pub const COMPOSE_BASE: &str = "https://warpcast.com/~/compose";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareTemplate {
    Session,
    Tree,
    Milestone,
    Streak,
}

impl ShareTemplate {
    pub const ALL: [ShareTemplate; 4] = [
        ShareTemplate::Session,
        ShareTemplate::Tree,
        ShareTemplate::Milestone,
        ShareTemplate::Streak,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ShareTemplate::Session => "Session Complete",
            ShareTemplate::Tree => "New Tree Planted",
            ShareTemplate::Milestone => "Milestone",
            ShareTemplate::Streak => "Streak",
        }
    }

    /// Pick the template that best fits the current profile.
    pub fn recommend(stats: &UserStats, forest: &Forest) -> Self {
        if stats.current_streak >= 5 {
            ShareTemplate::Streak
        } else if stats.total_sessions > 0 && stats.total_sessions % 10 == 0 {
            ShareTemplate::Milestone
        } else if !forest.is_empty() {
            ShareTemplate::Tree
        } else {
            ShareTemplate::Session
        }
    }

    pub fn render(self, stats: &UserStats, forest: &Forest) -> String {
        match self {
            ShareTemplate::Session => format!(
                "Another focus session done on @forestfocus 🍅\n\n\
                 📊 Sessions: {}\n🪙 LeafCoins: {}\n🔥 Streak: {}\n\n\
                 Focus grows forests 🌱 #ProductivityGaming #Focus",
                stats.total_sessions, stats.leaf_coins, stats.current_streak
            ),
            ShareTemplate::Tree => format!(
                "🌳 Tree #{} is in the ground in my @forestfocus forest!\n\n\
                 🌱 Seedlings: {}\n🌿 Saplings: {}\n🌳 Grown trees: {}\n\n\
                 Every focus session grows it a little more 🌲 #ProductivityGaming",
                stats.trees_planted,
                forest.count(Stage::Seedling),
                forest.count(Stage::Sapling),
                forest.count(Stage::Tree)
            ),
            ShareTemplate::Milestone => format!(
                "🏆 New milestone on @forestfocus!\n\n{}\n🪙 {} LeafCoins\n🌳 {} trees planted\n\n\
                 #ProductivityGaming #Focus",
                milestone_line(stats.total_sessions),
                stats.leaf_coins,
                stats.trees_planted
            ),
            ShareTemplate::Streak => format!(
                "🔥 {}-day focus streak on @forestfocus!\n\n\
                 Showing up every day adds up 💪\n\n\
                 📈 Sessions: {}\n🌳 Trees planted: {}\n\n#ProductivityGaming #FocusStreak",
                stats.current_streak, stats.total_sessions, stats.trees_planted
            ),
        }
    }
}

fn milestone_line(total: u32) -> String {
    match total {
        100.. => "💯 100+ focus sessions".to_string(),
        50.. => "🎯 50+ focus sessions".to_string(),
        25.. => "⭐ 25+ focus sessions".to_string(),
        10.. => "🚀 10+ focus sessions".to_string(),
        n => format!("🎉 {n} focus sessions"),
    }
}

impl fmt::Display for ShareTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShareTemplate::Session => "session",
            ShareTemplate::Tree => "tree",
            ShareTemplate::Milestone => "milestone",
            ShareTemplate::Streak => "streak",
        };
        f.write_str(name)
    }
}

impl FromStr for ShareTemplate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "session" => Ok(ShareTemplate::Session),
            "tree" => Ok(ShareTemplate::Tree),
            "milestone" => Ok(ShareTemplate::Milestone),
            "streak" => Ok(ShareTemplate::Streak),
            other => Err(ValidationError::UnknownTemplate(other.to_string())),
        }
    }
}

/// Post text that passed validation: not blank, at most
/// [`MAX_SHARE_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareDraft {
    text: String,
}

impl ShareDraft {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::BlankShareText);
        }
        let len = text.chars().count();
        if len > MAX_SHARE_CHARS {
            return Err(ValidationError::ShareTextTooLong {
                len,
                limit: MAX_SHARE_CHARS,
            });
        }
        Ok(Self { text })
    }

    pub fn from_template(
        template: ShareTemplate,
        stats: &UserStats,
        forest: &Forest,
    ) -> Result<Self, ValidationError> {
        Self::new(template.render(stats, forest))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Compose URL with the text as its `text` query parameter.
    pub fn compose_url(&self) -> String {
        let encoded: String = form_urlencoded::byte_serialize(self.text.as_bytes()).collect();
        format!("{COMPOSE_BASE}?text={encoded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stats(total: u32, streak: u32) -> UserStats {
        UserStats {
            total_sessions: total,
            leaf_coins: 120,
            trees_planted: total / 4,
            current_streak: streak,
        }
    }

    #[test]
    fn recommendation_order() {
        let empty = Forest::new();
        let mut planted = Forest::new();
        planted.plant_tree(Utc::now());

        assert_eq!(ShareTemplate::recommend(&stats(20, 5), &planted), ShareTemplate::Streak);
        assert_eq!(ShareTemplate::recommend(&stats(20, 2), &planted), ShareTemplate::Milestone);
        assert_eq!(ShareTemplate::recommend(&stats(21, 2), &planted), ShareTemplate::Tree);
        assert_eq!(ShareTemplate::recommend(&stats(3, 1), &empty), ShareTemplate::Session);
        assert_eq!(ShareTemplate::recommend(&stats(0, 0), &empty), ShareTemplate::Session);
    }

    #[test]
    fn milestone_tiers() {
        assert_eq!(milestone_line(7), "🎉 7 focus sessions");
        assert_eq!(milestone_line(10), "🚀 10+ focus sessions");
        assert_eq!(milestone_line(49), "⭐ 25+ focus sessions");
        assert_eq!(milestone_line(50), "🎯 50+ focus sessions");
        assert_eq!(milestone_line(250), "💯 100+ focus sessions");
    }

    #[test]
    fn every_template_fits_the_limit() {
        let mut forest = Forest::new();
        forest.plant_tree(Utc::now());
        let big = UserStats {
            total_sessions: u32::MAX,
            leaf_coins: i64::MAX,
            trees_planted: u32::MAX,
            current_streak: u32::MAX,
        };
        for template in ShareTemplate::ALL {
            let draft = ShareDraft::from_template(template, &big, &forest).unwrap();
            assert!(draft.char_count() <= MAX_SHARE_CHARS, "{template}");
            assert!(draft.text().contains("@forestfocus"));
        }
    }

    #[test]
    fn tree_template_counts_stages() {
        let mut forest = Forest::new();
        forest.plant_tree(Utc::now());
        forest.plant_tree(Utc::now());
        let text = ShareTemplate::Tree.render(&stats(8, 1), &forest);
        assert!(text.contains("Tree #2"));
        assert!(text.contains("Seedlings: 2"));
        assert!(text.contains("Saplings: 0"));
    }

    #[test]
    fn draft_rejects_blank_and_long_text() {
        assert_eq!(ShareDraft::new("  \n"), Err(ValidationError::BlankShareText));
        assert_eq!(
            ShareDraft::new("a".repeat(321)),
            Err(ValidationError::ShareTextTooLong { len: 321, limit: 320 })
        );
        // Limit counts characters, not bytes.
        assert!(ShareDraft::new("🌳".repeat(320)).is_ok());
    }

    #[test]
    fn compose_url_round_trips_text() {
        let draft = ShareDraft::new("Focus & grow 🌱\n#tag").unwrap();
        let url = url::Url::parse(&draft.compose_url()).unwrap();
        assert!(url.as_str().starts_with("https://warpcast.com/~/compose?text="));
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(value, draft.text());
    }

    #[test]
    fn template_parsing() {
        assert_eq!("Streak".parse::<ShareTemplate>().unwrap(), ShareTemplate::Streak);
        assert_eq!(
            "poem".parse::<ShareTemplate>(),
            Err(ValidationError::UnknownTemplate("poem".into()))
        );
    }
}
