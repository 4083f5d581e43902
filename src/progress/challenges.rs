//! Rotating challenge catalog
//!
//! A user always sees a small active set drawn from the catalog. Claiming
//! a challenge retires it for good and rotates in a random unused one.

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::UserProgress;

/// Activity category used for challenges without a category
pub const FALLBACK_CATEGORY: &str = "Challenge";

/// Active set for a new user
pub const DEFAULT_CHALLENGES: &[&str] = &["daily-kindness", "eco-warrior", "helper-hero"];

/// Challenge definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub target_count: u32,
    /// Points awarded on claim (XP is half of this)
    pub reward: u32,
    pub category: Option<&'static str>,
    /// Display-only hint
    pub days_remaining: Option<u32>,
}

/// All challenge definitions
pub static CHALLENGES: &[Challenge] = &[
    Challenge {
        id: "daily-kindness",
        title: "Daily Kindness",
        description: "Log 3 kindness deeds this week",
        target_count: 3,
        reward: 50,
        category: Some("Kindness"),
        days_remaining: Some(7),
    },
    Challenge {
        id: "eco-warrior",
        title: "Eco Warrior",
        description: "Complete 5 environmental good deeds",
        target_count: 5,
        reward: 75,
        category: Some("Environmental"),
        days_remaining: Some(14),
    },
    Challenge {
        id: "helper-hero",
        title: "Helper Hero",
        description: "Help 4 people this week",
        target_count: 4,
        reward: 60,
        category: Some("Helping Others"),
        days_remaining: Some(7),
    },
    Challenge {
        id: "community-builder",
        title: "Community Builder",
        description: "Do 3 community deeds",
        target_count: 3,
        reward: 55,
        category: Some("Community"),
        days_remaining: Some(10),
    },
    Challenge {
        id: "learning-quest",
        title: "Learning Quest",
        description: "Complete 4 learning-related deeds",
        target_count: 4,
        reward: 65,
        category: Some("Learning"),
        days_remaining: Some(10),
    },
    Challenge {
        id: "health-hero",
        title: "Health Hero",
        description: "Log 3 health-positive deeds",
        target_count: 3,
        reward: 45,
        category: Some("Health"),
        days_remaining: Some(7),
    },
    Challenge {
        id: "family-first",
        title: "Family First",
        description: "Do 5 family deeds",
        target_count: 5,
        reward: 70,
        category: Some("Family"),
        days_remaining: Some(14),
    },
    Challenge {
        id: "friendship-goals",
        title: "Friendship Goals",
        description: "Help friends 4 times",
        target_count: 4,
        reward: 55,
        category: Some("Friendship"),
        days_remaining: Some(10),
    },
];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize a category label into a progress key: lowercase, whitespace runs become `-`
///
/// `"Helping Others"` -> `"helping-others"`
pub fn category_key(category: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&category.to_lowercase(), "-")
        .into_owned()
}

impl Challenge {
    /// Get challenge definition by id
    pub fn get(id: &str) -> Option<&'static Challenge> {
        CHALLENGES.iter().find(|c| c.id == id)
    }

    pub fn total_count() -> usize {
        CHALLENGES.len()
    }

    /// Key into `challenge_progress`, if this challenge tracks a category
    pub fn progress_key(&self) -> Option<String> {
        self.category.map(category_key)
    }

    /// Category label recorded on the claim activity
    pub fn activity_category(&self) -> &'static str {
        self.category.unwrap_or(FALLBACK_CATEGORY)
    }

    /// XP granted alongside the point reward
    pub fn xp_reward(&self) -> u32 {
        self.reward / 2
    }
}

/// Catalog ids that are neither claimed nor active
pub fn eligible_replacements(claimed: &[String], available: &[String]) -> Vec<&'static str> {
    CHALLENGES
        .iter()
        .map(|c| c.id)
        .filter(|id| !claimed.iter().any(|c| c == id) && !available.iter().any(|a| a == id))
        .collect()
}

/// Progress state for an active challenge
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeStatus {
    pub challenge: &'static Challenge,
    pub progress: u32,
}

impl ChallengeStatus {
    pub fn for_progress(challenge: &'static Challenge, progress: &UserProgress) -> Self {
        let count = challenge
            .progress_key()
            .and_then(|key| progress.challenge_progress.get(&key).copied())
            .unwrap_or(0);
        Self {
            challenge,
            progress: count,
        }
    }

    /// Progress percentage (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        if self.challenge.target_count == 0 {
            return 1.0;
        }
        (self.progress as f32 / self.challenge.target_count as f32).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.challenge.target_count
    }
}

/// Active challenges with their progress, in catalog order
pub fn challenge_board(progress: &UserProgress) -> Vec<ChallengeStatus> {
    CHALLENGES
        .iter()
        .filter(|c| progress.available_challenges.iter().any(|id| id == c.id))
        .map(|c| ChallengeStatus::for_progress(c, progress))
        .collect()
}
