//! Gamification core: XP, levels, ranks, streaks, badges and challenges
//!
//! All operations are pure transitions over a [`UserProgress`] record.
//! Persistence is the caller's job (see [`crate::session`]).

mod badges;
mod challenges;
mod clock;
mod engine;
mod levels;
mod model;
mod streaks;

pub use badges::{BADGES, Badge, BadgeKind, check_badge_unlocks};
pub use challenges::{
    CHALLENGES, Challenge, ChallengeStatus, DEFAULT_CHALLENGES, FALLBACK_CATEGORY,
    category_key, challenge_board, eligible_replacements,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{ClaimOutcome, DeedOutcome, DeedRewards, NewDeed, ProgressEngine};
pub use levels::{LevelProgress, LevelUp, RANKS, Rank, XP_PER_LEVEL, level_for_xp};
pub use model::{Activity, ActivityKind, MAX_ACTIVITIES, UserProgress};
pub use streaks::{DayGap, is_streak_alive, next_streak};

/// Deed categories offered by the UI
pub const DEED_CATEGORIES: &[&str] = &[
    "Helping Others",
    "Environmental",
    "Kindness",
    "Community",
    "Learning",
    "Health",
    "Family",
    "Friendship",
];

/// Avatar choices offered at sign-up
pub const AVATARS: &[&str] = &["🦊", "🐼", "🦁", "🐸", "🦉", "🐙", "🦋", "🌟"];

/// Canonical spelling of a deed category, matched case-insensitively
pub fn find_category(input: &str) -> Option<&'static str> {
    let input = input.trim();
    DEED_CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(input) || category_key(c) == category_key(input))
}
