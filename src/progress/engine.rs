//! Progress engine - core state transitions
//!
//! Every operation takes the current record by reference and returns the
//! next one; nothing here touches storage. The clock and the random source
//! are injected so tests can pin both.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::badges::{Badge, check_badge_unlocks};
use super::challenges::{Challenge, category_key, eligible_replacements};
use super::clock::{Clock, SystemClock};
use super::levels::LevelUp;
use super::model::{Activity, ActivityKind, StoredProgress, UserProgress};
use super::streaks::{is_streak_alive, next_streak};

/// Reward rolls for a logged deed
pub struct DeedRewards;

impl DeedRewards {
    /// Points every deed is worth
    pub const BASE_POINTS: u32 = 10;
    /// Random point bonus is drawn from `0..POINTS_BONUS_SPAN`
    pub const POINTS_BONUS_SPAN: u32 = 5;
    /// XP every deed is worth
    pub const BASE_XP: u32 = 20;
    /// Random XP bonus is drawn from `0..XP_BONUS_SPAN`
    pub const XP_BONUS_SPAN: u32 = 10;

    pub fn roll_points<R: Rng>(rng: &mut R) -> u32 {
        Self::BASE_POINTS + rng.gen_range(0..Self::POINTS_BONUS_SPAN)
    }

    pub fn roll_xp<R: Rng>(rng: &mut R) -> u32 {
        Self::BASE_XP + rng.gen_range(0..Self::XP_BONUS_SPAN)
    }
}

/// A deed as submitted by the UI (already validated)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeed {
    pub category: String,
    pub description: String,
    pub reflection: Option<String>,
    pub image_url: Option<String>,
}

impl NewDeed {
    pub fn new(category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            reflection: None,
            image_url: None,
        }
    }

    pub fn with_reflection(mut self, reflection: impl Into<String>) -> Self {
        self.reflection = Some(reflection.into());
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Result of logging a deed
#[derive(Debug, Clone)]
pub struct DeedOutcome {
    pub progress: UserProgress,
    pub points_earned: u32,
    pub xp_earned: u32,
    pub new_badges: Vec<&'static Badge>,
    pub level_up: Option<LevelUp>,
}

/// Result of claiming a challenge
#[derive(Debug, Clone)]
pub struct ClaimOutcome {
    pub progress: UserProgress,
    pub challenge: &'static Challenge,
    pub reward: u32,
    pub xp_earned: u32,
    pub new_badges: Vec<&'static Badge>,
    /// Challenge rotated into the active set, if any were left
    pub replacement: Option<&'static Challenge>,
    pub level_up: Option<LevelUp>,
}

/// Pure progression rules over [`UserProgress`]
pub struct ProgressEngine<C = SystemClock, R = StdRng> {
    clock: C,
    rng: R,
}

impl ProgressEngine {
    /// Engine on the host clock with an entropy-seeded RNG
    pub fn new() -> Self {
        Self::with_parts(SystemClock, StdRng::from_entropy())
    }
}

impl Default for ProgressEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, R: Rng> ProgressEngine<C, R> {
    pub fn with_parts(clock: C, rng: R) -> Self {
        Self { clock, rng }
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Zeroed record for a new user
    pub fn create(&self, username: &str, avatar: &str) -> UserProgress {
        UserProgress::new(username, avatar)
    }

    /// Log a deed: award points/XP, advance the streak, bump the category counter
    pub fn log_deed(&mut self, current: &UserProgress, deed: NewDeed) -> DeedOutcome {
        let now = self.clock.now_utc();
        let points_earned = DeedRewards::roll_points(&mut self.rng);
        let xp_earned = DeedRewards::roll_xp(&mut self.rng);

        let mut next = current.clone();
        next.streak = next_streak(current.streak, current.last_deed_date, self.clock.today());
        next.last_deed_date = Some(now);

        let key = category_key(&deed.category);
        let counter = next.challenge_progress.entry(key).or_insert(0);
        *counter = counter.saturating_add(1);

        next.points = next.points.saturating_add(points_earned);
        next.add_xp(xp_earned);
        next.total_deeds = next.total_deeds.saturating_add(1);

        let activity = Activity {
            id: self.activity_id(now.timestamp_millis(), None),
            description: deed.description,
            category: deed.category,
            points: points_earned,
            date: now,
            reflection: deed.reflection,
            image_url: deed.image_url,
            kind: ActivityKind::Deed,
        };
        next.push_activity(activity);

        let new_badges = award_badges(&mut next);
        debug!(
            "Deed logged: +{} points, +{} xp, streak {}, {} new badge(s)",
            points_earned,
            xp_earned,
            next.streak,
            new_badges.len()
        );

        DeedOutcome {
            level_up: LevelUp::between(current.xp, next.xp),
            progress: next,
            points_earned,
            xp_earned,
            new_badges,
        }
    }

    /// Claim an active challenge. None if the id is unknown or not active.
    pub fn claim_challenge(
        &mut self,
        current: &UserProgress,
        challenge_id: &str,
    ) -> Option<ClaimOutcome> {
        let Some(challenge) = Challenge::get(challenge_id) else {
            debug!("Claim ignored: unknown challenge '{}'", challenge_id);
            return None;
        };
        if !current.is_available(challenge.id) {
            debug!("Claim ignored: challenge '{}' is not active", challenge_id);
            return None;
        }

        let now = self.clock.now_utc();
        let mut next = current.clone();

        next.available_challenges.retain(|id| id != challenge.id);
        next.claimed_challenges.push(challenge.id.to_string());

        let replacement = eligible_replacements(&next.claimed_challenges, &next.available_challenges)
            .choose(&mut self.rng)
            .and_then(|id| Challenge::get(id));
        if let Some(replacement) = replacement {
            next.available_challenges.push(replacement.id.to_string());
        }

        if let Some(key) = challenge.progress_key() {
            next.challenge_progress.insert(key, 0);
        }

        let xp_earned = challenge.xp_reward();
        next.points = next.points.saturating_add(challenge.reward);
        next.add_xp(xp_earned);

        let activity = Activity {
            id: self.activity_id(now.timestamp_millis(), Some("challenge")),
            description: format!("Completed challenge: {}", challenge.title),
            category: challenge.activity_category().to_string(),
            points: challenge.reward,
            date: now,
            reflection: None,
            image_url: None,
            kind: ActivityKind::Challenge,
        };
        next.push_activity(activity);

        let new_badges = award_badges(&mut next);
        debug!(
            "Challenge '{}' claimed: +{} points, replacement {:?}",
            challenge.id,
            challenge.reward,
            replacement.map(|c| c.id)
        );

        Some(ClaimOutcome {
            level_up: LevelUp::between(current.xp, next.xp),
            progress: next,
            challenge,
            reward: challenge.reward,
            xp_earned,
            new_badges,
            replacement,
        })
    }

    /// Restore a record from its stored JSON. None if the payload is unusable.
    ///
    /// Applies lazy streak expiry: a streak whose last deed is neither today
    /// nor yesterday is reset to 0.
    pub fn rehydrate(&self, raw: &str) -> Option<UserProgress> {
        let stored: StoredProgress = match serde_json::from_str(raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Discarding unreadable progress payload: {}", e);
                return None;
            }
        };

        let mut progress = UserProgress::from(stored);
        if progress.last_deed_date.is_some()
            && !is_streak_alive(progress.last_deed_date, self.clock.today())
        {
            debug!("Streak of {} expired on load", progress.streak);
            progress.streak = 0;
        }
        Some(progress)
    }

    /// `<millis>-<9 base36 chars>`, optionally prefixed
    fn activity_id(&mut self, millis: i64, prefix: Option<&str>) -> String {
        const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let suffix: String = (0..9)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect();
        match prefix {
            Some(prefix) => format!("{}-{}-{}", prefix, millis, suffix),
            None => format!("{}-{}", millis, suffix),
        }
    }
}

/// Append newly qualifying badges to the record and return them
fn award_badges(progress: &mut UserProgress) -> Vec<&'static Badge> {
    let unlocked = check_badge_unlocks(progress);
    progress
        .earned_badges
        .extend(unlocked.iter().map(|badge| badge.id.to_string()));
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::clock::FixedClock;
    use crate::progress::levels::level_for_xp;
    use crate::progress::model::MAX_ACTIVITIES;

    fn engine_on(day: u32, seed: u64) -> ProgressEngine<FixedClock, StdRng> {
        ProgressEngine::with_parts(
            FixedClock::local_noon(2024, 3, day).unwrap(),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_first_deed() {
        let mut engine = engine_on(1, 7);
        let start = engine.create("Ana", "0");
        let outcome = engine.log_deed(&start, NewDeed::new("Kindness", "Helped a neighbor"));
        let next = &outcome.progress;

        assert_eq!(next.total_deeds, 1);
        assert_eq!(next.streak, 1);
        assert!(next.has_badge("first-deed"));
        assert_eq!(next.activities[0].category, "Kindness");
        assert_eq!(next.activities[0].kind, ActivityKind::Deed);
        assert_eq!(next.challenge_progress.get("kindness"), Some(&1));

        assert!((10..=14).contains(&outcome.points_earned));
        assert!((20..=29).contains(&outcome.xp_earned));
        assert_eq!(next.points, outcome.points_earned);
        assert_eq!(next.xp, outcome.xp_earned);
        assert_eq!(next.level, 1);
        assert_eq!(outcome.new_badges.len(), 1);

        // input untouched
        assert_eq!(start.total_deeds, 0);
    }

    #[test]
    fn test_reward_ranges_over_many_rolls() {
        let mut engine = engine_on(1, 42);
        let mut progress = engine.create("Ana", "0");
        for _ in 0..200 {
            let outcome = engine.log_deed(&progress, NewDeed::new("Health", "Walked"));
            assert!((10..=14).contains(&outcome.points_earned));
            assert!((20..=29).contains(&outcome.xp_earned));
            progress = outcome.progress;
        }
        assert_eq!(progress.total_deeds, 200);
        assert_eq!(progress.activities.len(), MAX_ACTIVITIES);
        assert_eq!(progress.level, progress.xp / 150 + 1);
    }

    #[test]
    fn test_streak_sequence() {
        let mut engine = engine_on(1, 1);
        let p = engine.create("Ana", "0");

        let p = engine.log_deed(&p, NewDeed::new("Family", "Called mom")).progress;
        assert_eq!(p.streak, 1);

        engine.clock_mut().advance_days(1);
        let p = engine.log_deed(&p, NewDeed::new("Family", "Cooked dinner")).progress;
        assert_eq!(p.streak, 2);

        let p = engine.log_deed(&p, NewDeed::new("Family", "Washed up")).progress;
        assert_eq!(p.streak, 2);

        engine.clock_mut().advance_days(2);
        let p = engine.log_deed(&p, NewDeed::new("Family", "Visited gran")).progress;
        assert_eq!(p.streak, 1);
    }

    #[test]
    fn test_level_up_reported() {
        let mut engine = engine_on(1, 3);
        let mut start = engine.create("Ana", "0");
        start.xp = 149;

        let outcome = engine.log_deed(&start, NewDeed::new("Learning", "Read a book"));
        let level_up = outcome.level_up.expect("crossed 150 xp");
        assert_eq!(level_up.old_level, 1);
        assert_eq!(level_up.new_level, 2);
        assert_eq!(outcome.progress.level, 2);
    }

    #[test]
    fn test_category_key_normalized() {
        let mut engine = engine_on(1, 5);
        let p = engine.create("Ana", "0");
        let p = engine
            .log_deed(&p, NewDeed::new("Helping Others", "Carried groceries"))
            .progress;
        assert_eq!(p.challenge_progress.get("helping-others"), Some(&1));
    }

    #[test]
    fn test_optional_deed_fields() {
        let mut engine = engine_on(1, 5);
        let p = engine.create("Ana", "0");
        let deed = NewDeed::new("Community", "Park cleanup")
            .with_reflection("Felt great")
            .with_image("photo.png");
        let p = engine.log_deed(&p, deed).progress;
        assert_eq!(p.activities[0].reflection.as_deref(), Some("Felt great"));
        assert_eq!(p.activities[0].image_url.as_deref(), Some("photo.png"));
    }

    #[test]
    fn test_activity_id_format() {
        let mut engine = engine_on(1, 9);
        let p = engine.create("Ana", "0");
        let p = engine.log_deed(&p, NewDeed::new("Kindness", "Smiled")).progress;
        let (millis, suffix) = p.activities[0].id.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_claim_challenge() {
        let mut engine = engine_on(1, 11);
        let mut start = engine.create("Ana", "0");
        start.challenge_progress.insert("kindness".to_string(), 3);

        let outcome = engine.claim_challenge(&start, "daily-kindness").unwrap();
        let next = &outcome.progress;

        assert_eq!(outcome.reward, 50);
        assert_eq!(outcome.xp_earned, 25);
        assert_eq!(next.points, 50);
        assert_eq!(next.xp, 25);
        assert_eq!(next.total_deeds, 0);
        assert_eq!(next.challenge_progress.get("kindness"), Some(&0));
        assert_eq!(next.claimed_challenges, vec!["daily-kindness"]);
        assert!(!next.is_available("daily-kindness"));

        let activity = &next.activities[0];
        assert_eq!(activity.kind, ActivityKind::Challenge);
        assert_eq!(activity.category, "Kindness");
        assert_eq!(activity.points, 50);
        assert_eq!(activity.description, "Completed challenge: Daily Kindness");
        assert!(activity.id.starts_with("challenge-"));

        let replacement = outcome.replacement.expect("catalog has spares");
        assert!(!["daily-kindness", "eco-warrior", "helper-hero"].contains(&replacement.id));
        assert_eq!(next.available_challenges.len(), 3);
        assert_eq!(next.available_challenges[2], replacement.id);
    }

    #[test]
    fn test_claim_unknown_or_inactive_is_none() {
        let mut engine = engine_on(1, 11);
        let start = engine.create("Ana", "0");
        assert!(engine.claim_challenge(&start, "no-such-challenge").is_none());
        assert!(engine.claim_challenge(&start, "family-first").is_none());
        assert_eq!(start, engine.create("Ana", "0"));
    }

    #[test]
    fn test_rotation_exhausts_catalog() {
        let mut engine = engine_on(1, 99);
        let mut progress = engine.create("Ana", "0");

        while let Some(id) = progress.available_challenges.first().cloned() {
            let outcome = engine.claim_challenge(&progress, &id).unwrap();
            progress = outcome.progress;

            for active in &progress.available_challenges {
                assert!(!progress.is_claimed(active), "{active} both active and claimed");
            }
        }

        assert_eq!(progress.claimed_challenges.len(), Challenge::total_count());
        let mut claimed = progress.claimed_challenges.clone();
        claimed.sort();
        claimed.dedup();
        assert_eq!(claimed.len(), Challenge::total_count());
    }

    #[test]
    fn test_claim_can_unlock_badges() {
        let mut engine = engine_on(1, 2);
        let mut start = engine.create("Ana", "0");
        start.points = 460;

        let outcome = engine.claim_challenge(&start, "eco-warrior").unwrap();
        let ids: Vec<_> = outcome.new_badges.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["points-500"]);
        assert!(outcome.progress.has_badge("points-500"));
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let run = || {
            let mut engine = engine_on(1, 1234);
            let p = engine.create("Ana", "0");
            let deed = engine.log_deed(&p, NewDeed::new("Kindness", "Held the door"));
            let claim = engine
                .claim_challenge(&deed.progress, "helper-hero")
                .unwrap();
            (deed.points_earned, deed.xp_earned, claim.replacement.map(|c| c.id))
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_rehydrate_expires_stale_streak() {
        let mut engine = engine_on(1, 1);
        let p = engine.create("Ana", "0");
        let p = engine.log_deed(&p, NewDeed::new("Kindness", "Smiled")).progress;
        let raw = p.to_json().unwrap();

        engine.clock_mut().advance_days(1);
        assert_eq!(engine.rehydrate(&raw).unwrap().streak, 1);

        engine.clock_mut().advance_days(1);
        assert_eq!(engine.rehydrate(&raw).unwrap().streak, 0);
    }

    #[test]
    fn test_rehydrate_round_trip_today() {
        let mut engine = engine_on(1, 1);
        let p = engine.create("Ana", "0");
        let p = engine
            .log_deed(&p, NewDeed::new("Kindness", "Smiled").with_reflection("nice"))
            .progress;
        let p = engine.claim_challenge(&p, "eco-warrior").unwrap().progress;

        assert_eq!(engine.rehydrate(&p.to_json().unwrap()), Some(p));
    }

    #[test]
    fn test_counters_saturate_at_max() {
        let mut engine = engine_on(2, 1);
        let raw = format!(
            r#"{{"username":"Ana","avatar":"0","points":{max},"xp":{max},"level":1,
                "streak":{max},"lastDeedDate":"2024-03-01T12:00:00Z","totalDeeds":{max},
                "challengeProgress":{{"kindness":{max}}}}}"#,
            max = u32::MAX - 5
        );
        let p = engine.rehydrate(&raw).unwrap();

        let mut p = engine.log_deed(&p, NewDeed::new("Kindness", "Smiled")).progress;
        for _ in 0..10 {
            p = engine.log_deed(&p, NewDeed::new("Kindness", "Smiled")).progress;
        }
        assert_eq!(p.points, u32::MAX);
        assert_eq!(p.xp, u32::MAX);
        assert_eq!(p.level, level_for_xp(u32::MAX));
        assert_eq!(p.total_deeds, u32::MAX);
        assert_eq!(p.challenge_progress.get("kindness"), Some(&u32::MAX));

        let p = engine.claim_challenge(&p, "daily-kindness").unwrap().progress;
        assert_eq!(p.points, u32::MAX);
    }

    #[test]
    fn test_rehydrate_rejects_garbage() {
        let engine = engine_on(1, 1);
        assert!(engine.rehydrate("not json").is_none());
        assert!(engine.rehydrate(r#"{"username": "Ana"}"#).is_none());
        assert!(engine.rehydrate("[]").is_none());
    }
}
