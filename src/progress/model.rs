//! Progress records and their persisted shape

use std::collections::BTreeMap;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::challenges::DEFAULT_CHALLENGES;
use super::levels::{LevelProgress, Rank, level_for_xp};

/// Most recent activities kept on a record
pub const MAX_ACTIVITIES: usize = 50;

/// What produced an activity entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    #[default]
    Deed,
    Challenge,
}

impl ActivityKind {
    /// Kind for a stored `type` tag. Missing or unrecognised tags read as a deed.
    pub(crate) fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("challenge") => Self::Challenge,
            _ => Self::Deed,
        }
    }
}

/// One entry in the activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub description: String,
    pub category: String,
    pub points: u32,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
}

impl Activity {
    /// Short relative timestamp for feeds ("Just now", "5m ago", "3d ago")
    pub fn age_label(&self, now: DateTime<Local>) -> String {
        let elapsed = now.with_timezone(&Utc) - self.date;
        let minutes = elapsed.num_minutes();
        let hours = elapsed.num_hours();
        let days = elapsed.num_days();

        if minutes < 1 {
            "Just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if hours < 24 {
            format!("{}h ago", hours)
        } else if days < 7 {
            format!("{}d ago", days)
        } else {
            self.date.with_timezone(&Local).format("%Y-%m-%d").to_string()
        }
    }
}

/// A user's full progress record. Replaced wholesale on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub username: String,
    pub avatar: String,
    pub points: u32,
    pub xp: u32,
    /// Always `level_for_xp(xp)`
    pub level: u32,
    pub streak: u32,
    pub last_deed_date: Option<DateTime<Utc>>,
    pub total_deeds: u32,
    pub earned_badges: Vec<String>,
    /// Newest first, at most [`MAX_ACTIVITIES`]
    pub activities: Vec<Activity>,
    pub challenge_progress: BTreeMap<String, u32>,
    pub claimed_challenges: Vec<String>,
    pub available_challenges: Vec<String>,
}

impl UserProgress {
    /// Zeroed record with the default challenge set
    pub fn new(username: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            avatar: avatar.into(),
            points: 0,
            xp: 0,
            level: 1,
            streak: 0,
            last_deed_date: None,
            total_deeds: 0,
            earned_badges: Vec::new(),
            activities: Vec::new(),
            challenge_progress: BTreeMap::new(),
            claimed_challenges: Vec::new(),
            available_challenges: default_challenges(),
        }
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.earned_badges.iter().any(|b| b == id)
    }

    pub fn is_available(&self, challenge_id: &str) -> bool {
        self.available_challenges.iter().any(|c| c == challenge_id)
    }

    pub fn is_claimed(&self, challenge_id: &str) -> bool {
        self.claimed_challenges.iter().any(|c| c == challenge_id)
    }

    pub fn rank(&self) -> &'static Rank {
        Rank::for_level(self.level)
    }

    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::for_xp(self.xp)
    }

    /// Prepend an activity, dropping the oldest past the cap
    pub(crate) fn push_activity(&mut self, activity: Activity) {
        self.activities.insert(0, activity);
        self.activities.truncate(MAX_ACTIVITIES);
    }

    /// Add XP and re-derive the level
    pub(crate) fn add_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
        self.level = level_for_xp(self.xp);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub(crate) fn default_challenges() -> Vec<String> {
    DEFAULT_CHALLENGES.iter().map(|id| id.to_string()).collect()
}

/// Activity as it may appear in storage written by older versions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredActivity {
    id: String,
    description: String,
    category: String,
    points: u32,
    date: DateTime<Utc>,
    #[serde(default)]
    reflection: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl From<StoredActivity> for Activity {
    fn from(stored: StoredActivity) -> Self {
        Self {
            id: stored.id,
            description: stored.description,
            category: stored.category,
            points: stored.points,
            date: stored.date,
            reflection: stored.reflection,
            image_url: stored.image_url,
            kind: ActivityKind::from_tag(stored.kind.as_deref()),
        }
    }
}

/// Progress record as it may appear in storage written by older versions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredProgress {
    pub username: String,
    #[serde(default)]
    pub avatar: String,
    pub points: u32,
    pub xp: u32,
    // `level` is ignored and re-derived from `xp`
    pub streak: u32,
    #[serde(default)]
    pub last_deed_date: Option<DateTime<Utc>>,
    pub total_deeds: u32,
    #[serde(default)]
    pub earned_badges: Vec<String>,
    #[serde(default)]
    pub activities: Vec<StoredActivity>,
    #[serde(default)]
    pub challenge_progress: BTreeMap<String, u32>,
    #[serde(default)]
    pub claimed_challenges: Option<Vec<String>>,
    #[serde(default)]
    pub available_challenges: Option<Vec<String>>,
}

impl From<StoredProgress> for UserProgress {
    /// Back-fill fields older shapes lack. Streak expiry is applied by the engine.
    fn from(stored: StoredProgress) -> Self {
        let claimed_challenges = stored.claimed_challenges.unwrap_or_default();
        let available_challenges = stored.available_challenges.unwrap_or_else(|| {
            default_challenges()
                .into_iter()
                .filter(|id| !claimed_challenges.contains(id))
                .collect()
        });

        let mut activities: Vec<Activity> =
            stored.activities.into_iter().map(Activity::from).collect();
        activities.truncate(MAX_ACTIVITIES);

        Self {
            username: stored.username,
            avatar: stored.avatar,
            points: stored.points,
            xp: stored.xp,
            level: level_for_xp(stored.xp),
            streak: stored.streak,
            last_deed_date: stored.last_deed_date,
            total_deeds: stored.total_deeds,
            earned_badges: stored.earned_badges,
            activities,
            challenge_progress: stored.challenge_progress,
            claimed_challenges,
            available_challenges,
        }
    }
}
