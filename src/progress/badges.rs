//! Badge definitions and unlock checks
//!
//! Badges are permanent: once an id is in `earned_badges` no operation
//! removes it.

use super::model::UserProgress;

/// Which progress field a badge requirement is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Deeds,
    Streak,
    Level,
    Points,
}

impl BadgeKind {
    /// Current value of the tracked field
    pub fn measure(&self, progress: &UserProgress) -> u32 {
        match self {
            Self::Deeds => progress.total_deeds,
            Self::Streak => progress.streak,
            Self::Level => progress.level,
            Self::Points => progress.points,
        }
    }
}

/// Badge definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub requirement: u32,
    pub kind: BadgeKind,
}

/// All badge definitions, in check order
pub static BADGES: &[Badge] = &[
    // === DEEDS ===
    Badge {
        id: "first-deed",
        name: "First Step",
        icon: "Sprout",
        description: "Log your first good deed",
        requirement: 1,
        kind: BadgeKind::Deeds,
    },
    Badge {
        id: "five-deeds",
        name: "Getting Started",
        icon: "Star",
        description: "Complete 5 good deeds",
        requirement: 5,
        kind: BadgeKind::Deeds,
    },
    Badge {
        id: "ten-deeds",
        name: "Consistent",
        icon: "Flame",
        description: "Complete 10 good deeds",
        requirement: 10,
        kind: BadgeKind::Deeds,
    },
    Badge {
        id: "twenty-five-deeds",
        name: "Dedicated",
        icon: "Gem",
        description: "Complete 25 good deeds",
        requirement: 25,
        kind: BadgeKind::Deeds,
    },
    Badge {
        id: "fifty-deeds",
        name: "Committed",
        icon: "Trophy",
        description: "Complete 50 good deeds",
        requirement: 50,
        kind: BadgeKind::Deeds,
    },
    // === STREAK ===
    Badge {
        id: "streak-3",
        name: "On Fire",
        icon: "Zap",
        description: "3 day streak",
        requirement: 3,
        kind: BadgeKind::Streak,
    },
    Badge {
        id: "streak-7",
        name: "Week Warrior",
        icon: "Calendar",
        description: "7 day streak",
        requirement: 7,
        kind: BadgeKind::Streak,
    },
    Badge {
        id: "streak-14",
        name: "Fortnight",
        icon: "CalendarDays",
        description: "14 day streak",
        requirement: 14,
        kind: BadgeKind::Streak,
    },
    // === LEVEL ===
    Badge {
        id: "level-5",
        name: "Rising Star",
        icon: "Sparkles",
        description: "Reach level 5",
        requirement: 5,
        kind: BadgeKind::Level,
    },
    Badge {
        id: "level-10",
        name: "Champion",
        icon: "Medal",
        description: "Reach level 10",
        requirement: 10,
        kind: BadgeKind::Level,
    },
    // === POINTS ===
    Badge {
        id: "points-500",
        name: "Collector",
        icon: "Coins",
        description: "Earn 500 points",
        requirement: 500,
        kind: BadgeKind::Points,
    },
    Badge {
        id: "points-1000",
        name: "Wealthy",
        icon: "Crown",
        description: "Earn 1000 points",
        requirement: 1000,
        kind: BadgeKind::Points,
    },
];

impl Badge {
    /// Get badge definition by id
    pub fn get(id: &str) -> Option<&'static Badge> {
        BADGES.iter().find(|b| b.id == id)
    }

    pub fn total_count() -> usize {
        BADGES.len()
    }

    /// Value of the measured field for this badge
    pub fn current_value(&self, progress: &UserProgress) -> u32 {
        self.kind.measure(progress)
    }

    /// Progress towards the requirement (0.0 - 1.0)
    pub fn progress(&self, progress: &UserProgress) -> f32 {
        if self.requirement == 0 {
            return 1.0;
        }
        (self.current_value(progress) as f32 / self.requirement as f32).min(1.0)
    }

    pub fn is_met(&self, progress: &UserProgress) -> bool {
        self.current_value(progress) >= self.requirement
    }
}

/// Badges the progress now qualifies for but has not earned yet, in catalog order
pub fn check_badge_unlocks(progress: &UserProgress) -> Vec<&'static Badge> {
    BADGES
        .iter()
        .filter(|badge| !progress.has_badge(badge.id))
        .filter(|badge| badge.is_met(progress))
        .collect()
}
