//! XP, level and rank system
//!
//! Levels are a flat function of XP; ranks are display titles unlocked
//! at fixed levels.

/// XP needed to advance one level
pub const XP_PER_LEVEL: u32 = 150;

/// Level for a given XP total. Level 1 starts at 0 XP.
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Rank definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    pub min_level: u32,
    pub name: &'static str,
}

/// All ranks (must be sorted by min_level)
pub static RANKS: &[Rank] = &[
    Rank {
        min_level: 1,
        name: "Newcomer",
    },
    Rank {
        min_level: 5,
        name: "Helper",
    },
    Rank {
        min_level: 10,
        name: "Champion",
    },
    Rank {
        min_level: 15,
        name: "Hero",
    },
    Rank {
        min_level: 20,
        name: "Legend",
    },
    Rank {
        min_level: 25,
        name: "Guardian",
    },
];

impl Rank {
    /// Highest rank reached at `level`
    pub fn for_level(level: u32) -> &'static Rank {
        RANKS
            .iter()
            .rev()
            .find(|r| level >= r.min_level)
            .unwrap_or(&RANKS[0])
    }

    /// Next rank to unlock (None at the top of the table)
    pub fn next_after(level: u32) -> Option<&'static Rank> {
        RANKS.iter().find(|r| r.min_level > level)
    }
}

/// Position inside the current level, for progress bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned since the current level started
    pub current: u32,
    /// XP span of one level
    pub required: u32,
}

impl LevelProgress {
    pub fn for_xp(xp: u32) -> Self {
        let level = level_for_xp(xp);
        Self {
            level,
            current: xp - (level - 1) * XP_PER_LEVEL,
            required: XP_PER_LEVEL,
        }
    }

    /// Progress to next level (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.required as f32
    }

    /// XP still missing for the next level
    pub fn remaining(&self) -> u32 {
        self.required - self.current
    }
}

/// A level up event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    pub rank: &'static Rank,
}

impl LevelUp {
    /// Some(..) when moving from `old_xp` to `new_xp` crosses a level boundary
    pub fn between(old_xp: u32, new_xp: u32) -> Option<Self> {
        let old_level = level_for_xp(old_xp);
        let new_level = level_for_xp(new_xp);
        (new_level > old_level).then(|| Self {
            old_level,
            new_level,
            rank: Rank::for_level(new_level),
        })
    }

    /// True when the new level also unlocked a new rank
    pub fn is_rank_up(&self) -> bool {
        Rank::for_level(self.old_level) != self.rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_xp() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(149), 1);
        assert_eq!(level_for_xp(150), 2);
        assert_eq!(level_for_xp(299), 2);
        assert_eq!(level_for_xp(1500), 11);
    }

    #[test]
    fn test_rank_for_level() {
        assert_eq!(Rank::for_level(0).name, "Newcomer");
        assert_eq!(Rank::for_level(1).name, "Newcomer");
        assert_eq!(Rank::for_level(4).name, "Newcomer");
        assert_eq!(Rank::for_level(5).name, "Helper");
        assert_eq!(Rank::for_level(14).name, "Champion");
        assert_eq!(Rank::for_level(99).name, "Guardian");
        assert_eq!(Rank::next_after(5).map(|r| r.name), Some("Champion"));
        assert!(Rank::next_after(25).is_none());
    }

    #[test]
    fn test_level_progress() {
        let progress = LevelProgress::for_xp(225); // level 2, 75 into it
        assert_eq!(progress.level, 2);
        assert_eq!(progress.current, 75);
        assert_eq!(progress.remaining(), 75);
        assert!((progress.fraction() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_level_up_between() {
        assert!(LevelUp::between(0, 149).is_none());

        let up = LevelUp::between(140, 160).unwrap();
        assert_eq!(up.old_level, 1);
        assert_eq!(up.new_level, 2);
        assert!(!up.is_rank_up());

        let up = LevelUp::between(590, 600).unwrap();
        assert_eq!(up.new_level, 5);
        assert_eq!(up.rank.name, "Helper");
        assert!(up.is_rank_up());
    }
}
