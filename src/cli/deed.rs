//! Deed commands: log, history, categories

use anyhow::{Result, bail};

use beacon::NewDeed;
use beacon::config::Config;
use beacon::progress::{ActivityKind, Clock, DEED_CATEGORIES, SystemClock, find_category};

use super::{open_session, print_signed_out, suggest};

/// Log a good deed and report rewards
pub fn log_command(
    config: &Config,
    category: &str,
    description: &str,
    reflection: Option<String>,
    image: Option<String>,
) -> Result<()> {
    let Some(category) = find_category(category) else {
        match suggest(category, DEED_CATEGORIES.iter().copied()) {
            Some(hint) => bail!("Unknown category '{}'. Did you mean '{}'?", category, hint),
            None => bail!(
                "Unknown category '{}'. Run `beacon categories` to list them.",
                category
            ),
        }
    };
    let description = description.trim();
    if description.is_empty() {
        bail!("Description cannot be empty");
    }

    let mut deed = NewDeed::new(category, description);
    if let Some(reflection) = reflection.filter(|r| !r.trim().is_empty()) {
        deed = deed.with_reflection(reflection);
    }
    if let Some(image) = image.filter(|i| !i.trim().is_empty()) {
        deed = deed.with_image(image);
    }

    let mut session = open_session(config);
    let Some(outcome) = session.log_deed(deed)? else {
        print_signed_out();
        return Ok(());
    };

    println!("Good deed logged!");
    println!(
        "  +{} points, +{} XP (streak: {} day(s))",
        outcome.points_earned, outcome.xp_earned, outcome.progress.streak
    );
    if let Some(level_up) = &outcome.level_up {
        println!("  Level up! {} -> {}", level_up.old_level, level_up.new_level);
        if level_up.is_rank_up() {
            println!("  New rank: {}", level_up.rank.name);
        }
    }
    for badge in &outcome.new_badges {
        println!("  New badge unlocked: {} ({})", badge.name, badge.description);
    }
    Ok(())
}

/// Show recent activity, newest first
pub fn history_command(config: &Config, all: bool) -> Result<()> {
    let session = open_session(config);
    let Some(progress) = session.current() else {
        print_signed_out();
        return Ok(());
    };

    if progress.activities.is_empty() {
        println!("No activities yet. Log your first good deed to get started!");
        return Ok(());
    }

    let limit = if all {
        progress.activities.len()
    } else {
        config.settings.history_preview
    };
    let now = SystemClock.now();

    for activity in progress.activities.iter().take(limit) {
        let marker = match activity.kind {
            ActivityKind::Deed => "*",
            ActivityKind::Challenge => "!",
        };
        println!(
            "{} [{}] {} (+{} pts, {})",
            marker,
            activity.category,
            activity.description,
            activity.points,
            activity.age_label(now)
        );
        if let Some(reflection) = &activity.reflection {
            println!("    \"{}\"", reflection);
        }
        if let Some(image) = &activity.image_url {
            println!("    image: {}", image);
        }
    }

    let hidden = progress.activities.len().saturating_sub(limit);
    if hidden > 0 {
        println!("... {} more (use --all)", hidden);
    }
    Ok(())
}

pub fn categories_command() {
    for category in DEED_CATEGORIES {
        println!("{}", category);
    }
}
