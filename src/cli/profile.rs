//! Profile commands: init, status, reset

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

use beacon::config::Config;
use beacon::progress::{AVATARS, Badge, Rank};

use super::{bar, open_session, print_signed_out};

/// Create a fresh profile
pub fn init_command(config: &Config, username: &str, avatar: Option<&str>) -> Result<()> {
    let username = username.trim();
    if username.is_empty() {
        bail!("Username cannot be empty");
    }
    let avatar = avatar.unwrap_or(AVATARS[0]);

    let mut session = open_session(config);
    if let Some(existing) = session.current() {
        println!(
            "Replacing existing profile '{}' (level {}).",
            existing.username, existing.level
        );
    }

    let progress = session.create_user(username, avatar)?;
    println!("Welcome, {} {}!", progress.avatar, progress.username);
    println!("Log your first good deed with: beacon log <category> <description>");
    Ok(())
}

/// Show the dashboard summary
pub fn status_command(config: &Config) -> Result<()> {
    let session = open_session(config);
    let Some(progress) = session.current() else {
        print_signed_out();
        return Ok(());
    };

    let level = progress.level_progress();
    println!("{} {}", progress.avatar, progress.username);
    println!();
    println!("  Level {} - {}", progress.level, progress.rank().name);
    println!(
        "  {} {}/{} XP ({} to level {})",
        bar(level.fraction(), 20),
        level.current,
        level.required,
        level.remaining(),
        level.level + 1
    );
    if let Some(next) = Rank::next_after(progress.level) {
        println!("  Next rank: {} at level {}", next.name, next.min_level);
    }
    println!();
    println!("  Points:      {}", progress.points);
    println!("  Total XP:    {}", progress.xp);
    println!("  Streak:      {} day(s)", progress.streak);
    println!("  Good deeds:  {}", progress.total_deeds);
    println!(
        "  Badges:      {}/{}",
        progress.earned_badges.len(),
        Badge::total_count()
    );
    Ok(())
}

/// Delete the stored profile, even one that no longer loads
pub fn reset_command(config: &Config, yes: bool) -> Result<()> {
    let mut session = open_session(config);

    if !yes {
        let target = match session.current() {
            Some(progress) => format!("all progress for '{}'", progress.username),
            None => "any stored progress".to_string(),
        };
        print!("This deletes {}. Type 'yes' to confirm: ", target);
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("Failed to read confirmation")?;
        if answer.trim() != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    session.reset()?;
    println!("Progress deleted.");
    Ok(())
}
