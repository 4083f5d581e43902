//! Challenge commands: list, claim

use anyhow::{Result, bail};

use beacon::config::Config;
use beacon::progress::{CHALLENGES, Challenge, ChallengeStatus, challenge_board};

use super::{bar, open_session, print_signed_out, suggest};

/// Show the active challenges
pub fn challenges_command(config: &Config) -> Result<()> {
    let session = open_session(config);
    let Some(progress) = session.current() else {
        print_signed_out();
        return Ok(());
    };

    let board = challenge_board(progress);
    if board.is_empty() {
        println!("You've completed every challenge. Nice work!");
        return Ok(());
    }

    for status in &board {
        let challenge = status.challenge;
        println!("{} ({})", challenge.title, challenge.id);
        println!("  {}", challenge.description);
        println!(
            "  {} {}/{}  reward: {} pts",
            bar(status.fraction(), 10),
            status.progress.min(challenge.target_count),
            challenge.target_count,
            challenge.reward
        );
        if status.is_complete() {
            println!("  Complete! Claim with: beacon claim {}", challenge.id);
        } else if let Some(days) = challenge.days_remaining {
            println!("  {} days left", days);
        }
    }
    println!();
    println!(
        "Claimed {}/{} challenges",
        progress.claimed_challenges.len(),
        Challenge::total_count()
    );
    Ok(())
}

/// Claim a completed challenge
pub fn claim_command(config: &Config, challenge_id: &str) -> Result<()> {
    let Some(challenge) = Challenge::get(challenge_id) else {
        match suggest(challenge_id, CHALLENGES.iter().map(|c| c.id)) {
            Some(hint) => bail!("Unknown challenge '{}'. Did you mean '{}'?", challenge_id, hint),
            None => bail!("Unknown challenge '{}'", challenge_id),
        }
    };

    let mut session = open_session(config);
    let Some(progress) = session.current() else {
        print_signed_out();
        return Ok(());
    };

    if progress.is_claimed(challenge.id) {
        bail!("'{}' has already been claimed", challenge.title);
    }
    if !progress.is_available(challenge.id) {
        bail!("'{}' is not one of your active challenges", challenge.title);
    }
    let status = ChallengeStatus::for_progress(challenge, progress);
    if !status.is_complete() {
        bail!(
            "'{}' is not complete yet ({}/{})",
            challenge.title,
            status.progress,
            challenge.target_count
        );
    }

    let Some(outcome) = session.claim_challenge(challenge.id)? else {
        bail!("'{}' could not be claimed", challenge.title);
    };

    println!("Challenge completed: {}!", challenge.title);
    println!("  +{} points, +{} XP", outcome.reward, outcome.xp_earned);
    if let Some(level_up) = &outcome.level_up {
        println!("  Level up! {} -> {}", level_up.old_level, level_up.new_level);
    }
    for badge in &outcome.new_badges {
        println!("  New badge unlocked: {} ({})", badge.name, badge.description);
    }
    match outcome.replacement {
        Some(next) => println!("  New challenge: {} ({})", next.title, next.id),
        None => println!("  No challenges left to rotate in."),
    }
    Ok(())
}
