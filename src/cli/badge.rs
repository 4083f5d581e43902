//! Badge listing

use anyhow::Result;

use beacon::config::Config;
use beacon::progress::BADGES;

use super::{bar, open_session, print_signed_out};

pub fn badges_command(config: &Config) -> Result<()> {
    let session = open_session(config);
    let Some(progress) = session.current() else {
        print_signed_out();
        return Ok(());
    };

    println!(
        "Badges earned: {}/{}",
        progress.earned_badges.len(),
        BADGES.len()
    );
    println!();
    for badge in BADGES {
        if progress.has_badge(badge.id) {
            println!("  [x] {:<16} {}", badge.name, badge.description);
        } else {
            println!(
                "  [ ] {:<16} {}  {} {}/{}",
                badge.name,
                badge.description,
                bar(badge.progress(progress), 10),
                badge.current_value(progress).min(badge.requirement),
                badge.requirement
            );
        }
    }
    Ok(())
}
