//! CLI command implementations

pub mod badge;
pub mod challenge;
pub mod deed;
pub mod profile;

use std::path::{Path, PathBuf};

use anyhow::Result;

use beacon::Session;
use beacon::config::Config;
use beacon::store::FileStore;

/// Session over the on-disk store
pub type AppSession = Session<FileStore>;

/// Load config from `path` (or the global location) and apply CLI overrides
pub fn load_config(path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_or_init(path)?,
        None => Config::load()?,
    };
    if data_dir.is_some() {
        config.settings.data_dir = data_dir;
    }
    Ok(config)
}

pub fn open_session(config: &Config) -> AppSession {
    let store = FileStore::new(config.data_dir());
    Session::open(
        store,
        beacon::ProgressEngine::new(),
        config.settings.storage_key.clone(),
    )
}

/// Print the sign-in hint when there is no profile
pub fn print_signed_out() {
    println!("No profile found. Create one with: beacon init <username>");
}

/// Text progress bar, e.g. `[######----]`
pub fn bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Closest candidate by Jaro-Winkler similarity, for "did you mean" hints
pub fn suggest<'a>(input: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    use strsim::jaro_winkler;

    const FUZZY_THRESHOLD: f64 = 0.75;

    let input = input.to_lowercase();
    candidates
        .into_iter()
        .map(|c| (c, jaro_winkler(&input, &c.to_lowercase())))
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}
