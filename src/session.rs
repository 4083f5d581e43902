//! Session: the single owner of the loaded progress record
//!
//! Wires the engine to a [`KeyValueStore`]. Loads once on open, saves
//! after every mutation. Operations that need a user return `None` when
//! nobody is signed in.

use anyhow::{Context, Result};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::progress::{
    ClaimOutcome, Clock, DeedOutcome, NewDeed, ProgressEngine, SystemClock, UserProgress,
};
use crate::store::KeyValueStore;

pub struct Session<S, C = SystemClock, R = StdRng> {
    store: S,
    engine: ProgressEngine<C, R>,
    key: String,
    current: Option<UserProgress>,
}

impl<S: KeyValueStore, C: Clock, R: Rng> Session<S, C, R> {
    /// Load and rehydrate whatever is stored under `key`.
    ///
    /// A failed read or an unreadable payload leaves the session signed out.
    pub fn open(store: S, engine: ProgressEngine<C, R>, key: impl Into<String>) -> Self {
        let key = key.into();
        let current = match store.get(&key) {
            Ok(Some(raw)) => engine.rehydrate(&raw),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read stored progress: {}", e);
                None
            }
        };
        if let Some(progress) = &current {
            info!(
                "Loaded progress for '{}' (level {}, streak {})",
                progress.username, progress.level, progress.streak
            );
        }

        Self {
            store,
            engine,
            key,
            current,
        }
    }

    pub fn current(&self) -> Option<&UserProgress> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a fresh record, replacing any existing one
    pub fn create_user(&mut self, username: &str, avatar: &str) -> Result<&UserProgress> {
        let progress = self.engine.create(username, avatar);
        info!("Created user '{}'", username);
        self.replace(progress)?;
        self.current
            .as_ref()
            .context("Progress missing right after creation")
    }

    /// Log a deed for the signed-in user
    pub fn log_deed(&mut self, deed: NewDeed) -> Result<Option<DeedOutcome>> {
        let Some(current) = &self.current else {
            return Ok(None);
        };
        let outcome = self.engine.log_deed(current, deed);
        info!(
            "Logged deed: +{} points, +{} xp",
            outcome.points_earned, outcome.xp_earned
        );
        self.replace(outcome.progress.clone())?;
        Ok(Some(outcome))
    }

    /// Claim an active challenge for the signed-in user
    pub fn claim_challenge(&mut self, challenge_id: &str) -> Result<Option<ClaimOutcome>> {
        let Some(current) = &self.current else {
            return Ok(None);
        };
        let Some(outcome) = self.engine.claim_challenge(current, challenge_id) else {
            return Ok(None);
        };
        info!(
            "Claimed challenge '{}': +{} points",
            outcome.challenge.id, outcome.reward
        );
        self.replace(outcome.progress.clone())?;
        Ok(Some(outcome))
    }

    /// Forget the stored record and sign out
    pub fn reset(&mut self) -> Result<()> {
        self.current = None;
        self.store
            .remove(&self.key)
            .with_context(|| format!("Failed to clear stored progress '{}'", self.key))?;
        info!("Progress reset");
        Ok(())
    }

    /// Swap in the next record, then persist it. The in-memory record is
    /// kept even if the write fails.
    fn replace(&mut self, progress: UserProgress) -> Result<()> {
        let json = progress
            .to_json()
            .context("Failed to serialize progress")?;
        self.current = Some(progress);
        self.store
            .set(&self.key, &json)
            .with_context(|| format!("Failed to save progress '{}'", self.key))
    }
}
