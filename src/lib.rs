//! Beacon - a gamified good deeds tracker
//!
//! Users log good deeds, earn points and XP, level up through ranks,
//! keep daily streaks, unlock badges and claim rotating challenges.
//!
//! ## Layers
//!
//! 1. **`progress`**: pure state transitions over a [`progress::UserProgress`]
//!    record. No I/O; clock and randomness are injected.
//! 2. **`store`**: key-value persistence adapters (file, memory).
//! 3. **`session`**: loads once, runs engine operations, saves after each.
//! 4. **`config`**: `~/.beacon/config.toml`.

pub mod config;
pub mod progress;
pub mod session;
pub mod store;

pub use progress::{NewDeed, ProgressEngine, UserProgress};
pub use session::Session;
