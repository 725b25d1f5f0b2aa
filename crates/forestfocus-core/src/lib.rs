//! # ForestFocus Core Library
//!
//! Business logic for ForestFocus, a focus timer whose completed sessions
//! earn LeafCoins and grow a small forest. The `forestfocus` CLI is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven countdown state machine cycling through
//!   focus and break intervals; the caller invokes `tick()` once a second
//! - **Rewards**: an append-only LeafCoin ledger
//! - **Growth**: trees that advance through seedling, sapling and tree
//! - **Session**: the orchestrator turning a focus completion into coins,
//!   bonuses and growth
//! - **Storage**: per-wallet profile snapshots over a key-value store
//!   (SQLite or memory) and TOML configuration
//! - **Share**: template-based progress posts
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`SessionOrchestrator`]: Applies completed sessions to a profile
//! - [`ProfileStore`]: Profile persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod growth;
pub mod rewards;
pub mod session;
pub mod share;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use growth::{Forest, ForestSummary, GrowthThresholds, Stage, StageChange, Tree};
pub use rewards::{CoinRewards, RewardLedger, RewardTransaction, TransactionKind};
pub use session::{Award, AwardKind, SessionOrchestrator, SessionOutcome, SessionRules, UserStats};
pub use share::{BrowserShare, ShareDraft, ShareTemplate, SocialShare, MAX_SHARE_CHARS};
pub use stats::{ProductivityAnalyzer, ProductivityReport, ReportRange, SessionLog, SessionRecord};
pub use storage::{
    data_dir, Config, Identity, KeyValueStore, MemoryStore, ProfileSnapshot, ProfileStore,
    SqliteStore,
};
pub use timer::{CompletionAlert, IntervalKind, TimerEngine, TimerSettings, TimerState};
