//! Per-identity profile snapshots.
//!
//! A profile is split over several JSON blobs so each part can be read on
//! its own:
//!
//! | key                           | content                         |
//! |-------------------------------|---------------------------------|
//! | `profile-stats-<address>`     | [`UserStats`]                   |
//! | `profile-forest-<address>`    | [`Forest`]                      |
//! | `profile-ledger-<address>`    | [`RewardLedger`]                |
//! | `profile-sessions-<address>`  | [`SessionLog`]                  |
//! | `last-session-date`           | ISO date of the last session    |
//!
//! Without an identity nothing is read or written. A blob that does not
//! parse loads as its default.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::kv::KeyValueStore;
use crate::error::{Result, StoreError, ValidationError};
use crate::growth::Forest;
use crate::rewards::RewardLedger;
use crate::session::UserStats;
use crate::stats::SessionLog;

pub const LAST_SESSION_DATE_KEY: &str = "last-session-date";

/// The connected wallet address, used only as a storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(address: impl AsRef<str>) -> Result<Self, ValidationError> {
        let address = address.as_ref().trim();
        if address.is_empty() {
            return Err(ValidationError::EmptyIdentity);
        }
        Ok(Self(address.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn stats_key(&self) -> String {
        format!("profile-stats-{}", self.0)
    }

    pub fn forest_key(&self) -> String {
        format!("profile-forest-{}", self.0)
    }

    pub fn ledger_key(&self) -> String {
        format!("profile-ledger-{}", self.0)
    }

    pub fn sessions_key(&self) -> String {
        format!("profile-sessions-{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything persisted for one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub stats: UserStats,
    pub forest: Forest,
    pub ledger: RewardLedger,
    pub sessions: SessionLog,
    pub last_session_date: Option<NaiveDate>,
}

/// Loads and saves [`ProfileSnapshot`]s over a [`KeyValueStore`].
pub struct ProfileStore<S> {
    kv: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Load a profile. Missing identity, missing keys and corrupted blobs
    /// all yield defaults.
    pub fn load(&self, identity: Option<&Identity>) -> ProfileSnapshot {
        let Some(identity) = identity else {
            debug!("no identity, starting from an empty profile");
            return ProfileSnapshot::default();
        };

        let mut snapshot = ProfileSnapshot {
            stats: self.read_or_default(&identity.stats_key()),
            forest: self.read_or_default(&identity.forest_key()),
            ledger: self.read_or_default(&identity.ledger_key()),
            sessions: self.read_or_default(&identity.sessions_key()),
            last_session_date: self.last_session_date(),
        };

        let balance = snapshot.ledger.balance();
        if snapshot.stats.leaf_coins != balance {
            warn!(
                identity = %identity,
                stored = snapshot.stats.leaf_coins,
                ledger = balance,
                "leaf coin total disagrees with ledger, using ledger balance"
            );
            snapshot.stats.leaf_coins = balance;
        }
        snapshot
    }

    /// Write a profile. Keys whose stored value is already identical are
    /// left alone. Returns the number of keys written; 0 without identity.
    pub fn save(&self, identity: Option<&Identity>, snapshot: &ProfileSnapshot) -> Result<usize> {
        let Some(identity) = identity else {
            debug!("no identity, skipping profile save");
            return Ok(0);
        };

        let mut written = 0;
        written += self.write_json(&identity.stats_key(), &snapshot.stats)?;
        written += self.write_json(&identity.forest_key(), &snapshot.forest)?;
        written += self.write_json(&identity.ledger_key(), &snapshot.ledger)?;
        written += self.write_json(&identity.sessions_key(), &snapshot.sessions)?;
        if let Some(date) = snapshot.last_session_date {
            written += self.write_if_changed(LAST_SESSION_DATE_KEY, &date.to_string())?;
        }
        Ok(written)
    }

    /// The globally recorded date of the last focus session.
    pub fn last_session_date(&self) -> Option<NaiveDate> {
        match self.kv.get(LAST_SESSION_DATE_KEY) {
            Ok(Some(raw)) => match raw.parse::<NaiveDate>() {
                Ok(date) => Some(date),
                Err(err) => {
                    warn!(value = %raw, error = %err, "ignoring malformed last session date");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "could not read last session date");
                None
            }
        }
    }

    /// Read any JSON value stored under `key`.
    pub fn read_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, error = %err, "could not read key");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "discarding unreadable value");
                None
            }
        }
    }

    /// Write any JSON value under `key`, skipping identical rewrites.
    pub fn write_value<T: Serialize>(&self, key: &str, value: &T) -> Result<bool> {
        Ok(self.write_json(key, value)? > 0)
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.read_value(key).unwrap_or_default()
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<usize> {
        let json = serde_json::to_string(value)?;
        Ok(self.write_if_changed(key, &json)?)
    }

    fn write_if_changed(&self, key: &str, value: &str) -> Result<usize, StoreError> {
        if self.kv.get(key)?.as_deref() == Some(value) {
            return Ok(0);
        }
        self.kv.set(key, value)?;
        Ok(1)
    }
}
