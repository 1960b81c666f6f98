//! Configuration loading and representation.

use std::path::PathBuf;

use ims_inventory::ReferencePolicy;

use crate::snapshot::DEFAULT_DB_FILE;

/// Environment variable overriding the snapshot file location.
pub const DB_PATH_ENV: &str = "IMS_DB_PATH";

/// Environment variable selecting strict reference handling (`1`/`true`/`yes`/`on`).
pub const STRICT_ENV: &str = "IMS_STRICT";

/// Settings for opening an [`InventoryStore`](crate::InventoryStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub reference_policy: ReferencePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            reference_policy: ReferencePolicy::Lenient,
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(DB_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(STRICT_ENV) {
            match parse_flag(&raw) {
                Some(true) => config.reference_policy = ReferencePolicy::Strict,
                Some(false) => config.reference_policy = ReferencePolicy::Lenient,
                None => tracing::warn!(
                    value = %raw,
                    "{STRICT_ENV} is not a recognised boolean; keeping lenient policy"
                ),
            }
        }

        config
    }

    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    pub fn with_reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.reference_policy = policy;
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
