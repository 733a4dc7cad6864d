//! Security configuration.
//!
//! Loaded once at process start and injected at construction time; nothing
//! here mutates afterwards, so sharing across tasks needs no locking. Where
//! the values come from (env, file) is the caller's business.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::rules::SecurityRules;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Pre-shared symmetric signing key. Never rotates within a process
    /// lifetime.
    pub secret: String,

    /// Validity window for issued tokens, in seconds.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,

    /// Anonymous-access rule table consumed by the authentication gate.
    #[serde(default)]
    pub rules: SecurityRules,
}

impl SecurityConfig {
    pub fn new(secret: impl Into<String>, rules: SecurityRules) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_secs: default_token_ttl_secs(),
            rules,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.token_ttl_secs)
    }
}

fn default_token_ttl_secs() -> i64 {
    7200
}
