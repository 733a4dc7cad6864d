//! Anonymous-access rule table for the authentication gate.
//!
//! Ordered list of `{path pattern, [{method|"ALL", [role...]}]}` entries,
//! externally configured. A path is matched by its longest matching prefix
//! (table order breaks ties); within the matched rule a method-specific
//! entry wins over the `"ALL"` fallback. The `"ANONYMOUS"` role in the
//! winning entry means the gate is bypassed. No match means authentication
//! is required — the table can only open paths up, never lock them down
//! further.

use serde::{Deserialize, Serialize};

/// Role name that marks a path+method pair as anonymous-accessible.
pub const ANONYMOUS: &str = "ANONYMOUS";

/// Method name that matches every HTTP method.
pub const ALL_METHODS: &str = "ALL";

/// Per-method role list inside a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRule {
    pub method: String,
    pub roles: Vec<String>,
}

impl MethodRule {
    pub fn new(method: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            method: method.into(),
            roles,
        }
    }

    /// Entry granting anonymous access for one method.
    pub fn anonymous(method: impl Into<String>) -> Self {
        Self::new(method, vec![ANONYMOUS.to_string()])
    }
}

/// One path rule. `path` is a prefix pattern; a trailing `/**` is accepted
/// and equivalent to the bare prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRule {
    pub path: String,
    pub methods: Vec<MethodRule>,
}

impl SecurityRule {
    pub fn new(path: impl Into<String>, methods: Vec<MethodRule>) -> Self {
        Self {
            path: path.into(),
            methods,
        }
    }

    fn prefix(&self) -> &str {
        self.path.strip_suffix("/**").unwrap_or(&self.path)
    }
}

/// The ordered rule table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityRules {
    rules: Vec<SecurityRule>,
}

impl SecurityRules {
    pub fn new(rules: Vec<SecurityRule>) -> Self {
        Self { rules }
    }

    /// Whether `path` + `method` may skip authentication entirely.
    pub fn is_anonymous(&self, path: &str, method: &str) -> bool {
        let Some(rule) = self.matching_rule(path) else {
            return false;
        };

        let entry = rule
            .methods
            .iter()
            .find(|m| m.method.eq_ignore_ascii_case(method))
            .or_else(|| {
                rule.methods
                    .iter()
                    .find(|m| m.method.eq_ignore_ascii_case(ALL_METHODS))
            });

        entry.is_some_and(|m| m.roles.iter().any(|role| role == ANONYMOUS))
    }

    fn matching_rule(&self, path: &str) -> Option<&SecurityRule> {
        let mut best: Option<&SecurityRule> = None;
        for rule in &self.rules {
            if !path.starts_with(rule.prefix()) {
                continue;
            }
            // Strictly-longer wins; earlier table position wins ties.
            if best.is_none_or(|b| rule.prefix().len() > b.prefix().len()) {
                best = Some(rule);
            }
        }
        best
    }
}
