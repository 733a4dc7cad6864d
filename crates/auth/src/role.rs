//! Role set and the assignment hierarchy.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use memberbase_core::DomainError;

/// RBAC role granted to a member.
///
/// The derived ordering **is** the hierarchy: `Member < Finance < Admin`.
/// Wire names are the screaming-case variants (`"MEMBER"`, ...).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Member,
    Finance,
    Admin,
}

impl Role {
    /// Whether a member whose *highest* role is `self` may grant `candidate`.
    ///
    /// Only strictly-lower roles can be granted: no self-elevation, no
    /// lateral assignment.
    pub fn can_assign(self, candidate: Role) -> bool {
        self > candidate
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Member => "MEMBER",
            Role::Finance => "FINANCE",
            Role::Admin => "ADMIN",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MEMBER" => Ok(Role::Member),
            "FINANCE" => Ok(Role::Finance),
            "ADMIN" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// Highest role in a grant set, if any.
pub fn highest_role(roles: &[Role]) -> Option<Role> {
    roles.iter().copied().max()
}
