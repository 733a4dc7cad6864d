//! Membership lifecycle status.

use serde::{Deserialize, Serialize};

/// Where a member sits in the approval workflow.
///
/// Registration always starts at `Pending`; only an admin decision moves a
/// member to `Confirmed` or `Rejected`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl MemberStatus {
    pub fn is_confirmed(self) -> bool {
        self == MemberStatus::Confirmed
    }
}

impl core::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemberStatus::Pending => f.write_str("PENDING"),
            MemberStatus::Confirmed => f.write_str("CONFIRMED"),
            MemberStatus::Rejected => f.write_str("REJECTED"),
        }
    }
}
