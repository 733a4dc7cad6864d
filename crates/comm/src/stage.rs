//! Lifecycle stages that trigger outbound communication.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunicationStage {
    /// Member was confirmed by an admin.
    Approval,
    /// Member was rejected by an admin.
    Rejection,
}

impl core::fmt::Display for CommunicationStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommunicationStage::Approval => f.write_str("APPROVAL"),
            CommunicationStage::Rejection => f.write_str("REJECTION"),
        }
    }
}
