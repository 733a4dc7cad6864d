//! `memberbase-auth` — token verification and entitlement checks.
//!
//! This crate is intentionally decoupled from HTTP and storage: it consumes a
//! [`MemberDirectory`] lookup port and produces typed pass/fail decisions. The
//! HTTP layer owns extracting credentials and binding the resulting
//! [`Identity`] to a request; storage adapters own implementing the port.

pub mod claims;
pub mod codec;
pub mod config;
pub mod directory;
pub mod entitlement;
pub mod error;
pub mod identity;
pub mod inspect;
pub mod role;
pub mod rules;

pub use claims::{AccessClaims, ClaimsError, IdClaims, SignedClaims};
pub use codec::TokenCodec;
pub use config::SecurityConfig;
pub use directory::{MemberDirectory, MemberRecord};
pub use entitlement::{EntitlementCheck, EntitlementCheckRequest, EntitlementEngine};
pub use error::{AuthError, DecodeError, EncodeError};
pub use identity::Identity;
pub use inspect::ClaimsInspector;
pub use role::Role;
pub use rules::{MethodRule, SecurityRule, SecurityRules};
