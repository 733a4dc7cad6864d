//! `memberbase-members` — member domain and use-cases.
//!
//! Registration, login, token issuance/refresh, the admin approval workflow,
//! and portfolio reads. Every guarded use-case delegates its authorization to
//! the entitlement engine before touching storage or sending mail.

pub mod admin;
pub mod error;
pub mod login;
pub mod member;
pub mod password;
pub mod portfolio;
pub mod registration;
pub mod repository;
pub mod tokens;

pub use admin::{AdminConfig, AdminService};
pub use error::MembersError;
pub use login::{LoginService, LoginTokens};
pub use member::{Member, NewMember};
pub use password::{PasswordError, PasswordHash};
pub use portfolio::{PortfolioService, UpdateMemberRequest};
pub use registration::{RegistrationRequest, RegistrationService};
pub use repository::MemberRepository;
pub use tokens::TokenService;
