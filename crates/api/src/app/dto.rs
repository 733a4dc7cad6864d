//! Request/response DTOs and JSON mapping helpers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use memberbase_auth::Role;
use memberbase_core::{MemberId, MemberStatus};
use memberbase_members::Member;

/// Member view returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub roles: Vec<Role>,
    pub status: MemberStatus,
    pub member_since: DateTime<Utc>,
    pub registered_since: Option<NaiveDate>,
    pub last_login: Option<DateTime<Utc>>,
}

impl MemberResponse {
    pub fn from_member(member: &Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.to_string(),
            date_of_birth: member.date_of_birth,
            roles: member.roles.clone(),
            status: member.status,
            member_since: member.member_since,
            registered_since: member.registered_since,
            last_login: member.last_login,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub id_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AddRoleRequest {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreationRequest {
    pub member_id: MemberId,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: MemberStatus,
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
}

fn default_page_size() -> usize {
    20
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
}

impl<T> PageResponse<T> {
    pub fn new(content: Vec<T>, page: usize, size: usize, total_elements: u64) -> Self {
        Self {
            content,
            page,
            size,
            total_elements,
        }
    }
}
