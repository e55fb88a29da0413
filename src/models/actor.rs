//! Caller identity as resolved by the identity layer.

use serde::{Deserialize, Serialize};

/// The role a caller acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Submits their own attendance, overtime and reimbursements.
    Employee,
    /// Closes periods and generates payslips.
    Admin,
}

/// The authenticated caller of an operation, plus request metadata that is
/// copied onto audit entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The caller's user id.
    pub user_id: i64,
    /// The caller's username, recorded as `created_by`/`updated_by`.
    pub username: String,
    /// The caller's role.
    pub role: Role,
    /// Correlation id of the request being served.
    pub request_id: String,
    /// Client address, when known.
    pub ip_address: Option<String>,
}

impl Actor {
    /// Returns true if the caller is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
