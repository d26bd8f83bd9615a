/// Role-based access control for the workforce domain
///
/// Roles form a closed set with a fixed privilege ordering. Validation is
/// strict: an unknown role is rejected, never substituted with a default.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Hr,
    Accounting,
    PurchaseDepartment,
    ProjectManager,
    Mechanics,
    Worker,
}

/// Role input as it arrives at the signup boundary: a single name or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoleInput {
    One(String),
    Many(Vec<String>),
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Hr,
        Role::Accounting,
        Role::PurchaseDepartment,
        Role::ProjectManager,
        Role::Mechanics,
        Role::Worker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Accounting => "accounting",
            Role::PurchaseDepartment => "purchase_department",
            Role::ProjectManager => "project_manager",
            Role::Mechanics => "mechanics",
            Role::Worker => "worker",
        }
    }

    /// Comma-separated list of all valid role names, for error messages.
    pub fn valid_names() -> String {
        Role::ALL
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Privilege level in the role hierarchy (higher = more privileges).
    pub fn level(&self) -> u8 {
        match self {
            Role::Worker => 1,
            Role::Mechanics => 2,
            Role::PurchaseDepartment => 3,
            Role::Accounting => 4,
            Role::Hr => 5,
            Role::ProjectManager => 6,
            Role::Admin => 7,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// True for roles at or above the management tier.
    pub fn is_manager_or_above(&self) -> bool {
        self.level() >= Role::ProjectManager.level()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "admin" => Ok(Role::Admin),
            "hr" => Ok(Role::Hr),
            "accounting" => Ok(Role::Accounting),
            "purchase_department" => Ok(Role::PurchaseDepartment),
            "project_manager" => Ok(Role::ProjectManager),
            "mechanics" => Ok(Role::Mechanics),
            "worker" => Ok(Role::Worker),
            other => Err(AuthError::InvalidRole {
                role: other.to_string(),
            }),
        }
    }
}

/// Validate the role supplied at signup.
///
/// Accepts a single name or a list (first element wins). The name is trimmed
/// and lowercased before the membership check. Absent, empty or
/// whitespace-only input fails `RoleRequired`; a non-member fails
/// `InvalidRole` carrying the offending value.
pub fn validate_role(input: Option<&RoleInput>) -> Result<Role> {
    let raw = match input {
        None => return Err(AuthError::RoleRequired),
        Some(RoleInput::One(s)) => s.as_str(),
        Some(RoleInput::Many(list)) => match list.first() {
            None => return Err(AuthError::RoleRequired),
            Some(s) => s.as_str(),
        },
    };

    if raw.trim().is_empty() {
        return Err(AuthError::RoleRequired);
    }

    let normalized = raw.trim().to_lowercase();
    normalized.parse::<Role>().map_err(|_| AuthError::InvalidRole {
        role: raw.trim().to_string(),
    })
}

/// Check if the user holds a specific role.
pub fn has_role(user_roles: &[Role], required: Role) -> bool {
    user_roles.contains(&required)
}

/// Check if the user holds any of the required roles.
pub fn has_any_role(user_roles: &[Role], required: &[Role]) -> bool {
    user_roles.iter().any(|role| required.contains(role))
}

/// Check if the user holds all of the required roles.
pub fn has_all_roles(user_roles: &[Role], required: &[Role]) -> bool {
    required.iter().all(|role| user_roles.contains(role))
}

/// Highest privilege level among the user's roles (0 when empty).
pub fn highest_role_level(user_roles: &[Role]) -> u8 {
    user_roles.iter().map(Role::level).max().unwrap_or(0)
}
