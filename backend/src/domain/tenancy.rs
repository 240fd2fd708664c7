//! Caller identity and tenant scoping.
//!
//! A [`Caller`] is produced by the bearer guard from verified token claims,
//! never from request parameters. Record-store ports only accept a
//! [`TenantScope`], which can only be derived from a caller, so every query
//! the sync service issues is bound to the caller's organisation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{OrgId, UserId};

/// Closed set of organisation roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Organisation owner with full access.
    Admin,
    /// Office staff scheduling and reviewing work.
    Manager,
    /// Field technician carrying out visits.
    Carer,
}

impl Role {
    /// Whether this role is restricted to its own assigned work.
    #[must_use]
    pub const fn is_field_technician(self) -> bool {
        matches!(self, Self::Carer)
    }

    /// Wire representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Carer => "carer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a role string is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "carer" => Ok(Self::Carer),
            _ => Err(ParseRoleError(s.to_owned())),
        }
    }
}

/// Authenticated identity of the party calling the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    org_id: OrgId,
    user_id: UserId,
    role: Role,
}

impl Caller {
    /// Build a caller from verified claims.
    #[must_use]
    pub const fn new(org_id: OrgId, user_id: UserId, role: Role) -> Self {
        Self {
            org_id,
            user_id,
            role,
        }
    }

    /// Organisation the caller belongs to.
    #[must_use]
    pub const fn org_id(&self) -> OrgId {
        self.org_id
    }

    /// User account of the caller.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Role of the caller within the organisation.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Tenant scope for record-store access on behalf of this caller.
    #[must_use]
    pub const fn scope(&self) -> TenantScope {
        TenantScope {
            org_id: self.org_id,
        }
    }
}

/// Proof that a query is bound to a single organisation.
///
/// Only obtainable through [`Caller::scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope {
    org_id: OrgId,
}

impl TenantScope {
    /// Organisation every query under this scope must filter by.
    #[must_use]
    pub const fn org_id(&self) -> OrgId {
        self.org_id
    }
}
