//! Strongly typed record identifiers.
//!
//! Every entity the sync endpoint reads is keyed by a UUID. Wrapping each key
//! in its own newtype keeps a visit id from being passed where a job id is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Organisation (tenant) identifier.
    OrgId
);
define_id!(
    /// Authenticated user account identifier.
    UserId
);
define_id!(
    /// Staff record linking a user to field work.
    StaffId
);
define_id!(
    /// Scheduled job identifier.
    JobId
);
define_id!(
    /// Serviced pool identifier.
    PoolId
);
define_id!(
    /// Client (pool owner) identifier.
    ClientId
);
define_id!(
    /// Service plan identifier.
    PlanId
);
define_id!(
    /// Visit entry identifier.
    VisitId
);
define_id!(
    /// Water-chemistry reading identifier.
    ReadingId
);
define_id!(
    /// Chemicals-used record identifier.
    ChemicalsUsedId
);
define_id!(
    /// Reported issue identifier.
    IssueId
);
