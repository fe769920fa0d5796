use std::fmt;

use serde::{Deserialize, Serialize};

/// The two roles an authenticated principal can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Resident,
    Manager,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resident may be unassigned between move-out and move-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentPrincipal {
    pub id: String,
    pub facility_id: Option<String>,
}

/// A manager is always bound to exactly one facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerPrincipal {
    pub id: String,
    pub facility_id: String,
}

/// Role-tagged principal. Operations match on it exhaustively instead of
/// comparing role strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Principal {
    Resident(ResidentPrincipal),
    Manager(ManagerPrincipal),
}

impl Principal {
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Resident(_) => Role::Resident,
            Self::Manager(_) => Role::Manager,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Resident(r) => &r.id,
            Self::Manager(m) => &m.id,
        }
    }

    #[must_use]
    pub fn facility_id(&self) -> Option<&str> {
        match self {
            Self::Resident(r) => r.facility_id.as_deref(),
            Self::Manager(m) => Some(&m.facility_id),
        }
    }
}
