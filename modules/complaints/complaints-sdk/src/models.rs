//! Contract models for the complaints module.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use time::OffsetDateTime;

/// Complaint lifecycle status. The only legal order is
/// `Pending -> Resolved -> Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplaintStatus {
    Pending,
    Resolved,
    Confirmed,
}

impl ComplaintStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Resolved, Self::Confirmed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
            Self::Confirmed => "Confirmed",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown complaint status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ComplaintStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Resolved" => Ok(Self::Resolved),
            "Confirmed" => Ok(Self::Confirmed),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Type tag of a complaint target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmenityKind {
    Room,
    Washroom,
    Filter,
}

impl AmenityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Room => "Room",
            Self::Washroom => "Washroom",
            Self::Filter => "Filter",
        }
    }
}

impl fmt::Display for AmenityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown amenity type '{0}'")]
pub struct UnknownAmenityKind(pub String);

impl FromStr for AmenityKind {
    type Err = UnknownAmenityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Room" => Ok(Self::Room),
            "Washroom" => Ok(Self::Washroom),
            "Filter" => Ok(Self::Filter),
            other => Err(UnknownAmenityKind(other.to_owned())),
        }
    }
}

/// The single amenity a complaint targets. Exactly one reference exists by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AmenityRef {
    Room(String),
    Washroom(String),
    Filter(String),
}

impl AmenityRef {
    #[must_use]
    pub fn new(kind: AmenityKind, id: impl Into<String>) -> Self {
        let id = id.into();
        match kind {
            AmenityKind::Room => Self::Room(id),
            AmenityKind::Washroom => Self::Washroom(id),
            AmenityKind::Filter => Self::Filter(id),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AmenityKind {
        match self {
            Self::Room(_) => AmenityKind::Room,
            Self::Washroom(_) => AmenityKind::Washroom,
            Self::Filter(_) => AmenityKind::Filter,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Room(id) | Self::Washroom(id) | Self::Filter(id) => id,
        }
    }
}

/// A persisted complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    pub id: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub created_at: OffsetDateTime,
    pub resident_id: String,
    /// Routed once at creation, never recomputed.
    pub manager_id: String,
    pub facility_id: String,
    pub amenity: AmenityRef,
}

/// Manager-side view: the complaint plus the filer's display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedComplaint {
    pub complaint: Complaint,
    pub resident_name: String,
    pub resident_email: String,
}

/// Raw filing request as received from the caller. Validated by the service.
#[derive(Debug, Clone, Default)]
pub struct NewComplaint {
    pub description: String,
    /// One of `Room`, `Washroom`, `Filter`.
    pub amenity_type: String,
    pub amenity_id: String,
}

/// Per-manager counts. `total == pending + resolved + confirmed` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplaintStats {
    pub total: u64,
    pub pending: u64,
    pub resolved: u64,
    pub confirmed: u64,
}

impl ComplaintStats {
    /// Add `count` complaints in `status` to the partition.
    pub fn record(&mut self, status: ComplaintStatus, count: u64) {
        match status {
            ComplaintStatus::Pending => self.pending += count,
            ComplaintStatus::Resolved => self.resolved += count,
            ComplaintStatus::Confirmed => self.confirmed += count,
        }
        self.total += count;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub facility_id: Option<String>,
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub facility_id: String,
}

/// Outcome of resolving a verified email to a registered principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIdentity {
    Manager(ManagerProfile),
    Resident(ResidentProfile),
}
