use complaints_sdk::{Complaint, ComplaintStats, ManagedComplaint, NewComplaint};
use hostel_security::SessionContext;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// The caller's resolved session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    /// `resident` or `manager`.
    pub role: String,
    /// Resident or manager id.
    pub subject_id: String,
    pub facility_id: Option<String>,
    pub email: String,
    pub display_name: String,
}

impl From<&SessionContext> for SessionDto {
    fn from(ctx: &SessionContext) -> Self {
        Self {
            role: ctx.role().to_string(),
            subject_id: ctx.subject_id().to_owned(),
            facility_id: ctx.facility_id().map(str::to_owned),
            email: ctx.email().to_owned(),
            display_name: ctx.display_name().to_owned(),
        }
    }
}

/// Request to file a complaint. Absent fields are treated as empty and
/// reported as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateComplaintReq {
    #[serde(default)]
    pub description: String,
    /// `Room`, `Washroom` or `Filter`.
    #[serde(default)]
    pub amenity_type: String,
    #[serde(default)]
    pub amenity_id: String,
}

impl From<CreateComplaintReq> for NewComplaint {
    fn from(req: CreateComplaintReq) -> Self {
        Self {
            description: req.description,
            amenity_type: req.amenity_type,
            amenity_id: req.amenity_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintDto {
    pub id: String,
    pub description: String,
    /// `Pending`, `Resolved` or `Confirmed`.
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub resident_id: String,
    pub manager_id: String,
    pub facility_id: String,
    pub amenity_type: String,
    pub amenity_id: String,
}

impl From<Complaint> for ComplaintDto {
    fn from(c: Complaint) -> Self {
        Self {
            amenity_type: c.amenity.kind().to_string(),
            amenity_id: c.amenity.id().to_owned(),
            id: c.id,
            description: c.description,
            status: c.status.to_string(),
            created_at: c.created_at,
            resident_id: c.resident_id,
            manager_id: c.manager_id,
            facility_id: c.facility_id,
        }
    }
}

/// Manager view of a complaint with the filer's contact fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ManagedComplaintDto {
    #[serde(flatten)]
    pub complaint: ComplaintDto,
    pub resident_name: String,
    pub resident_email: String,
}

impl From<ManagedComplaint> for ManagedComplaintDto {
    fn from(m: ManagedComplaint) -> Self {
        Self {
            complaint: m.complaint.into(),
            resident_name: m.resident_name,
            resident_email: m.resident_email,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct StatsDto {
    pub total: u64,
    pub pending: u64,
    pub resolved: u64,
    pub confirmed: u64,
}

impl From<ComplaintStats> for StatsDto {
    fn from(s: ComplaintStats) -> Self {
        Self {
            total: s.total,
            pending: s.pending,
            resolved: s.resolved,
            confirmed: s.confirmed,
        }
    }
}

/// Result of a lifecycle transition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransitionDto {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
}
