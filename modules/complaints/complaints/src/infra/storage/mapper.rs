//! Entity <-> SDK model conversions. The nullable amenity columns are only
//! ever read or written here.

use complaints_sdk::{AmenityKind, AmenityRef, Complaint, ManagerProfile, ResidentProfile};

use crate::domain::error::DomainError;
use crate::infra::storage::entity::{complaint, manager, resident};

/// Column values for one amenity reference.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AmenityColumns {
    pub kind: &'static str,
    pub room_id: Option<String>,
    pub washroom_id: Option<String>,
    pub filter_id: Option<String>,
}

impl From<&AmenityRef> for AmenityColumns {
    fn from(amenity: &AmenityRef) -> Self {
        let mut cols = Self {
            kind: amenity.kind().as_str(),
            ..Self::default()
        };
        let id = Some(amenity.id().to_owned());
        match amenity {
            AmenityRef::Room(_) => cols.room_id = id,
            AmenityRef::Washroom(_) => cols.washroom_id = id,
            AmenityRef::Filter(_) => cols.filter_id = id,
        }
        cols
    }
}

fn amenity_from_row(m: &complaint::Model) -> Result<AmenityRef, DomainError> {
    let corrupt = || {
        tracing::error!(complaint_id = %m.id, kind = %m.amenity_kind, "amenity columns disagree with discriminant");
        DomainError::internal(format!("complaint {} has an inconsistent amenity", m.id))
    };

    let kind: AmenityKind = m.amenity_kind.parse().map_err(|_| corrupt())?;
    let id = match (kind, &m.room_id, &m.washroom_id, &m.filter_id) {
        (AmenityKind::Room, Some(id), None, None)
        | (AmenityKind::Washroom, None, Some(id), None)
        | (AmenityKind::Filter, None, None, Some(id)) => id.clone(),
        _ => return Err(corrupt()),
    };
    Ok(AmenityRef::new(kind, id))
}

impl TryFrom<complaint::Model> for Complaint {
    type Error = DomainError;

    fn try_from(m: complaint::Model) -> Result<Self, Self::Error> {
        let amenity = amenity_from_row(&m)?;
        let status = m.status.parse().map_err(|e| {
            tracing::error!(complaint_id = %m.id, error = %e, "unreadable complaint status");
            DomainError::internal(format!("complaint {} has an unknown status", m.id))
        })?;
        Ok(Self {
            id: m.id,
            description: m.description,
            status,
            created_at: m.created_at,
            resident_id: m.resident_id,
            manager_id: m.manager_id,
            facility_id: m.facility_id,
            amenity,
        })
    }
}

impl From<&Complaint> for complaint::ActiveModel {
    fn from(c: &Complaint) -> Self {
        use sea_orm::Set;

        let cols = AmenityColumns::from(&c.amenity);
        Self {
            id: Set(c.id.clone()),
            description: Set(c.description.clone()),
            status: Set(c.status.as_str().to_owned()),
            created_at: Set(c.created_at),
            resident_id: Set(c.resident_id.clone()),
            manager_id: Set(c.manager_id.clone()),
            facility_id: Set(c.facility_id.clone()),
            amenity_kind: Set(cols.kind.to_owned()),
            room_id: Set(cols.room_id),
            washroom_id: Set(cols.washroom_id),
            filter_id: Set(cols.filter_id),
        }
    }
}

impl From<resident::Model> for ResidentProfile {
    fn from(m: resident::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            contact: m.contact,
            facility_id: m.facility_id,
            room_id: m.room_id,
        }
    }
}

impl From<manager::Model> for ManagerProfile {
    fn from(m: manager::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            contact: m.contact,
            facility_id: m.facility_id,
        }
    }
}
