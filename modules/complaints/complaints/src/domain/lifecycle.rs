//! Complaint state machine and filing input rules.
//!
//! `Pending -> Resolved -> Confirmed` is the only legal order. Each
//! [`Transition`] names the status it requires and the status it produces;
//! storage applies it as one conditional update so a lost race changes nothing.

use complaints_sdk::{AmenityKind, AmenityRef, ComplaintStatus, NewComplaint};
use hostel_security::Role;

use crate::domain::error::DomainError;

/// Status changes after creation. Creation itself always yields `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Routed manager marks the work done.
    Resolve,
    /// Filing resident acknowledges the fix.
    Confirm,
}

impl Transition {
    #[must_use]
    pub const fn from(self) -> ComplaintStatus {
        match self {
            Self::Resolve => ComplaintStatus::Pending,
            Self::Confirm => ComplaintStatus::Resolved,
        }
    }

    #[must_use]
    pub const fn to(self) -> ComplaintStatus {
        match self {
            Self::Resolve => ComplaintStatus::Resolved,
            Self::Confirm => ComplaintStatus::Confirmed,
        }
    }

    /// Role allowed to perform the transition.
    #[must_use]
    pub const fn actor(self) -> Role {
        match self {
            Self::Resolve => Role::Manager,
            Self::Confirm => Role::Resident,
        }
    }

    /// Error for a complaint found in `current` that cannot take this step.
    #[must_use]
    pub fn rejected(self, id: &str, current: ComplaintStatus) -> DomainError {
        DomainError::invalid_transition(id, current, self.to())
    }
}

/// Filing input after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedComplaint {
    pub description: String,
    pub amenity: AmenityRef,
}

/// Check a filing request.
///
/// Empty fields are reported before an unknown amenity tag, in the order
/// description, amenity type, amenity id.
///
/// # Errors
/// `MissingField`, `InvalidAmenityType` or `DescriptionTooLong`.
pub fn validate_new_complaint(
    input: &NewComplaint,
    max_description_length: usize,
) -> Result<ValidatedComplaint, DomainError> {
    let description = input.description.trim();
    if description.is_empty() {
        return Err(DomainError::missing_field("description"));
    }
    let amenity_type = input.amenity_type.trim();
    if amenity_type.is_empty() {
        return Err(DomainError::missing_field("amenity_type"));
    }
    let amenity_id = input.amenity_id.trim();
    if amenity_id.is_empty() {
        return Err(DomainError::missing_field("amenity_id"));
    }

    let kind: AmenityKind = amenity_type
        .parse()
        .map_err(|_| DomainError::invalid_amenity_type(amenity_type))?;

    let len = description.chars().count();
    if len > max_description_length {
        return Err(DomainError::description_too_long(
            len,
            max_description_length,
        ));
    }

    Ok(ValidatedComplaint {
        description: description.to_owned(),
        amenity: AmenityRef::new(kind, amenity_id),
    })
}

/// Complaint id for the `seq`-th complaint of a facility.
///
/// The dash keeps ids of different facilities apart (`H1` + 11 vs `H11` + 1).
#[must_use]
pub fn complaint_id(prefix: &str, facility_id: &str, seq: i64) -> String {
    format!("{prefix}{facility_id}-{seq}")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn input(description: &str, amenity_type: &str, amenity_id: &str) -> NewComplaint {
        NewComplaint {
            description: description.to_owned(),
            amenity_type: amenity_type.to_owned(),
            amenity_id: amenity_id.to_owned(),
        }
    }

    #[test]
    fn transitions_follow_the_single_path() {
        assert_eq!(Transition::Resolve.from(), ComplaintStatus::Pending);
        assert_eq!(Transition::Resolve.to(), ComplaintStatus::Resolved);
        assert_eq!(Transition::Confirm.from(), ComplaintStatus::Resolved);
        assert_eq!(Transition::Confirm.to(), ComplaintStatus::Confirmed);

        // No transition leaves Confirmed and none reaches it from Pending.
        for t in [Transition::Resolve, Transition::Confirm] {
            assert_ne!(t.from(), ComplaintStatus::Confirmed);
            assert!(!(t.from() == ComplaintStatus::Pending && t.to() == ComplaintStatus::Confirmed));
        }
    }

    #[test]
    fn transitions_are_role_gated() {
        assert_eq!(Transition::Resolve.actor(), Role::Manager);
        assert_eq!(Transition::Confirm.actor(), Role::Resident);
    }

    #[test]
    fn valid_input_builds_amenity_ref() {
        let v = validate_new_complaint(&input("  leaking tap ", "Room", "R101"), 2000).unwrap();
        assert_eq!(v.description, "leaking tap");
        assert_eq!(v.amenity, AmenityRef::Room("R101".to_owned()));
    }

    #[test]
    fn empty_fields_are_missing() {
        let err = validate_new_complaint(&input("   ", "Room", "R101"), 2000).unwrap_err();
        assert!(matches!(err, DomainError::MissingField { field: "description" }));

        let err = validate_new_complaint(&input("x", "", "R101"), 2000).unwrap_err();
        assert!(matches!(err, DomainError::MissingField { field: "amenity_type" }));

        let err = validate_new_complaint(&input("x", "Filter", ""), 2000).unwrap_err();
        assert!(matches!(err, DomainError::MissingField { field: "amenity_id" }));
    }

    #[test]
    fn missing_field_wins_over_bad_tag() {
        let err = validate_new_complaint(&input("x", "Kitchen", ""), 2000).unwrap_err();
        assert!(matches!(err, DomainError::MissingField { field: "amenity_id" }));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = validate_new_complaint(&input("x", "Kitchen", "K1"), 2000).unwrap_err();
        match err {
            DomainError::InvalidAmenityType { value } => assert_eq!(value, "Kitchen"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn description_length_counts_chars() {
        let ok = "\u{e9}".repeat(10);
        assert!(validate_new_complaint(&input(&ok, "Washroom", "W1"), 10).is_ok());

        let err = validate_new_complaint(&input(&"a".repeat(11), "Washroom", "W1"), 10).unwrap_err();
        assert!(matches!(
            err,
            DomainError::DescriptionTooLong { len: 11, max: 10 }
        ));
    }

    #[test]
    fn ids_are_unambiguous_across_facilities() {
        assert_eq!(complaint_id("C", "H1", 1), "CH1-1");
        assert_ne!(complaint_id("C", "H1", 11), complaint_id("C", "H11", 1));
    }
}
