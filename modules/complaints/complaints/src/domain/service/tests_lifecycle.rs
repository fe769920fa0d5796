#![allow(clippy::unwrap_used, clippy::expect_used)]

use complaints_sdk::{AmenityRef, ComplaintStatus, NewComplaint, ResolvedIdentity};

use crate::domain::error::DomainError;
use crate::domain::service::ServiceConfig;
use crate::test_support::{
    build_services, campus_db, inmem_db, manager_ctx, resident_ctx, seed_facility, seed_manager,
    seed_resident,
};

fn room_complaint(description: &str, room: &str) -> NewComplaint {
    NewComplaint {
        description: description.to_owned(),
        amenity_type: "Room".to_owned(),
        amenity_id: room.to_owned(),
    }
}

#[tokio::test]
async fn file_routes_to_facility_manager() {
    let services = build_services(campus_db().await, ServiceConfig::default());

    let created = services
        .complaints
        .file_complaint(&resident_ctx("S1", Some("H1")), room_complaint("leaking tap", "R101"))
        .await
        .unwrap();

    assert_eq!(created.id, "CH1-1");
    assert_eq!(created.status, ComplaintStatus::Pending);
    assert_eq!(created.resident_id, "S1");
    assert_eq!(created.manager_id, "W1");
    assert_eq!(created.facility_id, "H1");
    assert_eq!(created.amenity, AmenityRef::Room("R101".to_owned()));
    assert_eq!(created.description, "leaking tap");
}

#[tokio::test]
async fn resolve_is_single_shot() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let s1 = resident_ctx("S1", Some("H1"));
    let w1 = manager_ctx("W1", "H1");

    let created = services
        .complaints
        .file_complaint(&s1, room_complaint("leaking tap", "R101"))
        .await
        .unwrap();

    services
        .complaints
        .resolve_complaint(&w1, &created.id)
        .await
        .unwrap();
    let mine = services.complaints.list_my_complaints(&s1).await.unwrap();
    assert_eq!(mine[0].status, ComplaintStatus::Resolved);

    let err = services
        .complaints
        .resolve_complaint(&w1, &created.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidTransition {
            from: ComplaintStatus::Resolved,
            to: ComplaintStatus::Resolved,
            ..
        }
    ));
}

#[tokio::test]
async fn confirm_completes_lifecycle_and_hides_from_foreign_manager() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let s1 = resident_ctx("S1", Some("H1"));

    let created = services
        .complaints
        .file_complaint(&s1, room_complaint("leaking tap", "R101"))
        .await
        .unwrap();
    services
        .complaints
        .resolve_complaint(&manager_ctx("W1", "H1"), &created.id)
        .await
        .unwrap();
    services
        .complaints
        .confirm_resolution(&s1, &created.id)
        .await
        .unwrap();

    let mine = services.complaints.list_my_complaints(&s1).await.unwrap();
    assert_eq!(mine[0].status, ComplaintStatus::Confirmed);

    let err = services
        .complaints
        .resolve_complaint(&manager_ctx("W2", "H2"), &created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn pending_cannot_be_confirmed() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let s1 = resident_ctx("S1", Some("H1"));

    let created = services
        .complaints
        .file_complaint(&s1, room_complaint("broken fan", "R102"))
        .await
        .unwrap();

    let err = services
        .complaints
        .confirm_resolution(&s1, &created.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidTransition {
            from: ComplaintStatus::Pending,
            to: ComplaintStatus::Confirmed,
            ..
        }
    ));

    let mine = services.complaints.list_my_complaints(&s1).await.unwrap();
    assert_eq!(mine[0].status, ComplaintStatus::Pending);
}

#[tokio::test]
async fn confirmed_complaint_cannot_be_resolved_or_confirmed_again() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let s1 = resident_ctx("S1", Some("H1"));
    let w1 = manager_ctx("W1", "H1");

    let created = services
        .complaints
        .file_complaint(&s1, room_complaint("leaking tap", "R101"))
        .await
        .unwrap();
    services.complaints.resolve_complaint(&w1, &created.id).await.unwrap();
    services.complaints.confirm_resolution(&s1, &created.id).await.unwrap();

    let err = services
        .complaints
        .resolve_complaint(&w1, &created.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidTransition {
            from: ComplaintStatus::Confirmed,
            ..
        }
    ));

    let err = services
        .complaints
        .confirm_resolution(&s1, &created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));
}

#[tokio::test]
async fn unknown_or_blank_id_is_rejected() {
    let services = build_services(campus_db().await, ServiceConfig::default());

    let err = services
        .complaints
        .resolve_complaint(&manager_ctx("W1", "H1"), "CH1-99")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let err = services
        .complaints
        .confirm_resolution(&resident_ctx("S1", Some("H1")), "  ")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::MissingField {
            field: "complaint_id"
        }
    ));
}

#[tokio::test]
async fn ids_are_sequenced_per_facility() {
    let services = build_services(campus_db().await, ServiceConfig::default());

    let a = services
        .complaints
        .file_complaint(&resident_ctx("S1", Some("H1")), room_complaint("one", "R101"))
        .await
        .unwrap();
    let b = services
        .complaints
        .file_complaint(&resident_ctx("S2", Some("H1")), room_complaint("two", "R102"))
        .await
        .unwrap();
    let c = services
        .complaints
        .file_complaint(&resident_ctx("S3", Some("H2")), room_complaint("three", "R101"))
        .await
        .unwrap();

    assert_eq!(a.id, "CH1-1");
    assert_eq!(b.id, "CH1-2");
    assert_eq!(c.id, "CH2-1");
}

#[tokio::test]
async fn configured_prefix_is_used() {
    let config = ServiceConfig {
        complaint_id_prefix: "MNT-".to_owned(),
        ..ServiceConfig::default()
    };
    let services = build_services(campus_db().await, config);

    let created = services
        .complaints
        .file_complaint(&resident_ctx("S1", Some("H1")), room_complaint("x", "R101"))
        .await
        .unwrap();
    assert_eq!(created.id, "MNT-H1-1");
}

#[tokio::test]
async fn each_amenity_variant_is_stored_once() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let s1 = resident_ctx("S1", Some("H1"));

    for (kind, id) in [("Room", "R101"), ("Washroom", "WR1"), ("Filter", "F1")] {
        services
            .complaints
            .file_complaint(
                &s1,
                NewComplaint {
                    description: format!("{kind} issue"),
                    amenity_type: kind.to_owned(),
                    amenity_id: id.to_owned(),
                },
            )
            .await
            .unwrap();
    }

    let mine = services.complaints.list_my_complaints(&s1).await.unwrap();
    let mut amenities: Vec<_> = mine.into_iter().map(|c| c.amenity).collect();
    amenities.sort_by(|a, b| a.id().cmp(b.id()));
    assert_eq!(
        amenities,
        vec![
            AmenityRef::Filter("F1".to_owned()),
            AmenityRef::Room("R101".to_owned()),
            AmenityRef::Washroom("WR1".to_owned()),
        ]
    );
}

#[tokio::test]
async fn malformed_input_is_rejected_before_routing() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    // S4 has no facility: a routing error would surface if validation ran late.
    let s4 = resident_ctx("S4", None);

    let err = services
        .complaints
        .file_complaint(&s4, room_complaint("", "R101"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::MissingField {
            field: "description"
        }
    ));

    let err = services
        .complaints
        .file_complaint(
            &s4,
            NewComplaint {
                description: "noisy".to_owned(),
                amenity_type: "Corridor".to_owned(),
                amenity_id: "C1".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidAmenityType { .. }));
}

#[tokio::test]
async fn unknown_amenity_is_not_found_and_consumes_no_id() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let s1 = resident_ctx("S1", Some("H1"));

    let err = services
        .complaints
        .file_complaint(&s1, room_complaint("leak", "R999"))
        .await
        .unwrap_err();
    match err {
        DomainError::NotFound { id } => assert_eq!(id, "R999"),
        other => panic!("unexpected error: {other:?}"),
    }

    let created = services
        .complaints
        .file_complaint(&s1, room_complaint("leak", "R101"))
        .await
        .unwrap();
    assert_eq!(created.id, "CH1-1");
}

#[tokio::test]
async fn unmanaged_or_unassigned_resident_cannot_file() {
    let services = build_services(campus_db().await, ServiceConfig::default());

    let err = services
        .complaints
        .file_complaint(&resident_ctx("S5", Some("H3")), room_complaint("x", "R101"))
        .await
        .unwrap_err();
    match err {
        DomainError::NoManagerAssigned { facility } => assert_eq!(facility.as_deref(), Some("H3")),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = services
        .complaints
        .file_complaint(&resident_ctx("S4", None), room_complaint("x", "R101"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NoManagerAssigned { facility: None }));
}

#[tokio::test]
async fn stats_partition_by_status() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let s1 = resident_ctx("S1", Some("H1"));
    let w1 = manager_ctx("W1", "H1");

    let mut ids = Vec::new();
    for n in 0..4 {
        let c = services
            .complaints
            .file_complaint(&s1, room_complaint(&format!("issue {n}"), "R101"))
            .await
            .unwrap();
        ids.push(c.id);
    }
    services.complaints.resolve_complaint(&w1, &ids[0]).await.unwrap();
    services.complaints.resolve_complaint(&w1, &ids[1]).await.unwrap();
    services.complaints.confirm_resolution(&s1, &ids[0]).await.unwrap();

    let stats = services.stats.get_stats(&w1).await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.confirmed, 1);
    assert_eq!(stats.total, stats.pending + stats.resolved + stats.confirmed);

    let empty = services.stats.get_stats(&manager_ctx("W2", "H2")).await.unwrap();
    assert_eq!(empty.total, 0);
}

#[tokio::test]
async fn identity_prefers_managers() {
    let db = inmem_db().await;
    seed_facility(&db, "H1").await;
    seed_manager(&db, "W1", "H1").await;
    // Same email in both sets: w1@hostel.test
    seed_resident(&db, "w1", Some("H1")).await;
    seed_resident(&db, "S1", Some("H1")).await;
    let services = build_services(db, ServiceConfig::default());

    let resolved = services.identity.resolve("w1@hostel.test").await.unwrap();
    assert!(matches!(resolved, ResolvedIdentity::Manager(ref m) if m.id == "W1"));

    let resolved = services.identity.resolve("s1@hostel.test").await.unwrap();
    assert!(matches!(resolved, ResolvedIdentity::Resident(ref r) if r.id == "S1"));
}

#[tokio::test]
async fn identity_rejects_unknown_and_empty_emails() {
    let services = build_services(campus_db().await, ServiceConfig::default());

    let err = services
        .identity
        .resolve("stranger@elsewhere.test")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotRegistered { .. }));

    let err = services.identity.resolve("  ").await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized { .. }));
}

#[tokio::test]
async fn open_session_carries_role_and_facility() {
    let services = build_services(campus_db().await, ServiceConfig::default());

    let ctx = services
        .identity
        .open_session("w2@hostel.test", "Warden Two")
        .await
        .unwrap();
    let manager = ctx.require_manager().unwrap();
    assert_eq!(manager.id, "W2");
    assert_eq!(manager.facility_id, "H2");
    assert_eq!(ctx.display_name(), "Warden Two");

    let ctx = services
        .identity
        .open_session("s4@hostel.test", "Drifter")
        .await
        .unwrap();
    let resident = ctx.require_resident().unwrap();
    assert_eq!(resident.id, "S4");
    assert_eq!(resident.facility_id, None);
}
