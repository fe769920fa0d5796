#![allow(clippy::unwrap_used, clippy::expect_used)]

use complaints_sdk::NewComplaint;

use crate::domain::error::DomainError;
use crate::domain::service::ServiceConfig;
use crate::test_support::{build_services, campus_db, manager_ctx, resident_ctx};

fn washroom_complaint(description: &str) -> NewComplaint {
    NewComplaint {
        description: description.to_owned(),
        amenity_type: "Washroom".to_owned(),
        amenity_id: "WR1".to_owned(),
    }
}

#[tokio::test]
async fn residents_only_see_their_own_complaints() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let s1 = resident_ctx("S1", Some("H1"));
    let s2 = resident_ctx("S2", Some("H1"));

    services
        .complaints
        .file_complaint(&s1, washroom_complaint("s1 first"))
        .await
        .unwrap();
    services
        .complaints
        .file_complaint(&s2, washroom_complaint("s2 only"))
        .await
        .unwrap();
    services
        .complaints
        .file_complaint(&s1, washroom_complaint("s1 second"))
        .await
        .unwrap();

    let mine = services.complaints.list_my_complaints(&s1).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|c| c.resident_id == "S1"));
    // Newest first.
    assert_eq!(mine[0].description, "s1 second");
    assert_eq!(mine[1].description, "s1 first");

    let theirs = services.complaints.list_my_complaints(&s2).await.unwrap();
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].description, "s2 only");
}

#[tokio::test]
async fn managers_only_see_routed_complaints_with_filer_details() {
    let services = build_services(campus_db().await, ServiceConfig::default());

    services
        .complaints
        .file_complaint(&resident_ctx("S1", Some("H1")), washroom_complaint("h1 issue"))
        .await
        .unwrap();
    services
        .complaints
        .file_complaint(&resident_ctx("S3", Some("H2")), washroom_complaint("h2 issue"))
        .await
        .unwrap();

    let managed = services
        .complaints
        .list_managed_complaints(&manager_ctx("W1", "H1"))
        .await
        .unwrap();
    assert_eq!(managed.len(), 1);
    assert_eq!(managed[0].complaint.manager_id, "W1");
    assert_eq!(managed[0].complaint.description, "h1 issue");
    assert_eq!(managed[0].resident_name, "Resident S1");
    assert_eq!(managed[0].resident_email, "s1@hostel.test");

    let managed = services
        .complaints
        .list_managed_complaints(&manager_ctx("W2", "H2"))
        .await
        .unwrap();
    assert_eq!(managed.len(), 1);
    assert_eq!(managed[0].complaint.resident_id, "S3");
}

#[tokio::test]
async fn manager_outside_facility_cannot_resolve() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let created = services
        .complaints
        .file_complaint(&resident_ctx("S1", Some("H1")), washroom_complaint("leak"))
        .await
        .unwrap();

    // Right manager id, stale facility: the facility must match as well.
    let err = services
        .complaints
        .resolve_complaint(&manager_ctx("W1", "H2"), &created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let err = services
        .complaints
        .resolve_complaint(&manager_ctx("W2", "H2"), &created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let stats = services.stats.get_stats(&manager_ctx("W1", "H1")).await.unwrap();
    assert_eq!(stats.pending, 1);
}

#[tokio::test]
async fn other_resident_cannot_confirm() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let created = services
        .complaints
        .file_complaint(&resident_ctx("S1", Some("H1")), washroom_complaint("leak"))
        .await
        .unwrap();
    services
        .complaints
        .resolve_complaint(&manager_ctx("W1", "H1"), &created.id)
        .await
        .unwrap();

    let err = services
        .complaints
        .confirm_resolution(&resident_ctx("S2", Some("H1")), &created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn operations_are_role_gated() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let resident = resident_ctx("S1", Some("H1"));
    let manager = manager_ctx("W1", "H1");

    let unauthorized = |e: DomainError| matches!(e, DomainError::Unauthorized { .. });

    assert!(unauthorized(
        services
            .complaints
            .file_complaint(&manager, washroom_complaint("x"))
            .await
            .unwrap_err()
    ));
    assert!(unauthorized(
        services.complaints.list_my_complaints(&manager).await.unwrap_err()
    ));
    assert!(unauthorized(
        services
            .complaints
            .confirm_resolution(&manager, "CH1-1")
            .await
            .unwrap_err()
    ));
    assert!(unauthorized(
        services
            .complaints
            .list_managed_complaints(&resident)
            .await
            .unwrap_err()
    ));
    assert!(unauthorized(
        services
            .complaints
            .resolve_complaint(&resident, "CH1-1")
            .await
            .unwrap_err()
    ));
    assert!(unauthorized(services.stats.get_stats(&resident).await.unwrap_err()));
}
