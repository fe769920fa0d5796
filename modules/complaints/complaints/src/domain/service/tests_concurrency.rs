#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashSet;

use complaints_sdk::{ComplaintStatus, NewComplaint};

use crate::domain::error::DomainError;
use crate::domain::service::ServiceConfig;
use crate::test_support::{build_services, campus_db, manager_ctx, pooled_campus_db, resident_ctx};

fn filter_complaint(description: &str) -> NewComplaint {
    NewComplaint {
        description: description.to_owned(),
        amenity_type: "Filter".to_owned(),
        amenity_id: "F1".to_owned(),
    }
}

#[tokio::test]
async fn simultaneous_filings_get_distinct_ids() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let s1 = resident_ctx("S1", Some("H1"));
    let s2 = resident_ctx("S2", Some("H1"));

    let (a, b) = tokio::join!(
        services
            .complaints
            .file_complaint(&s1, filter_complaint("no water")),
        services
            .complaints
            .file_complaint(&s2, filter_complaint("water is warm")),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_ne!(a.id, b.id);
    let ids: HashSet<_> = [a.id.as_str(), b.id.as_str()].into_iter().collect();
    assert_eq!(ids, HashSet::from(["CH1-1", "CH1-2"]));

    let managed = services
        .complaints
        .list_managed_complaints(&manager_ctx("W1", "H1"))
        .await
        .unwrap();
    assert_eq!(managed.len(), 2);
}

#[tokio::test]
async fn many_concurrent_filings_lose_nothing() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let s1 = resident_ctx("S1", Some("H1"));

    let mut set = tokio::task::JoinSet::new();
    for n in 0..8 {
        let services = services.clone();
        let ctx = s1.clone();
        set.spawn(async move {
            services
                .complaints
                .file_complaint(&ctx, filter_complaint(&format!("report {n}")))
                .await
        });
    }

    let mut ids = HashSet::new();
    while let Some(res) = set.join_next().await {
        ids.insert(res.unwrap().unwrap().id);
    }
    assert_eq!(ids.len(), 8);

    let mine = services.complaints.list_my_complaints(&s1).await.unwrap();
    assert_eq!(mine.len(), 8);
}

#[tokio::test]
async fn racing_resolves_apply_once() {
    let services = build_services(campus_db().await, ServiceConfig::default());
    let w1 = manager_ctx("W1", "H1");
    let created = services
        .complaints
        .file_complaint(&resident_ctx("S1", Some("H1")), filter_complaint("no water"))
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        services.complaints.resolve_complaint(&w1, &created.id),
        services.complaints.resolve_complaint(&w1, &created.id),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(DomainError::InvalidTransition {
            from: ComplaintStatus::Resolved,
            ..
        })
    )));

    let stats = services.stats.get_stats(&w1).await.unwrap();
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.total, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_filings_on_a_connection_pool_all_succeed() {
    let (_dir, db) = pooled_campus_db(8).await;
    let services = build_services(db, ServiceConfig::default());

    let mut set = tokio::task::JoinSet::new();
    for n in 0..8 {
        let services = services.clone();
        let ctx = if n % 2 == 0 {
            resident_ctx("S1", Some("H1"))
        } else {
            resident_ctx("S2", Some("H1"))
        };
        set.spawn(async move {
            services
                .complaints
                .file_complaint(&ctx, filter_complaint(&format!("report {n}")))
                .await
        });
    }

    let mut ids = HashSet::new();
    let mut failures = Vec::new();
    while let Some(res) = set.join_next().await {
        match res.unwrap() {
            Ok(c) => {
                ids.insert(c.id);
            }
            Err(e) => failures.push(e),
        }
    }
    assert!(failures.is_empty(), "filings failed: {failures:?}");

    let expected: HashSet<String> = (1..=8).map(|n| format!("CH1-{n}")).collect();
    assert_eq!(ids, expected);

    let stats = services
        .stats
        .get_stats(&manager_ctx("W1", "H1"))
        .await
        .unwrap();
    assert_eq!(stats.total, 8);
    assert_eq!(stats.pending, 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn filings_in_different_facilities_overlap_on_a_connection_pool() {
    let (_dir, db) = pooled_campus_db(4).await;
    let services = build_services(db, ServiceConfig::default());

    let mut set = tokio::task::JoinSet::new();
    for n in 0..6 {
        let services = services.clone();
        let ctx = if n % 2 == 0 {
            resident_ctx("S1", Some("H1"))
        } else {
            resident_ctx("S3", Some("H2"))
        };
        set.spawn(async move {
            services
                .complaints
                .file_complaint(&ctx, filter_complaint("no water"))
                .await
        });
    }

    let mut ids = HashSet::new();
    while let Some(res) = set.join_next().await {
        ids.insert(res.unwrap().unwrap().id);
    }
    let expected: HashSet<String> = ["CH1-1", "CH1-2", "CH1-3", "CH2-1", "CH2-2", "CH2-3"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    assert_eq!(ids, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_resolves_on_a_connection_pool_apply_once() {
    let (_dir, db) = pooled_campus_db(8).await;
    let services = build_services(db, ServiceConfig::default());
    let created = services
        .complaints
        .file_complaint(&resident_ctx("S1", Some("H1")), filter_complaint("no water"))
        .await
        .unwrap();

    let mut set = tokio::task::JoinSet::new();
    for _ in 0..6 {
        let services = services.clone();
        let id = created.id.clone();
        set.spawn(async move {
            services
                .complaints
                .resolve_complaint(&manager_ctx("W1", "H1"), &id)
                .await
        });
    }

    let mut applied = 0;
    while let Some(res) = set.join_next().await {
        match res.unwrap() {
            Ok(()) => applied += 1,
            Err(e) => assert!(
                matches!(e, DomainError::InvalidTransition { .. }),
                "unexpected error: {e:?}"
            ),
        }
    }
    assert_eq!(applied, 1);
}
