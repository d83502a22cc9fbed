//! Store behavior against a file-backed database, where every call gets its
//! own connection and writes really do race.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use pv_config::DatabaseConfig;
use pv_core::entities::{NewMentor, NewStudent};
use pv_db::error::DatabaseError;
use pv_db::seed::{DEMO_MENTORS, DEMO_PASSWORD};
use pv_db::service::PvService;
use pv_risk::RiskScorer;
use tempfile::TempDir;

async fn file_service() -> (TempDir, Arc<PvService>) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: dir.path().join("pravartak.db").display().to_string(),
        ..DatabaseConfig::default()
    };
    let svc = PvService::open(&config).await.unwrap();
    (dir, Arc::new(svc))
}

fn mentor(email: &str) -> NewMentor {
    NewMentor {
        full_name: "Mentor".into(),
        email: email.into(),
        password: "pw".into(),
        expertise: None,
    }
}

fn student(mentor_id: i64, email: &str) -> NewStudent {
    NewStudent {
        full_name: "Student".into(),
        email: email.into(),
        roll_no: "R1".into(),
        gender: "Female".into(),
        category: "OBC".into(),
        fees_status: "Pending".into(),
        attendance: 72.5,
        marks: 6.1,
        backlog: 1,
        mentor_id,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_identical_registrations_admit_exactly_one() {
    let (_dir, svc) = file_service().await;

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move { svc.register_mentor(&mentor("race@x.com")).await })
        })
        .collect();

    let mut successes = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DatabaseError::DuplicateEmail) => duplicates += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!((successes, duplicates), (1, 5));
    assert_eq!(svc.count_mentors().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_student_inserts_all_land() {
    let (_dir, svc) = file_service().await;
    let owner = svc.register_mentor(&mentor("m@x.com")).await.unwrap().id;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move {
                svc.add_student(&student(owner, &format!("s{i}@x.com")), &RiskScorer::unavailable())
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let listed = svc.list_students(owner).await.unwrap();
    assert_eq!(listed.len(), 8);
    assert!(listed.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[tokio::test]
async fn seeding_survives_reopen_without_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite:///{}", dir.path().join("pv.db").display()),
        ..DatabaseConfig::default()
    };

    let first = PvService::open(&config).await.unwrap();
    assert_eq!(first.seed_demo_mentors().await.unwrap(), DEMO_MENTORS.len());
    drop(first);

    let second = PvService::open(&config).await.unwrap();
    assert_eq!(second.seed_demo_mentors().await.unwrap(), 0);
    assert_eq!(second.count_mentors().await.unwrap(), 3);
    second
        .authenticate(DEMO_MENTORS[1].1, DEMO_PASSWORD)
        .await
        .unwrap();
}

#[tokio::test]
async fn records_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: dir.path().join("pv.db").display().to_string(),
        ..DatabaseConfig::default()
    };

    let student_id = {
        let svc = PvService::open(&config).await.unwrap();
        let owner = svc.register_mentor(&mentor("m@x.com")).await.unwrap().id;
        svc.add_student(&student(owner, "s@x.com"), &RiskScorer::unavailable())
            .await
            .unwrap()
            .id
    };

    let svc = PvService::open(&config).await.unwrap();
    let fetched = svc.get_student(student_id).await.unwrap();
    assert_eq!(fetched.email, "s@x.com");
    assert_eq!(fetched.category, "OBC");
    assert!((fetched.attendance - 72.5).abs() < f64::EPSILON);
}
