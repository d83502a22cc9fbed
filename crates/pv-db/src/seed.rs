//! First-run bootstrap: demo mentor accounts.
//!
//! Seeding only happens while the mentors table is empty, so restarting the
//! server never duplicates the demo rows and never touches real accounts.

use chrono::Utc;

use crate::error::DatabaseError;
use crate::finish;
use crate::password::hash_password;
use crate::repos::mentor::count;
use crate::service::PvService;

/// Shared password of every demo account.
pub const DEMO_PASSWORD: &str = "password123";

/// `(full_name, email, expertise)` for each demo mentor.
pub const DEMO_MENTORS: [(&str, &str, &str); 3] = [
    ("Dr. Sarah Johnson", "sarah.johnson@example.com", "Computer Science"),
    ("Prof. Michael Chen", "michael.chen@example.com", "Mathematics"),
    ("Dr. Emily Rodriguez", "emily.rodriguez@example.com", "Physics"),
];

impl PvService {
    /// Insert the demo mentors if no mentor exists yet.
    ///
    /// Returns how many accounts were created (0 or `DEMO_MENTORS.len()`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if hashing or any insert fails; in that case
    /// no demo account is created.
    pub async fn seed_demo_mentors(&self) -> Result<usize, DatabaseError> {
        if self.count_mentors().await? > 0 {
            tracing::debug!("mentors present; skipping demo seed");
            return Ok(0);
        }

        let mut digests = Vec::with_capacity(DEMO_MENTORS.len());
        for _ in DEMO_MENTORS {
            digests.push(hash_password(DEMO_PASSWORD.to_string()).await?);
        }

        let tx = self.db().begin_write().await?;
        let result = insert_demo_rows(&tx, &digests).await;
        let created = finish(tx, result).await?;
        if created > 0 {
            tracing::info!(created, "seeded demo mentors");
        }
        Ok(created)
    }
}

async fn insert_demo_rows(
    conn: &libsql::Connection,
    digests: &[String],
) -> Result<usize, DatabaseError> {
    // Another process may have registered someone since the first check.
    if count(conn).await? > 0 {
        return Ok(0);
    }
    let now = Utc::now().to_rfc3339();
    for ((full_name, email, expertise), digest) in DEMO_MENTORS.iter().zip(digests) {
        conn.execute(
            "INSERT INTO mentors (full_name, email, password_hash, expertise, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![*full_name, *email, digest.as_str(), *expertise, now.as_str()],
        )
        .await
        .map_err(DatabaseError::from_write)?;
    }
    Ok(DEMO_MENTORS.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{new_mentor, test_service};

    use super::*;

    #[tokio::test]
    async fn seeds_three_mentors_once() {
        let svc = test_service().await;
        assert_eq!(svc.seed_demo_mentors().await.unwrap(), 3);
        assert_eq!(svc.seed_demo_mentors().await.unwrap(), 0);
        assert_eq!(svc.count_mentors().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn demo_accounts_can_log_in() {
        let svc = test_service().await;
        svc.seed_demo_mentors().await.unwrap();
        for (full_name, email, expertise) in DEMO_MENTORS {
            let mentor = svc.authenticate(email, DEMO_PASSWORD).await.unwrap();
            assert_eq!(mentor.full_name, full_name);
            assert_eq!(mentor.expertise.as_deref(), Some(expertise));
        }
    }

    #[tokio::test]
    async fn existing_accounts_block_seeding() {
        let svc = test_service().await;
        svc.register_mentor(&new_mentor("real@x.com", "pw"))
            .await
            .unwrap();
        assert_eq!(svc.seed_demo_mentors().await.unwrap(), 0);
        assert!(svc
            .find_mentor_by_email("sarah.johnson@example.com")
            .await
            .unwrap()
            .is_none());
    }
}
