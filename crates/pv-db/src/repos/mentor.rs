//! Credential store: mentor registration and authentication.

use chrono::Utc;

use pv_core::entities::{Mentor, MentorId, NewMentor};

use crate::error::DatabaseError;
use crate::finish;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::password::{hash_password, verify_password};
use crate::service::PvService;

const MENTOR_COLUMNS: &str = "id, full_name, email, password_hash, expertise, created_at";

fn row_to_mentor(row: &libsql::Row) -> Result<Mentor, DatabaseError> {
    Ok(Mentor {
        id: row.get::<i64>(0)?,
        full_name: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        password_hash: row.get::<String>(3)?,
        expertise: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl PvService {
    /// Create a mentor account. The password is stored only as a digest.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEmail` if the email is already
    /// registered (no row is created), or another `DatabaseError` on failure.
    pub async fn register_mentor(&self, new: &NewMentor) -> Result<Mentor, DatabaseError> {
        let digest = hash_password(new.password.clone()).await?;
        let now = Utc::now();

        let tx = self.db().begin_write().await?;
        let inserted = tx
            .execute(
                "INSERT INTO mentors (full_name, email, password_hash, expertise, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    new.full_name.as_str(),
                    new.email.as_str(),
                    digest.as_str(),
                    new.expertise.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map(|_| tx.last_insert_rowid())
            .map_err(DatabaseError::from_write);
        let id = finish(tx, inserted).await?;

        tracing::info!(mentor_id = id, "mentor registered");
        Ok(Mentor {
            id,
            full_name: new.full_name.clone(),
            email: new.email.clone(),
            password_hash: digest,
            expertise: new.expertise.clone(),
            created_at: now,
        })
    }

    /// Check a login attempt.
    ///
    /// Unknown email and wrong password both yield
    /// `DatabaseError::InvalidCredentials`, and both pay for one digest check.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidCredentials` on any mismatch, or another
    /// `DatabaseError` if the lookup itself fails.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Mentor, DatabaseError> {
        let mentor = self.find_mentor_by_email(email).await?;
        let digest = mentor.as_ref().map(|m| m.password_hash.clone());
        let verified = verify_password(password.to_string(), digest).await?;

        match mentor {
            Some(mentor) if verified => {
                tracing::debug!(mentor_id = mentor.id, "login succeeded");
                Ok(mentor)
            }
            _ => {
                tracing::debug!("login rejected");
                Err(DatabaseError::InvalidCredentials)
            }
        }
    }

    /// Look up a mentor by exact email.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_mentor_by_email(&self, email: &str) -> Result<Option<Mentor>, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                &format!("SELECT {MENTOR_COLUMNS} FROM mentors WHERE email = ?1"),
                [email],
            )
            .await?;
        rows.next().await?.map(|row| row_to_mentor(&row)).transpose()
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no mentor has this id.
    pub async fn get_mentor(&self, id: MentorId) -> Result<Mentor, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                &format!("SELECT {MENTOR_COLUMNS} FROM mentors WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "mentor",
            id: id.to_string(),
        })?;
        row_to_mentor(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_mentors(&self) -> Result<u64, DatabaseError> {
        let conn = self.db().connect().await?;
        count(&conn).await
    }
}

pub(crate) async fn count(conn: &libsql::Connection) -> Result<u64, DatabaseError> {
    let mut rows = conn.query("SELECT COUNT(*) FROM mentors", ()).await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    let n = row.get::<i64>(0)?;
    u64::try_from(n).map_err(|e| DatabaseError::Query(e.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{new_mentor, test_service};

    use super::*;

    #[tokio::test]
    async fn register_then_authenticate() {
        let svc = test_service().await;
        let registered = svc
            .register_mentor(&new_mentor("a@x.com", "pw1"))
            .await
            .unwrap();
        assert_eq!(registered.id, 1);

        let mentor = svc.authenticate("a@x.com", "pw1").await.unwrap();
        assert_eq!(mentor.profile(), registered.profile());
        assert_eq!(mentor.expertise.as_deref(), Some("CS"));
    }

    #[tokio::test]
    async fn stored_digest_is_not_the_password() {
        let svc = test_service().await;
        svc.register_mentor(&new_mentor("a@x.com", "pw1"))
            .await
            .unwrap();
        let stored = svc.find_mentor_by_email("a@x.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "pw1");
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn duplicate_email_creates_no_row() {
        let svc = test_service().await;
        svc.register_mentor(&new_mentor("a@x.com", "pw1"))
            .await
            .unwrap();
        let err = svc
            .register_mentor(&new_mentor("a@x.com", "pw2"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::DuplicateEmail));
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(svc.count_mentors().await.unwrap(), 1);
        // The original password still works.
        svc.authenticate("a@x.com", "pw1").await.unwrap();
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_the_same() {
        let svc = test_service().await;
        svc.register_mentor(&new_mentor("a@x.com", "pw1"))
            .await
            .unwrap();

        let wrong_password = svc.authenticate("a@x.com", "nope").await.unwrap_err();
        let unknown_email = svc.authenticate("b@x.com", "pw1").await.unwrap_err();
        assert!(matches!(wrong_password, DatabaseError::InvalidCredentials));
        assert!(matches!(unknown_email, DatabaseError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn optional_expertise_round_trips_as_none() {
        let svc = test_service().await;
        let mut new = new_mentor("a@x.com", "pw1");
        new.expertise = None;
        let mentor = svc.register_mentor(&new).await.unwrap();
        let fetched = svc.get_mentor(mentor.id).await.unwrap();
        assert_eq!(fetched.expertise, None);
    }

    #[tokio::test]
    async fn get_unknown_mentor_is_not_found() {
        let svc = test_service().await;
        assert!(matches!(
            svc.get_mentor(99).await,
            Err(DatabaseError::NotFound { entity: "mentor", .. })
        ));
    }
}
