//! Record store: student creation and mentor-scoped reads.

use chrono::Utc;

use pv_core::entities::{MentorId, NewStudent, Student, StudentId};
use pv_risk::{RiskScorer, ScorerError};

use crate::error::DatabaseError;
use crate::finish;
use crate::helpers::{get_count, parse_datetime};
use crate::service::PvService;

const STUDENT_COLUMNS: &str = "id, full_name, email, roll_no, gender, category, fees_status, \
                               attendance, marks, backlog, dropout_risk, mentor_id, created_at";

fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    Ok(Student {
        id: row.get::<i64>(0)?,
        full_name: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        roll_no: row.get::<String>(3)?,
        gender: row.get::<String>(4)?,
        category: row.get::<String>(5)?,
        fees_status: row.get::<String>(6)?,
        attendance: row.get::<f64>(7)?,
        marks: row.get::<f64>(8)?,
        backlog: get_count(row, 9)?,
        dropout_risk: row.get::<i64>(10)? != 0,
        mentor_id: row.get::<i64>(11)?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

impl PvService {
    /// Score and persist a new student.
    ///
    /// The risk label is computed once here and stored. Without a loaded
    /// model the student is stored as low risk.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEmail` for a reused student email,
    /// `DatabaseError::Constraint` if the mentor does not exist, or another
    /// `DatabaseError` on failure. Nothing is persisted on error.
    pub async fn add_student(
        &self,
        new: &NewStudent,
        scorer: &RiskScorer,
    ) -> Result<Student, DatabaseError> {
        let dropout_risk = match scorer.score(&new.features()) {
            Ok(label) => label,
            Err(ScorerError::Unavailable) => {
                tracing::debug!("no risk model loaded; storing student as low risk");
                false
            }
            Err(error) => return Err(error.into()),
        };
        let now = Utc::now();

        let tx = self.db().begin_write().await?;
        let inserted = tx
            .execute(
                "INSERT INTO students (full_name, email, roll_no, gender, category, fees_status,
                                       attendance, marks, backlog, dropout_risk, mentor_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                libsql::params![
                    new.full_name.as_str(),
                    new.email.as_str(),
                    new.roll_no.as_str(),
                    new.gender.as_str(),
                    new.category.as_str(),
                    new.fees_status.as_str(),
                    new.attendance,
                    new.marks,
                    i64::from(new.backlog),
                    i64::from(dropout_risk),
                    new.mentor_id,
                    now.to_rfc3339()
                ],
            )
            .await
            .map(|_| tx.last_insert_rowid())
            .map_err(DatabaseError::from_write);
        let id = finish(tx, inserted).await?;

        tracing::info!(student_id = id, mentor_id = new.mentor_id, dropout_risk, "student added");
        Ok(Student {
            id,
            full_name: new.full_name.clone(),
            email: new.email.clone(),
            roll_no: new.roll_no.clone(),
            gender: new.gender.clone(),
            category: new.category.clone(),
            fees_status: new.fees_status.clone(),
            attendance: new.attendance,
            marks: new.marks,
            backlog: new.backlog,
            dropout_risk,
            mentor_id: new.mentor_id,
            created_at: now,
        })
    }

    /// Every student owned by `mentor_id`, oldest first. Unknown mentors
    /// simply have no students.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_students(&self, mentor_id: MentorId) -> Result<Vec<Student>, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE mentor_id = ?1 ORDER BY id"),
                [mentor_id],
            )
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no student has this id.
    pub async fn get_student(&self, id: StudentId) -> Result<Student, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "student",
            id: id.to_string(),
        })?;
        row_to_student(&row)
    }
}
