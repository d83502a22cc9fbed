//! Shared test utilities for pv-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use pv_core::entities::{MentorId, NewMentor, NewStudent};

    use crate::PvDb;
    use crate::service::PvService;

    /// In-memory service with migrations applied.
    pub async fn test_service() -> PvService {
        let db = PvDb::open_local(":memory:").await.unwrap();
        PvService::from_db(db)
    }

    pub fn new_mentor(email: &str, password: &str) -> NewMentor {
        NewMentor {
            full_name: "A".into(),
            email: email.into(),
            password: password.into(),
            expertise: Some("CS".into()),
        }
    }

    /// A low-risk student profile owned by `mentor_id`.
    pub fn new_student(mentor_id: MentorId, email: &str) -> NewStudent {
        NewStudent {
            full_name: "B".into(),
            email: email.into(),
            roll_no: "R1".into(),
            gender: "Male".into(),
            category: "Gen".into(),
            fees_status: "Paid".into(),
            attendance: 85.0,
            marks: 7.5,
            backlog: 0,
            mentor_id,
        }
    }
}
