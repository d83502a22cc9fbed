//! Entity structs for the Pravartak domain.
//!
//! Each entity maps to a table in the libSQL database (`mentors`, `students`).
//! Field names serialize in camelCase to match the HTTP API.

mod mentor;
mod student;

pub use mentor::{Mentor, MentorId, MentorProfile, NewMentor};
pub use student::{NewStudent, Student, StudentId};
