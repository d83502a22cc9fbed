//! Store operations, one file per table.

pub mod mentor;
pub mod student;
