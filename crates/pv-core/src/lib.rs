//! # pv-core
//!
//! Core types shared across all Pravartak crates:
//! - Entity structs for mentors and students
//! - The fixed risk feature vector and its gender encoding
//! - Cross-cutting error types
//! - JSON response shapes returned by the HTTP API

pub mod entities;
pub mod errors;
pub mod features;
pub mod responses;
