//! Database models - SQLx-compatible structs for PostgreSQL tables

mod member;

pub use member::MemberModel;
