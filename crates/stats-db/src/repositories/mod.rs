//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in stats-core.

mod error;
mod member;

pub use member::PgMemberRepository;
