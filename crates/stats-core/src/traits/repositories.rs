//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{CounterDelta, CounterPatch, Member};
use crate::error::DomainError;
use crate::value_objects::Period;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

/// Member store. Every method runs inside its own transaction: committed on
/// success, rolled back on any error.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by surrogate ID
    ///
    /// Returns `MemberNotFound` if the ID does not exist.
    async fn find_by_id(&self, id: i64) -> RepoResult<Member>;

    /// Find member by exact identity and period
    ///
    /// Returns `MemberNotFoundForIdentity` if no record matches.
    async fn find_by_identity(&self, identity: &str, period: Period) -> RepoResult<Member>;

    /// Insert a zeroed record with `created_at = updated_at = now`
    ///
    /// Returns `MemberAlreadyExists` when (identity, period) is already taken.
    async fn create(&self, identity: &str, period: Period, now: DateTime<Utc>)
        -> RepoResult<Member>;

    /// Apply a sparse counter patch and return the stored record
    ///
    /// Reads and writes within one transaction. Returns `MemberNotFound` if the
    /// ID is absent at update time.
    async fn update(&self, id: i64, patch: CounterPatch, now: DateTime<Utc>)
        -> RepoResult<Member>;

    /// Add a relative change to the stored counters and return the result
    ///
    /// The read and write happen under one row lock, so concurrent deltas on
    /// the same record are never lost. Counters floor at zero. Returns
    /// `MemberNotFound` if the ID is absent.
    async fn adjust(&self, id: i64, delta: CounterDelta, now: DateTime<Utc>)
        -> RepoResult<Member>;

    /// Delete a member. Deleting an absent ID is not an error.
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Member with the most likes in `period`, lowest ID on ties
    ///
    /// Returns `NoActivity` if the period has no records.
    async fn most_likes(&self, period: Period) -> RepoResult<Member>;

    /// Member with the most dislikes in `period`, lowest ID on ties
    ///
    /// Returns `NoActivity` if the period has no records.
    async fn most_dislikes(&self, period: Period) -> RepoResult<Member>;

    /// Connectivity check
    async fn ping(&self) -> RepoResult<()>;
}
