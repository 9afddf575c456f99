//! In-memory implementation of MemberRepository
//!
//! Mirrors the PostgreSQL schema constraints: unique (identity, period),
//! non-negative counters, ascending surrogate IDs starting at 1. A single lock
//! makes every operation atomic, which stands in for the per-call transaction.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, instrument};

use stats_core::entities::{CounterDelta, CounterPatch, Member};
use stats_core::error::DomainError;
use stats_core::traits::{MemberRepository, RepoResult};
use stats_core::value_objects::Period;

#[derive(Debug, Default)]
struct Tables {
    last_id: i64,
    rows: BTreeMap<i64, Member>,
    by_identity: HashMap<(String, Period), i64>,
}

impl Tables {
    fn in_period(&self, period: Period) -> impl Iterator<Item = &Member> {
        self.rows.values().filter(move |m| m.period == period)
    }
}

/// Process-local member store
#[derive(Debug, Default)]
pub struct InMemoryMemberRepository {
    tables: Mutex<Tables>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all periods
    pub fn len(&self) -> usize {
        self.tables.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of one period's records in ID order
    pub fn members_in(&self, period: Period) -> Vec<Member> {
        self.tables.lock().in_period(period).cloned().collect()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_id(&self, id: i64) -> RepoResult<Member> {
        self.tables
            .lock()
            .rows
            .get(&id)
            .cloned()
            .ok_or(DomainError::MemberNotFound(id))
    }

    async fn find_by_identity(&self, identity: &str, period: Period) -> RepoResult<Member> {
        let tables = self.tables.lock();
        tables
            .by_identity
            .get(&(identity.to_string(), period))
            .and_then(|id| tables.rows.get(id))
            .cloned()
            .ok_or_else(|| DomainError::MemberNotFoundForIdentity {
                identity: identity.to_string(),
                period,
            })
    }

    #[instrument(skip(self))]
    async fn create(
        &self,
        identity: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> RepoResult<Member> {
        if identity.is_empty() {
            return Err(DomainError::InvalidIdentity);
        }

        let mut tables = self.tables.lock();
        let key = (identity.to_string(), period);
        if tables.by_identity.contains_key(&key) {
            return Err(DomainError::MemberAlreadyExists {
                identity: identity.to_string(),
                period,
            });
        }

        tables.last_id += 1;
        let member = Member::new(tables.last_id, identity, period, now);
        tables.by_identity.insert(key, member.id);
        tables.rows.insert(member.id, member.clone());

        Ok(member)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i64, patch: CounterPatch, now: DateTime<Utc>) -> RepoResult<Member> {
        let mut tables = self.tables.lock();
        let stored = tables
            .rows
            .get_mut(&id)
            .ok_or(DomainError::MemberNotFound(id))?;

        // Work on a copy so a rejected patch leaves the row untouched
        let mut member = stored.clone();
        member.apply(&patch, now)?;
        *stored = member.clone();

        Ok(member)
    }

    #[instrument(skip(self))]
    async fn adjust(&self, id: i64, delta: CounterDelta, now: DateTime<Utc>) -> RepoResult<Member> {
        let mut tables = self.tables.lock();
        let stored = tables
            .rows
            .get_mut(&id)
            .ok_or(DomainError::MemberNotFound(id))?;

        stored.apply_delta(delta, now);
        Ok(stored.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        match tables.rows.remove(&id) {
            Some(member) => {
                tables.by_identity.remove(&(member.identity, member.period));
            }
            None => debug!(id, "delete of absent member ignored"),
        }
        Ok(())
    }

    async fn most_likes(&self, period: Period) -> RepoResult<Member> {
        self.tables
            .lock()
            .in_period(period)
            .min_by_key(|m| (Reverse(m.received_likes), m.id))
            .cloned()
            .ok_or(DomainError::NoActivity(period))
    }

    async fn most_dislikes(&self, period: Period) -> RepoResult<Member> {
        self.tables
            .lock()
            .in_period(period)
            .min_by_key(|m| (Reverse(m.received_dislikes), m.id))
            .cloned()
            .ok_or(DomainError::NoActivity(period))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
