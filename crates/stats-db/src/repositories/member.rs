//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use stats_core::entities::{CounterDelta, CounterPatch, Member};
use stats_core::error::DomainError;
use stats_core::traits::{MemberRepository, RepoResult};
use stats_core::value_objects::Period;

use crate::models::MemberModel;

use super::error::{map_check_violation, map_db_error, map_unique_violation};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Top member of a period ordered by one counter column
    async fn leader_by(&self, period: Period, query: &'static str) -> RepoResult<Member> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, MemberModel>(query)
            .bind(period.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        model
            .ok_or(DomainError::NoActivity(period))
            .and_then(Member::try_from)
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Member> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, identity, period_key, received_likes, received_dislikes, created_at, updated_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        model
            .ok_or(DomainError::MemberNotFound(id))
            .and_then(Member::try_from)
    }

    #[instrument(skip(self))]
    async fn find_by_identity(&self, identity: &str, period: Period) -> RepoResult<Member> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, identity, period_key, received_likes, received_dislikes, created_at, updated_at
            FROM members
            WHERE identity = $1 AND period_key = $2
            "#,
        )
        .bind(identity)
        .bind(period.to_string())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        model
            .ok_or_else(|| DomainError::MemberNotFoundForIdentity {
                identity: identity.to_string(),
                period,
            })
            .and_then(Member::try_from)
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

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, MemberModel>(
            r#"
            INSERT INTO members (identity, period_key, received_likes, received_dislikes, created_at, updated_at)
            VALUES ($1, $2, 0, 0, $3, $3)
            RETURNING id, identity, period_key, received_likes, received_dislikes, created_at, updated_at
            "#,
        )
        .bind(identity)
        .bind(period.to_string())
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::MemberAlreadyExists {
                identity: identity.to_string(),
                period,
            })
        })?;

        tx.commit().await.map_err(map_db_error)?;

        Member::try_from(model)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i64, patch: CounterPatch, now: DateTime<Utc>) -> RepoResult<Member> {
        patch.validate()?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock keeps the untouched counter from being overwritten with a stale value
        let model = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, identity, period_key, received_likes, received_dislikes, created_at, updated_at
            FROM members
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::MemberNotFound(id))?;

        let mut member = Member::try_from(model)?;
        member.apply(&patch, now)?;

        sqlx::query(
            r#"
            UPDATE members
            SET received_likes = $2, received_dislikes = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(member.received_likes)
        .bind(member.received_dislikes)
        .bind(member.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_check_violation)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(member)
    }

    #[instrument(skip(self))]
    async fn adjust(&self, id: i64, delta: CounterDelta, now: DateTime<Utc>) -> RepoResult<Member> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Computed from the locked row, not from a value the caller read earlier
        let model = sqlx::query_as::<_, MemberModel>(
            r#"
            UPDATE members
            SET received_likes = GREATEST(received_likes + $2, 0),
                received_dislikes = GREATEST(received_dislikes + $3, 0),
                updated_at = GREATEST($4, created_at)
            WHERE id = $1
            RETURNING id, identity, period_key, received_likes, received_dislikes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(delta.likes)
        .bind(delta.dislikes)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_check_violation)?
        .ok_or(DomainError::MemberNotFound(id))?;

        tx.commit().await.map_err(map_db_error)?;

        Member::try_from(model)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            DELETE FROM members WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            debug!(id, "delete of absent member ignored");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn most_likes(&self, period: Period) -> RepoResult<Member> {
        self.leader_by(
            period,
            r#"
            SELECT id, identity, period_key, received_likes, received_dislikes, created_at, updated_at
            FROM members
            WHERE period_key = $1
            ORDER BY received_likes DESC, id ASC
            LIMIT 1
            "#,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn most_dislikes(&self, period: Period) -> RepoResult<Member> {
        self.leader_by(
            period,
            r#"
            SELECT id, identity, period_key, received_likes, received_dislikes, created_at, updated_at
            FROM members
            WHERE period_key = $1
            ORDER BY received_dislikes DESC, id ASC
            LIMIT 1
            "#,
        )
        .await
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
