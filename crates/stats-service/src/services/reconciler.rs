//! Reaction reconciler
//!
//! Turns one reaction-added / reaction-removed notification into a counter
//! mutation on the target member's record for the current period.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use stats_core::entities::{CounterDelta, Member, ReactionNotification, SLACKBOT_IDENTITY};
use stats_core::error::DomainError;
use stats_core::value_objects::Period;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Lookup/create rounds before giving up on resolving a member
pub const MAX_RESOLVE_ATTEMPTS: usize = 3;

/// Reconciler settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// Identities whose items never collect counts
    pub reserved_identities: Vec<String>,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            reserved_identities: vec![SLACKBOT_IDENTITY.to_string()],
        }
    }
}

impl ReconcilerConfig {
    pub fn is_reserved(&self, identity: &str) -> bool {
        self.reserved_identities.iter().any(|r| r == identity)
    }
}

impl From<&stats_common::ReconcilerSettings> for ReconcilerConfig {
    fn from(settings: &stats_common::ReconcilerSettings) -> Self {
        Self {
            reserved_identities: settings.reserved_identities.clone(),
        }
    }
}

/// Why a notification was discarded without touching the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyTarget,
    ReservedIdentity,
    SelfReaction,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyTarget => "empty_target",
            Self::ReservedIdentity => "reserved_identity",
            Self::SelfReaction => "self_reaction",
        }
    }
}

/// Result of reconciling one notification. Transport treats all as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Counter updated; carries the stored record
    Applied { member: Member },
    /// Filtered out before any store access
    Ignored(IgnoreReason),
    /// The member vanished between resolve and update; nothing written
    LostRace,
}

/// Reaction reconciler
pub struct ReactionReconciler<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionReconciler<'a> {
    /// Create a new ReactionReconciler
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply one notification at instant `now`
    ///
    /// The period is the UTC calendar month of `now`. Validation and store
    /// errors propagate unchanged.
    #[instrument(skip(self, notification), fields(
        event = notification.event.as_str(),
        reaction = notification.reaction.as_str(),
        target = %notification.target_identity,
    ))]
    pub async fn reconcile(
        &self,
        notification: &ReactionNotification,
        now: DateTime<Utc>,
    ) -> ServiceResult<ReconcileOutcome> {
        if let Some(reason) = self.filter(notification) {
            debug!(reason = reason.as_str(), "Reaction ignored");
            return Ok(ReconcileOutcome::Ignored(reason));
        }

        let period = Period::from_datetime(now);
        let member = self
            .resolve(&notification.target_identity, period, now)
            .await?;
        let delta = CounterDelta::for_reaction(notification.event, notification.reaction);

        // The store adds the delta to the locked row; `member` is only the
        // snapshot seen while resolving
        match self.ctx.member_repo().adjust(member.id, delta, now).await {
            Ok(updated) => {
                info!(
                    acting = %notification.reacting_identity,
                    target = %updated.identity,
                    period = %period,
                    reaction = notification.reaction.as_str(),
                    event = notification.event.as_str(),
                    likes_before = member.received_likes,
                    likes_after = updated.received_likes,
                    dislikes_before = member.received_dislikes,
                    dislikes_after = updated.received_dislikes,
                    "Reaction reconciled"
                );
                Ok(ReconcileOutcome::Applied { member: updated })
            }
            Err(DomainError::MemberNotFound(id)) => {
                warn!(member_id = id, period = %period, "Member deleted before update, dropping reaction");
                Ok(ReconcileOutcome::LostRace)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn filter(&self, notification: &ReactionNotification) -> Option<IgnoreReason> {
        let target = notification.target_identity.as_str();
        if target.is_empty() {
            Some(IgnoreReason::EmptyTarget)
        } else if self.ctx.reconciler_config().is_reserved(target) {
            Some(IgnoreReason::ReservedIdentity)
        } else if notification.is_self_reaction() {
            Some(IgnoreReason::SelfReaction)
        } else {
            None
        }
    }

    /// Find the member's record for `period`, creating it on first sight
    ///
    /// A concurrent creator winning the insert sends us back to lookup.
    async fn resolve(
        &self,
        identity: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> ServiceResult<Member> {
        let repo = self.ctx.member_repo();

        for attempt in 1..=MAX_RESOLVE_ATTEMPTS {
            match repo.find_by_identity(identity, period).await {
                Ok(member) => return Ok(member),
                Err(DomainError::MemberNotFoundForIdentity { .. }) => {}
                Err(e) => return Err(e.into()),
            }

            match repo.create(identity, period, now).await {
                Ok(member) => {
                    debug!(member_id = member.id, identity, period = %period, "Member created");
                    return Ok(member);
                }
                Err(DomainError::MemberAlreadyExists { .. }) => {
                    debug!(attempt, identity, period = %period, "Lost create race, retrying lookup");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::internal(format!(
            "resolve attempts exhausted for {identity} in {period}"
        )))
    }
}
