//! Member entity - reactions received by one chat member within one period

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ReactionEventKind, ReactionKind};
use crate::error::DomainError;
use crate::value_objects::Period;

/// Per-(identity, period) counter record
///
/// Exactly one record exists per (identity, period). Counters are never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub identity: String,
    pub period: Period,
    pub received_likes: i64,
    pub received_dislikes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// A freshly created record with zeroed counters
    pub fn new(id: i64, identity: impl Into<String>, period: Period, now: DateTime<Utc>) -> Self {
        Self {
            id,
            identity: identity.into(),
            period,
            received_likes: 0,
            received_dislikes: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated patch and stamp the update time.
    ///
    /// `updated_at` never moves before `created_at`, even with a skewed clock.
    pub fn apply(&mut self, patch: &CounterPatch, now: DateTime<Utc>) -> Result<(), DomainError> {
        patch.validate()?;
        if let Some(likes) = patch.received_likes {
            self.received_likes = likes;
        }
        if let Some(dislikes) = patch.received_dislikes {
            self.received_dislikes = dislikes;
        }
        self.updated_at = now.max(self.created_at);
        Ok(())
    }

    /// Add a relative change; each counter floors at zero
    pub fn apply_delta(&mut self, delta: CounterDelta, now: DateTime<Utc>) {
        self.received_likes = CounterDelta::shift(self.received_likes, delta.likes);
        self.received_dislikes = CounterDelta::shift(self.received_dislikes, delta.dislikes);
        self.updated_at = now.max(self.created_at);
    }
}

/// Relative counter change, applied by the store against the current row
///
/// Stores evaluate it under the row lock so concurrent changes to one record
/// all land.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl CounterDelta {
    pub fn likes(step: i64) -> Self {
        Self {
            likes: step,
            dislikes: 0,
        }
    }

    pub fn dislikes(step: i64) -> Self {
        Self {
            likes: 0,
            dislikes: step,
        }
    }

    /// One reaction event: +1 when added, -1 when removed
    pub fn for_reaction(event: ReactionEventKind, reaction: ReactionKind) -> Self {
        let step = match event {
            ReactionEventKind::Added => 1,
            ReactionEventKind::Removed => -1,
        };
        match reaction {
            ReactionKind::Like => Self::likes(step),
            ReactionKind::Dislike => Self::dislikes(step),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.likes == 0 && self.dislikes == 0
    }

    fn shift(count: i64, step: i64) -> i64 {
        count.saturating_add(step).max(0)
    }
}

/// Sparse counter update: `None` leaves the column unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterPatch {
    pub received_likes: Option<i64>,
    pub received_dislikes: Option<i64>,
}

impl CounterPatch {
    pub fn likes(value: i64) -> Self {
        Self {
            received_likes: Some(value),
            received_dislikes: None,
        }
    }

    pub fn dislikes(value: i64) -> Self {
        Self {
            received_likes: None,
            received_dislikes: Some(value),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.received_likes.is_none() && self.received_dislikes.is_none()
    }

    /// Reject negative counter values
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("received_likes", self.received_likes),
            ("received_dislikes", self.received_dislikes),
        ] {
            if let Some(v) = value {
                if v < 0 {
                    return Err(DomainError::InvalidCounter(format!("{name} = {v}")));
                }
            }
        }
        Ok(())
    }
}
