//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub identity: String,
    pub period_key: String,
    pub received_likes: i64,
    pub received_dislikes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
