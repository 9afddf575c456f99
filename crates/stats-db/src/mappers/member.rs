//! Member model -> entity mapper

use stats_core::entities::Member;
use stats_core::error::DomainError;
use stats_core::value_objects::Period;

use crate::models::MemberModel;

/// A stored `period_key` that no longer parses means the row was written by
/// something other than this crate.
impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        let period = Period::parse(&model.period_key).map_err(|_| {
            DomainError::DatabaseError(format!(
                "member {} has malformed period_key {:?}",
                model.id, model.period_key
            ))
        })?;

        Ok(Member {
            id: model.id,
            identity: model.identity,
            period,
            received_likes: model.received_likes,
            received_dislikes: model.received_dislikes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
