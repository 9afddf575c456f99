//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use stats_core::value_objects::Period;

use crate::services::{ServiceError, ServiceResult};

/// Monthly update trigger, sent as `application/x-www-form-urlencoded`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MonthlyUpdateForm {
    /// Target period as `YYYY-MM`; the previous month when omitted
    #[validate(length(equal = 7, message = "date must be in YYYY-MM form"))]
    pub date: Option<String>,
}

impl MonthlyUpdateForm {
    /// Resolve the requested period relative to `now`
    pub fn period(&self, now: DateTime<Utc>) -> ServiceResult<Period> {
        match self.date.as_deref() {
            Some(raw) => Ok(Period::parse(raw)?),
            None => Period::from_datetime(now)
                .pred()
                .ok_or_else(|| ServiceError::validation("no period precedes the current one")),
        }
    }
}
