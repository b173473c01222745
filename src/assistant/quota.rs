//! Request quota for the language model free tier.
//!
//! Two GCRA limiters from `governor` enforce a per-minute and a per-day
//! budget for the whole process.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Process-wide generation quota.
pub struct RequestQuota {
    minute: DefaultDirectRateLimiter,
    day: DefaultDirectRateLimiter,
    per_minute: NonZeroU32,
    per_day: NonZeroU32,
}

impl std::fmt::Debug for RequestQuota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestQuota")
            .field("per_minute", &self.per_minute)
            .field("per_day", &self.per_day)
            .finish()
    }
}

impl RequestQuota {
    /// Create a quota allowing `per_minute` and `per_day` requests.
    #[must_use]
    pub fn new(per_minute: NonZeroU32, per_day: NonZeroU32) -> Self {
        let day_quota = Quota::with_period(DAY / per_day.get())
            .map_or_else(|| Quota::per_second(per_day), |q| q.allow_burst(per_day));

        Self {
            minute: RateLimiter::direct(Quota::per_minute(per_minute)),
            day: RateLimiter::direct(day_quota),
            per_minute,
            per_day,
        }
    }

    /// Take one request from both budgets.
    ///
    /// On refusal the error carries the message to report.
    pub fn check(&self) -> Result<(), String> {
        if self.minute.check().is_err() {
            return Err(format!(
                "Rate limit exceeded: {} requests per minute. Please wait a moment.",
                self.per_minute
            ));
        }
        if self.day.check().is_err() {
            return Err(format!(
                "Daily limit exceeded: {} requests per day. Please try again tomorrow.",
                self.per_day
            ));
        }
        Ok(())
    }
}
