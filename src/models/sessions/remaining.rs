use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use ts_rs::TS;

/// 会话剩余时间，按分钟向下取整
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "../bindings/session.ts")]
pub enum TimeRemaining {
    NoLimit,
    Expired,
    Remaining { hours: i64, minutes: i64 },
}

impl TimeRemaining {
    pub fn compute(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(expires_at) = expires_at else {
            return TimeRemaining::NoLimit;
        };
        let diff = expires_at.signed_duration_since(now);
        if diff <= chrono::Duration::zero() {
            return TimeRemaining::Expired;
        }
        let total_minutes = diff.num_minutes();
        TimeRemaining::Remaining {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRemaining::NoLimit => write!(f, "no limit"),
            TimeRemaining::Expired => write!(f, "Expired"),
            TimeRemaining::Remaining { hours, minutes } if *hours > 0 => {
                write!(f, "{hours}h {minutes}m remaining")
            }
            TimeRemaining::Remaining { minutes, .. } => write!(f, "{minutes}m remaining"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_ninety_minutes() {
        let now = Utc::now();
        let remaining = TimeRemaining::compute(Some(now + Duration::minutes(90)), now);
        assert_eq!(
            remaining,
            TimeRemaining::Remaining {
                hours: 1,
                minutes: 30
            }
        );
        assert_eq!(remaining.to_string(), "1h 30m remaining");
    }

    #[test]
    fn test_under_an_hour_floors() {
        let now = Utc::now();
        let remaining =
            TimeRemaining::compute(Some(now + Duration::seconds(45 * 60 + 59)), now);
        assert_eq!(remaining.to_string(), "45m remaining");
    }

    #[test]
    fn test_expired_and_no_limit() {
        let now = Utc::now();
        assert_eq!(
            TimeRemaining::compute(Some(now - Duration::seconds(1)), now).to_string(),
            "Expired"
        );
        assert_eq!(TimeRemaining::compute(Some(now), now), TimeRemaining::Expired);
        assert_eq!(TimeRemaining::compute(None, now).to_string(), "no limit");
    }
}
