use chrono::{DateTime, Utc};

use crate::error::{Result, ScheduleError};
use crate::models::ReportingSchedule;
use crate::rule::{RuleKey, RuleKeySet};
use crate::timestamp::{parse_local_as_utc, parse_utc};
use crate::timezone::is_timezone_iana;

/// A schedule that has passed [`validate_anchor_until`], with the pieces the
/// expansion engine needs already parsed.
#[derive(Debug, Clone)]
pub(crate) struct ValidatedSchedule {
    pub anchor: DateTime<Utc>,
    pub until: Option<DateTime<Utc>>,
    pub rule: RuleKeySet,
    pub canonical: String,
}

/// Cross-checks a schedule's zone, anchor and rule before any expansion.
///
/// Checks run in order and stop at the first failure: zone syntax, anchor
/// format, rule token shape, rule vocabulary, then `UNTIL` format and
/// `UNTIL` not preceding the anchor.
pub fn validate_anchor_until(schedule: &ReportingSchedule) -> Result<()> {
    validate(schedule).map(|_| ())
}

pub(crate) fn validate(schedule: &ReportingSchedule) -> Result<ValidatedSchedule> {
    if !is_timezone_iana(&schedule.timezone) {
        return Err(ScheduleError::Format(format!(
            "invalid timezone '{}'",
            schedule.timezone
        )));
    }

    let anchor = parse_local_as_utc(&schedule.dtstart_local)
        .map_err(|_| ScheduleError::Format(format!(
            "invalid local anchor datetime '{}'",
            schedule.dtstart_local
        )))?;

    let rule = RuleKeySet::parse(&schedule.schedule_spec)?;
    let canonical = rule.canonicalize()?;

    let until = match rule.get(RuleKey::Until) {
        Some(text) => {
            let until = parse_utc(text)
                .map_err(|_| ScheduleError::Format(format!("invalid UNTIL '{}'", text)))?;
            if until < anchor {
                return Err(ScheduleError::Range(format!(
                    "UNTIL {} earlier than anchor {}",
                    text, schedule.dtstart_local
                )));
            }
            Some(until)
        }
        None => None,
    };

    Ok(ValidatedSchedule {
        anchor,
        until,
        rule,
        canonical,
    })
}
