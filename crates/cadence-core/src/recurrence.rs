use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::boundary::{validate, ValidatedSchedule};
use crate::error::{Result, ScheduleError};
use crate::models::{OccurrenceSet, ReportingSchedule};
use crate::rule::{Frequency, RuleKey};
use crate::timestamp::{format_utc, max_representable, parse_local_as_utc, parse_utc};

/// Evaluation cap used when the caller does not pick one.
pub const DEFAULT_MAX_CANDIDATES: usize = 4096;

/// Configuration for bounded expansion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Maximum cursor evaluations per expansion, independent of `COUNT`
    pub max_candidates: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// Why generation from the anchor stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `COUNT` occurrences were emitted.
    Count,
    /// The cursor passed `UNTIL`.
    Until,
    /// The next step would leave years 0000-9999.
    EndOfRange,
    /// The evaluation cap ran out.
    CapReached,
}

/// Statistics collected during one expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionSummary {
    /// Canonical form of the expanded rule
    pub canonical_rule: String,
    /// Cursor values examined
    pub evaluations: usize,
    /// Occurrences produced by stepping from the anchor
    pub generated: usize,
    /// Explicit additions that landed in the set
    pub added: usize,
    /// Exclusions that removed an occurrence
    pub excluded: usize,
    pub stop_reason: StopReason,
}

/// Result of [`ScheduleExpander::expand_detailed`].
#[derive(Debug, Clone)]
pub struct Expansion {
    pub occurrences: OccurrenceSet,
    pub summary: ExpansionSummary,
}

/// Finite walk from the anchor in fixed steps.
///
/// Yields at most `remaining` values and never a value past
/// [`max_representable`].
#[derive(Debug)]
struct Steps {
    next: Option<DateTime<Utc>>,
    step: Option<TimeDelta>,
    remaining: usize,
}

impl Steps {
    fn new(anchor: DateTime<Utc>, step: Option<TimeDelta>, cap: usize) -> Self {
        Self {
            next: Some(anchor),
            step,
            remaining: cap,
        }
    }

    /// True when the cap, not the end of the series, ended the walk.
    fn capped(&self) -> bool {
        self.remaining == 0 && self.next.is_some()
    }
}

impl Iterator for Steps {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self
            .step
            .and_then(|step| current.checked_add_signed(step))
            .filter(|next| *next <= max_representable());
        Some(current)
    }
}

/// ScheduleExpander: bounded, deterministic expansion of reporting schedules.
///
/// Holds nothing but its configuration; every call is a pure function of the
/// schedule and the caller-supplied current time, so one expander can be
/// shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ScheduleExpander {
    config: ExpansionConfig,
}

impl ScheduleExpander {
    /// Creates a new ScheduleExpander with the given configuration.
    pub fn new(config: ExpansionConfig) -> Self {
        Self { config }
    }

    /// Creates a ScheduleExpander with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ExpansionConfig::default())
    }

    /// Gets the current configuration.
    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Updates the configuration for this expander.
    pub fn update_config(&mut self, config: ExpansionConfig) {
        self.config = config;
    }

    /// Computes the future occurrences of a schedule.
    ///
    /// # Arguments
    /// * `schedule` - The persisted schedule record
    /// * `now_utc` - Current time, `YYYY-MM-DDTHH:MM:SSZ`
    ///
    /// # Returns
    /// * `Result<OccurrenceSet, ScheduleError>` - Occurrences strictly after `now_utc`
    ///
    /// # Behavior
    /// - Validate zone, anchor, rule and `UNTIL` before anything else
    /// - Step from the anchor by the fixed `FREQ` x `INTERVAL` duration,
    ///   examining at most `max_candidates` cursor values
    /// - Stop past `UNTIL`, or once `COUNT` occurrences were emitted
    /// - Fail with `SafetyCapExceeded` if the cap ran out before anything
    ///   was emitted
    /// - Add future `rdates_local` entries (never limited by `COUNT`), then
    ///   remove exact `exdates_local` matches
    pub fn expand(&self, schedule: &ReportingSchedule, now_utc: &str) -> Result<OccurrenceSet> {
        self.expand_detailed(schedule, now_utc)
            .map(|expansion| expansion.occurrences)
    }

    /// Same as [`ScheduleExpander::expand`], also reporting how the walk went.
    pub fn expand_detailed(&self, schedule: &ReportingSchedule, now_utc: &str) -> Result<Expansion> {
        let validated = validate(schedule)?;
        let now = parse_utc(now_utc)
            .map_err(|_| ScheduleError::Format(format!("invalid now_utc '{}'", now_utc)))?;

        let ValidatedSchedule {
            anchor,
            until,
            rule,
            canonical,
        } = validated;

        let interval = resolve_interval(rule.get(RuleKey::Interval));
        let count = resolve_count(rule.get(RuleKey::Count))?;
        let frequency: Frequency = rule
            .get(RuleKey::Freq)
            .ok_or_else(|| ScheduleError::Vocabulary("FREQ required".to_string()))?
            .parse()?;
        let step = frequency
            .step_seconds()
            .checked_mul(interval)
            .and_then(TimeDelta::try_seconds);

        debug!(
            rule = %canonical,
            anchor = %format_utc(anchor),
            now = %now_utc,
            max_candidates = self.config.max_candidates,
            "expanding schedule"
        );

        let mut occurrences = OccurrenceSet::new();
        let mut steps = Steps::new(anchor, step, self.config.max_candidates);
        let mut evaluations = 0usize;
        let mut generated = 0usize;
        let mut stop_reason = None;

        if count == Some(0) {
            // A zero cap still rejects, even with nothing to emit.
            if !steps.capped() {
                stop_reason = Some(StopReason::Count);
            }
        } else {
            for cursor in steps.by_ref() {
                evaluations += 1;
                if until.is_some_and(|until| cursor > until) {
                    stop_reason = Some(StopReason::Until);
                    break;
                }
                if cursor > now {
                    occurrences.insert(cursor);
                    generated += 1;
                    if count == Some(generated) {
                        stop_reason = Some(StopReason::Count);
                        break;
                    }
                }
            }
        }

        let stop_reason = match stop_reason {
            Some(reason) => reason,
            None if steps.capped() => StopReason::CapReached,
            None => StopReason::EndOfRange,
        };
        if stop_reason == StopReason::CapReached && generated == 0 {
            warn!(
                rule = %canonical,
                max_candidates = self.config.max_candidates,
                "candidate cap exhausted without a future occurrence"
            );
            return Err(ScheduleError::SafetyCapExceeded {
                max_candidates: self.config.max_candidates,
            });
        }

        let mut added = 0usize;
        for local in &schedule.rdates_local {
            let rdate = parse_local_as_utc(local).map_err(|_| {
                ScheduleError::Format(format!("invalid rdate local datetime '{}'", local))
            })?;
            if rdate > now && occurrences.insert(rdate) {
                added += 1;
            }
        }

        let mut excluded = 0usize;
        for local in &schedule.exdates_local {
            let exdate = parse_local_as_utc(local).map_err(|_| {
                ScheduleError::Format(format!("invalid exdate local datetime '{}'", local))
            })?;
            if occurrences.remove(&exdate) {
                excluded += 1;
            }
        }

        let summary = ExpansionSummary {
            canonical_rule: canonical,
            evaluations,
            generated,
            added,
            excluded,
            stop_reason,
        };
        debug!(
            rule = %summary.canonical_rule,
            evaluations = summary.evaluations,
            generated = summary.generated,
            added = summary.added,
            excluded = summary.excluded,
            stop_reason = ?summary.stop_reason,
            total = occurrences.len(),
            "schedule expanded"
        );

        Ok(Expansion {
            occurrences,
            summary,
        })
    }

    /// Returns the earliest future occurrence as a UTC string.
    pub fn next_run(&self, schedule: &ReportingSchedule, now_utc: &str) -> Result<String> {
        self.expand(schedule, now_utc)?
            .first()
            .map(format_utc)
            .ok_or_else(|| ScheduleError::EmptyResult("no next run candidate".to_string()))
    }
}

/// Expands `schedule` with an explicit evaluation cap.
pub fn expand_rrule_bounded(
    schedule: &ReportingSchedule,
    now_utc: &str,
    max_candidates: usize,
) -> Result<OccurrenceSet> {
    ScheduleExpander::new(ExpansionConfig { max_candidates }).expand(schedule, now_utc)
}

/// Earliest future occurrence of `schedule` under the default cap.
pub fn next_run(schedule: &ReportingSchedule, now_utc: &str) -> Result<String> {
    ScheduleExpander::with_defaults().next_run(schedule, now_utc)
}

// INTERVAL is the one value silently coerced: anything missing, unparsable
// or below 1 becomes 1.
fn resolve_interval(value: Option<&str>) -> i64 {
    let Some(text) = value else {
        return 1;
    };
    match text.parse::<i64>() {
        Ok(interval) if interval >= 1 => interval,
        _ => {
            warn!(interval = text, "INTERVAL not a positive integer, using 1");
            1
        }
    }
}

fn resolve_count(value: Option<&str>) -> Result<Option<usize>> {
    let Some(text) = value else {
        return Ok(None);
    };
    let count = text
        .parse::<i64>()
        .map_err(|_| ScheduleError::Vocabulary(format!("invalid numeric value for COUNT '{}'", text)))?;
    if count < 0 {
        warn!(count, "negative COUNT, generating nothing");
        return Ok(Some(0));
    }
    Ok(Some(usize::try_from(count).unwrap_or(usize::MAX)))
}
