use std::fs;

use anyhow::{Context, Result};
use cadence_core::models::ReportingSchedule;
use cadence_core::timestamp::format_utc;
use chrono::Utc;

use crate::cli::ScheduleArgs;

/// Builds the schedule record from `--file` or from the individual flags.
pub fn load_schedule(args: &ScheduleArgs) -> Result<ReportingSchedule> {
    if let Some(path) = &args.file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read schedule file '{}'", path.display()))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse schedule file '{}'", path.display()));
    }

    // clap enforces both flags when --file is absent.
    let rule = args.rule.clone().unwrap_or_default();
    let dtstart = args.dtstart.clone().unwrap_or_default();
    let timezone = args.timezone.clone().unwrap_or_else(|| "UTC".to_string());

    Ok(ReportingSchedule::new(rule, dtstart, timezone)
        .with_rdates(args.rdate.iter().cloned())
        .with_exdates(args.exdate.iter().cloned()))
}

/// The caller-side "now": the flag if given, otherwise the system clock.
pub fn resolve_now(now: Option<&str>) -> String {
    match now {
        Some(now) => now.to_string(),
        None => format_utc(Utc::now()),
    }
}
