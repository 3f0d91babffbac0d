use anyhow::Result;
use cadence_core::recurrence::{ExpansionConfig, ScheduleExpander};
use cadence_core::timestamp::parse_utc;

use crate::cli::{ExpandCommand, OutputFormat};
use crate::config::Config;
use crate::util::{load_schedule, resolve_now};
use crate::views::table::{display_occurrences, summary_table};

/// Expander for one invocation: config limits, overridden by the flag.
pub fn build_expander(config: &Config, max_candidates: Option<usize>) -> ScheduleExpander {
    let mut expansion = config.expansion.clone();
    if let Some(max_candidates) = max_candidates {
        expansion = ExpansionConfig { max_candidates };
    }
    ScheduleExpander::new(expansion)
}

pub fn expand_command(command: ExpandCommand, config: &Config) -> Result<()> {
    let schedule = load_schedule(&command.schedule)?;
    let now = resolve_now(command.now.as_deref());
    let expander = build_expander(config, command.max_candidates);

    let expansion = expander.expand_detailed(&schedule, &now)?;
    let occurrences = &expansion.occurrences;

    match command.output.unwrap_or(config.output) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(occurrences)?);
        }
        OutputFormat::Plain => {
            for occurrence in occurrences.to_strings() {
                println!("{}", occurrence);
            }
        }
        OutputFormat::Table => {
            let now = if config.humanize { parse_utc(&now).ok() } else { None };
            display_occurrences(occurrences, now);
        }
    }

    if command.summary {
        eprintln!("{}", summary_table(&expansion.summary));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_config_cap() {
        let mut config = Config::default();
        config.expansion.max_candidates = 64;

        assert_eq!(build_expander(&config, None).config().max_candidates, 64);
        assert_eq!(build_expander(&config, Some(8)).config().max_candidates, 8);
    }
}
