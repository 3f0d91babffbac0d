use anyhow::Result;
use cadence_core::rule::RuleKeySet;
use cadence_core::validate_anchor_until;
use owo_colors::OwoColorize;

use crate::cli::ValidateCommand;
use crate::util::load_schedule;

pub fn validate_command(command: ValidateCommand) -> Result<()> {
    let schedule = load_schedule(&command.schedule)?;
    validate_anchor_until(&schedule)?;

    // Validation already proved the rule canonicalizes.
    let canonical = RuleKeySet::parse(&schedule.schedule_spec)?.canonicalize()?;
    println!("{} Schedule is valid", "✓".green().bold());
    println!("Rule: {}", canonical.cyan());
    println!("Anchor: {} ({})", schedule.dtstart_local, schedule.timezone.magenta());
    Ok(())
}
