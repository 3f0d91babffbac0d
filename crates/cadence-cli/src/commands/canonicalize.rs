use anyhow::Result;
use cadence_core::rule::RuleKeySet;

use crate::cli::CanonicalizeCommand;

pub fn canonicalize_command(command: CanonicalizeCommand) -> Result<()> {
    let canonical = RuleKeySet::parse(&command.rule)?.canonicalize()?;
    println!("{}", canonical);
    Ok(())
}
