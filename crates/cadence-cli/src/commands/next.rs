use anyhow::Result;
use cadence_core::timestamp::parse_utc;
use owo_colors::OwoColorize;

use crate::cli::{NextCommand, OutputFormat};
use crate::commands::expand::build_expander;
use crate::config::Config;
use crate::util::{load_schedule, resolve_now};
use crate::views::table::relative;

pub fn next_command(command: NextCommand, config: &Config) -> Result<()> {
    let schedule = load_schedule(&command.schedule)?;
    let now = resolve_now(command.now.as_deref());
    let next = build_expander(config, command.max_candidates).next_run(&schedule, &now)?;

    match command.output.unwrap_or(config.output) {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "next_run": next, "now": now }));
        }
        OutputFormat::Plain => println!("{}", next),
        OutputFormat::Table => {
            let phrase = match (config.humanize, parse_utc(&next), parse_utc(&now)) {
                (true, Ok(at), Ok(now)) => format!(" ({})", relative(at, now)),
                _ => String::new(),
            };
            println!("Next run: {}{}", next.green().bold(), phrase.dimmed());
        }
    }
    Ok(())
}
