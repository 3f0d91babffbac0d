use cadence_core::models::OccurrenceSet;
use cadence_core::recurrence::{ExpansionSummary, StopReason};
use cadence_core::timestamp::format_utc;
use chrono::{DateTime, Utc};
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};

/// Relative phrase for `at` as seen from `now`, e.g. "in 2 days".
pub fn relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    HumanTime::from(at - now).to_string()
}

pub fn occurrence_table(occurrences: &OccurrenceSet, now: Option<DateTime<Utc>>) -> Option<Table> {
    if occurrences.is_empty() {
        return None;
    }

    let mut table = Table::new();
    let mut header = vec!["#", "Occurrence (UTC)"];
    if now.is_some() {
        header.push("Relative");
    }
    table.set_header(header);

    for (i, at) in occurrences.iter().enumerate() {
        let mut row = Row::new();
        row.add_cell(Cell::new(i + 1));
        row.add_cell(Cell::new(format_utc(at)).fg(Color::Green));
        if let Some(now) = now {
            row.add_cell(Cell::new(relative(at, now)).add_attribute(Attribute::Dim));
        }
        table.add_row(row);
    }
    Some(table)
}

pub fn display_occurrences(occurrences: &OccurrenceSet, now: Option<DateTime<Utc>>) {
    match occurrence_table(occurrences, now) {
        Some(table) => println!("{table}"),
        None => println!("No upcoming occurrences."),
    }
}

pub fn summary_table(summary: &ExpansionSummary) -> Table {
    let stop = match summary.stop_reason {
        StopReason::Count => "COUNT reached",
        StopReason::Until => "UNTIL passed",
        StopReason::EndOfRange => "end of representable range",
        StopReason::CapReached => "candidate cap reached",
    };

    let mut table = Table::new();
    table.set_header(vec!["Rule", "Evaluations", "Generated", "Added", "Excluded", "Stopped"]);
    table.add_row(vec![
        Cell::new(&summary.canonical_rule),
        Cell::new(summary.evaluations),
        Cell::new(summary.generated),
        Cell::new(summary.added),
        Cell::new(summary.excluded),
        Cell::new(stop),
    ]);
    table
}
