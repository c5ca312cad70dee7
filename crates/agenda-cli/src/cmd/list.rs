//! `agenda list`: day-sectioned listing with conflict markers.

use std::io::Write;

use agenda_core::config::EffectiveConfig;
use agenda_core::format::{format_medium, format_short};
use agenda_core::{Agenda, Strategy};
use clap::Args;
use serde::Serialize;

use super::{EventRow, load_events};
use crate::output::{OutputMode, pretty_rule, pretty_section, render_mode};

/// Arguments for `agenda list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {}

#[derive(Debug, Serialize)]
pub struct ListedEvent {
    #[serde(flatten)]
    pub event: EventRow,
    pub conflict: bool,
    #[serde(skip)]
    span: String,
}

#[derive(Debug, Serialize)]
pub struct DaySection {
    pub date: String,
    pub events: Vec<ListedEvent>,
}

/// Report payload for `agenda list`.
#[derive(Debug, Serialize)]
pub struct ListReport {
    pub strategy: Strategy,
    pub days: Vec<DaySection>,
}

/// Execute `agenda list`.
pub fn run_list(_args: &ListArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let events = load_events(config, output)?;
    let mut agenda = Agenda::with_strategy(config.strategy);
    agenda.update(events);

    let report = build_report(&mut agenda);
    render_mode(output, &report, render_list_text, render_list_pretty)
}

fn build_report<R: agenda_core::ConflictResolver>(agenda: &mut Agenda<R>) -> ListReport {
    let mut days = Vec::with_capacity(agenda.number_of_day_buckets());
    for bucket in 0..agenda.number_of_day_buckets() {
        let Some(date) = agenda.date_at(bucket) else {
            continue;
        };
        let rows: Vec<_> = (0..agenda.number_of_events(bucket))
            .filter_map(|row| agenda.event_at(bucket, row).cloned())
            .collect();
        let events = rows
            .iter()
            .map(|event| ListedEvent {
                event: EventRow::from(event),
                conflict: agenda.has_conflict(event),
                span: format!("{} - {}", format_medium(event.start()), format_medium(event.end())),
            })
            .collect();
        days.push(DaySection {
            date: format_short(date),
            events,
        });
    }

    ListReport {
        strategy: agenda.strategy(),
        days,
    }
}

fn render_list_text(report: &ListReport, w: &mut dyn Write) -> std::io::Result<()> {
    for day in &report.days {
        for listed in &day.events {
            writeln!(
                w,
                "{}\t{}\t{}\t{}\t{}",
                day.date,
                listed.event.start,
                listed.event.end,
                listed.event.title,
                if listed.conflict { "conflict" } else { "-" }
            )?;
        }
    }
    Ok(())
}

fn render_list_pretty(report: &ListReport, w: &mut dyn Write) -> std::io::Result<()> {
    if report.days.is_empty() {
        return writeln!(w, "No events.");
    }
    for (i, day) in report.days.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        pretty_section(w, &day.date)?;
        for listed in &day.events {
            let marker = if listed.conflict { "  *conflict*" } else { "" };
            writeln!(w, "  {:<34} {}{marker}", listed.span, listed.event.title)?;
        }
    }
    pretty_rule(w)
}
