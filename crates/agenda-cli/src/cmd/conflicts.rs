//! `agenda conflicts`: per-event conflict sets.

use std::io::Write;

use agenda_core::config::EffectiveConfig;
use agenda_core::{ConflictResolver, Event, Strategy};
use clap::Args;
use serde::Serialize;

use super::{EventRow, load_events};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `agenda conflicts`.
#[derive(Args, Debug, Default)]
pub struct ConflictsArgs {
    /// Only list events that conflict with at least one other.
    #[arg(long)]
    pub only_conflicting: bool,
}

#[derive(Debug, Serialize)]
pub struct ConflictEntry {
    #[serde(flatten)]
    pub event: EventRow,
    pub count: usize,
    pub with: Vec<String>,
}

/// Report payload for `agenda conflicts`.
#[derive(Debug, Serialize)]
pub struct ConflictsReport {
    pub strategy: Strategy,
    pub total_events: usize,
    pub conflicting_events: usize,
    pub entries: Vec<ConflictEntry>,
}

/// Execute `agenda conflicts`.
pub fn run_conflicts(
    args: &ConflictsArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let events = load_events(config, output)?;
    let mut resolver = config.strategy.resolver();
    let report = build_report(&mut resolver, &events, args.only_conflicting);
    render_mode(output, &report, render_conflicts_text, render_conflicts_pretty)
}

fn build_report<R: ConflictResolver + ?Sized>(
    resolver: &mut R,
    events: &[Event],
    only_conflicting: bool,
) -> ConflictsReport {
    let processed = resolver.rebuild(events);
    let mut entries = Vec::with_capacity(processed.len());
    let mut conflicting_events = 0;

    for event in &processed {
        let mut with: Vec<&Event> = resolver.conflicts_for(event).iter().collect();
        with.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.title().cmp(b.title())));
        if with.is_empty() {
            if only_conflicting {
                continue;
            }
        } else {
            conflicting_events += 1;
        }
        entries.push(ConflictEntry {
            event: EventRow::from(event),
            count: with.len(),
            with: with.iter().map(|other| other.title().to_string()).collect(),
        });
    }

    ConflictsReport {
        strategy: resolver.strategy(),
        total_events: processed.len(),
        conflicting_events,
        entries,
    }
}

fn render_conflicts_text(report: &ConflictsReport, w: &mut dyn Write) -> std::io::Result<()> {
    for entry in &report.entries {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            entry.event.start,
            entry.event.end,
            entry.event.title,
            entry.count,
            entry.with.join(", ")
        )?;
    }
    Ok(())
}

fn render_conflicts_pretty(report: &ConflictsReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Conflicts")?;
    pretty_kv(w, "strategy", report.strategy.as_str())?;
    pretty_kv(
        w,
        "conflicting",
        format!("{} of {}", report.conflicting_events, report.total_events),
    )?;
    writeln!(w)?;
    for entry in &report.entries {
        writeln!(w, "{} ({})", entry.event.title, entry.event.start)?;
        if entry.with.is_empty() {
            writeln!(w, "  no conflicts")?;
        } else {
            for other in &entry.with {
                writeln!(w, "  - {other}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::format::parse_long;

    fn event(title: &str, start: &str, end: &str) -> Event {
        Event::new(title, parse_long(start).unwrap(), parse_long(end).unwrap()).unwrap()
    }

    fn trio() -> Vec<Event> {
        vec![
            event("test1", "September 02, 2019 9:00 AM", "September 02, 2019 10:00 AM"),
            event("test2", "September 02, 2019 9:00 AM", "September 02, 2019 10:00 AM"),
            event("test3", "September 02, 2019 10:00 AM", "September 02, 2019 11:00 AM"),
        ]
    }

    #[test]
    fn every_event_reported_with_counts() {
        for strategy in Strategy::ALL {
            let report = build_report(&mut strategy.resolver(), &trio(), false);
            assert_eq!(report.strategy, strategy);
            assert_eq!(report.total_events, 3);
            assert_eq!(report.conflicting_events, 2);
            let counts: Vec<_> = report.entries.iter().map(|e| e.count).collect();
            assert_eq!(counts, vec![1, 1, 0]);
            assert_eq!(report.entries[0].with, vec!["test2".to_string()]);
        }
    }

    #[test]
    fn only_conflicting_filters_clean_events() {
        let report = build_report(&mut Strategy::Tree.resolver(), &trio(), true);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.total_events, 3);
        assert!(report.entries.iter().all(|e| e.count > 0));
    }
}
