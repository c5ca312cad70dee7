//! `agenda overlaps`: events overlapping a time window.

use std::io::Write;

use agenda_core::config::EffectiveConfig;
use agenda_core::format::parse_long;
use agenda_core::{ErrorCode, Event, IntervalItem, IntervalTree};
use chrono::NaiveDateTime;
use clap::Args;
use serde::Serialize;

use super::{EventRow, load_events};
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `agenda overlaps`.
#[derive(Args, Debug)]
pub struct OverlapsArgs {
    /// Window start, e.g. "November 10, 2018 9:00 AM".
    #[arg(long)]
    pub from: String,

    /// Window end, same form as --from.
    #[arg(long)]
    pub to: String,
}

/// Report payload for `agenda overlaps`.
#[derive(Debug, Serialize)]
pub struct OverlapsReport {
    pub from: String,
    pub to: String,
    pub count: usize,
    pub events: Vec<EventRow>,
}

/// Execute `agenda overlaps`.
pub fn run_overlaps(
    args: &OverlapsArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let (from, to) = match parse_window(args) {
        Ok(window) => window,
        Err(err) => {
            render_error(output, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };

    let events = load_events(config, output)?;
    let tree: IntervalTree<NaiveDateTime, Event> = events
        .into_iter()
        .map(|event| IntervalItem::new(event.start(), event.end(), event))
        .collect();

    let report = build_report(&tree, from, to);
    render_mode(output, &report, render_overlaps_text, render_overlaps_pretty)
}

fn parse_window(args: &OverlapsArgs) -> Result<(NaiveDateTime, NaiveDateTime), CliError> {
    let parse = |flag: &str, raw: &str| {
        parse_long(raw).map_err(|e| {
            CliError::coded(ErrorCode::InvalidTimestamp, format!("invalid {flag} '{raw}': {e}"))
        })
    };
    let from = parse("--from", &args.from)?;
    let to = parse("--to", &args.to)?;
    if from > to {
        return Err(CliError::coded(
            ErrorCode::InvalidInterval,
            format!("--from '{}' is after --to '{}'", args.from, args.to),
        ));
    }
    Ok((from, to))
}

fn build_report(
    tree: &IntervalTree<NaiveDateTime, Event>,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> OverlapsReport {
    let mut hits: Vec<&Event> = tree
        .overlapping(&from, &to)
        .into_iter()
        .filter_map(IntervalItem::value)
        .collect();
    hits.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.title().cmp(b.title())));

    OverlapsReport {
        from: agenda_core::format::format_long(from),
        to: agenda_core::format::format_long(to),
        count: hits.len(),
        events: hits.into_iter().map(EventRow::from).collect(),
    }
}

fn render_overlaps_text(report: &OverlapsReport, w: &mut dyn Write) -> std::io::Result<()> {
    for event in &report.events {
        writeln!(w, "{}\t{}\t{}", event.start, event.end, event.title)?;
    }
    Ok(())
}

fn render_overlaps_pretty(report: &OverlapsReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Overlapping events")?;
    pretty_kv(w, "window", format!("{} to {}", report.from, report.to))?;
    pretty_kv(w, "matches", report.count.to_string())?;
    writeln!(w)?;
    for event in &report.events {
        writeln!(w, "  {} ({} to {})", event.title, event.start, event.end)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(from: &str, to: &str) -> OverlapsArgs {
        OverlapsArgs {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    fn tree() -> IntervalTree<NaiveDateTime, Event> {
        [
            ("Early", "November 10, 2018 8:00 AM", "November 10, 2018 9:00 AM"),
            ("Mid", "November 10, 2018 9:30 AM", "November 10, 2018 11:00 AM"),
            ("Late", "November 10, 2018 1:00 PM", "November 10, 2018 2:00 PM"),
        ]
        .into_iter()
        .map(|(title, start, end)| {
            let event = Event::new(title, parse_long(start).unwrap(), parse_long(end).unwrap()).unwrap();
            IntervalItem::new(event.start(), event.end(), event)
        })
        .collect()
    }

    #[test]
    fn window_is_half_open() {
        let (from, to) = parse_window(&args("November 10, 2018 9:00 AM", "November 10, 2018 1:00 PM")).unwrap();
        let report = build_report(&tree(), from, to);
        assert_eq!(report.count, 1);
        assert_eq!(report.events[0].title, "Mid");
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = parse_window(&args("November 10, 2018 1:00 PM", "November 10, 2018 9:00 AM")).unwrap_err();
        assert_eq!(err.error_code.as_deref(), Some("E3001"));
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let err = parse_window(&args("2018-11-10 09:00", "November 10, 2018 9:00 AM")).unwrap_err();
        assert_eq!(err.error_code.as_deref(), Some("E3002"));
        assert!(err.message.contains("--from"));
    }
}
