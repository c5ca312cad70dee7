//! `agenda verify`: check the tree-backed resolver against the eager baseline.

use std::collections::BTreeSet;
use std::io::Write;

use agenda_core::config::EffectiveConfig;
use agenda_core::conflict::conflict_pairs;
use agenda_core::{EagerResolver, ErrorCode, Event, TreeResolver};
use clap::Args;
use serde::Serialize;

use super::load_events;
use crate::output::{CliError, OutputMode, render_error, render_mode};

/// Arguments for `agenda verify`.
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {}

/// A pair reported by only one strategy.
#[derive(Debug, Serialize)]
pub struct PairMismatch {
    pub only_in: &'static str,
    pub first: String,
    pub second: String,
}

/// Report payload for `agenda verify`.
#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub events: usize,
    pub eager_pairs: usize,
    pub tree_pairs: usize,
    pub agree: bool,
    pub mismatches: Vec<PairMismatch>,
}

/// Execute `agenda verify`.
///
/// # Errors
///
/// Returns an error when the two strategies disagree.
pub fn run_verify(_args: &VerifyArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let events = load_events(config, output)?;
    let report = build_report(&events);
    render_mode(output, &report, render_verify_text, render_verify_text)?;

    if report.agree {
        Ok(())
    } else {
        render_error(
            output,
            &CliError::coded(
                ErrorCode::StrategyMismatch,
                format!("{} conflict pairs differ", report.mismatches.len()),
            ),
        )?;
        anyhow::bail!("verify: failed");
    }
}

fn build_report(events: &[Event]) -> VerifyReport {
    let eager = conflict_pairs(&mut EagerResolver::new(), events);
    let tree = conflict_pairs(&mut TreeResolver::new(), events);
    compare(events.len(), &eager, &tree)
}

fn compare(
    events: usize,
    eager: &BTreeSet<(Event, Event)>,
    tree: &BTreeSet<(Event, Event)>,
) -> VerifyReport {
    let describe = |only_in, (a, b): &(Event, Event)| PairMismatch {
        only_in,
        first: a.to_string(),
        second: b.to_string(),
    };
    let mismatches: Vec<_> = eager
        .difference(tree)
        .map(|pair| describe("eager", pair))
        .chain(tree.difference(eager).map(|pair| describe("tree", pair)))
        .collect();

    VerifyReport {
        events,
        eager_pairs: eager.len(),
        tree_pairs: tree.len(),
        agree: mismatches.is_empty(),
        mismatches,
    }
}

fn render_verify_text(report: &VerifyReport, w: &mut dyn Write) -> std::io::Result<()> {
    let status = if report.agree { "OK  " } else { "FAIL" };
    writeln!(
        w,
        "{status} {} events, eager {} pairs, tree {} pairs",
        report.events, report.eager_pairs, report.tree_pairs
    )?;
    for mismatch in &report.mismatches {
        writeln!(
            w,
            "  only in {}: {} / {}",
            mismatch.only_in, mismatch.first, mismatch.second
        )?;
    }
    if report.agree {
        writeln!(w, "verify: success")?;
    }
    Ok(())
}
