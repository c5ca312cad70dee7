//! `agenda tree`: dump the interval tree built over the loaded events.

use std::io::Write;

use agenda_core::config::EffectiveConfig;
use agenda_core::format::format_long;
use agenda_core::{ConflictResolver, Event, NodeShape, TreeResolver};
use clap::Args;
use serde::Serialize;

use super::load_events;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `agenda tree`.
#[derive(Args, Debug, Default)]
pub struct TreeArgs {}

#[derive(Debug, Serialize)]
pub struct TreeRow {
    pub title: String,
    pub start: String,
    pub end: String,
    pub max_end: String,
}

/// Report payload for `agenda tree`.
#[derive(Debug, Serialize)]
pub struct TreeReport {
    pub size: usize,
    pub height: usize,
    pub root: &'static str,
    pub root_max_end: Option<String>,
    pub inorder: Vec<TreeRow>,
}

/// Execute `agenda tree`.
pub fn run_tree(_args: &TreeArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let events = load_events(config, output)?;
    let report = build_report(&events);
    render_mode(output, &report, render_tree_text, render_tree_pretty)
}

fn build_report(events: &[Event]) -> TreeReport {
    let mut resolver = TreeResolver::new();
    resolver.rebuild(events);
    let tree = resolver.tree();

    let inorder = tree
        .to_sorted_vec()
        .into_iter()
        .map(|item| TreeRow {
            title: item.value().map(|e| e.title().to_string()).unwrap_or_default(),
            start: format_long(*item.start()),
            end: format_long(*item.end()),
            max_end: format_long(*item.max_end()),
        })
        .collect();

    TreeReport {
        size: tree.len(),
        height: tree.height(),
        root: match tree.root_shape() {
            NodeShape::Empty => "empty",
            NodeShape::Leaf => "leaf",
            NodeShape::Internal => "internal",
        },
        root_max_end: tree.root_max_end().map(|ts| format_long(*ts)),
        inorder,
    }
}

fn render_tree_text(report: &TreeReport, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &report.inorder {
        writeln!(w, "{}\t{}\t{}\t{}", row.start, row.end, row.max_end, row.title)?;
    }
    Ok(())
}

fn render_tree_pretty(report: &TreeReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Interval tree")?;
    pretty_kv(w, "size", report.size.to_string())?;
    pretty_kv(w, "height", report.height.to_string())?;
    pretty_kv(w, "root", report.root)?;
    pretty_kv(w, "max end", report.root_max_end.as_deref().unwrap_or("-"))?;
    writeln!(w)?;
    for row in &report.inorder {
        writeln!(
            w,
            "  [{} - {}, max: {}] {}",
            row.start, row.end, row.max_end, row.title
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::loader::bundled_events;

    #[test]
    fn report_lists_every_event_in_start_order() {
        let events = bundled_events().unwrap();
        let report = build_report(&events);
        assert_eq!(report.size, events.len());
        assert_eq!(report.inorder.len(), events.len());
        assert_eq!(report.root, "internal");
        assert!(report.height >= 1 && report.height <= events.len());
        assert!(report.root_max_end.is_some());
    }

    #[test]
    fn empty_event_set_has_empty_root() {
        let report = build_report(&[]);
        assert_eq!(report.size, 0);
        assert_eq!(report.height, 0);
        assert_eq!(report.root, "empty");
        assert!(report.root_max_end.is_none());
    }
}
