pub mod conflicts;
pub mod list;
pub mod overlaps;
pub mod tree;
pub mod verify;

use agenda_core::config::{EffectiveConfig, EventSource};
use agenda_core::loader::{bundled_events, read_events};
use agenda_core::Event;
use serde::Serialize;
use tracing::debug;

use crate::output::{CliError, OutputMode, render_error};

/// Load the events named by `config`, rendering a coded error on failure.
pub fn load_events(config: &EffectiveConfig, output: OutputMode) -> anyhow::Result<Vec<Event>> {
    let loaded = match &config.source {
        EventSource::File(path) => read_events(path),
        EventSource::Bundled => bundled_events(),
    };

    match loaded {
        Ok(events) => {
            debug!(source = ?config.source, count = events.len(), "events loaded");
            Ok(events)
        }
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            let what = match &config.source {
                EventSource::File(path) => path.display().to_string(),
                EventSource::Bundled => "bundled events".to_string(),
            };
            Err(anyhow::Error::new(err).context(format!("failed to load {what}")))
        }
    }
}

/// Event as rendered by every command: long-form timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct EventRow {
    pub title: String,
    pub start: String,
    pub end: String,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title().to_string(),
            start: agenda_core::format::format_long(event.start()),
            end: agenda_core::format::format_long(event.end()),
        }
    }
}
