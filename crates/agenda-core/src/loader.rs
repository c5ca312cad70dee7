//! Reading and writing event lists as JSON.
//!
//! The resource is a JSON array of objects with `title`, `start` and `end`,
//! timestamps in the long form (`"September 02, 2019 12:04 AM"`):
//!
//! ```json
//! [{"title": "Standup", "start": "September 02, 2019 9:00 AM", "end": "September 02, 2019 9:15 AM"}]
//! ```
//!
//! The long form has minute resolution, so only minute-aligned timestamps
//! survive an encode/decode round trip unchanged.

use std::path::Path;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::event::Event;

/// File name of the default events resource.
pub const DEFAULT_RESOURCE: &str = "upcoming_events.json";

/// Sample events compiled into the library.
pub const BUNDLED_EVENTS: &str = include_str!("../data/upcoming_events.json");

/// Decode a JSON array of events.
///
/// # Errors
///
/// Returns [`LoadError::Decode`] for malformed JSON, bad timestamps, or an
/// event ending before it starts.
pub fn decode_events(json: &str) -> Result<Vec<Event>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a single event object.
///
/// # Errors
///
/// Same failure modes as [`decode_events`].
pub fn decode_event(json: &str) -> Result<Event, LoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Encode events as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`LoadError::Decode`] if serialization fails.
pub fn encode_events(events: &[Event]) -> Result<String, LoadError> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Encode one event as a compact JSON object.
///
/// # Errors
///
/// Returns [`LoadError::Decode`] if serialization fails.
pub fn encode_event(event: &Event) -> Result<String, LoadError> {
    Ok(serde_json::to_string(event)?)
}

/// Read and decode the events file at `path`.
///
/// # Errors
///
/// [`LoadError::NotFound`] if the file is missing, [`LoadError::Io`] if it
/// cannot be read, [`LoadError::Decode`] if its content is invalid.
pub fn read_events(path: &Path) -> Result<Vec<Event>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let events = decode_events(&content)?;
    debug!(path = %path.display(), count = events.len(), "loaded events");
    Ok(events)
}

/// Decode the compiled-in sample events.
///
/// # Errors
///
/// Only fails if the bundled resource itself is malformed.
pub fn bundled_events() -> Result<Vec<Event>, LoadError> {
    decode_events(BUNDLED_EVENTS)
}

/// Read `path`, treating any failure as an empty event set.
///
/// The failure is logged; downstream queries then see zero events rather
/// than an error.
pub fn load_or_empty(path: &Path) -> Vec<Event> {
    match read_events(path) {
        Ok(events) => events,
        Err(err) => {
            warn!(path = %path.display(), code = %err.code(), "failed to load events, continuing with none: {err}");
            Vec::new()
        }
    }
}
