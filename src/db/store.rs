use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::db::repository::MetaRepo;
use crate::models::state::daily_from_keyed;
use crate::models::{DayRecord, Participant, ParticipantState, TrackerState};

/// Key of the tracker document. The suffix is the only version marker.
pub const STATE_KEY: &str = "ramadhan-tracker-v1";

/// Where an undecodable document is kept after the main key is reset.
pub const CORRUPT_KEY: &str = "ramadhan-tracker-v1.corrupt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("stored tracker state is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("could not encode tracker state: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Layout a participant's stored value was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredShape {
    /// `{ daily: {...}, zakatPaid: bool }`
    Current,
    /// The bare day map, from before zakat was tracked.
    Legacy,
    /// Missing or malformed; replaced with a fresh slice.
    Unrecognized,
}

/// Decodes one participant's stored value: current layout first, then the
/// legacy bare day map, else a fresh slice.
pub fn decode_participant(who: Participant, value: Option<&Value>) -> (ParticipantState, StoredShape) {
    let Some(value) = value else {
        log::warn!("No stored progress for {}, starting it fresh", who.as_str());
        return (ParticipantState::default(), StoredShape::Unrecognized);
    };

    if let Ok(state) = ParticipantState::deserialize(value) {
        return (state, StoredShape::Current);
    }

    // Zakat was not tracked in the legacy layout, so it starts unpaid.
    match BTreeMap::<String, DayRecord>::deserialize(value) {
        Ok(raw) => {
            log::info!("Migrated legacy progress for {}", who.as_str());
            (
                ParticipantState::new(daily_from_keyed(raw), false),
                StoredShape::Legacy,
            )
        }
        Err(e) => {
            log::warn!(
                "Stored progress for {} has an unrecognized layout ({}), starting it fresh",
                who.as_str(),
                e
            );
            (ParticipantState::default(), StoredShape::Unrecognized)
        }
    }
}

/// Stored value for one participant. Documents from the first release keyed
/// participants by name, so that key is tried when the current one is absent.
fn stored_value(parsed: &Value, who: Participant) -> Option<&Value> {
    parsed.get(who.as_str()).or_else(|| {
        let value = parsed.get(who.legacy_key());
        if value.is_some() {
            log::info!(
                "Reading progress for {} from older key '{}'",
                who.as_str(),
                who.legacy_key()
            );
        }
        value
    })
}

/// A stored document decoded into current state.
#[derive(Debug)]
pub struct Loaded {
    pub state: TrackerState,
    /// Participants whose stored value could not be read and were started fresh.
    pub started_fresh: Vec<Participant>,
}

fn decode_document(parsed: &Value) -> Loaded {
    let mut started_fresh = Vec::new();
    let [a, b] = Participant::ALL.map(|who| {
        let (state, shape) = decode_participant(who, stored_value(parsed, who));
        if shape == StoredShape::Unrecognized {
            started_fresh.push(who);
        }
        state
    });
    Loaded {
        state: TrackerState::new(a, b),
        started_fresh,
    }
}

/// Upgrades a parsed document to the current layout. Each participant is
/// handled on its own, and current-layout input comes back unchanged.
pub fn migrate_if_legacy(parsed: &Value) -> TrackerState {
    decode_document(parsed).state
}

/// Reads the stored document. `Ok(None)` means nothing has been saved yet.
pub fn load(conn: &Connection) -> Result<Option<Loaded>, StoreError> {
    let Some(raw) = MetaRepo::get(conn, STATE_KEY)? else {
        return Ok(None);
    };
    let parsed: Value = serde_json::from_str(&raw).map_err(StoreError::Parse)?;
    Ok(Some(decode_document(&parsed)))
}

/// Writes the whole state under [`STATE_KEY`], replacing what was there.
pub fn save(conn: &Connection, state: &TrackerState) -> Result<(), StoreError> {
    let blob = serde_json::to_string(state).map_err(StoreError::Encode)?;
    MetaRepo::set(conn, STATE_KEY, &blob)?;
    log::debug!("Saved tracker state ({} bytes)", blob.len());
    Ok(())
}

/// Copies the stored document to [`CORRUPT_KEY`] before it gets overwritten.
/// A failed copy is logged and otherwise ignored.
fn keep_unreadable(conn: &Connection) {
    let copied = MetaRepo::get(conn, STATE_KEY).and_then(|raw| match raw {
        Some(raw) => MetaRepo::set(conn, CORRUPT_KEY, &raw).map(|_| true),
        None => Ok(false),
    });
    match copied {
        Ok(true) => log::warn!("Kept unreadable tracker state under '{}'", CORRUPT_KEY),
        Ok(false) => {}
        Err(e) => log::warn!("Could not keep unreadable tracker state: {}", e),
    }
}

/// Loads stored state, falling back to the initial state when nothing usable
/// is stored. Only a failure to read the database is returned.
pub fn load_or_initial(conn: &Connection) -> Result<TrackerState, StoreError> {
    match load(conn) {
        Ok(None) => {
            log::info!("No saved tracker state, starting fresh");
            Ok(TrackerState::initial())
        }
        Ok(Some(loaded)) => {
            if !loaded.started_fresh.is_empty() {
                keep_unreadable(conn);
            }
            Ok(loaded.state)
        }
        Err(StoreError::Parse(e)) => {
            log::error!("Failed to parse saved tracker state, starting fresh: {}", e);
            keep_unreadable(conn);
            Ok(TrackerState::initial())
        }
        Err(e) => Err(e),
    }
}
