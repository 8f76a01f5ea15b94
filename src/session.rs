use rusqlite::Connection;

use crate::db::store::{self, StoreError};
use crate::models::{reduce, Action, TrackerState};

/// Owns the current tracker snapshot and the connection it is persisted to.
///
/// The only way to get a session is [`Session::open`], which finishes loading
/// before anything is written back.
pub struct Session {
    conn: Connection,
    state: TrackerState,
}

impl Session {
    /// Loads (and if needed migrates) stored state, then saves it back once so
    /// storage holds the current layout.
    pub fn open(conn: Connection) -> Result<Self, StoreError> {
        let state = store::load_or_initial(&conn)?;
        store::save(&conn, &state)?;
        Ok(Self { conn, state })
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    #[cfg(test)]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Replaces the snapshot with the reduced one and writes it through.
    ///
    /// The snapshot advances even if the write fails; the next successful save
    /// carries it.
    pub fn apply(&mut self, action: Action) -> Result<&TrackerState, StoreError> {
        self.state = reduce(&self.state, &action);
        store::save(&self.conn, &self.state)?;
        Ok(&self.state)
    }

    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.state = TrackerState::initial();
        store::save(&self.conn, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::db::repository::MetaRepo;
    use crate::db::store::STATE_KEY;
    use crate::models::{Participant, TaskFlag};

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn open_on_empty_storage_writes_initial_state() {
        let session = Session::open(conn()).unwrap();
        assert_eq!(session.state(), &TrackerState::initial());
        let stored = MetaRepo::get(session.connection(), STATE_KEY).unwrap().unwrap();
        let back: TrackerState = serde_json::from_str(&stored).unwrap();
        assert_eq!(back, TrackerState::initial());
    }

    #[test]
    fn open_rewrites_legacy_blob_in_current_layout() {
        let conn = conn();
        MetaRepo::set(
            &conn,
            STATE_KEY,
            r#"{"participantA":{"3":{"fasting":true}},"participantB":{}}"#,
        )
        .unwrap();

        let session = Session::open(conn).unwrap();
        let stored = MetaRepo::get(session.connection(), STATE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(json["participantA"]["daily"]["3"]["fasting"], serde_json::json!(true));
        assert_eq!(json["participantA"]["zakatPaid"], serde_json::json!(false));
        assert_eq!(json["participantB"]["daily"].as_object().unwrap().len(), 30);
    }

    #[test]
    fn open_carries_first_release_progress_over() {
        let conn = conn();
        MetaRepo::set(
            &conn,
            STATE_KEY,
            r#"{"faizal":{"daily":{"1":{"puasa":true,"tarawih":true,"tadarus":true,"lailatulQodar":false}},"zakat":true},
               "ainun":{"1":{"puasa":true,"tarawih":false,"tadarus":false,"lailatulQodar":false}}}"#,
        )
        .unwrap();

        let session = Session::open(conn).unwrap();
        assert_eq!(session.state().score(Participant::ParticipantA), 3 + 5);
        assert_eq!(session.state().score(Participant::ParticipantB), 1);

        let stored = MetaRepo::get(session.connection(), STATE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(json["participantA"]["zakatPaid"], serde_json::json!(true));
        assert_eq!(json["participantB"]["daily"]["1"]["fasting"], serde_json::json!(true));
        assert!(json.get("faizal").is_none());
        assert_eq!(MetaRepo::get(session.connection(), store::CORRUPT_KEY).unwrap(), None);
    }

    #[test]
    fn apply_writes_through_every_action() {
        let mut session = Session::open(conn()).unwrap();
        let before = session.state().clone();

        session
            .apply(Action::ToggleTask {
                participant: Participant::ParticipantA,
                day: 1,
                task: TaskFlag::Fasting,
            })
            .unwrap();
        session
            .apply(Action::ToggleZakat {
                participant: Participant::ParticipantB,
            })
            .unwrap();

        assert_eq!(before, TrackerState::initial());
        assert_eq!(session.state().score(Participant::ParticipantA), 1);
        assert_eq!(session.state().score(Participant::ParticipantB), 5);

        let stored = store::load(session.connection()).unwrap().unwrap().state;
        assert_eq!(&stored, session.state());
    }

    #[test]
    fn state_survives_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tracker.db");

        {
            let conn = Connection::open(&path).unwrap();
            run_migrations(&conn).unwrap();
            let mut session = Session::open(conn).unwrap();
            session
                .apply(Action::ToggleTask {
                    participant: Participant::ParticipantB,
                    day: 25,
                    task: TaskFlag::DecreeNight,
                })
                .unwrap();
        }

        let conn = Connection::open(&path).unwrap();
        run_migrations(&conn).unwrap();
        let session = Session::open(conn).unwrap();
        assert!(session.state().participant(Participant::ParticipantB).day(25).decree_night);
    }

    #[test]
    fn reset_clears_progress() {
        let mut session = Session::open(conn()).unwrap();
        session
            .apply(Action::ToggleZakat {
                participant: Participant::ParticipantA,
            })
            .unwrap();
        session.reset().unwrap();
        assert_eq!(session.state(), &TrackerState::initial());
        assert_eq!(
            store::load(session.connection()).unwrap().unwrap().state,
            TrackerState::initial()
        );
    }
}
