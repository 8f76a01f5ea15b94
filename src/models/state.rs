use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::participant::{leader, Leader, Participant};
use crate::models::period::{all_days, assert_valid_day, is_valid_day, PERIOD_DAYS};
use crate::models::task::{DayRecord, TaskFlag};

/// Flat bonus for a participant who has paid zakat.
pub const ZAKAT_BONUS: u32 = 5;

/// Highest reachable score, shown as the target. Not enforced anywhere.
pub const TARGET_SCORE: u32 = 105;

pub type DailyRecords = [DayRecord; PERIOD_DAYS as usize];

/// One participant's progress: a record for each of the 30 days plus zakat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredParticipant")]
pub struct ParticipantState {
    #[serde(serialize_with = "daily_map::serialize")]
    daily: DailyRecords,
    zakat_paid: bool,
}

/// Read side of [`ParticipantState`]. `daily` is required, which is what
/// tells this layout apart from the bare day map. The first release called
/// the zakat flag `zakat`; `zakatPaid` wins when both are present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredParticipant {
    #[serde(deserialize_with = "daily_map::deserialize")]
    daily: DailyRecords,
    zakat_paid: Option<bool>,
    zakat: Option<bool>,
}

impl From<StoredParticipant> for ParticipantState {
    fn from(raw: StoredParticipant) -> Self {
        Self {
            daily: raw.daily,
            zakat_paid: raw.zakat_paid.or(raw.zakat).unwrap_or(false),
        }
    }
}

impl Default for ParticipantState {
    fn default() -> Self {
        Self {
            daily: [DayRecord::default(); PERIOD_DAYS as usize],
            zakat_paid: false,
        }
    }
}

impl ParticipantState {
    pub fn new(daily: DailyRecords, zakat_paid: bool) -> Self {
        Self { daily, zakat_paid }
    }

    pub fn zakat_paid(&self) -> bool {
        self.zakat_paid
    }

    pub fn day(&self, day: u8) -> &DayRecord {
        assert_valid_day(day);
        &self.daily[usize::from(day - 1)]
    }

    pub fn days(&self) -> impl Iterator<Item = (u8, &DayRecord)> {
        all_days().zip(self.daily.iter())
    }

    pub fn with_task_toggled(&self, day: u8, task: TaskFlag) -> Self {
        assert_valid_day(day);
        let mut next = self.clone();
        let idx = usize::from(day - 1);
        next.daily[idx] = self.daily[idx].toggled(task);
        next
    }

    pub fn with_zakat_toggled(&self) -> Self {
        Self {
            daily: self.daily,
            zakat_paid: !self.zakat_paid,
        }
    }

    /// One point per set flag across all days, plus the zakat bonus.
    ///
    /// Flags are counted whether or not they are eligible on their day.
    pub fn score(&self) -> u32 {
        let daily: u32 = self.daily.iter().map(DayRecord::completed_count).sum();
        if self.zakat_paid {
            daily + ZAKAT_BONUS
        } else {
            daily
        }
    }

    pub fn is_day_complete(&self, day: u8) -> bool {
        self.day(day).is_complete_for(day)
    }

    pub fn completed_days(&self) -> u32 {
        self.days()
            .filter(|(day, record)| record.is_complete_for(*day))
            .count() as u32
    }
}

/// The whole tracker: always exactly the two fixed participants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    #[serde(rename = "participantA")]
    participant_a: ParticipantState,
    #[serde(rename = "participantB")]
    participant_b: ParticipantState,
}

impl TrackerState {
    /// Fresh state: every flag false, zakat unpaid for both.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn new(participant_a: ParticipantState, participant_b: ParticipantState) -> Self {
        Self {
            participant_a,
            participant_b,
        }
    }

    pub fn participant(&self, who: Participant) -> &ParticipantState {
        match who {
            Participant::ParticipantA => &self.participant_a,
            Participant::ParticipantB => &self.participant_b,
        }
    }

    fn with_participant(&self, who: Participant, next: ParticipantState) -> Self {
        match who {
            Participant::ParticipantA => Self {
                participant_a: next,
                participant_b: self.participant_b.clone(),
            },
            Participant::ParticipantB => Self {
                participant_a: self.participant_a.clone(),
                participant_b: next,
            },
        }
    }

    /// New snapshot with one task flag negated. Eligibility is not checked here.
    pub fn toggle_task(&self, who: Participant, day: u8, task: TaskFlag) -> Self {
        let next = self.participant(who).with_task_toggled(day, task);
        self.with_participant(who, next)
    }

    pub fn toggle_zakat(&self, who: Participant) -> Self {
        let next = self.participant(who).with_zakat_toggled();
        self.with_participant(who, next)
    }

    pub fn score(&self, who: Participant) -> u32 {
        self.participant(who).score()
    }

    pub fn leader(&self) -> Leader {
        leader(
            self.score(Participant::ParticipantA),
            self.score(Participant::ParticipantB),
        )
    }
}

/// Builds the 30-day array from a string-keyed map.
///
/// Keys that are not a day in 1..=30 are dropped; missing days stay all-false.
pub fn daily_from_keyed(raw: BTreeMap<String, DayRecord>) -> DailyRecords {
    let mut daily = [DayRecord::default(); PERIOD_DAYS as usize];
    for (key, record) in raw {
        match key.trim().parse::<u8>() {
            Ok(day) if is_valid_day(day) => daily[usize::from(day - 1)] = record,
            _ => log::warn!("Dropping stored record for unknown day key '{}'", key),
        }
    }
    daily
}

// Day keys are integers in memory and strings in the stored document.
mod daily_map {
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    use super::{daily_from_keyed, DailyRecords};
    use crate::models::task::DayRecord;

    pub fn serialize<S: Serializer>(daily: &DailyRecords, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(daily.len()))?;
        for (idx, record) in daily.iter().enumerate() {
            map.serialize_entry(&(idx + 1).to_string(), record)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DailyRecords, D::Error> {
        let raw = BTreeMap::<String, DayRecord>::deserialize(deserializer)?;
        Ok(daily_from_keyed(raw))
    }
}

#[cfg(test)]
pub(crate) mod strategies {
    use proptest::prelude::*;

    use super::*;

    pub fn participant() -> impl Strategy<Value = Participant> {
        prop::sample::select(Participant::ALL.to_vec())
    }

    pub fn task() -> impl Strategy<Value = TaskFlag> {
        prop::sample::select(TaskFlag::ALL.to_vec())
    }

    pub fn day() -> impl Strategy<Value = u8> {
        1u8..=PERIOD_DAYS
    }

    fn participant_state() -> impl Strategy<Value = ParticipantState> {
        (
            prop::collection::vec(any::<[bool; 4]>(), PERIOD_DAYS as usize),
            any::<bool>(),
        )
            .prop_map(|(flags, zakat_paid)| {
                let mut daily = [DayRecord::default(); PERIOD_DAYS as usize];
                for (record, [a, b, c, d]) in daily.iter_mut().zip(flags) {
                    *record = DayRecord {
                        fasting: a,
                        night_prayer: b,
                        recitation: c,
                        decree_night: d,
                    };
                }
                ParticipantState::new(daily, zakat_paid)
            })
    }

    pub fn tracker_state() -> impl Strategy<Value = TrackerState> {
        (participant_state(), participant_state()).prop_map(|(a, b)| TrackerState::new(a, b))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::strategies;
    use super::*;

    fn full_participant() -> ParticipantState {
        let mut state = ParticipantState::default();
        for day in all_days() {
            for task in TaskFlag::BASE {
                state = state.with_task_toggled(day, task);
            }
            if day >= 21 {
                state = state.with_task_toggled(day, TaskFlag::DecreeNight);
            }
        }
        state.with_zakat_toggled()
    }

    #[test]
    fn initial_state_shape() {
        let state = TrackerState::initial();
        for who in Participant::ALL {
            let p = state.participant(who);
            assert_eq!(p.days().count(), 30);
            assert_eq!(p.days().map(|(d, _)| d).collect::<Vec<_>>(), (1..=30).collect::<Vec<u8>>());
            assert!(p.days().all(|(_, r)| *r == DayRecord::default()));
            assert!(!p.zakat_paid());
            assert_eq!(p.score(), 0);
        }
        assert_eq!(state.leader(), Leader::Tie);
    }

    #[test]
    fn max_score_is_target() {
        let p = full_participant();
        assert_eq!(p.score(), TARGET_SCORE);
        assert_eq!(p.completed_days(), 30);
    }

    #[test]
    fn score_counts_ineligible_decree_night() {
        let p = ParticipantState::default().with_task_toggled(3, TaskFlag::DecreeNight);
        assert_eq!(p.score(), 1);
        assert!(!p.is_day_complete(3));
    }

    #[test]
    fn toggle_does_not_touch_input_or_other_participant() {
        let before = TrackerState::initial();
        let after = before.toggle_task(Participant::ParticipantB, 7, TaskFlag::Fasting);
        assert!(!before.participant(Participant::ParticipantB).day(7).fasting);
        assert!(after.participant(Participant::ParticipantB).day(7).fasting);
        assert_eq!(
            after.participant(Participant::ParticipantA),
            before.participant(Participant::ParticipantA)
        );
        assert_eq!(after.leader(), Leader::Ahead(Participant::ParticipantB));
    }

    #[test]
    fn zakat_adds_flat_bonus() {
        let state = TrackerState::initial().toggle_zakat(Participant::ParticipantA);
        assert!(state.participant(Participant::ParticipantA).zakat_paid());
        assert_eq!(state.score(Participant::ParticipantA), ZAKAT_BONUS);
        assert_eq!(state.score(Participant::ParticipantB), 0);
    }

    #[test]
    #[should_panic(expected = "outside 1..=30")]
    fn toggle_rejects_day_zero() {
        TrackerState::initial().toggle_task(Participant::ParticipantA, 0, TaskFlag::Fasting);
    }

    #[test]
    #[should_panic(expected = "outside 1..=30")]
    fn day_rejects_day_31() {
        ParticipantState::default().day(31);
    }

    #[test]
    fn serializes_string_day_keys() {
        let state = TrackerState::initial().toggle_task(Participant::ParticipantA, 30, TaskFlag::Recitation);
        let json = serde_json::to_value(&state).unwrap();
        let daily = json["participantA"]["daily"].as_object().unwrap();
        assert_eq!(daily.len(), 30);
        assert!(daily.contains_key("1"));
        assert_eq!(daily["30"]["recitation"], serde_json::Value::Bool(true));
        assert_eq!(json["participantB"]["zakatPaid"], serde_json::Value::Bool(false));
    }

    #[test]
    fn decode_fills_missing_days_and_drops_unknown_keys() {
        let json = r#"{"daily":{"2":{"fasting":true},"31":{"fasting":true},"x":{}},"zakat":true}"#;
        let p: ParticipantState = serde_json::from_str(json).unwrap();
        assert_eq!(p.days().count(), 30);
        assert!(p.day(2).fasting);
        assert!(p.zakat_paid());
        assert_eq!(p.score(), 1 + ZAKAT_BONUS);
    }

    #[test]
    fn zakat_paid_wins_over_older_zakat() {
        let json = r#"{"daily":{},"zakatPaid":false,"zakat":true}"#;
        let p: ParticipantState = serde_json::from_str(json).unwrap();
        assert!(!p.zakat_paid());

        let bare: ParticipantState = serde_json::from_str(r#"{"daily":{}}"#).unwrap();
        assert!(!bare.zakat_paid());
        assert!(serde_json::from_str::<ParticipantState>(r#"{"zakatPaid":true}"#).is_err());
    }

    proptest! {
        #[test]
        fn toggle_task_is_an_involution(
            state in strategies::tracker_state(),
            who in strategies::participant(),
            day in strategies::day(),
            task in strategies::task(),
        ) {
            let twice = state.toggle_task(who, day, task).toggle_task(who, day, task);
            prop_assert_eq!(twice, state);
        }

        #[test]
        fn setting_a_flag_scores_exactly_one(
            state in strategies::tracker_state(),
            who in strategies::participant(),
            day in strategies::day(),
            task in strategies::task(),
        ) {
            let before = state.score(who);
            let next = state.toggle_task(who, day, task);
            let after = next.score(who);
            if state.participant(who).day(day).get(task) {
                prop_assert_eq!(after + 1, before);
            } else {
                prop_assert_eq!(after, before + 1);
            }
            for other in Participant::ALL.into_iter().filter(|p| *p != who) {
                prop_assert_eq!(next.score(other), state.score(other));
            }
        }

        #[test]
        fn paying_zakat_scores_exactly_five(
            state in strategies::tracker_state(),
            who in strategies::participant(),
        ) {
            let next = state.toggle_zakat(who);
            if state.participant(who).zakat_paid() {
                prop_assert_eq!(next.score(who) + ZAKAT_BONUS, state.score(who));
            } else {
                prop_assert_eq!(next.score(who), state.score(who) + ZAKAT_BONUS);
            }
        }

        #[test]
        fn json_form_decodes_to_same_state(state in strategies::tracker_state()) {
            let text = serde_json::to_string(&state).unwrap();
            let back: TrackerState = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(back, state);
        }
    }
}
