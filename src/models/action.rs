use crate::models::participant::Participant;
use crate::models::state::TrackerState;
use crate::models::task::TaskFlag;

/// A user interaction that changes tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleTask {
        participant: Participant,
        day: u8,
        task: TaskFlag,
    },
    ToggleZakat {
        participant: Participant,
    },
}

pub fn reduce(state: &TrackerState, action: &Action) -> TrackerState {
    match *action {
        Action::ToggleTask {
            participant,
            day,
            task,
        } => state.toggle_task(participant, day, task),
        Action::ToggleZakat { participant } => state.toggle_zakat(participant),
    }
}
