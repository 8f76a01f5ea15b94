pub mod action;
pub mod participant;
pub mod period;
pub mod state;
pub mod task;

pub use action::{reduce, Action};
pub use participant::{Leader, Participant};
pub use period::{is_valid_day, PERIOD_DAYS};
pub use state::{ParticipantState, TrackerState, TARGET_SCORE};
pub use task::{eligible_tasks, DayRecord, TaskFlag};
