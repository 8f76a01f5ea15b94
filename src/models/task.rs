use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::period::is_last_ten;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskFlag {
    Fasting,
    NightPrayer,
    Recitation,
    DecreeNight,
}

impl TaskFlag {
    pub const ALL: [TaskFlag; 4] = [
        TaskFlag::Fasting,
        TaskFlag::NightPrayer,
        TaskFlag::Recitation,
        TaskFlag::DecreeNight,
    ];

    /// Tasks tracked on every day of the period.
    pub const BASE: [TaskFlag; 3] = [
        TaskFlag::Fasting,
        TaskFlag::NightPrayer,
        TaskFlag::Recitation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskFlag::Fasting => "Puasa",
            TaskFlag::NightPrayer => "Tarawih",
            TaskFlag::Recitation => "Tadarus",
            TaskFlag::DecreeNight => "L. Qodar",
        }
    }

    /// Whether the task is shown and toggleable on the given day.
    pub fn is_eligible(&self, day: u8) -> bool {
        match self {
            TaskFlag::DecreeNight => is_last_ten(day),
            _ => true,
        }
    }
}

impl std::fmt::Display for TaskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TaskFlag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "fasting" | "puasa" => Ok(TaskFlag::Fasting),
            "nightprayer" | "tarawih" => Ok(TaskFlag::NightPrayer),
            "recitation" | "tadarus" => Ok(TaskFlag::Recitation),
            "decreenight" | "lqodar" | "lailatulqodar" => Ok(TaskFlag::DecreeNight),
            _ => Err(anyhow::anyhow!("Unknown task: {}", s)),
        }
    }
}

/// Tasks the presentation layer offers for a day, in display order.
pub fn eligible_tasks(day: u8) -> Vec<TaskFlag> {
    let mut tasks = TaskFlag::BASE.to_vec();
    if TaskFlag::DecreeNight.is_eligible(day) {
        tasks.push(TaskFlag::DecreeNight);
    }
    tasks
}

/// Completion flags for one participant on one day.
///
/// All four flags are always stored, whatever the day. Older stored data used
/// the Indonesian task names, which are accepted on read; when a record has
/// both names for a flag the current one wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredDayRecord")]
pub struct DayRecord {
    pub fasting: bool,
    pub night_prayer: bool,
    pub recitation: bool,
    pub decree_night: bool,
}

/// Read side of [`DayRecord`]. Missing flags are false.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDayRecord {
    fasting: Option<bool>,
    puasa: Option<bool>,
    night_prayer: Option<bool>,
    tarawih: Option<bool>,
    recitation: Option<bool>,
    tadarus: Option<bool>,
    decree_night: Option<bool>,
    lailatul_qodar: Option<bool>,
}

impl From<StoredDayRecord> for DayRecord {
    fn from(raw: StoredDayRecord) -> Self {
        let pick = |current: Option<bool>, older: Option<bool>| current.or(older).unwrap_or(false);
        DayRecord {
            fasting: pick(raw.fasting, raw.puasa),
            night_prayer: pick(raw.night_prayer, raw.tarawih),
            recitation: pick(raw.recitation, raw.tadarus),
            decree_night: pick(raw.decree_night, raw.lailatul_qodar),
        }
    }
}

impl DayRecord {
    pub fn get(&self, task: TaskFlag) -> bool {
        match task {
            TaskFlag::Fasting => self.fasting,
            TaskFlag::NightPrayer => self.night_prayer,
            TaskFlag::Recitation => self.recitation,
            TaskFlag::DecreeNight => self.decree_night,
        }
    }

    fn flag_mut(&mut self, task: TaskFlag) -> &mut bool {
        match task {
            TaskFlag::Fasting => &mut self.fasting,
            TaskFlag::NightPrayer => &mut self.night_prayer,
            TaskFlag::Recitation => &mut self.recitation,
            TaskFlag::DecreeNight => &mut self.decree_night,
        }
    }

    /// Copy of this record with one flag negated.
    pub fn toggled(&self, task: TaskFlag) -> DayRecord {
        let mut next = *self;
        let flag = next.flag_mut(task);
        *flag = !*flag;
        next
    }

    /// Number of set flags, eligible or not.
    pub fn completed_count(&self) -> u32 {
        TaskFlag::ALL.iter().filter(|t| self.get(**t)).count() as u32
    }

    /// True when every task eligible on `day` is set.
    pub fn is_complete_for(&self, day: u8) -> bool {
        eligible_tasks(day).into_iter().all(|t| self.get(t))
    }
}
