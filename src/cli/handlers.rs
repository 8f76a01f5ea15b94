use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

use crate::config::settings::ParticipantsConfig;
use crate::config::AppConfig;
use crate::models::{is_valid_day, Action, Leader, Participant, TaskFlag, PERIOD_DAYS, TARGET_SCORE};
use crate::session::Session;
use crate::utils::calendar::{current_day_index, date_label_for_day_index, today_label, ANCHOR_DATE};
use crate::utils::format::{progress_bar, score_fraction};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn handle_status(session: &Session, config: &AppConfig) -> Result<()> {
    let state = session.state();
    let today = current_day_index();
    let names = &config.participants;

    println!();
    println_colored!(GOLD, "  Ramadhan {}  ·  {}", today, today_label());
    println!();

    for who in Participant::ALL {
        let p = state.participant(who);
        let zakat = if p.zakat_paid() { "zakat ✓" } else { "zakat –" };
        println!(
            "  {:<10} {:>7}  {}  {}  {} full days",
            names.name(who),
            score_fraction(p.score(), TARGET_SCORE),
            progress_bar(p.score(), TARGET_SCORE, 16),
            zakat,
            p.completed_days()
        );
    }

    println!();
    match state.leader() {
        Leader::Ahead(who) => println_colored!(GREEN, "  Leading: {}", names.name(who)),
        Leader::Tie => println_colored!(DIM, "  Tied"),
    }
    println!();
    Ok(())
}

// ─── Mark ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkRequest {
    pub participant: Participant,
    pub day: u8,
    pub task: TaskFlag,
}

impl From<MarkRequest> for Action {
    fn from(req: MarkRequest) -> Self {
        Action::ToggleTask {
            participant: req.participant,
            day: req.day,
            task: req.task,
        }
    }
}

/// Validates a mark request the way the UI would: day in range and the task
/// offered on that day.
pub fn resolve_mark(
    participants: &ParticipantsConfig,
    participant: &str,
    task: &str,
    day: Option<u8>,
    today: u8,
) -> Result<MarkRequest> {
    let participant = participants.resolve(participant)?;
    let task: TaskFlag = task
        .parse()
        .with_context(|| format!("Unknown task '{}'. Use: puasa, tarawih, tadarus, lqodar", task))?;
    let day = day.unwrap_or(today);
    if !is_valid_day(day) {
        bail!("Day must be between 1 and {}, got {}", PERIOD_DAYS, day);
    }
    if !task.is_eligible(day) {
        bail!("{} is only tracked in the last ten days (21-30)", task.label());
    }
    Ok(MarkRequest {
        participant,
        day,
        task,
    })
}

pub fn handle_mark(
    session: &mut Session,
    config: &AppConfig,
    participant: &str,
    task: &str,
    day: Option<u8>,
) -> Result<()> {
    let req = resolve_mark(&config.participants, participant, task, day, current_day_index())?;
    let MarkRequest { participant, day, task } = req;

    let state = session.apply(req.into()).context("Saving progress")?;
    let name = config.participants.name(participant);
    let date = date_label_for_day_index(ANCHOR_DATE, day);
    if state.participant(participant).day(day).get(task) {
        println_colored!(GREEN, "  ✓ {} marked for {} on Ramadhan {} ({})", task, name, day, date);
    } else {
        println_colored!(AMBER, "  ○ {} unmarked for {} on Ramadhan {} ({})", task, name, day, date);
    }
    Ok(())
}

// ─── Zakat ───────────────────────────────────────────────────────────────────

pub fn handle_zakat(session: &mut Session, config: &AppConfig, participant: &str) -> Result<()> {
    let who = config.participants.resolve(participant)?;
    let state = session
        .apply(Action::ToggleZakat { participant: who })
        .context("Saving progress")?;
    let name = config.participants.name(who);
    if state.participant(who).zakat_paid() {
        println_colored!(GREEN, "  ✓ Zakat paid by {}", name);
    } else {
        println_colored!(AMBER, "  ○ Zakat unmarked for {}", name);
    }
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(session: &Session) -> Result<()> {
    let json = serde_json::to_string_pretty(session.state()).context("Serializing state")?;
    println!("{}", json);
    Ok(())
}

// ─── Reset ───────────────────────────────────────────────────────────────────

pub fn handle_reset(session: &mut Session, yes: bool) -> Result<()> {
    if !yes {
        print!("  Clear all progress for both participants? Type 'yes' to confirm: ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if answer.trim() != "yes" {
            println_colored!(DIM, "  Nothing changed");
            return Ok(());
        }
    }
    session.reset().context("Saving reset state")?;
    println_colored!(AMBER, "  All progress cleared");
    Ok(())
}
