use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ramadhan-tracker", version, author, about = "A two-person Ramadhan observance tracker for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show both scores, the leader and today's Ramadhan day
    Status,
    /// Toggle a task for a participant
    Mark {
        /// Participant (display name, a or b)
        participant: String,
        /// Task (puasa, tarawih, tadarus, lqodar)
        task: String,
        /// Ramadhan day 1-30 (defaults to today)
        #[arg(long)]
        day: Option<u8>,
    },
    /// Toggle whether a participant has paid zakat
    Zakat {
        /// Participant (display name, a or b)
        participant: String,
    },
    /// Print the stored tracker state as JSON
    Export,
    /// Clear all progress for both participants
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
