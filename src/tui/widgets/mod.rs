pub mod day_card;
pub mod days;
pub mod header;
pub mod scoreboard;
pub mod statusbar;
