use ratatui::style::{Color, Modifier, Style};

use crate::models::Participant;

pub const BG: Color = Color::Rgb(12, 20, 18);
pub const SURFACE: Color = Color::Rgb(20, 32, 28);
pub const BORDER: Color = Color::Rgb(40, 64, 56);
pub const TEXT: Color = Color::Rgb(226, 236, 230);
pub const TEXT_DIM: Color = Color::Rgb(112, 136, 126);
pub const EMERALD: Color = Color::Rgb(16, 185, 129);
pub const PINK: Color = Color::Rgb(236, 72, 153);
pub const GOLD: Color = Color::Rgb(245, 158, 11);
pub const RED: Color = Color::Rgb(190, 80, 70);
pub const TODAY: Color = Color::Rgb(30, 58, 48);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn emerald() -> Style {
    Style::default().fg(EMERALD)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

/// Each participant keeps one accent colour everywhere on screen.
pub fn participant(who: Participant) -> Style {
    match who {
        Participant::ParticipantA => Style::default().fg(EMERALD),
        Participant::ParticipantB => Style::default().fg(PINK),
    }
}
