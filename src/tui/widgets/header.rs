use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::config::settings::ParticipantsConfig;
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    names: &ParticipantsConfig,
    today: u8,
    today_label: &str,
) {
    let title_line = Line::from(vec![
        Span::styled("  رمضان  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("Ramadhan Tracker", theme::emerald().add_modifier(Modifier::BOLD)),
    ]);

    let subtitle_line = Line::from(Span::styled(
        format!("Jurnal Ibadah {} & {}", names.a_name, names.b_name),
        theme::dim(),
    ));

    let date_line = Line::from(vec![
        Span::styled(format!("Hari ini ({})", today_label), theme::dim()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(format!("Ramadhan {}", today), theme::gold()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::emerald())
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, subtitle_line, date_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
