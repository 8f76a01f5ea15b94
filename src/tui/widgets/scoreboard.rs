use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::config::settings::ParticipantsConfig;
use crate::models::{Leader, Participant, TrackerState, TARGET_SCORE};
use crate::tui::theme;
use crate::utils::format::{progress_bar, score_fraction};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &TrackerState,
    names: &ParticipantsConfig,
    selected: Participant,
) {
    let block = Block::default()
        .title(Span::styled(" Skor ", theme::gold().add_modifier(Modifier::BOLD)))
        .title(
            Line::from(Span::styled(format!(" Target: {} ", TARGET_SCORE), theme::dim()))
                .alignment(Alignment::Right),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let leader = state.leader();
    for (who, column) in Participant::ALL.into_iter().zip(columns.iter()) {
        let p = state.participant(who);
        let accent = theme::participant(who);
        let leading = leader == Leader::Ahead(who);

        let crown = if leading { "♛ " } else { "  " };
        let name_style = if who == selected {
            accent.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            accent.add_modifier(Modifier::BOLD)
        };
        let score_style = if leading {
            accent.add_modifier(Modifier::BOLD)
        } else {
            theme::dim()
        };
        let (zakat_mark, zakat_style) = if p.zakat_paid() {
            ("✓ Zakat", accent)
        } else {
            ("○ Zakat", theme::dim())
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(crown, theme::gold()),
                Span::styled(names.name(who).to_uppercase(), name_style),
            ]),
            Line::from(Span::styled(score_fraction(p.score(), TARGET_SCORE), score_style)),
            Line::from(Span::styled(progress_bar(p.score(), TARGET_SCORE, 14), accent)),
            Line::from(Span::styled(zakat_mark, zakat_style)),
        ];

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, *column);
    }
}
