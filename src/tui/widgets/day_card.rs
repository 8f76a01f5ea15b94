use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::config::settings::ParticipantsConfig;
use crate::models::{eligible_tasks, Participant, TrackerState};
use crate::tui::theme;
use crate::utils::calendar::{date_label_for_day_index, ANCHOR_DATE};
use crate::utils::format::check_mark;

pub struct Focus {
    pub day: u8,
    pub participant: Participant,
    pub task_idx: usize,
}

/// Detail card for one day: a row per eligible task, one column per participant.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &TrackerState,
    names: &ParticipantsConfig,
    focus: &Focus,
    is_today: bool,
) {
    let title = format!(
        " Ramadhan {}  ·  {} ",
        focus.day,
        date_label_for_day_index(ANCHOR_DATE, focus.day)
    );
    let block = Block::default()
        .title(Span::styled(title, theme::gold().add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if is_today { theme::emerald() } else { theme::border() })
        .style(theme::surface());

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {:<12}", names.a_name), theme::participant(Participant::ParticipantA)),
            Span::styled(format!("{:^12}", "Misi"), theme::dim()),
            Span::styled(format!("{:>12}", names.b_name), theme::participant(Participant::ParticipantB)),
        ]),
        Line::from(""),
    ];

    for (idx, task) in eligible_tasks(focus.day).into_iter().enumerate() {
        let row_focused = idx == focus.task_idx;
        let cell = |who: Participant| {
            let done = state.participant(who).day(focus.day).get(task);
            let mut style = if done { theme::participant(who) } else { theme::dim() };
            if row_focused && who == focus.participant {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            Span::styled(format!(" {} ", check_mark(done)), style)
        };

        let label_style = if row_focused { theme::bold() } else { theme::dim() };
        lines.push(Line::from(vec![
            Span::raw("  "),
            cell(Participant::ParticipantA),
            Span::raw("         "),
            Span::styled(format!("{:^12}", task.label()), label_style),
            Span::raw("         "),
            cell(Participant::ParticipantB),
        ]));
    }

    lines.push(Line::from(""));
    for who in Participant::ALL {
        if state.participant(who).is_day_complete(focus.day) {
            lines.push(Line::from(Span::styled(
                format!("  ✓ {} menyelesaikan semua misi", names.name(who)),
                theme::participant(who),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
