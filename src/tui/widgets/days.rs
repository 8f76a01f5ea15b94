use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::period::all_days;
use crate::models::{Participant, TrackerState};
use crate::tui::theme;
use crate::utils::calendar::{date_label_for_day_index, ANCHOR_DATE};
use crate::utils::format::check_mark;

/// The 30-day list. Today is tinted, complete days get a filled dot per participant.
pub fn render(frame: &mut Frame, area: Rect, state: &TrackerState, selected_day: u8, today: u8) {
    let block = Block::default()
        .title(Span::styled(" Hari ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let items: Vec<ListItem> = all_days()
        .map(|day| {
            let mut spans = vec![
                Span::styled(format!(" Ramadhan {:>2}  ", day), theme::bold()),
                Span::styled(format!("{:<12}", date_label_for_day_index(ANCHOR_DATE, day)), theme::dim()),
            ];
            for who in Participant::ALL {
                let complete = state.participant(who).is_day_complete(day);
                let style = if complete { theme::participant(who) } else { theme::dim() };
                spans.push(Span::styled(format!(" {}", check_mark(complete)), style));
            }
            if day == today {
                spans.push(Span::styled("  hari ini", theme::gold()));
            }

            let item = ListItem::new(Line::from(spans));
            if day == today {
                item.style(Style::default().bg(theme::TODAY))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::gold().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol("▶");

    let mut list_state = ListState::default().with_selected(Some(usize::from(selected_day - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}
