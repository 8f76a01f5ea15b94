use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::AppConfig;
use crate::models::{eligible_tasks, Action, Participant, TaskFlag, PERIOD_DAYS};
use crate::session::Session;
use crate::tui::events::{Event, EventSource};
use crate::tui::theme;
use crate::tui::widgets::day_card::{self, Focus};
use crate::tui::widgets::{days, header, scoreboard, statusbar};
use crate::utils::calendar::{current_day_index, today_label};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Help,
}

pub struct App {
    pub session: Session,
    pub config: AppConfig,
    pub view: View,
    pub should_quit: bool,

    pub today: u8,
    pub today_label: String,
    pub selected_day: u8,
    pub selected_participant: Participant,
    /// Index into the eligible tasks of `selected_day`.
    pub task_idx: usize,
    /// Last save failure, shown in the status bar until the next good save.
    pub status: Option<String>,
}

impl App {
    pub fn new(session: Session, config: AppConfig) -> Self {
        let today = current_day_index();
        App {
            session,
            config,
            view: View::Dashboard,
            should_quit: false,
            today,
            today_label: today_label(),
            selected_day: today,
            selected_participant: Participant::ParticipantA,
            task_idx: 0,
            status: None,
        }
    }

    /// Re-reads the clock so the today marker moves at midnight.
    pub fn tick(&mut self) {
        self.today = current_day_index();
        self.today_label = today_label();
    }

    pub fn focused_task(&self) -> Option<TaskFlag> {
        eligible_tasks(self.selected_day).get(self.task_idx).copied()
    }

    pub fn select_day(&mut self, day: u8) {
        self.selected_day = day.clamp(1, PERIOD_DAYS);
        let available = eligible_tasks(self.selected_day).len();
        if self.task_idx >= available {
            self.task_idx = available - 1;
        }
    }

    fn select_task(&mut self, idx: usize) {
        if idx < eligible_tasks(self.selected_day).len() {
            self.task_idx = idx;
        }
    }

    fn cycle_task(&mut self, forward: bool) {
        let available = eligible_tasks(self.selected_day).len();
        self.task_idx = if forward {
            (self.task_idx + 1) % available
        } else {
            (self.task_idx + available - 1) % available
        };
    }

    fn apply(&mut self, action: Action) {
        match self.session.apply(action) {
            Ok(_) => self.status = None,
            Err(e) => {
                log::error!("Failed to save tracker state: {}", e);
                self.status = Some(format!("Could not save: {}", e));
            }
        }
    }

    fn toggle_focused_task(&mut self) {
        // Only eligible tasks are ever focused, so decree night stays out of
        // reach before day 21.
        if let Some(task) = self.focused_task() {
            self.apply(Action::ToggleTask {
                participant: self.selected_participant,
                day: self.selected_day,
                task,
            });
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Some terminals also report release and repeat events.
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Help => self.handle_help_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_day > 1 {
                    self.select_day(self.selected_day - 1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_day(self.selected_day.saturating_add(1));
            }
            KeyCode::Home => self.select_day(1),
            KeyCode::End => self.select_day(PERIOD_DAYS),
            KeyCode::Char('t') => self.select_day(self.today),
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_participant = Participant::ParticipantA;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected_participant = Participant::ParticipantB;
            }
            KeyCode::Tab => self.cycle_task(true),
            KeyCode::BackTab => self.cycle_task(false),
            KeyCode::Char(c @ '1'..='4') => {
                self.select_task(usize::from(c as u8 - b'1'));
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_focused_task(),
            KeyCode::Char('z') => {
                self.apply(Action::ToggleZakat {
                    participant: self.selected_participant,
                });
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                self.view = View::Dashboard;
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_dashboard(frame);
        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Length(6), // scoreboard
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let state = self.session.state();
        let names = &self.config.participants;

        header::render(frame, outer_chunks[0], names, self.today, &self.today_label);
        scoreboard::render(frame, outer_chunks[1], state, names, self.selected_participant);
        statusbar::render(frame, outer_chunks[3], self.status.as_deref());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer_chunks[2]);

        days::render(frame, columns[0], state, self.selected_day, self.today);

        let focus = Focus {
            day: self.selected_day,
            participant: self.selected_participant,
            task_idx: self.task_idx,
        };
        day_card::render(
            frame,
            columns[1],
            state,
            names,
            &focus,
            self.selected_day == self.today,
        );
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered(frame.area(), 50, 60);
        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[↑ ↓] / [j k]", "Previous / next day"),
            ("[Home] [End]", "First / last day"),
            ("[t]", "Jump to today"),
            ("[← →] / [h l]", "Select participant"),
            ("[Tab] / [1-4]", "Select task"),
            ("[Space] / Enter", "Toggle task"),
            ("[z]", "Toggle zakat"),
            ("[?]", "Toggle help"),
            ("[Esc]", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (keys, action) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<17}", keys), theme::gold()),
                Span::styled(action, theme::dim()),
            ]));
        }
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "  L. Qodar opens on Ramadhan 21",
            theme::dim(),
        )));

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Run the TUI event loop.
pub fn run(session: Session, config: AppConfig) -> Result<()> {
    let mut events = EventSource::new(config.display.tick_rate_ms);
    let mut app = App::new(session, config);

    let mut terminal = ratatui::init();
    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                Event::Resize => {}
                Event::Tick => app.tick(),
            }
        }
    })();

    ratatui::restore();
    result
}
