//! The four-stage content wizard.
//!
//! `WizardScreen` owns only presentation state (input buffer, list cursors,
//! scroll). Key presses translate into [`WizardCommand`] values; the app
//! routes them to the session controller, which owns the workflow itself.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListState, Paragraph},
    Frame,
};

use crate::api::PipelineError;
use crate::identity::Identity;
use crate::workflow::{WorkflowState, WorkflowStep};

pub mod steps;

#[cfg(test)]
mod tests;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Instruction produced by a wizard key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    None,
    SubmitSeed(String),
    ChooseKeyword(String),
    ChooseTitle(String),
    ChooseTopic(String),
    GoBack(WorkflowStep),
    Reset,
    CopyContent,
    ExportContent,
    SignOut,
    Quit,
}

pub struct WizardScreen {
    seed_input: super::input::TextInput,
    keyword_state: ListState,
    title_state: ListState,
    topic_state: ListState,
    /// Scroll offset for the result body
    result_scroll: u16,
    /// Advanced every tick while a stage call is outstanding
    spinner_frame: usize,
}

impl WizardScreen {
    pub fn new() -> Self {
        let mut keyword_state = ListState::default();
        keyword_state.select(Some(0));

        let mut title_state = ListState::default();
        title_state.select(Some(0));

        let mut topic_state = ListState::default();
        topic_state.select(Some(0));

        Self {
            seed_input: super::input::TextInput::new("e.g. digital marketing"),
            keyword_state,
            title_state,
            topic_state,
            result_scroll: 0,
            spinner_frame: 0,
        }
    }

    /// Clear presentation state for a fresh run
    pub fn reset_for_new_run(&mut self) {
        self.seed_input.clear();
        self.keyword_state.select(Some(0));
        self.title_state.select(Some(0));
        self.topic_state.select(Some(0));
        self.result_scroll = 0;
    }

    /// Advance the busy spinner
    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    /// Translate a key press into a command for the current step
    pub fn handle_key(&mut self, key: KeyCode, state: &WorkflowState) -> WizardCommand {
        if state.busy {
            // Only abandoning the run or leaving is allowed mid-flight
            return match key {
                KeyCode::Char('r') => WizardCommand::Reset,
                KeyCode::Char('q') => WizardCommand::Quit,
                _ => WizardCommand::None,
            };
        }

        // Esc walks one step back everywhere; on the first step it leaves
        if key == KeyCode::Esc {
            return match state.step.previous() {
                Some(prev) => WizardCommand::GoBack(prev),
                None => WizardCommand::Quit,
            };
        }

        match state.step {
            WorkflowStep::SeedInput => self.handle_seed_key(key),
            WorkflowStep::KeywordChoice => self.handle_keyword_key(key, state),
            WorkflowStep::TitleChoice => self.handle_title_key(key, state),
            WorkflowStep::TopicChoice => self.handle_topic_key(key, state),
            WorkflowStep::Result => self.handle_result_key(key),
        }
    }

    fn handle_seed_key(&mut self, key: KeyCode) -> WizardCommand {
        match key {
            KeyCode::Enter => WizardCommand::SubmitSeed(self.seed_input.value().to_string()),
            other => {
                self.seed_input.handle_key(other);
                WizardCommand::None
            }
        }
    }

    fn handle_keyword_key(&mut self, key: KeyCode, state: &WorkflowState) -> WizardCommand {
        let len = state.keywords.len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                select_prev(&mut self.keyword_state, len);
                WizardCommand::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                select_next(&mut self.keyword_state, len);
                WizardCommand::None
            }
            KeyCode::Enter => match selected_item(&self.keyword_state, &state.keywords) {
                Some(keyword) => WizardCommand::ChooseKeyword(keyword),
                None => WizardCommand::None,
            },
            other => Self::common_key(other),
        }
    }

    fn handle_title_key(&mut self, key: KeyCode, state: &WorkflowState) -> WizardCommand {
        let len = state.titles.len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                select_prev(&mut self.title_state, len);
                WizardCommand::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                select_next(&mut self.title_state, len);
                WizardCommand::None
            }
            KeyCode::Enter => match selected_item(&self.title_state, &state.titles) {
                Some(title) => WizardCommand::ChooseTitle(title),
                None => WizardCommand::None,
            },
            other => Self::common_key(other),
        }
    }

    fn handle_topic_key(&mut self, key: KeyCode, state: &WorkflowState) -> WizardCommand {
        let segments = state.topic_segments();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                select_prev(&mut self.topic_state, segments.len());
                WizardCommand::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                select_next(&mut self.topic_state, segments.len());
                WizardCommand::None
            }
            KeyCode::Enter => match selected_item(&self.topic_state, &segments) {
                Some(segment) => WizardCommand::ChooseTopic(segment),
                None => WizardCommand::None,
            },
            other => Self::common_key(other),
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) -> WizardCommand {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.result_scroll = self.result_scroll.saturating_sub(1);
                WizardCommand::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.result_scroll = self.result_scroll.saturating_add(1);
                WizardCommand::None
            }
            KeyCode::Char('c') => WizardCommand::CopyContent,
            KeyCode::Char('s') => WizardCommand::ExportContent,
            other => Self::common_key(other),
        }
    }

    fn common_key(key: KeyCode) -> WizardCommand {
        match key {
            KeyCode::Char('r') => WizardCommand::Reset,
            KeyCode::Char('q') => WizardCommand::Quit,
            KeyCode::Char('L') => WizardCommand::SignOut,
            _ => WizardCommand::None,
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        state: &WorkflowState,
        error: Option<&PipelineError>,
        notice: Option<&str>,
        identity: Option<&Identity>,
    ) {
        self.sync_selections(state);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header with step breadcrumb
                Constraint::Min(5),    // Step body
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], state, identity);

        match state.step {
            WorkflowStep::SeedInput => self.render_seed_step(frame, chunks[1], state),
            WorkflowStep::KeywordChoice => self.render_keyword_step(frame, chunks[1], state),
            WorkflowStep::TitleChoice => self.render_title_step(frame, chunks[1], state),
            WorkflowStep::TopicChoice => self.render_topic_step(frame, chunks[1], state),
            WorkflowStep::Result => self.render_result_step(frame, chunks[1], state),
        }

        self.render_status_line(frame, chunks[2], state, error, notice);
        render_footer(frame, chunks[3], state);
    }

    fn sync_selections(&mut self, state: &WorkflowState) {
        ensure_selection(&mut self.keyword_state, state.keywords.len());
        ensure_selection(&mut self.title_state, state.titles.len());
        ensure_selection(&mut self.topic_state, state.topic_segments().len());
    }

    fn render_header(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &WorkflowState,
        identity: Option<&Identity>,
    ) {
        let mut block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    "copyforge",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if let Some(identity) = identity {
            block = block.title(
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", identity.display_name),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw(" "),
                ])
                .right_aligned(),
            );
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut spans: Vec<Span> = vec![Span::raw(" ")];
        for (i, step) in WorkflowStep::all().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ›  ", Style::default().fg(Color::DarkGray)));
            }
            let style = if *step == state.step {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if *step < state.step {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(step.label(), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn render_status_line(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &WorkflowState,
        error: Option<&PipelineError>,
        notice: Option<&str>,
    ) {
        let line = if state.busy {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let label = state
                .step
                .pending_stage()
                .map_or("working", |stage| stage.label());
            Line::from(Span::styled(
                format!(" {spinner} {label} in progress"),
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(error) = error {
            Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Red),
            ))
        } else if let Some(notice) = notice {
            Line::from(Span::styled(
                format!(" {notice}"),
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Default for WizardScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &WorkflowState) {
    let hints: &[(&str, &str)] = if state.busy {
        &[("r", "restart"), ("q", "quit")]
    } else {
        match state.step {
            WorkflowStep::SeedInput => &[("Enter", "find keywords"), ("Esc", "quit")],
            WorkflowStep::KeywordChoice | WorkflowStep::TitleChoice | WorkflowStep::TopicChoice => &[
                ("↑↓", "select"),
                ("Enter", "confirm"),
                ("Esc", "back"),
                ("r", "restart"),
                ("L", "sign out"),
                ("q", "quit"),
            ],
            WorkflowStep::Result => &[
                ("↑↓", "scroll"),
                ("c", "copy"),
                ("s", "save"),
                ("Esc", "back"),
                ("r", "new run"),
                ("q", "quit"),
            ],
        }
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {action}")));
    }
    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
    frame.render_widget(footer, area);
}

fn selected_item(state: &ListState, items: &[String]) -> Option<String> {
    state.selected().and_then(|i| items.get(i)).cloned()
}

fn select_next(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let i = state.selected().map_or(0, |i| (i + 1) % len);
    state.select(Some(i));
}

fn select_prev(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let i = state
        .selected()
        .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
    state.select(Some(i));
}

/// Keep the cursor inside the list after its items are replaced
fn ensure_selection(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
    } else if state.selected().map_or(true, |i| i >= len) {
        state.select(Some(0));
    }
}
