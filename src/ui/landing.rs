//! Sign-in screen shown while no identity is present.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use super::input::TextInput;

/// Outcome of a landing-screen key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingAction {
    None,
    /// Establish an identity for this display name
    SignIn(String),
    Quit,
}

/// Identity gate in front of the wizard
pub struct LandingScreen {
    pub name_input: TextInput,
}

impl LandingScreen {
    pub fn new() -> Self {
        Self {
            name_input: TextInput::new("your display name"),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> LandingAction {
        match key {
            KeyCode::Enter => {
                if self.name_input.is_blank() {
                    LandingAction::None
                } else {
                    LandingAction::SignIn(self.name_input.value().trim().to_string())
                }
            }
            KeyCode::Esc => LandingAction::Quit,
            other => {
                self.name_input.handle_key(other);
                LandingAction::None
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, notice: Option<&str>) {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    "copyforge",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Sign In "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(2), // Description
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Input label
                Constraint::Length(1), // Input
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Notice
                Constraint::Min(0),
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let desc = Paragraph::new(vec![Line::from(
            "Sign in to start generating SEO content.",
        )])
        .alignment(Alignment::Center);
        frame.render_widget(desc, chunks[0]);

        let label = Paragraph::new(Line::from(Span::styled(
            "Display name:",
            Style::default().fg(Color::Yellow),
        )));
        frame.render_widget(label, chunks[2]);

        self.name_input.render(frame, chunks[3], true);

        if let Some(notice) = notice {
            let line = Paragraph::new(Line::from(Span::styled(
                notice,
                Style::default().fg(Color::Red),
            )));
            frame.render_widget(line, chunks[5]);
        }

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" sign in  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[7]);
    }
}

impl Default for LandingScreen {
    fn default() -> Self {
        Self::new()
    }
}
