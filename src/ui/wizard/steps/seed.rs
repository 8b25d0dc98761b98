//! Seed keyword entry step

use crate::ui::wizard::WizardScreen;
use crate::workflow::WorkflowState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

impl WizardScreen {
    pub(crate) fn render_seed_step(&self, frame: &mut Frame, area: Rect, _state: &WorkflowState) {
        let block = Block::default()
            .title(" Step 1 of 5: Seed Keyword ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(2), // Prompt
                Constraint::Length(1), // Input
                Constraint::Length(1), // Spacer
                Constraint::Length(2), // Hint
                Constraint::Min(0),
            ])
            .split(inner);

        // Prompt
        let prompt = Paragraph::new(vec![Line::from(
            "Enter the seed keyword to build this article around.",
        )]);
        frame.render_widget(prompt, chunks[0]);

        // Input
        self.seed_input.render(frame, chunks[1], true);

        // Hint
        let hint = Paragraph::new(vec![Line::from(
            "The wizard suggests keywords, titles, and topic outlines before drafting.",
        )])
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, chunks[3]);
    }
}
