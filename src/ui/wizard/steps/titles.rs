//! Title selection step

use crate::ui::wizard::WizardScreen;
use crate::workflow::WorkflowState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

impl WizardScreen {
    pub(crate) fn render_title_step(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &WorkflowState,
    ) {
        let block = Block::default()
            .title(" Step 3 of 5: Pick a Title ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Instructions
                Constraint::Min(3),    // Title list
            ])
            .split(inner);

        // Instructions
        let instructions = Paragraph::new(Line::from(vec![
            Span::raw("Titles drafted for "),
            Span::styled(
                format!("\"{}\"", state.selected_keyword),
                Style::default().fg(Color::Yellow),
            ),
        ]))
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(instructions, chunks[0]);

        // Title list
        let items: Vec<ListItem> = state
            .titles
            .iter()
            .map(|title| ListItem::new(Line::from(title.clone())))
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, chunks[1], &mut self.title_state);
    }
}
