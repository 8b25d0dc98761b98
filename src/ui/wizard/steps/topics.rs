//! Topic outline selection step

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
    pub(crate) fn render_topic_step(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &WorkflowState,
    ) {
        let block = Block::default()
            .title(" Step 4 of 5: Pick a Topic Outline ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Instructions
                Constraint::Min(3),    // Outline list
            ])
            .split(inner);

        // Instructions
        let instructions = Paragraph::new(Line::from(vec![
            Span::raw("Outlines proposed for "),
            Span::styled(
                format!("\"{}\"", state.selected_title),
                Style::default().fg(Color::Yellow),
            ),
        ]))
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(instructions, chunks[0]);

        // Outline list
        let items: Vec<ListItem> = state
            .topic_segments()
            .iter()
            .map(|segment| {
                let mut lines: Vec<Line> = Vec::new();
                for (i, text) in segment.lines().enumerate() {
                    if i == 0 {
                        lines.push(Line::from(Span::styled(
                            text.to_string(),
                            Style::default().add_modifier(Modifier::BOLD),
                        )));
                    } else {
                        lines.push(Line::from(vec![
                            Span::raw("   "),
                            Span::styled(text.to_string(), Style::default().fg(Color::DarkGray)),
                        ]));
                    }
                }
                lines.push(Line::from(""));
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, chunks[1], &mut self.topic_state);
    }
}
