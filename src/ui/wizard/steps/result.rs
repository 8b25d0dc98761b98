//! Generated content review step

use crate::ui::wizard::WizardScreen;
use crate::workflow::WorkflowState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

impl WizardScreen {
    pub(crate) fn render_result_step(&self, frame: &mut Frame, area: Rect, state: &WorkflowState) {
        let block = Block::default()
            .title(" Step 5 of 5: Generated Content ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let factor_rows = state.seo_factors.len().min(5) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),           // Title and keyword
                Constraint::Length(2),           // Score summary
                Constraint::Min(4),              // Draft body
                Constraint::Length(factor_rows), // Ranking factors
            ])
            .split(inner);

        // Title and keyword
        let heading = Paragraph::new(vec![
            Line::from(Span::styled(
                state.selected_title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Keyword: {}", state.selected_keyword),
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        frame.render_widget(heading, chunks[0]);

        // Score summary
        if let Some(score) = &state.seo_score {
            let color = if score.percentage >= 80 {
                Color::Green
            } else if score.percentage >= 50 {
                Color::Yellow
            } else {
                Color::Red
            };
            let summary = Paragraph::new(Line::from(vec![
                Span::styled(score.score_bar(20), Style::default().fg(color)),
                Span::raw("  "),
                Span::styled(score.summary(), Style::default().fg(color)),
            ]));
            frame.render_widget(summary, chunks[1]);
        }

        // Draft body
        let draft = Paragraph::new(state.content.clone())
            .wrap(Wrap { trim: false })
            .scroll((self.result_scroll, 0))
            .block(
                Block::default()
                    .title(" Draft ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(draft, chunks[2]);

        // Ranking factors
        let factors: Vec<Line> = state
            .seo_factors
            .iter()
            .take(usize::from(factor_rows))
            .map(|factor| {
                Line::from(Span::styled(
                    format!("• {factor}"),
                    Style::default().fg(Color::DarkGray),
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(factors), chunks[3]);
    }
}
