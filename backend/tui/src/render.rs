//! TUI Rendering
//!
//! Translates `AppState` into Ratatui widgets: the chat history pane with
//! the in-progress cursor on the streaming entry, and the input pane.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use markdown::STREAM_CURSOR;
use skycast_core::Role;

use crate::app::AppState;

/// Main draw function.
pub fn draw_ui(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(3),    // Chat history
            Constraint::Length(3), // Input box
        ])
        .split(f.size());

    let mut lines: Vec<Line> = Vec::new();
    for message in &state.conversation.transcript {
        push_entry(&mut lines, message.role, &message.content);
        lines.push(Line::default());
    }
    if let Some(in_flight) = &state.in_flight {
        let streamed = format!("{}{}", in_flight.rendered, STREAM_CURSOR);
        push_entry(&mut lines, Role::Assistant, &streamed);
    }

    // Keep the newest lines in view.
    let history_height = chunks[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(history_height) as u16;

    let history = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().title("Weather Chat").borders(Borders::ALL));
    f.render_widget(history, chunks[0]);

    let input = Paragraph::new(state.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .title(state.status.as_str())
                .borders(Borders::ALL),
        );
    f.render_widget(input, chunks[1]);
}

fn push_entry(lines: &mut Vec<Line>, role: Role, content: &str) {
    let (prefix, style) = match role {
        Role::User => ("You: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Role::Assistant => ("SkyCast: ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
    };

    let mut content_lines = content.lines();
    let first = content_lines.next().unwrap_or("");
    lines.push(Line::from(vec![
        Span::styled(prefix, style),
        Span::raw(first.to_string()),
    ]));
    for rest in content_lines {
        lines.push(Line::from(rest.to_string()));
    }
}
