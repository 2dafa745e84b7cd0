use tuirealm::ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, Mode};
use crate::notification::Severity;

pub fn render(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let canvas = Block::default().style(Style::default().bg(app.theme.base.canvas));
    frame.render_widget(canvas, frame.area());

    render_header(frame, chunks[0], app);
    render_input(frame, chunks[1], app);
    render_list(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let header = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.base.border))
        .title(" taskpad ")
        .title_style(Style::default().fg(app.theme.base.header))
        .title_alignment(Alignment::Left);

    let done = app.store.tasks().iter().filter(|t| t.done).count();
    let summary = format!(
        " {}/{} done - theme: {} ",
        done,
        app.store.tasks().len(),
        app.theme_mode.as_str()
    );
    let header_right = Block::default()
        .title(summary)
        .title_style(Style::default().fg(app.theme.base.text_muted))
        .title_alignment(Alignment::Right);

    frame.render_widget(header, area);
    frame.render_widget(header_right, area);
}

fn render_input(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let adding = app.mode == Mode::Adding;
    let border_type = if adding {
        BorderType::Double
    } else {
        BorderType::Plain
    };
    let border_color = if adding {
        app.theme.base.accent
    } else {
        app.theme.base.border
    };

    let content: Line<'_> = if adding {
        Line::from(vec![
            Span::styled(app.input.clone(), Style::default().fg(app.theme.base.text)),
            Span::styled("█", Style::default().fg(app.theme.base.accent)),
        ])
    } else {
        Line::from(Span::styled(
            "Add a new task...",
            Style::default().fg(app.theme.base.text_muted),
        ))
    };

    let input = Paragraph::new(content)
        .style(Style::default().bg(app.theme.base.input_bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(Style::default().fg(border_color))
                .title(" New task "),
        );
    frame.render_widget(input, area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.base.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.store.tasks().is_empty() {
        let empty = Paragraph::new("No tasks yet. Press 'a' to add one.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.base.text_muted));
        frame.render_widget(empty, inner);
        return;
    }

    let truncate_width = usize::from(app.settings.display_truncate_width);
    let items: Vec<ListItem<'_>> = app
        .store
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let selected = index == app.selected;

            if app.mode == (Mode::Editing { index }) {
                let line = Line::from(vec![
                    Span::styled("edit> ", Style::default().fg(app.theme.base.accent)),
                    Span::styled(
                        app.edit_buffer.clone(),
                        Style::default().fg(app.theme.base.text),
                    ),
                    Span::styled("█", Style::default().fg(app.theme.base.accent)),
                ]);
                return ListItem::new(line)
                    .style(Style::default().bg(app.theme.base.selected_bg));
            }

            let checkbox = if task.done { "[x] " } else { "[ ] " };
            let mut text_style = Style::default().fg(app.theme.base.text);
            if task.done {
                text_style = Style::default()
                    .fg(app.theme.base.text_muted)
                    .add_modifier(Modifier::CROSSED_OUT);
            }

            let line = Line::from(vec![
                Span::styled(checkbox, Style::default().fg(app.theme.base.accent)),
                Span::styled(truncate_for_display(&task.text, truncate_width), text_style),
            ]);

            let mut item = ListItem::new(line);
            if selected {
                item = item.style(Style::default().bg(app.theme.base.selected_bg));
            }
            item
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let (text, color) = match app.notification.as_ref() {
        Some(notification) => (
            format!(" {} ", notification.message),
            severity_color(app, notification.severity),
        ),
        None => (
            footer_hints(app.mode).to_string(),
            app.theme.base.text_muted,
        ),
    };

    let footer = Block::default()
        .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.base.border))
        .title(text)
        .title_style(Style::default().fg(color))
        .title_alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn severity_color(app: &App, severity: Severity) -> Color {
    match severity {
        Severity::Success => app.theme.severity.success,
        Severity::Error => app.theme.severity.error,
        Severity::Warning => app.theme.severity.warning,
        Severity::Info => app.theme.severity.info,
    }
}

fn footer_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::List => {
            " a: add  e: edit  Space: toggle  d: delete  j/k: move  t: theme  q: quit "
        }
        Mode::Adding => " Enter: add task  Esc: back ",
        Mode::Editing { .. } => " Enter: save  Esc: cancel ",
    }
}

/// Display truncation only; the stored text keeps its full length.
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_for_display("Buy milk", 30), "Buy milk");
    }

    #[test]
    fn test_truncate_exact_width_unchanged() {
        let text = "x".repeat(30);
        assert_eq!(truncate_for_display(&text, 30), text);
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "a".repeat(35);
        let truncated = truncate_for_display(&text, 30);
        assert_eq!(truncated.len(), 33);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "ä".repeat(31);
        let truncated = truncate_for_display(&text, 30);
        assert_eq!(truncated.chars().count(), 33);
    }

    #[test]
    fn test_footer_hints_per_mode() {
        assert!(footer_hints(Mode::List).contains("a: add"));
        assert!(footer_hints(Mode::Adding).contains("Esc"));
        assert!(footer_hints(Mode::Editing { index: 0 }).contains("save"));
    }
}
