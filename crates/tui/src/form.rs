//! Rendering for the terminal form: title, field list, overlays.
//!
//! Everything here is a pure function of the [`App`] state except the
//! scroll offset, which is adjusted during draw to keep the selected
//! field visible.

use argform_engine::WidgetKind;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{App, FieldState, FormRow, Overlay, StatusLevel};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(app.theme.text_style().bg(app.theme.bg_panel)),
        area,
    );

    let desc_height = u16::from(!app.description.is_empty());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(desc_height),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    if desc_height > 0 {
        render_description(frame, app, chunks[1]);
    }
    render_form(frame, app, chunks[2]);
    render_help_line(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);

    match app.overlay.clone() {
        Overlay::None => {}
        Overlay::Menu { selected } => render_menu(frame, app, selected, area),
        Overlay::Document {
            title,
            body,
            scroll,
        } => render_document(frame, app, &title, &body, scroll, area),
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let p = Paragraph::new(Span::styled(app.title.clone(), app.theme.title_style()));
    frame.render_widget(p, area);
}

fn render_description(frame: &mut Frame, app: &App, area: Rect) {
    let p = Paragraph::new(Span::styled(app.description.clone(), app.theme.text_muted()));
    frame.render_widget(p, area);
}

fn render_form(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(Span::styled("Parameters", app.theme.title_style()))
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(app.overlay == Overlay::None));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = (inner.height as usize).min(app.max_args_shown).max(1);
    adjust_scroll(app, visible);
    let scroll = app.scroll as usize;

    let lines: Vec<Line> = app
        .rows
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible)
        .map(|(idx, row)| row_line(app, idx, row))
        .collect();
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);

    set_field_cursor(frame, app, inner);
}

fn adjust_scroll(app: &mut App, visible: usize) {
    let selected = app.selected;
    if selected < app.scroll as usize {
        app.scroll = selected as u16;
    } else if selected >= app.scroll as usize + visible {
        app.scroll = (selected + 1 - visible) as u16;
    }
}

fn row_line<'a>(app: &App, idx: usize, row: &'a FormRow) -> Line<'a> {
    match row {
        FormRow::Section(name) => Line::from(Span::styled(name.clone(), app.theme.section_style())),
        FormRow::Field(field) => {
            let selected = idx == app.selected;
            let marker = if selected { "> " } else { "  " };
            let mut spans = vec![
                Span::styled(marker, app.theme.text_muted()),
                Span::styled(
                    field.label(),
                    if selected {
                        app.theme.title_style()
                    } else {
                        app.theme.text_style()
                    },
                ),
            ];
            if let Some(hint) = field_hint(field) {
                spans.push(Span::styled(format!(" {hint}"), app.theme.text_muted()));
            }
            spans.push(Span::styled(": ", app.theme.text_muted()));
            spans.push(Span::styled(field_value(field), app.theme.text_style()));
            let line = Line::from(spans);
            if selected {
                line.style(app.theme.highlight_style())
            } else {
                line
            }
        }
    }
}

/// Muted hint after the label: command tokens, choices, or file mode.
fn field_hint(field: &FieldState) -> Option<String> {
    if !field.item.commands.is_empty() {
        return Some(format!("({})", field.item.commands.join(", ")));
    }
    match field.widget() {
        WidgetKind::Dropdown => Some(format!("({})", field.item.props.choices.join("|"))),
        WidgetKind::FilePicker => {
            let mode = field.item.props.file_mode.as_deref().unwrap_or("r");
            Some(format!("(file, mode {mode})"))
        }
        _ => None,
    }
}

fn field_value(field: &FieldState) -> String {
    match field.widget() {
        WidgetKind::Flag => {
            if field.toggled {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            }
        }
        WidgetKind::Dropdown => field
            .choice_idx
            .and_then(|idx| field.item.props.choices.get(idx).cloned())
            .unwrap_or_else(|| "<choose>".to_string()),
        _ => field.value.clone(),
    }
}

/// Places the terminal cursor at the end of the selected text field.
fn set_field_cursor(frame: &mut Frame, app: &App, inner: Rect) {
    if app.overlay != Overlay::None {
        return;
    }
    let Some(field) = app.current_field() else {
        return;
    };
    if matches!(field.widget(), WidgetKind::Flag | WidgetKind::Dropdown) {
        return;
    }
    let row_offset = app.selected.saturating_sub(app.scroll as usize);
    if row_offset >= inner.height as usize {
        return;
    }

    let mut col = 2 + field.label().chars().count();
    if let Some(hint) = field_hint(field) {
        col += 1 + hint.chars().count();
    }
    col += 2 + field.value.chars().count();

    let x = inner.x.saturating_add(col as u16).min(inner.right().saturating_sub(1));
    let y = inner.y.saturating_add(row_offset as u16);
    frame.set_cursor_position((x, y));
}

fn render_help_line(frame: &mut Frame, app: &App, area: Rect) {
    let help = app
        .current_field()
        .map(|field| field.item.help.clone())
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Span::styled(help, app.theme.text_muted())),
        area,
    );
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let p = match &app.status {
        Some(status) => {
            let style = match status.level {
                StatusLevel::Info => app.theme.ok_style(),
                StatusLevel::Error => app.theme.warn_style(),
            };
            Paragraph::new(Span::styled(status.text.clone(), style))
        }
        None => {
            let mut hints = String::from("Tab move  Space toggle  \u{2190}/\u{2192} cycle  Enter run  Esc quit");
            if !app.menu.is_empty() {
                hints.push_str("  Ctrl+O menu");
            }
            Paragraph::new(Span::styled(hints, app.theme.text_muted()))
        }
    };
    frame.render_widget(p, area);
}

fn render_menu(frame: &mut Frame, app: &App, selected: usize, area: Rect) {
    let popup = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled("Menu", app.theme.title_style()))
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true))
        .style(app.theme.text_style().bg(app.theme.bg_panel));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines: Vec<Line> = app
        .menu
        .iter()
        .enumerate()
        .map(|(idx, (name, _))| {
            let line = Line::from(Span::styled(name.clone(), app.theme.text_style()));
            if idx == selected {
                line.style(app.theme.highlight_style())
            } else {
                line
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

fn render_document(frame: &mut Frame, app: &App, title: &str, body: &str, scroll: u16, area: Rect) {
    let popup = centered_rect(80, 80, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(title.to_string(), app.theme.title_style()))
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true))
        .style(app.theme.text_style().bg(app.theme.bg_panel));
    let p = Paragraph::new(body.to_string())
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(p, popup);
}

/// Centered popup area sized as a percentage of the parent.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
