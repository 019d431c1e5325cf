use crate::app::AppState;
use crate::form::{FormField, TimerForm};
use crate::notify::{NotifyKind, ToastPosition};
use crate::theme::Theme;
use crate::timer_item::{CARD_HEIGHT, render_card};
use ratatui::{prelude::*, widgets::*};

// ============================================================================
// UI Rendering
// ============================================================================

pub fn render_ui(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(2)])
        .split(f.size());

    render_header(f, app, chunks[0]);
    render_board(f, app, chunks[1]);
    render_controls(f, app, chunks[2]);

    if app.show_help {
        render_help(f, app);
    }
    if app.confirm_delete {
        render_confirm_delete(f, app);
    }
    if let Some(form) = &app.form {
        render_form(f, form, &app.theme);
    }
    render_toasts(f, app);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let header = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border_color))
        .title(Span::styled(" ⏱ TIMERBOARD ", Style::default()
            .fg(app.theme.accent_color).add_modifier(Modifier::BOLD)));
    let inner = header.inner(area);
    f.render_widget(header, area);

    let pulse = if app.animation_frame < 10 { "●" } else { "○" };
    let summary = format!(
        " {} timers  •  {} {} running",
        app.store.len(),
        if app.store.running() > 0 { pulse } else { "○" },
        app.store.running()
    );
    f.render_widget(
        Paragraph::new(summary).style(Style::default().fg(Color::Gray)),
        inner,
    );

    let now = chrono::Local::now();
    f.render_widget(
        Paragraph::new(now.format("%a %d %b  %H:%M:%S ").to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        inner,
    );
}

fn render_board(f: &mut Frame, app: &AppState, area: Rect) {
    if app.store.is_empty() {
        let empty = vec![
            Line::from(""),
            Line::from(Span::styled("No timers yet!", Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                span_key("A", app),
                Span::raw(" to add one."),
            ]),
        ];
        f.render_widget(
            Paragraph::new(empty).alignment(Alignment::Center).style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let visible = (area.height / CARD_HEIGHT).max(1) as usize;
    let first = app.selected.saturating_sub(visible - 1);

    for (slot, (idx, timer)) in app.store.timers().iter().enumerate().skip(first).take(visible).enumerate() {
        let card = Rect {
            x: area.x,
            y: area.y + slot as u16 * CARD_HEIGHT,
            width: area.width,
            height: CARD_HEIGHT.min(area.height),
        };
        render_card(f, card.intersection(area), timer, &app.theme, idx == app.selected);
    }
}

fn render_controls(f: &mut Frame, app: &AppState, area: Rect) {
    let controls = vec![
        Line::from(vec![
            span_key("Space", app), Span::raw(" Start/Pause  •  "),
            span_key("R", app), Span::raw(" Restart  •  "),
            span_key("E", app), Span::raw(" Edit  •  "),
            span_key("D", app), Span::raw(" Delete"),
        ]),
        Line::from(vec![
            span_key("A", app), Span::raw(" Add  •  "),
            span_key("↑↓", app), Span::raw(" Select  •  "),
            span_key("T", app), Span::raw(" Theme  •  "),
            span_key("H", app), Span::raw(" Help  •  "),
            span_key("Q", app), Span::raw(" Quit"),
        ]),
    ];
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn span_key<'a>(text: &'a str, app: &AppState) -> Span<'a> {
    Span::styled(text, Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))
}

fn render_help(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.size());

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("⌨️  KEYBOARD SHORTCUTS", Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("  Timers:"),
        help_line("Space", "Start or pause the selected timer"),
        help_line("R", "Restart from the full duration"),
        help_line("E / Enter", "Edit title, description and duration"),
        help_line("D / Del", "Delete (asks first)"),
        help_line("A / N", "Add a new timer"),
        Line::from(""),
        Line::from("  Board:"),
        help_line("↑↓ / JK", "Move selection"),
        help_line("T / Shift+T", "Next / previous theme"),
        help_line("H / ?", "Toggle help"),
        Line::from(""),
        Line::from("  Form:"),
        help_line("Tab / Shift+Tab", "Next / previous field"),
        help_line("Enter", "Save"),
        help_line("Esc", "Cancel"),
        Line::from(""),
        Line::from("  General:"),
        help_line("Q / Esc", "Quit"),
        help_line("Ctrl+C", "Force quit"),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(help_text)
            .block(Block::default()
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_color))),
        area,
    );
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}", desc)),
    ])
}

fn render_confirm_delete(f: &mut Frame, app: &AppState) {
    let Some(timer) = app.selected_timer() else {
        return;
    };
    let area = centered_rect(50, 30, f.size());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("⚠️  DELETE TIMER?", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(timer.title.as_str(), Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(Span::styled("Y: Confirm  •  N/Esc: Cancel", Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red))),
        area,
    );
}

fn render_form(f: &mut Frame, form: &TimerForm, theme: &Theme) {
    let area = centered_rect(60, 80, f.size());

    let mut lines = vec![
        Line::from(Span::styled(
            "  Tab: Next field  •  Enter: Save  •  Esc: Cancel",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    for field in FormField::ALL {
        let focused = form.field() == field;
        let (prefix, label_style) = if focused {
            ("  > ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("    ", Style::default().fg(Color::Gray))
        };

        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(prefix, label_style), Span::styled(field.label(), label_style)]));

        let mut value = vec![
            Span::raw("    "),
            Span::styled(form.value(field), if focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            }),
        ];
        if focused {
            value.push(Span::styled("█", Style::default().fg(Color::Green)));
        }
        lines.push(Line::from(value));
    }

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default()
                .title(Span::styled(format!(" {} ", form.heading()), Style::default()
                    .fg(theme.accent_color).add_modifier(Modifier::BOLD)))
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border_color))),
        area,
    );
}

fn render_toasts(f: &mut Frame, app: &AppState) {
    let screen = f.size();
    let (mut top, mut bottom) = (0u16, 0u16);

    for toast in app.toasts.toasts() {
        let width = (toast.message.chars().count() as u16 + 4).min(screen.width);
        let height = 3;
        let area = match toast.position {
            ToastPosition::TopRight => {
                let area = Rect::new(screen.width.saturating_sub(width), screen.y + top, width, height);
                top += height;
                area
            }
            ToastPosition::BottomCenter => {
                bottom += height;
                Rect::new(screen.width.saturating_sub(width) / 2, screen.height.saturating_sub(bottom), width, height)
            }
        };
        let area = area.intersection(screen);
        if area.height == 0 {
            continue;
        }

        let color = match toast.kind {
            NotifyKind::Error => Color::Red,
            NotifyKind::Success => app.theme.finished_color,
        };
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(toast.message.as_str())
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))),
            area,
        );
    }
}

fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}
