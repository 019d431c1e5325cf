//! One timer card: what it shows, what its buttons do, and noticing when the
//! countdown hits zero.

use crate::audio::Sound;
use crate::form::TimerForm;
use crate::notify::{self, Notifier, NotifyKind, Viewport};
use crate::store::{Timer, TimerControls, TimerId};
use crate::theme::Theme;
use ratatui::{prelude::*, widgets::*};

/// Rows a card takes on screen, borders included.
pub const CARD_HEIGHT: u16 = 5;

/// `HH:MM:SS`, zero padded.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Share of the run still left, as a whole percent in `0..=100`.
pub fn progress_percent(remaining: u64, duration: u64) -> u16 {
    if duration == 0 {
        return 0;
    }
    let pct = (remaining as f64 / duration as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u16
}

pub fn completion_message(title: &str) -> String {
    format!("Timer \"{}\" has ended!", title)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    Active,
    JustCompleted,
    AlreadyNotified,
}

/// Watches successive `remaining_time` values and reports the one step where
/// a running timer reaches zero.
#[derive(Debug, Default)]
pub struct CompletionWatch {
    state: Option<CompletionState>,
    was_running: bool,
}

impl CompletionWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<CompletionState> {
        self.state
    }

    pub fn observe(&mut self, remaining: u64, is_running: bool) -> CompletionState {
        let next = if remaining > 0 {
            CompletionState::Active
        } else {
            match self.state {
                Some(CompletionState::Active) if self.was_running || is_running => {
                    CompletionState::JustCompleted
                }
                _ => CompletionState::AlreadyNotified,
            }
        };
        self.state = Some(next);
        self.was_running = is_running;
        next
    }

    /// Forgets the current run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Toggle,
    Restart,
    Delete,
    Edit,
}

#[derive(Debug)]
pub struct TimerItem {
    id: TimerId,
    watch: CompletionWatch,
}

impl TimerItem {
    pub fn new(id: TimerId) -> Self {
        Self {
            id,
            watch: CompletionWatch::new(),
        }
    }

    /// Feeds the latest timer state in. Plays the sound and raises the
    /// success toast on the step where the timer finishes.
    pub fn observe(
        &mut self,
        timer: &Timer,
        notifier: &mut dyn Notifier,
        sound: &dyn Sound,
        viewport: &dyn Viewport,
    ) -> CompletionState {
        let state = self.watch.observe(timer.remaining_time, timer.is_running);
        if state == CompletionState::JustCompleted {
            tracing::info!(id = timer.id, title = %timer.title, "timer completed");
            sound.play();
            notifier.notify(
                NotifyKind::Success,
                &completion_message(&timer.title),
                notify::options_for(viewport),
            );
        }
        state
    }

    /// Runs a card button. `Edit` hands back the pre-filled form instead of
    /// touching the store.
    pub fn handle_action(
        &mut self,
        action: TimerAction,
        timer: &Timer,
        controls: &mut dyn TimerControls,
    ) -> Option<TimerForm> {
        match action {
            TimerAction::Toggle => controls.toggle(self.id),
            TimerAction::Restart => {
                self.watch.reset();
                controls.restart(self.id);
            }
            TimerAction::Delete => {
                self.watch.reset();
                controls.delete(self.id);
            }
            TimerAction::Edit => return Some(TimerForm::edit(timer)),
        }
        None
    }
}

pub fn render_card(f: &mut Frame, area: Rect, timer: &Timer, theme: &Theme, selected: bool) {
    let (status, color) = if timer.remaining_time == 0 {
        ("✓ DONE", theme.finished_color)
    } else if timer.is_running {
        ("▶ RUNNING", theme.running_color)
    } else {
        ("⏸ PAUSED", theme.paused_color)
    };

    let border_style = if selected {
        Style::default().fg(theme.accent_color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_color)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ", timer.title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new(timer.description.as_str())
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)),
        rows[0],
    );

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format_time(timer.remaining_time), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(status, Style::default().fg(color)),
        ])),
        rows[1],
    );

    let pct = progress_percent(timer.remaining_time, timer.duration);
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .percent(pct)
            .label(format!("{}%", pct)),
        rows[2],
    );
}
