//! Recording fakes for the notification, sound and store surfaces.

use crate::audio::Sound;
use crate::notify::{Notifier, NotifyKind, NotifyOptions, ToastPosition};
use crate::store::{TimerControls, TimerFields, TimerId};
use ratatui::{Terminal, backend::TestBackend};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Vec<(NotifyKind, String, ToastPosition)>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, kind: NotifyKind, message: &str, options: NotifyOptions) {
        self.sent.push((kind, message.to_string(), options.position));
    }
}

#[derive(Default)]
pub struct RecordingSound {
    pub plays: Cell<u32>,
}

impl Sound for RecordingSound {
    fn play(&self) {
        self.plays.set(self.plays.get() + 1);
    }
}

impl Sound for Rc<RecordingSound> {
    fn play(&self) {
        (**self).play();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Add(TimerFields),
    Toggle(TimerId),
    Restart(TimerId),
    Delete(TimerId),
    Update(TimerId, TimerFields),
}

#[derive(Default)]
pub struct RecordingControls {
    pub calls: Vec<Call>,
}

impl TimerControls for RecordingControls {
    fn add(&mut self, fields: TimerFields) -> TimerId {
        self.calls.push(Call::Add(fields));
        self.calls.len() as TimerId
    }

    fn toggle(&mut self, id: TimerId) {
        self.calls.push(Call::Toggle(id));
    }

    fn restart(&mut self, id: TimerId) {
        self.calls.push(Call::Restart(id));
    }

    fn delete(&mut self, id: TimerId) {
        self.calls.push(Call::Delete(id));
    }

    fn update(&mut self, id: TimerId, fields: TimerFields) {
        self.calls.push(Call::Update(id, fields));
    }
}

/// Everything drawn on a test terminal, one line per row.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer.get(x, y).symbol());
        }
        text.push('\n');
    }
    text
}
