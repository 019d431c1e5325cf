//! The timer collection and the one-second countdown.
//!
//! Everything that changes a timer goes through [`TimerControls`] by id; the
//! rest of the app only ever reads [`Timer`]s.

use crate::config::{load_json_or_backup, save_json};
use crate::validation::TimerFormData;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub type TimerId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    pub title: String,
    pub description: String,
    /// Total length of a run, in seconds.
    pub duration: u64,
    pub remaining_time: u64,
    pub is_running: bool,
}

/// The editable part of a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFields {
    pub title: String,
    pub description: String,
    pub duration: u64,
}

impl TimerFields {
    /// Builds fields from an already validated form.
    pub fn from_form(form: &TimerFormData) -> Self {
        Self {
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            duration: form.total_seconds().max(0) as u64,
        }
    }
}

pub trait TimerControls {
    fn add(&mut self, fields: TimerFields) -> TimerId;
    fn toggle(&mut self, id: TimerId);
    fn restart(&mut self, id: TimerId);
    fn delete(&mut self, id: TimerId);
    fn update(&mut self, id: TimerId, fields: TimerFields);
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TimerStore {
    timers: Vec<Timer>,
    next_id: TimerId,
}

impl TimerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot, falling back to an empty store. A snapshot that
    /// doesn't parse is kept as `timers.json.bak`.
    pub fn load(path: &Path) -> Self {
        let mut store: Self = load_json_or_backup(path);
        store.normalize();
        tracing::info!(timers = store.timers.len(), path = %path.display(), "loaded timers");
        store
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(path, self)
    }

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn get(&self, id: TimerId) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn running(&self) -> usize {
        self.timers.iter().filter(|t| t.is_running).count()
    }

    /// Advances every running timer by one second. Returns how many moved.
    pub fn tick(&mut self) -> usize {
        let mut advanced = 0;
        for timer in self.timers.iter_mut().filter(|t| t.is_running) {
            timer.remaining_time = timer.remaining_time.saturating_sub(1);
            if timer.remaining_time == 0 {
                timer.is_running = false;
                tracing::info!(id = timer.id, title = %timer.title, "timer reached zero");
            }
            advanced += 1;
        }
        advanced
    }

    fn get_mut(&mut self, id: TimerId) -> Option<&mut Timer> {
        let found = self.timers.iter_mut().find(|t| t.id == id);
        if found.is_none() {
            tracing::debug!(id, "no timer with this id");
        }
        found
    }

    // Snapshots are hand-editable, so repair anything that breaks the
    // remaining <= duration invariant or would reuse an id.
    fn normalize(&mut self) {
        for timer in &mut self.timers {
            timer.remaining_time = timer.remaining_time.min(timer.duration);
            if timer.remaining_time == 0 {
                timer.is_running = false;
            }
        }
        let max_id = self.timers.iter().map(|t| t.id).max().unwrap_or(0);
        if !self.timers.is_empty() && self.next_id <= max_id {
            self.next_id = max_id + 1;
        }
    }
}

impl TimerControls for TimerStore {
    fn add(&mut self, fields: TimerFields) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        tracing::info!(id, title = %fields.title, duration = fields.duration, "timer added");
        self.timers.push(Timer {
            id,
            title: fields.title,
            description: fields.description,
            duration: fields.duration,
            remaining_time: fields.duration,
            is_running: false,
        });
        id
    }

    fn toggle(&mut self, id: TimerId) {
        if let Some(timer) = self.get_mut(id) {
            if timer.remaining_time == 0 {
                return;
            }
            timer.is_running = !timer.is_running;
            tracing::debug!(id, running = timer.is_running, "timer toggled");
        }
    }

    fn restart(&mut self, id: TimerId) {
        if let Some(timer) = self.get_mut(id) {
            timer.remaining_time = timer.duration;
            timer.is_running = true;
            tracing::debug!(id, "timer restarted");
        }
    }

    fn delete(&mut self, id: TimerId) {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        if self.timers.len() != before {
            tracing::info!(id, "timer deleted");
        }
    }

    fn update(&mut self, id: TimerId, fields: TimerFields) {
        if let Some(timer) = self.get_mut(id) {
            timer.title = fields.title;
            timer.description = fields.description;
            timer.duration = fields.duration;
            timer.remaining_time = fields.duration;
            timer.is_running = false;
            tracing::info!(id, duration = timer.duration, "timer updated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, duration: u64) -> TimerFields {
        TimerFields {
            title: title.into(),
            description: String::new(),
            duration,
        }
    }

    #[test]
    fn added_timers_start_stopped_and_full() {
        let mut store = TimerStore::new();
        let a = store.add(fields("Tea", 180));
        let b = store.add(fields("Pasta", 600));

        assert_ne!(a, b);
        let tea = store.get(a).unwrap();
        assert_eq!(tea.remaining_time, 180);
        assert!(!tea.is_running);
    }

    #[test]
    fn tick_only_moves_running_timers() {
        let mut store = TimerStore::new();
        let a = store.add(fields("A", 10));
        let b = store.add(fields("B", 10));
        store.toggle(a);

        assert_eq!(store.tick(), 1);
        assert_eq!(store.get(a).unwrap().remaining_time, 9);
        assert_eq!(store.get(b).unwrap().remaining_time, 10);
    }

    #[test]
    fn timer_stops_at_zero() {
        let mut store = TimerStore::new();
        let id = store.add(fields("A", 2));
        store.toggle(id);
        store.tick();
        store.tick();
        store.tick();

        let timer = store.get(id).unwrap();
        assert_eq!(timer.remaining_time, 0);
        assert!(!timer.is_running);
    }

    #[test]
    fn finished_timer_cannot_be_toggled_on() {
        let mut store = TimerStore::new();
        let id = store.add(fields("A", 1));
        store.toggle(id);
        store.tick();
        store.toggle(id);
        assert!(!store.get(id).unwrap().is_running);
    }

    #[test]
    fn restart_refills_and_runs() {
        let mut store = TimerStore::new();
        let id = store.add(fields("A", 5));
        store.toggle(id);
        store.tick();
        store.toggle(id);
        store.restart(id);

        let timer = store.get(id).unwrap();
        assert_eq!(timer.remaining_time, 5);
        assert!(timer.is_running);
    }

    #[test]
    fn update_replaces_fields_and_resets() {
        let mut store = TimerStore::new();
        let id = store.add(fields("A", 5));
        store.toggle(id);
        store.tick();
        store.update(id, fields("B", 60));

        let timer = store.get(id).unwrap();
        assert_eq!(timer.title, "B");
        assert_eq!(timer.duration, 60);
        assert_eq!(timer.remaining_time, 60);
        assert!(!timer.is_running);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = TimerStore::new();
        store.add(fields("A", 5));
        store.toggle(42);
        store.restart(42);
        store.delete(42);
        store.update(42, fields("B", 1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.running(), 0);
    }

    #[test]
    fn snapshot_round_trip_keeps_ids_unique() {
        let path = std::env::temp_dir().join(format!("timerboard-store-{}.json", std::process::id()));
        let mut store = TimerStore::new();
        store.add(fields("A", 5));
        let b = store.add(fields("B", 7));
        store.save(&path).unwrap();

        let mut loaded = TimerStore::load(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.timers(), store.timers());
        let c = loaded.add(fields("C", 9));
        assert!(c > b);
    }

    #[test]
    fn normalize_repairs_hand_edited_snapshot() {
        let mut store: TimerStore = serde_json::from_str(
            r#"{"timers":[{"id":4,"title":"X","description":"","duration":10,"remaining_time":99,"is_running":true},
                          {"id":5,"title":"Y","description":"","duration":10,"remaining_time":0,"is_running":true}],
                "next_id":0}"#,
        )
        .unwrap();
        store.normalize();

        assert_eq!(store.get(4).unwrap().remaining_time, 10);
        assert!(!store.get(5).unwrap().is_running);
        assert_eq!(store.add(fields("Z", 1)), 6);
    }

    #[test]
    fn missing_snapshot_loads_empty() {
        let path = std::env::temp_dir().join("timerboard-does-not-exist.json");
        assert!(TimerStore::load(&path).is_empty());
    }

    #[test]
    fn unreadable_snapshot_is_backed_up_before_saving() {
        let path = std::env::temp_dir().join(format!("timerboard-broken-{}.json", std::process::id()));
        let backup = crate::config::backup_path(&path);
        let _ = std::fs::remove_file(&backup);
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = TimerStore::load(&path);
        assert!(store.is_empty());
        assert!(!path.exists());

        store.add(fields("Fresh", 60));
        store.save(&path).unwrap();
        let kept = std::fs::read_to_string(&backup).unwrap();
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&backup);

        assert_eq!(kept, "{ not json");
        assert!(backup.to_string_lossy().ends_with(".json.bak"));
    }
}
