use crate::audio::Sound;
use crate::config::{Config, save_json};
use crate::form::TimerForm;
use crate::notify::{ToastQueue, Viewport};
use crate::store::{Timer, TimerId, TimerStore};
use crate::theme::{self, Theme, get_theme};
use crate::timer_item::{TimerAction, TimerItem};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const TICK_RATE: Duration = Duration::from_millis(50);
const SECOND: Duration = Duration::from_secs(1);
const AUTO_SAVE_INTERVAL: Duration = Duration::from_secs(5);

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub config: Config,
    pub theme: Theme,
    pub store: TimerStore,
    items: HashMap<TimerId, TimerItem>,
    pub selected: usize,
    pub form: Option<TimerForm>,
    pub confirm_delete: bool,
    pub show_help: bool,
    pub toasts: ToastQueue,
    pub animation_frame: u8,
    sound: Box<dyn Sound>,
    viewport: Box<dyn Viewport>,
    snapshot_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    needs_save: bool,
    last_save: Instant,
    last_second: Instant,
}

impl AppState {
    pub fn new(config: Config, store: TimerStore, sound: Box<dyn Sound>, viewport: Box<dyn Viewport>) -> Self {
        let mut app = Self {
            theme: get_theme(&config.theme),
            toasts: ToastQueue::new(config.desktop_notifications),
            config,
            store,
            items: HashMap::new(),
            selected: 0,
            form: None,
            confirm_delete: false,
            show_help: false,
            animation_frame: 0,
            sound,
            viewport,
            snapshot_path: None,
            config_path: None,
            needs_save: false,
            last_save: Instant::now(),
            last_second: Instant::now(),
        };
        app.sync();
        app
    }

    /// Where to write the timer snapshot and config. Without this nothing is saved.
    pub fn with_files(mut self, snapshot: PathBuf, config: PathBuf) -> Self {
        self.snapshot_path = Some(snapshot);
        self.config_path = Some(config);
        self
    }

    pub fn selected_timer(&self) -> Option<&Timer> {
        self.store.timers().get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.store.is_empty() {
            self.selected = (self.selected + 1).min(self.store.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_id(&mut self, id: TimerId) {
        if let Some(idx) = self.store.timers().iter().position(|t| t.id == id) {
            self.selected = idx;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.store.len().saturating_sub(1));
    }

    /// Runs a card button on the selected timer.
    pub fn perform(&mut self, action: TimerAction) {
        let Some(timer) = self.selected_timer().cloned() else {
            return;
        };

        let item = self.items.entry(timer.id).or_insert_with(|| TimerItem::new(timer.id));
        if let Some(form) = item.handle_action(action, &timer, &mut self.store) {
            self.form = Some(form);
            return;
        }

        if action == TimerAction::Delete {
            self.items.remove(&timer.id);
            self.clamp_selection();
        }
        self.needs_save = true;
        self.sync();
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(TimerForm::create());
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Submits the open form. A rejected form stays open.
    pub fn submit_form(&mut self) {
        let Some(form) = &self.form else {
            return;
        };

        if let Some(id) = form.submit(&mut self.store, &mut self.toasts, &*self.viewport) {
            self.form = None;
            self.select_id(id);
            self.needs_save = true;
            self.sync();
        }
    }

    /// Lets each card look at the current store state.
    pub fn sync(&mut self) {
        for timer in self.store.timers() {
            self.items
                .entry(timer.id)
                .or_insert_with(|| TimerItem::new(timer.id))
                .observe(timer, &mut self.toasts, &*self.sound, &*self.viewport);
        }

        let store = &self.store;
        self.items.retain(|id, _| store.get(*id).is_some());
    }

    pub fn tick_second(&mut self) {
        if self.store.tick() > 0 {
            self.needs_save = true;
        }
        self.sync();
    }

    pub fn update(&mut self) {
        while self.last_second.elapsed() >= SECOND {
            self.last_second += SECOND;
            self.tick_second();
        }

        self.toasts.prune(Instant::now());
        self.animation_frame = self.animation_frame.wrapping_add(1) % 20;

        if self.needs_save && self.last_save.elapsed() >= AUTO_SAVE_INTERVAL {
            self.save_snapshot();
            self.last_save = Instant::now();
        }
    }

    pub fn cycle_theme(&mut self, forward: bool) {
        self.config.theme = theme::cycle(&self.config.theme, forward).into();
        self.theme = get_theme(&self.config.theme);
        self.save_config();
    }

    pub fn save_config(&self) {
        if let Some(path) = &self.config_path {
            if let Err(e) = save_json(path, &self.config) {
                tracing::warn!(error = %e, "failed to save config");
            }
        }
    }

    pub fn save_snapshot(&mut self) {
        if !self.config.autosave {
            return;
        }
        let Some(path) = &self.snapshot_path else {
            return;
        };
        match self.store.save(path) {
            Ok(()) => self.needs_save = false,
            Err(e) => tracing::warn!(error = %e, "failed to save timers"),
        }
    }

    pub fn save_on_quit(&mut self) {
        self.save_snapshot();
        tracing::info!(timers = self.store.len(), "quitting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{FixedViewport, NotifyKind};
    use crate::store::{TimerControls, TimerFields};
    use crate::testing::RecordingSound;
    use std::rc::Rc;

    fn app_with(timers: &[(&str, u64)]) -> (AppState, Rc<RecordingSound>) {
        let mut store = TimerStore::new();
        for (title, duration) in timers {
            store.add(TimerFields {
                title: (*title).into(),
                description: String::new(),
                duration: *duration,
            });
        }
        let sound = Rc::new(RecordingSound::default());
        let config = Config { desktop_notifications: false, ..Config::default() };
        let app = AppState::new(config, store, Box::new(sound.clone()), Box::new(FixedViewport(1024)));
        (app, sound)
    }

    fn success_messages(app: &AppState) -> Vec<String> {
        app.toasts
            .toasts()
            .filter(|t| t.kind == NotifyKind::Success)
            .map(|t| t.message.clone())
            .collect()
    }

    #[test]
    fn running_timer_announces_completion_once() {
        let (mut app, sound) = app_with(&[("Test Timer", 2)]);
        app.perform(TimerAction::Toggle);

        app.tick_second();
        assert!(success_messages(&app).is_empty());

        app.tick_second();
        app.tick_second();
        app.sync();

        assert_eq!(success_messages(&app), vec!["Timer \"Test Timer\" has ended!"]);
        assert_eq!(sound.plays.get(), 1);
    }

    #[test]
    fn restart_announces_again() {
        let (mut app, sound) = app_with(&[("Tea", 1)]);
        app.perform(TimerAction::Toggle);
        app.tick_second();
        app.perform(TimerAction::Restart);
        assert!(app.selected_timer().unwrap().is_running);
        app.tick_second();

        assert_eq!(success_messages(&app).len(), 2);
        assert_eq!(sound.plays.get(), 2);
    }

    #[test]
    fn deleted_timer_never_announces() {
        let (mut app, sound) = app_with(&[("A", 1), ("B", 100)]);
        app.perform(TimerAction::Toggle);
        app.perform(TimerAction::Delete);
        app.tick_second();

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.selected_timer().unwrap().title, "B");
        assert_eq!(sound.plays.get(), 0);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn loaded_finished_timer_stays_quiet() {
        let mut store = TimerStore::new();
        let id = store.add(TimerFields { title: "Old".into(), description: String::new(), duration: 1 });
        store.toggle(id);
        store.tick();

        let sound = Rc::new(RecordingSound::default());
        let mut app = AppState::new(Config::default(), store, Box::new(sound.clone()), Box::new(FixedViewport(1024)));
        app.tick_second();

        assert_eq!(sound.plays.get(), 0);
    }

    #[test]
    fn edit_opens_form_and_submit_updates() {
        let (mut app, _) = app_with(&[("Tea", 180)]);
        app.perform(TimerAction::Edit);
        assert_eq!(app.form.as_ref().map(|f| f.heading()), Some("Edit Timer"));

        app.submit_form();
        assert!(app.form.is_none());
        assert_eq!(app.selected_timer().unwrap().duration, 180);
    }

    #[test]
    fn rejected_form_stays_open_with_error() {
        let (mut app, _) = app_with(&[]);
        app.open_create_form();
        app.submit_form();

        assert!(app.form.is_some());
        assert!(app.store.is_empty());
        let errors: Vec<_> = app.toasts.toasts().map(|t| (t.kind, t.message.clone())).collect();
        assert_eq!(errors, vec![(NotifyKind::Error, "Title is required".to_string())]);
    }

    #[test]
    fn cancel_discards_form() {
        let (mut app, _) = app_with(&[("Tea", 180)]);
        app.perform(TimerAction::Edit);
        app.cancel_form();

        assert!(app.form.is_none());
        assert_eq!(app.selected_timer().unwrap().title, "Tea");
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn selection_stays_in_bounds() {
        let (mut app, _) = app_with(&[("A", 1), ("B", 1)]);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
        app.perform(TimerAction::Delete);
        assert_eq!(app.selected, 0);
        app.select_prev();
        assert_eq!(app.selected, 0);
    }
}
