//! The create/edit timer modal.

use crate::notify::{Notifier, Viewport};
use crate::store::{Timer, TimerControls, TimerFields, TimerId};
use crate::validation::{TimerFormData, validate_timer_form};

const MAX_TEXT_INPUT: usize = 200;
const MAX_NUMBER_INPUT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TimerId),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormField {
    Title,
    Description,
    Hours,
    Minutes,
    Seconds,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::Title,
        Self::Description,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Hours,
            Self::Hours => Self::Minutes,
            Self::Minutes => Self::Seconds,
            Self::Seconds => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Seconds,
            Self::Description => Self::Title,
            Self::Hours => Self::Description,
            Self::Minutes => Self::Hours,
            Self::Seconds => Self::Minutes,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Hours => "Hours",
            Self::Minutes => "Minutes",
            Self::Seconds => "Seconds",
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, Self::Hours | Self::Minutes | Self::Seconds)
    }
}

/// Form state while the modal is open. Numbers are kept as typed and only
/// parsed on submit.
#[derive(Debug, Clone)]
pub struct TimerForm {
    mode: FormMode,
    field: FormField,
    title: String,
    description: String,
    hours: String,
    minutes: String,
    seconds: String,
}

impl TimerForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            field: FormField::Title,
            title: String::new(),
            description: String::new(),
            hours: "0".into(),
            minutes: "0".into(),
            seconds: "0".into(),
        }
    }

    pub fn edit(timer: &Timer) -> Self {
        Self {
            mode: FormMode::Edit(timer.id),
            field: FormField::Title,
            title: timer.title.clone(),
            description: timer.description.clone(),
            hours: (timer.duration / 3600).to_string(),
            minutes: ((timer.duration % 3600) / 60).to_string(),
            seconds: (timer.duration % 60).to_string(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New Timer",
            FormMode::Edit(_) => "Edit Timer",
        }
    }

    pub fn field(&self) -> FormField {
        self.field
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.prev();
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Hours => &self.hours,
            FormField::Minutes => &self.minutes,
            FormField::Seconds => &self.seconds,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Hours => &mut self.hours,
            FormField::Minutes => &mut self.minutes,
            FormField::Seconds => &mut self.seconds,
        }
    }

    /// Types a character into the focused field. Number fields take digits
    /// and a leading minus; a lone `0` is replaced by the first digit.
    pub fn push_char(&mut self, c: char) {
        let field = self.field;
        let buf = self.value_mut(field);

        if field.is_numeric() {
            let accepted = c.is_ascii_digit() || (c == '-' && (buf.is_empty() || buf.as_str() == "0"));
            if !accepted || buf.len() >= MAX_NUMBER_INPUT {
                return;
            }
            if buf.as_str() == "0" {
                buf.clear();
            }
        } else if buf.chars().count() >= MAX_TEXT_INPUT {
            return;
        }

        buf.push(c);
    }

    pub fn backspace(&mut self) {
        let field = self.field;
        self.value_mut(field).pop();
    }

    pub fn data(&self) -> TimerFormData {
        TimerFormData {
            title: self.title.clone(),
            description: self.description.clone(),
            hours: parse_number(&self.hours),
            minutes: parse_number(&self.minutes),
            seconds: parse_number(&self.seconds),
        }
    }

    /// Validates and, if the form is acceptable, commits it. Returns the id of
    /// the created or updated timer; `None` means the form stays open.
    pub fn submit(
        &self,
        controls: &mut dyn TimerControls,
        notifier: &mut dyn Notifier,
        viewport: &dyn Viewport,
    ) -> Option<TimerId> {
        let data = self.data();
        if !validate_timer_form(&data, notifier, viewport) {
            return None;
        }

        let fields = TimerFields::from_form(&data);
        match self.mode {
            FormMode::Create => Some(controls.add(fields)),
            FormMode::Edit(id) => {
                controls.update(id, fields);
                Some(id)
            }
        }
    }
}

// Empty or half-typed input (`""`, `"-"`) counts as zero.
fn parse_number(s: &str) -> i64 {
    s.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{FixedViewport, NotifyKind};
    use crate::testing::{Call, RecordingControls, RecordingNotifier};

    fn timer() -> Timer {
        Timer {
            id: 7,
            title: "Test Timer".into(),
            description: "Test Description".into(),
            duration: 5400,
            remaining_time: 1200,
            is_running: true,
        }
    }

    fn type_str(form: &mut TimerForm, s: &str) {
        for c in s.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn edit_form_decomposes_duration() {
        let form = TimerForm::edit(&timer());
        assert_eq!(form.mode(), FormMode::Edit(7));
        assert_eq!(form.value(FormField::Hours), "1");
        assert_eq!(form.value(FormField::Minutes), "30");
        assert_eq!(form.value(FormField::Seconds), "0");
        assert_eq!(form.value(FormField::Description), "Test Description");
    }

    #[test]
    fn valid_edit_submits_update() {
        let form = TimerForm::edit(&timer());
        let mut controls = RecordingControls::default();
        let mut notifier = RecordingNotifier::default();

        assert_eq!(form.submit(&mut controls, &mut notifier, &FixedViewport(1024)), Some(7));
        assert_eq!(
            controls.calls,
            vec![Call::Update(
                7,
                TimerFields {
                    title: "Test Timer".into(),
                    description: "Test Description".into(),
                    duration: 5400,
                }
            )]
        );
        assert!(notifier.sent.is_empty());
    }

    #[test]
    fn invalid_edit_does_not_update() {
        let mut form = TimerForm::edit(&timer());
        form.field = FormField::Minutes;
        type_str(&mut form, "0");

        let mut controls = RecordingControls::default();
        let mut notifier = RecordingNotifier::default();

        assert_eq!(form.value(FormField::Minutes), "300");
        assert_eq!(form.submit(&mut controls, &mut notifier, &FixedViewport(1024)), None);
        assert!(controls.calls.is_empty());
        assert_eq!(notifier.sent.len(), 1);
        assert_eq!(notifier.sent[0].0, NotifyKind::Error);
        assert_eq!(notifier.sent[0].1, "Minutes and seconds must be between 0 and 59");
    }

    #[test]
    fn create_form_adds_trimmed_timer() {
        let mut form = TimerForm::create();
        type_str(&mut form, "  Tea  ");
        form.next_field();
        form.next_field();
        form.next_field();
        type_str(&mut form, "3");

        let mut controls = RecordingControls::default();
        let mut notifier = RecordingNotifier::default();
        assert!(form.submit(&mut controls, &mut notifier, &FixedViewport(1024)).is_some());
        assert_eq!(
            controls.calls,
            vec![Call::Add(TimerFields {
                title: "Tea".into(),
                description: String::new(),
                duration: 180,
            })]
        );
    }

    #[test]
    fn blank_create_form_is_rejected() {
        let form = TimerForm::create();
        let mut controls = RecordingControls::default();
        let mut notifier = RecordingNotifier::default();

        assert_eq!(form.submit(&mut controls, &mut notifier, &FixedViewport(375)), None);
        assert_eq!(notifier.sent[0].1, "Title is required");
        assert!(controls.calls.is_empty());
    }

    #[test]
    fn number_fields_filter_input() {
        let mut form = TimerForm::create();
        form.field = FormField::Hours;
        type_str(&mut form, "-x1");
        assert_eq!(form.value(FormField::Hours), "-1");
        assert_eq!(form.data().hours, -1);

        form.backspace();
        assert_eq!(form.value(FormField::Hours), "-");
        assert_eq!(form.data().hours, 0);

        form.backspace();
        type_str(&mut form, "12345678");
        assert_eq!(form.value(FormField::Hours), "123456");
    }

    #[test]
    fn fields_cycle() {
        let mut form = TimerForm::create();
        for _ in 0..FormField::ALL.len() {
            form.next_field();
        }
        assert_eq!(form.field(), FormField::Title);
        form.prev_field();
        assert_eq!(form.field(), FormField::Seconds);
    }
}
