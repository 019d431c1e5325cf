//! Checks on the create/edit timer form.

use crate::notify::{self, Notifier, NotifyKind, Viewport};
use thiserror::Error;

pub const MAX_TITLE_LEN: usize = 50;
pub const MAX_DURATION_SECS: i64 = 24 * 3600;

/// What the user typed into the timer form, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerFormData {
    pub title: String,
    pub description: String,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimerFormData {
    pub fn total_seconds(&self) -> i64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }
}

/// The first rule a form broke. The display text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    BlankTitle,
    #[error("Title must be less than 50 characters")]
    TitleTooLong,
    #[error("Time values cannot be negative")]
    NegativeTime,
    #[error("Minutes and seconds must be between 0 and 59")]
    OutOfRangeUnit,
    #[error("Please set a time greater than 0")]
    ZeroDuration,
    #[error("Timer cannot exceed 24 hours")]
    DurationTooLong,
}

/// Runs the rules in order and returns the total duration in seconds.
pub fn check_timer_form(data: &TimerFormData) -> Result<u64, ValidationError> {
    let TimerFormData { title, hours, minutes, seconds, .. } = data;

    if title.trim().is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    if *hours < 0 || *minutes < 0 || *seconds < 0 {
        return Err(ValidationError::NegativeTime);
    }
    if *minutes > 59 || *seconds > 59 {
        return Err(ValidationError::OutOfRangeUnit);
    }

    let total = data.total_seconds();
    if total == 0 {
        return Err(ValidationError::ZeroDuration);
    }
    if total > MAX_DURATION_SECS {
        return Err(ValidationError::DurationTooLong);
    }

    Ok(total as u64)
}

/// Gatekeeper for form submission. On rejection the user gets exactly one
/// error toast, placed for the viewport as it is right now.
pub fn validate_timer_form(
    data: &TimerFormData,
    notifier: &mut dyn Notifier,
    viewport: &dyn Viewport,
) -> bool {
    let options = notify::options_for(viewport);

    match check_timer_form(data) {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(error = %err, title = %data.title, "timer form rejected");
            notifier.notify(NotifyKind::Error, &err.to_string(), options);
            false
        }
    }
}
