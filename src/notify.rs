//! Toast notifications and the viewport they are placed against.
//!
//! Anything that wants to tell the user something goes through [`Notifier`].
//! The placement of a toast depends on how wide the screen is at the moment
//! the toast is raised, so callers ask a [`Viewport`] every time.

use notify_rust::{Notification, Urgency};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Screens at least this wide (logical pixels) get toasts in the top-right corner.
pub const DESKTOP_BREAKPOINT_PX: u32 = 768;
/// Rough width of one terminal cell when the terminal won't report pixels.
const CELL_WIDTH_PX: u32 = 8;
const MAX_TOASTS: usize = 5;
const SUCCESS_TTL: Duration = Duration::from_secs(4);
const ERROR_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPosition {
    TopRight,
    BottomCenter,
}

impl ToastPosition {
    pub fn for_width(width: u32) -> Self {
        if width >= DESKTOP_BREAKPOINT_PX {
            Self::TopRight
        } else {
            Self::BottomCenter
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopRight => "top-right",
            Self::BottomCenter => "bottom-center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyOptions {
    pub position: ToastPosition,
}

pub trait Notifier {
    fn notify(&mut self, kind: NotifyKind, message: &str, options: NotifyOptions);
}

/// Reports the current width of the screen in logical pixels.
pub trait Viewport {
    fn width(&self) -> u32;
}

/// Asks the terminal for its size on every call.
pub struct TerminalViewport;

impl Viewport for TerminalViewport {
    fn width(&self) -> u32 {
        match crossterm::terminal::window_size() {
            Ok(size) if size.width > 0 => u32::from(size.width),
            Ok(size) => u32::from(size.columns) * CELL_WIDTH_PX,
            Err(_) => crossterm::terminal::size()
                .map(|(cols, _)| u32::from(cols) * CELL_WIDTH_PX)
                .unwrap_or(0),
        }
    }
}

/// A viewport with a fixed width, for headless use.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport(pub u32);

impl Viewport for FixedViewport {
    fn width(&self) -> u32 {
        self.0
    }
}

/// Options for a toast raised right now on `viewport`.
pub fn options_for(viewport: &dyn Viewport) -> NotifyOptions {
    NotifyOptions {
        position: ToastPosition::for_width(viewport.width()),
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: NotifyKind,
    pub message: String,
    pub position: ToastPosition,
    pub created: Instant,
}

impl Toast {
    fn ttl(&self) -> Duration {
        match self.kind {
            NotifyKind::Error => ERROR_TTL,
            NotifyKind::Success => SUCCESS_TTL,
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= self.ttl()
    }
}

/// The in-terminal toast stack. Success toasts can also be mirrored to the
/// desktop notification daemon.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    desktop: bool,
}

impl ToastQueue {
    pub fn new(desktop: bool) -> Self {
        Self {
            toasts: VecDeque::new(),
            desktop,
        }
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.expired(now));
    }

    fn push(&mut self, toast: Toast) {
        if self.toasts.len() >= MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(toast);
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, kind: NotifyKind, message: &str, options: NotifyOptions) {
        tracing::debug!(?kind, position = options.position.as_str(), message, "toast");
        if self.desktop && kind == NotifyKind::Success {
            desktop_notify("Timer finished ⏰", message);
        }
        self.push(Toast {
            kind,
            message: message.into(),
            position: options.position,
            created: Instant::now(),
        });
    }
}

fn desktop_notify(title: &str, body: &str) {
    if let Err(e) = Notification::new()
        .summary(title)
        .body(body)
        .appname("timerboard")
        .icon("alarm-clock")
        .urgency(Urgency::Critical)
        .show()
    {
        tracing::warn!(error = %e, "desktop notification failed");
    }
}
