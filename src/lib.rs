//! A board of named countdown timers for the terminal.

pub mod app;
pub mod audio;
pub mod config;
pub mod form;
pub mod input;
pub mod logging;
pub mod notify;
pub mod store;
pub mod theme;
pub mod timer_item;
pub mod ui;
pub mod validation;

#[cfg(test)]
mod testing;
