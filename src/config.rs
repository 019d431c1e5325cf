use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

pub const DATA_DIR: &str = "timerboard";
pub const CONFIG_FILE: &str = "config.json";
pub const SNAPSHOT_FILE: &str = "timers.json";

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "⏱ timerboard - Countdown timers in your terminal")]
pub struct Args {
    #[arg(short = 't', long)]
    pub theme: Option<String>,
    #[arg(long)]
    pub no_sound: bool,
    /// Don't raise desktop notifications when a timer ends
    #[arg(long)]
    pub no_desktop: bool,
    /// Start with an empty board instead of the saved timers
    #[arg(long)]
    pub fresh: bool,
    /// Add a timer on startup, e.g. `25m`, `1h30m`, `90s`
    #[arg(short, long, value_parser = parse_duration)]
    pub new: Option<u64>,
    /// Title for the timer created with --new
    #[arg(long, default_value = "Quick Timer")]
    pub title: String,
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Parses `1h30m`, `25m`, `90s` style durations into whole seconds.
pub fn parse_duration(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim().to_lowercase();
    let mut total: u64 = 0;
    let mut num = String::new();

    for c in s.chars() {
        match c {
            '0'..='9' => num.push(c),
            'h' => { total = add_units(total, &num, 3600, "Invalid hours")?; num.clear(); }
            'm' => { total = add_units(total, &num, 60, "Invalid minutes")?; num.clear(); }
            's' => { total = add_units(total, &num, 1, "Invalid seconds")?; num.clear(); }
            _ => return Err("Invalid format".into()),
        }
    }

    // A bare number means minutes.
    if !num.is_empty() {
        total = add_units(total, &num, 60, "Invalid minutes")?;
    }

    if total > 0 { Ok(total) } else { Err("Duration must be > 0".into()) }
}

fn add_units(total: u64, num: &str, unit: u64, invalid: &str) -> std::result::Result<u64, String> {
    let value = num.parse::<u64>().map_err(|_| invalid.to_string())?;
    value
        .checked_mul(unit)
        .and_then(|secs| total.checked_add(secs))
        .ok_or_else(|| "Duration too large".into())
}

// ============================================================================
// Config
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sound_enabled: bool,
    pub desktop_notifications: bool,
    pub theme: String,
    pub autosave: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            desktop_notifications: true,
            theme: "default".into(),
            autosave: true,
        }
    }
}

impl Config {
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(t) = &args.theme { self.theme = t.clone(); }
        if args.no_sound { self.sound_enabled = false; }
        if args.no_desktop { self.desktop_notifications = false; }
    }
}

// ============================================================================
// Files
// ============================================================================

pub fn data_dir() -> PathBuf {
    let path = PathBuf::from(".").join(DATA_DIR);
    if let Err(e) = fs::create_dir_all(&path) {
        tracing::warn!(path = %path.display(), error = %e, "could not create data directory");
    }
    path
}

pub fn get_path(filename: &str) -> PathBuf {
    data_dir().join(filename)
}

/// Reads a JSON file, falling back to the default when it is missing or broken.
pub fn load_json<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> T {
    let Ok(s) = fs::read_to_string(path) else {
        return T::default();
    };
    serde_json::from_str(&s).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable file");
        T::default()
    })
}

/// Like [`load_json`], but an unparsable file is moved aside to `<name>.bak`
/// so the next save can't overwrite it.
pub fn load_json_or_backup<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> T {
    let Ok(s) = fs::read_to_string(path) else {
        return T::default();
    };
    serde_json::from_str(&s).unwrap_or_else(|e| {
        let backup = backup_path(path);
        match fs::rename(path, &backup) {
            Ok(()) => tracing::warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %e,
                "unreadable file moved aside"
            ),
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "could not back up unreadable file"),
        }
        T::default()
    })
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
