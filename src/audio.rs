use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

const SOUND_CANDIDATES: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
];

pub trait Sound {
    fn play(&self);
}

/// Process-wide completion sound. Playback is fire-and-forget.
pub struct TimerAudio {
    enabled: AtomicBool,
}

impl TimerAudio {
    pub fn instance() -> &'static TimerAudio {
        static INSTANCE: OnceLock<TimerAudio> = OnceLock::new();
        INSTANCE.get_or_init(|| TimerAudio {
            enabled: AtomicBool::new(true),
        })
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

impl Sound for TimerAudio {
    fn play(&self) {
        if !self.enabled() {
            return;
        }

        std::thread::spawn(|| play_first_available(SOUND_CANDIDATES));
    }
}

/// Plays the first candidate whose file exists and waits for the player, so
/// it is reaped when it exits. Blocks; run it off the UI thread.
fn play_first_available(candidates: &[(&str, &str)]) -> Option<ExitStatus> {
    let Some((cmd, file)) = candidates.iter().find(|(_, file)| Path::new(file).exists()) else {
        tracing::debug!("no completion sound found on this system");
        return None;
    };

    match Command::new(cmd)
        .arg(file)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => {
            if !status.success() {
                tracing::debug!(cmd, %status, "sound player exited");
            }
            Some(status)
        }
        Err(e) => {
            tracing::warn!(cmd, error = %e, "failed to play completion sound");
            None
        }
    }
}

impl Sound for &'static TimerAudio {
    fn play(&self) {
        (**self).play();
    }
}
