use anyhow::{Result, bail};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::{io, time::Instant};

use timerboard::{
    app::{AppState, TICK_RATE},
    audio::TimerAudio,
    config::{self, Args, Config, CONFIG_FILE, SNAPSHOT_FILE},
    input::handle_input,
    logging,
    notify::TerminalViewport,
    store::{TimerControls, TimerFields, TimerStore},
    ui::render_ui,
    validation::{TimerFormData, check_timer_form},
};

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(&config::data_dir(), &args.log_level)?;

    let config_path = config::get_path(CONFIG_FILE);
    let snapshot_path = config::get_path(SNAPSHOT_FILE);

    let mut config = config::load_json::<Config>(&config_path);
    config.apply_args(&args);
    TimerAudio::instance().set_enabled(config.sound_enabled);

    let mut store = if args.fresh {
        TimerStore::new()
    } else {
        TimerStore::load(&snapshot_path)
    };

    // CLI quick-add
    if let Some(secs) = args.new {
        let form = TimerFormData {
            title: args.title.clone(),
            description: String::new(),
            hours: (secs / 3600) as i64,
            minutes: ((secs % 3600) / 60) as i64,
            seconds: (secs % 60) as i64,
        };
        if let Err(e) = check_timer_form(&form) {
            bail!("--new: {e}");
        }
        let id = store.add(TimerFields::from_form(&form));
        store.toggle(id);
    }

    let mut app = AppState::new(
        config,
        store,
        Box::new(TimerAudio::instance()),
        Box::new(TerminalViewport),
    )
    .with_files(snapshot_path, config_path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        tracing::error!(error = %e, "exiting with error");
    }
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_input(key, app) {
                    app.save_on_quit();
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.update();
            last_tick = Instant::now();
        }
    }
}
