use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use wallrun::core::constants::INPUT_POLL_MS;
use wallrun::input::{handle_key, InputResult};
use wallrun::ui::{self, hud::Hud};
use wallrun::utils::{build_info, logging, settings};
use wallrun::{GameConfig, Session};

const USAGE: &str = "Wallrun - dodge the walls

Usage: wallrun [options] [command]

Commands:
  init-config    Write the default config to the config path

Options:
  --config PATH  Read settings from PATH (default ~/.wallrun/config.json)
  --version      Show version information
  --help         Show this help message";

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config_arg: Option<PathBuf> = None;
    let mut init_config = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                return Ok(());
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            "--config" | "-c" => match args.get(i + 1) {
                Some(path) => {
                    config_arg = Some(PathBuf::from(path));
                    i += 1;
                }
                None => {
                    eprintln!("--config requires a path");
                    std::process::exit(1);
                }
            },
            "init-config" => init_config = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'wallrun --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config_path = settings::config_path(config_arg.as_deref())?;
    if init_config {
        settings::write_default_config(&config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    if let Err(e) = logging::init_file_logger() {
        eprintln!("Warning: file logging disabled: {}", e);
    }
    log::info!("{}", build_info::version_string());

    let config = settings::load_config_or_default(&config_path);
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            log::warn!("config rejected ({}), using defaults", e);
            Session::new(GameConfig::default())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run(&mut terminal, &mut session);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("terminal loop failed: {}", e);
    }
    log::info!("exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
) -> io::Result<()> {
    let mut hud = Hud::new();
    let mut rng = rand::thread_rng();
    let mut last_frame = Instant::now();
    let idle_poll = Duration::from_millis(INPUT_POLL_MS * 25);

    loop {
        let surface = ui::surface_for(session, terminal.size()?);

        let now = Instant::now();
        let tick_result = session.run_due(now - last_frame, &mut rng, &surface, &mut hud);
        last_frame = now;
        hud.record(&tick_result);

        terminal.draw(|f| ui::draw(f, session, &hud))?;

        let timeout = if session.is_running() {
            session
                .clock
                .until_next()
                .max(Duration::from_millis(INPUT_POLL_MS))
        } else {
            idle_poll
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(key, session, &mut hud, &surface) == InputResult::Quit {
                    return Ok(());
                }
            }
        }
    }
}
