use std::io::Stdout;
use std::io::stdout;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use confession_sequencer::HttpRelay;
use confession_sequencer::Timings;
use confession_tui::App;
use crossterm::event;
use crossterm::event::Event;
use crossterm::event::KeyEventKind;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "confession-tui.log";

#[derive(Debug, Parser)]
#[command(name = "confession", version, about = "Một lá thư gửi em 💌")]
struct Cli {
    /// Base URL of the running relay.
    #[arg(long, env = "RELAY_URL", default_value = "http://127.0.0.1:3000")]
    relay_url: String,

    /// Plays every animation this many times faster.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    speed: u32,
}

/// Logs go to a file: stdout belongs to the alternate screen.
fn init_tracing() -> Option<WorkerGuard> {
    let dir = std::env::temp_dir();
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(&dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    tracing::info!(path = %dir.join(LOG_FILE).display(), "Logging initialized");
    Some(guard)
}

/// Raw mode plus alternate screen, undone on drop so the shell is usable
/// after an error or panic.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        match Terminal::new(CrosstermBackend::new(out)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                Err(err.into())
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> anyhow::Result<()> {
    let started = Instant::now();
    while !app.should_quit() {
        let now = started.elapsed();
        app.tick(now);
        terminal.draw(|frame| confession_tui::ui::draw(frame, app, now))?;

        if event::poll(app.poll_timeout(started.elapsed()))?
            && let Event::Key(key) = event::read()?
            && key.kind != KeyEventKind::Release
        {
            app.handle_key(key, started.elapsed());
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let _log_guard = init_tracing();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let relay = HttpRelay::new(&cli.relay_url)?;
    tracing::info!(endpoint = %relay.endpoint(), speed = cli.speed, "starting");

    let mut app = App::new(
        Arc::new(relay),
        runtime.handle().clone(),
        Timings::scaled(cli.speed),
        StdRng::from_os_rng(),
    );

    let mut session = TerminalSession::new()?;
    let result = run(&mut session.terminal, &mut app);
    drop(session);

    if let Some(message) = &app.stage().message {
        println!("{}", message.text);
    }
    result
}
