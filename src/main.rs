use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Env, Target};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four_client::client::WebClient;
use connect_four_client::config::{AppConfig, LoggingConfig};
use connect_four_client::ui::App;

/// Play Connect Four against a remote game server.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four against a remote game server")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Server URL to offer at the prompt, overriding the config
    #[arg(long)]
    server: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(url) = cli.server {
        config.server.url = url;
        config.validate().context("invalid --server")?;
    }

    init_logging(&config.logging)?;
    log::info!("starting with server {}", config.server.url);

    run(&config).context("terminal UI failed")
}

/// Log to a file; stderr would draw over the UI.
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let path = Path::new(&logging.file);
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or(&logging.level))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    Ok(())
}

fn run(config: &AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let timeout = config.server.timeout();
    let mut app = App::new(
        &config.server.url,
        Box::new(move |url: &str| WebClient::new(url, timeout)),
    );
    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
