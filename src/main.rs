mod api;
mod config;
mod controller;
mod format;
mod models;
mod route;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::api::{ApiClient, Backend as _};
use crate::models::{Employee, Project};
use crate::route::Route;
use crate::ui::page::PageInput;
use crate::ui::shell::{Shell, ShellCommand, shell_command};

/// Terminal administration client for employees and projects.
#[derive(Debug, Parser)]
#[command(name = "workforce-manager", version, about)]
struct Cli {
    /// Base URL of the REST backend (overrides API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// File to write logs to (overrides LOG_FILE)
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive interface (default)
    Tui {
        /// Path to open, e.g. /funcionarios
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Print every record of a collection as JSON
    List { resource: ResourceArg },
    /// Print one record as JSON
    Show { resource: ResourceArg, id: i64 },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResourceArg {
    Funcionarios,
    Projetos,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init(cli.api_url, cli.log_file)?;
    init_logging(&config.log_file)?;
    info!(api_url = config.api_url(), "starting workforce manager");

    let api = ApiClient::new(config.api_url());

    match cli.command.unwrap_or(Command::Tui {
        path: route::HOME_PATH.to_string(),
    }) {
        Command::Tui { path } => run_tui(api, &path).await,
        Command::List { resource } => print_list(&api, resource).await,
        Command::Show { resource, id } => print_one(&api, resource, id).await,
    }
}

fn init_logging(path: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

async fn print_list(api: &ApiClient, resource: ResourceArg) -> Result<()> {
    let json = match resource {
        ResourceArg::Funcionarios => serde_json::to_string_pretty(&api.list::<Employee>().await?)?,
        ResourceArg::Projetos => serde_json::to_string_pretty(&api.list::<Project>().await?)?,
    };
    println!("{}", json);
    Ok(())
}

async fn print_one(api: &ApiClient, resource: ResourceArg, id: i64) -> Result<()> {
    let json = match resource {
        ResourceArg::Funcionarios => serde_json::to_string_pretty(&api.get::<Employee>(id).await?)?,
        ResourceArg::Projetos => serde_json::to_string_pretty(&api.get::<Project>(id).await?)?,
    };
    println!("{}", json);
    Ok(())
}

async fn run_tui(api: ApiClient, path: &str) -> Result<()> {
    if Route::from_path(path).is_none() {
        warn!(path, "no page for path");
    }

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut shell = Shell::new(path);

    // Run the main app loop
    let result = run_app(&mut terminal, &api, &mut shell).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        println!("Error: {}", err);
    }

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    api: &ApiClient,
    shell: &mut Shell,
) -> Result<()> {
    loop {
        terminal.draw(|f| shell.render(f))?;

        // Draw the loading state first, then fetch
        if shell.page().needs_mount() {
            shell.page_mut().mount(api).await;
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match shell.page_mut().handle_key(key.code) {
            PageInput::Ignored => match shell_command(key.code) {
                Some(ShellCommand::Quit) => break,
                Some(ShellCommand::Navigate(path)) => {
                    shell.navigate(path);
                    info!(path = shell.path(), "navigated");
                }
                None => {}
            },
            PageInput::Handled => {}
            PageInput::Submit => {
                if let Some(path) = shell.page_mut().submit(api).await {
                    shell.navigate(path);
                }
            }
            PageInput::ConfirmDelete => shell.page_mut().confirm_delete(api).await,
        }
    }

    Ok(())
}
