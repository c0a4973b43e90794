mod cli;

use todo_widget::app::{Controller, Intent};
use todo_widget::config::Config;
use todo_widget::storage::{KeyValueStore, MemoryStore, SqliteStore, Store};
use todo_widget::theme::{AmbientProbe, AmbientSource, AmbientWatcher, SystemProbe};
use todo_widget::todo::FilterMode;
use todo_widget::ui;
use todo_widget::ui::view::ListView;
use todo_widget::utils::paths::{ensure_app_dir_exists, get_crash_log_path, get_logs_dir};

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use std::fs;
use std::io::{self, Write};
use std::panic;

type Backend = Box<dyn KeyValueStore>;

/// Install a panic hook that restores the terminal and appends crash
/// information to a log file.
fn install_crash_handler() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);

        if let Ok(crash_log_path) = get_crash_log_path() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut crash_report = format!("=== CRASH at {} ===\n", timestamp);

            if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            }

            if let Some(location) = panic_info.location() {
                crash_report.push_str(&format!(
                    "Location: {}:{}:{}\n",
                    location.file(),
                    location.line(),
                    location.column()
                ));
            }

            crash_report.push_str(&format!(
                "\nBacktrace:\n{}\n\n",
                std::backtrace::Backtrace::force_capture()
            ));

            if let Ok(mut file) = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log_path)
            {
                let _ = file.write_all(crash_report.as_bytes());
                eprintln!("\nCrash logged to: {}", crash_log_path.display());
            }
        }

        default_hook(panic_info);
    }));
}

/// Initialize file-based logging for the TUI mode.
///
/// Logs are written to ~/.todo-widget/logs/todo-widget.log, rolling daily.
/// Log level can be controlled with RUST_LOG env var (default: info).
fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = get_logs_dir().ok()?;

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "todo-widget.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(guard)
}

/// Headless commands only surface warnings, on stderr.
fn init_stderr_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Ignoring unreadable config: {}", e);
            tracing::warn!(error = %e, "config unreadable, using defaults");
            Config::default()
        }
    }
}

/// Opens the configured store. An unavailable store degrades to an in-memory
/// session rather than aborting startup.
fn open_backend(cli: &Cli, config: &Config) -> Backend {
    if cli.ephemeral {
        return Box::new(MemoryStore::new());
    }

    let opened = match &cli.store {
        Some(path) => SqliteStore::open(path),
        None => ensure_app_dir_exists()
            .and_then(|_| config.storage.resolved_path())
            .and_then(|path| SqliteStore::open(&path)),
    };

    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            eprintln!("Warning: Store unavailable, changes will not be saved: {:#}", e);
            tracing::warn!(error = %e, "store unavailable, running in memory");
            Box::new(MemoryStore::new())
        }
    }
}

fn report_notice(controller: &mut Controller<Backend>) {
    if let Some(notice) = controller.take_notice() {
        eprintln!("Warning: {}", notice);
    }
}

fn print_view(view: &ListView) {
    if view.show_empty {
        println!("(nothing here)");
    }
    for row in &view.rows {
        let checkbox = if row.completed { "[x]" } else { "[ ]" };
        println!("{} {}", checkbox, row.text);
    }
    println!("{}", view.count_label);
}

fn handle_command(command: Commands, controller: &mut Controller<Backend>) {
    match command {
        Commands::Add { text } => {
            if controller.dispatch(Intent::Add(text)) {
                if let Some(row) = controller.view().rows.first() {
                    println!("Added: {}", row.text);
                }
            } else {
                println!("Nothing added: text is empty");
            }
        }
        Commands::Show { filter } => {
            if filter != FilterMode::All {
                controller.dispatch(Intent::SetFilter(filter));
            }
            print_view(controller.view());
        }
        Commands::ClearCompleted => {
            let removed = controller.state().todos.completed_count();
            controller.dispatch(Intent::ClearCompleted);
            println!(
                "Removed {} completed item{}",
                removed,
                if removed == 1 { "" } else { "s" }
            );
        }
        Commands::Theme { theme } => {
            if let Some(theme) = theme {
                controller.dispatch(Intent::SetTheme(theme));
            }
            let policy = &controller.state().theme;
            let source = if policy.is_persisted() { "saved" } else { "system" };
            println!("{} ({})", policy.current(), source);
        }
    }
    report_notice(controller);
}

fn main() -> Result<()> {
    install_crash_handler();

    let mut cli = Cli::parse();
    let config = load_config();

    let probe = SystemProbe::new(config.appearance.system);
    let initial_ambient = probe.detect();

    match cli.command.take() {
        Some(command) => {
            init_stderr_logging();
            let backend = open_backend(&cli, &config);
            let mut controller = Controller::new(Store::new(backend), initial_ambient);
            handle_command(command, &mut controller);
        }
        None => {
            // Guard must be kept alive for the duration of the app
            let _log_guard = init_file_logging();
            tracing::info!("todo-widget starting");

            let backend = open_backend(&cli, &config);
            let mut controller = Controller::new(Store::new(backend), initial_ambient);
            let watcher = (config.appearance.system != AmbientSource::Disabled).then(|| {
                AmbientWatcher::spawn(probe, initial_ambient, config.appearance.poll_interval())
            });

            ui::run_tui(&mut controller, watcher)?;
            tracing::info!("todo-widget exiting");
        }
    }

    Ok(())
}
