mod cli;
mod snapshot;
mod stats;
#[cfg(test)]
mod tests;
mod timeline;
mod types;
mod ui;
mod utils;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    style::Stylize,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use regex::Regex;
use std::io::IsTerminal;
use tokio::sync::mpsc;
use tracing::info;

use cli::Cli;
use snapshot::Snapshot;
use stats::PressureLevel;
use timeline::EventQuery;
use types::Event;
use ui::{App, AppEvent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine if we'll use TUI mode (needed to configure logging appropriately)
    let use_tui = !cli.no_tui && std::io::stdout().is_terminal();

    // Initialize tracing subscriber - configure differently for TUI vs stdout mode
    let filter = if cli.verbose { "debug" } else { "info" };
    if use_tui {
        // In TUI mode: write logs to a file to avoid corrupting the display
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/argocd-timeline.log")
            .unwrap_or_else(|_| {
                eprintln!("Warning: Could not open /tmp/argocd-timeline.log for logging");
                std::fs::File::create("/dev/null").expect("Failed to open /dev/null")
            });

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
            )
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(log_file))
            .init();
    } else {
        // In stdout mode: write logs to stderr
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let snapshot = Snapshot::load(
        cli.tree.as_deref(),
        cli.resources.as_deref(),
        cli.events.as_deref(),
    )?;

    info!(
        resources = snapshot.tree.total_resources(),
        hosts = snapshot.tree.hosts.len(),
        events = snapshot.events.len(),
        "snapshot loaded"
    );

    let query = EventQuery {
        sort: cli.sort,
        warnings_only: cli.warnings_only,
        group_by: cli.group_by,
    };

    if use_tui {
        run_tui_mode(snapshot, query, cli.grep).await
    } else {
        run_stdout_mode(snapshot, query, cli.grep)
    }
}

fn pressure_text(value: Option<f64>) -> crossterm::style::StyledContent<String> {
    use crossterm::style::Color;
    match value {
        None => "n/a".to_string().with(Color::DarkGrey),
        Some(p) => {
            let color = match PressureLevel::from_percent(p) {
                PressureLevel::Ok => Color::Green,
                PressureLevel::Warn => Color::Yellow,
                PressureLevel::Critical => Color::Red,
            };
            format!("{:.2} %", p).with(color)
        }
    }
}

fn run_stdout_mode(snapshot: Snapshot, query: EventQuery, grep: Option<String>) -> anyhow::Result<()> {
    let grep_regex = match &grep {
        Some(pattern) => Some(
            Regex::new(&format!("(?i){}", pattern))
                .with_context(|| format!("invalid regex pattern '{}'", pattern))?,
        ),
        None => None,
    };

    let tree_stats = stats::tree_stats(&snapshot.tree);
    let sync = stats::sync_stats(&snapshot.resources);
    let usage = stats::resource_usage(&snapshot.tree.hosts);

    println!(
        "resources: {}   pods: {}   out-of-sync: {}   hosts: {}",
        snapshot.tree.total_resources(),
        tree_stats.pods,
        sync.out_of_sync,
        snapshot.tree.hosts.len(),
    );
    println!(
        "cpu pressure: {}   memory pressure: {}",
        pressure_text(usage.cpu),
        pressure_text(usage.memory),
    );
    println!();

    let shown: Vec<&Event> = query
        .select(&snapshot.events)
        .into_iter()
        .filter(|e| match &grep_regex {
            Some(re) => re.is_match(&e.message),
            None => true,
        })
        .collect();

    if shown.is_empty() {
        println!("No events.");
        return Ok(());
    }

    for event in shown {
        let type_tag = format!("{:<8}", event.type_);
        let type_tag = if event.is_warning() {
            type_tag.yellow()
        } else {
            type_tag.green()
        };
        println!(
            "{} {} {:<20} {}",
            event.first_timestamp.as_deref().unwrap_or("-"),
            type_tag,
            event.reason,
            event.message,
        );
    }

    Ok(())
}

async fn run_tui_mode(
    snapshot: Snapshot,
    query: EventQuery,
    grep: Option<String>,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state; --grep seeds the message filter
    let mut app = App::new(snapshot, query, grep.unwrap_or_default());

    // Spawn keyboard event loop
    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(100);
    tokio::spawn(async move {
        ui::events::event_loop(event_tx).await;
    });

    // Main TUI event loop: periodic redraw keeps humanized ages fresh,
    // keyboard input re-renders immediately
    let mut should_quit = false;
    let mut render_interval = tokio::time::interval(std::time::Duration::from_millis(250));
    render_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    while !should_quit {
        tokio::select! {
            _ = render_interval.tick() => {
                ui::renderer::render(&mut terminal, &app)?;
            }
            event = event_rx.recv() => {
                match event {
                    Some(AppEvent::Key(key)) => {
                        should_quit = !ui::events::handle_key_event(&mut app, key);
                        ui::renderer::render(&mut terminal, &app)?;
                    }
                    Some(AppEvent::Quit) | None => {
                        should_quit = true;
                    }
                }
            }
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
