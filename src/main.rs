//! A scroll-snapping portfolio stack for the terminal.
//!
//! Run the binary to page through the portfolio: scroll freely with the
//! wheel or arrow keys and the stack settles onto the nearest section.
//! Run with `--write-config` to dump the current key bindings and tuning.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler, scroll_runtime,
    state::{ActiveView, AppState},
};
use crate::core::controller::ScrollControl;
use crate::core::portfolio::Portfolio;
use crate::ui::{
    layout::AppLayout,
    modal::ProjectDetail,
    nav::{NavBar, NavLink, NavRail},
    popup,
    stack_widget::StackView,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-snapping portfolio stack")]
struct Cli {
    /// Portfolio content file (TOML).  The built-in portfolio is used otherwise.
    #[arg(long)]
    content: Option<PathBuf>,

    /// Virtual pixels per terminal row.
    #[arg(long = "px-per-row")]
    px_per_row: Option<f64>,

    /// Frame rate while something is moving.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Write the current configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,

    /// Start with section snapping disabled.
    #[arg(long = "no-snap")]
    no_snap: bool,
}

// ───────────────────────────────────────── logging ───────────

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter.add_directive(tracing::Level::INFO.into()))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ───────────

fn active_link(state: &AppState) -> Option<NavLink> {
    let active = state.controller.active_index();
    let last = state.controller.registry().last_index()?;
    Some(match active {
        0 => NavLink::About,
        i if i == last => NavLink::Contact,
        _ => NavLink::Work,
    })
}

fn draw(frame: &mut Frame, state: &mut AppState, year: i32) {
    let layout = AppLayout::from_area(frame.area());

    frame.render_widget(
        NavBar {
            owner: &state.portfolio.owner,
            active_link: active_link(state),
        },
        layout.nav_area,
    );

    frame.render_widget(
        StackView {
            layout: &state.layout,
            motion: &state.motion,
            portfolio: &state.portfolio,
            offset: state.viewport.offset(),
            px_per_row: state.config.px_per_row,
            year,
        },
        layout.stack_area,
    );

    frame.render_widget(
        NavRail {
            count: state.controller.registry().len(),
            active: state.controller.active_index(),
        },
        layout.rail_area,
    );

    let hint = state.config.status_bar_hint();
    let status_text = match state.active_view {
        ActiveView::Stack => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::Project => "↑↓/PgUp/PgDn: scroll | Esc: close",
        ActiveView::Help => "Esc: close",
    };
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    if state.show_hud {
        frame.render_widget(
            popup::ScrollHud {
                state: state.controller.state(),
                anchors: state.controller.registry().len(),
                paused: state.viewport.is_paused(),
            },
            layout.stack_area,
        );
    }

    match state.active_view {
        ActiveView::Project => {
            if let Some(modal) = state.modal.as_mut() {
                if let Some(project) = state.portfolio.project(modal.project) {
                    frame.render_stateful_widget(ProjectDetail { project }, frame.area(), modal);
                }
            }
        }
        ActiveView::Help => {
            frame.render_widget(
                popup::HelpPopup {
                    config: &state.config,
                    snap_enabled: state.controller.is_enabled(),
                },
                frame.area(),
            );
        }
        ActiveView::Stack => {}
    }
}

// ───────────────────────────────────────── event loop ────────

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
    frame_interval: Duration,
) -> Result<()> {
    let year = chrono::Local::now().year();
    let mut events = spawn_event_reader(Duration::from_millis(50));

    loop {
        scroll_runtime::advance(state, Instant::now());
        terminal.draw(|frame| draw(frame, state, year))?;

        if state.should_quit {
            break;
        }

        let wake = scroll_runtime::next_wakeup(state, Instant::now(), frame_interval);
        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let now = Instant::now();
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k, now),
                    AppEvent::Wheel { notches } => handler::handle_wheel(state, notches),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m, now),
                    AppEvent::Resize(w, h) => handler::handle_resize(state, w, h),
                }
            }

            _ = tokio::time::sleep_until(tokio::time::Instant::from_std(wake)) => {}
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut user_config = config::AppConfig::load();
    if let Some(px) = cli.px_per_row {
        user_config.px_per_row = px.clamp(1.0, 200.0);
    }

    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let portfolio = match &cli.content {
        Some(path) => Portfolio::load(path)?,
        None => Portfolio::default(),
    };
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(cli.fps.clamp(1, 240)));

    let mut state = AppState::new(portfolio, user_config, Instant::now());
    if cli.no_snap {
        state.controller.set_enabled(false);
    }
    let (width, height) = crossterm::terminal::size()?;
    handler::handle_resize(&mut state, width, height);
    tracing::info!(
        projects = state.portfolio.projects.len(),
        anchors = state.controller.registry().len(),
        "starting"
    );

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, frame_interval).await;

    // ── teardown ──────────────────────────────────────────────
    state.controller.teardown();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    tracing::info!("exiting");

    result
}
