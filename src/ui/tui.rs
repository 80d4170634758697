// src/ui/tui.rs
//! Terminal setup and the main event loop.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{
    app::FilesApp,
    config::Config,
    fs::LocalDrives,
    transfer::{ChunkFileSink, MessageKind},
    ui::keybindings::key_to_action,
};

/// Longest wait between redraws when no transfer is running.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the applet in the terminal until the user quits.
///
/// `request` is delivered as an incoming message right after the window opens.
pub fn run(config: Config, request: Option<String>) -> Result<()> {
    let sink = ChunkFileSink::create(&config.output)
        .with_context(|| format!("creating {}", config.output.display()))?;
    info!("chunks go to {}", sink.path().display());

    let mut app = FilesApp::run(LocalDrives::new(config.drives), sink, config.transfer);
    app.open_window();
    app.open_shortcut();
    if let Some(text) = request {
        app.on_message_received(MessageKind::Text, text.as_bytes());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        "{} chunks, {} bytes written",
        app.channel.messages(),
        app.channel.bytes()
    );
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut FilesApp<LocalDrives, ChunkFileSink>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        let now = Instant::now();
        let timeout = app
            .next_due(now)
            .map_or(TICK_RATE, |due| due.min(TICK_RATE));

        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let text_entry = app.prompt.is_some()
                        || app
                            .settings_panel
                            .as_ref()
                            .is_some_and(|p| p.editing().is_some());
                    if app.on_action(key_to_action(&key, text_entry)) {
                        return Ok(());
                    }
                }
            }
        }

        app.tick(Instant::now());
    }
}
