/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Terminal browser for the Pokémon catalog.
//!
//! Shows the catalog as a paginated table, one page per request,
//! with an exact-name filter and a detail overlay per row.
//!
//! - **Pages** are fetched by following the API's `next` / `previous`
//!   cursors and cached by URL for the session; revisiting a page
//!   never touches the network.
//! - **Filter**: a submitted name replaces the table with the single
//!   match and hides pagination. A miss keeps the current page and
//!   reports the error in the header.
//! - **Details**: Enter on a row opens an overlay with the entry's
//!   ability and stat names. Lookups are cached; reopening is free.
//! - **Concurrency**: every fetch runs on its own task and reports
//!   back over a channel. Only the latest request per controller is
//!   applied; superseded responses are cached and otherwise dropped.
//!
//! Logs go to `pokedex_tui.log` by default (`POKEDEX_LOG_SINK`,
//! `RUST_LOG`).
//!
//! ```bash
//! pokedex_tui --theme light --page-size 30
//! ```

mod actions;
mod app;
mod cursor;
mod render;
mod theme;

use std::io;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

pub(crate) use actions::*;
use anyhow::Context;
pub(crate) use app::*;
use clap::Parser;
use crossterm::ExecutableCommand;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
pub(crate) use cursor::*;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use pokedex::CatalogClient;
use pokedex::CatalogEnvelope;
use pokedex::HttpCatalogClient;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
pub(crate) use theme::*;

// Terminal setup / teardown

/// Put the terminal into "TUI mode".
///
/// Enables raw mode, switches to the alternate screen, and clears it,
/// returning a `ratatui::Terminal` backed by crossterm.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restore the terminal back to normal "shell mode".
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !io::stdout().is_terminal() {
        eprintln!("This TUI requires a real terminal.");
        return Ok(());
    }

    let sink = pokedex_telemetry::init_logging(&args.log_file)?;
    let config = args.config();
    tracing::info!(?sink, list_url = %config.list_url, page_size = config.page_size, "starting");
    let client = Arc::new(
        HttpCatalogClient::new(config.clone()).context("failed to build HTTP client")?,
    );

    // Spinner on stderr while the first page loads, before the
    // alternate screen takes over.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("pokedex: loading {} ...", config.list_url));
    spinner.enable_steady_tick(Duration::from_millis(80));
    let initial = client.initial_page().await;
    spinner.finish_and_clear();

    let (initial, error) = match initial {
        Ok(envelope) => (envelope, None),
        Err(err) => {
            tracing::error!(error = %err, "initial page failed");
            (
                CatalogEnvelope::empty(),
                Some(format!("Failed to load Pokémon: {}", err)),
            )
        }
    };

    let mut app = App::new(client, config, initial, args.theme);
    app.error = error;

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, app).await;
    restore_terminal(&mut terminal)?;
    Ok(result?)
}

#[cfg(test)]
mod tests;
