/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use pokedex::CatalogConfig;
use pokedex_telemetry::DEFAULT_LOG_FILE;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

/// Selectable color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ThemeName {
    /// Nord, an arctic, north-bluish color palette.
    #[default]
    Nord,
    /// Desaturated Nord accents for light backgrounds.
    Light,
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Nord => write!(f, "nord"),
            ThemeName::Light => write!(f, "light"),
        }
    }
}

/// Command-line arguments for the catalog TUI.
#[derive(Debug, Parser)]
#[command(name = "pokedex-tui", about = "Browse the Pokémon catalog from a terminal")]
pub(crate) struct Args {
    /// Paginated list endpoint (overrides POKEDEX_LIST_URL)
    #[arg(long)]
    pub(crate) list_url: Option<String>,

    /// Detail endpoint (`<url>/<name>`)
    #[arg(long)]
    pub(crate) detail_url: Option<String>,

    /// Lookup proxy (`<url>?name=<name>`); looked up in-process when unset
    #[arg(long)]
    pub(crate) lookup_url: Option<String>,

    /// Rows per page (overrides POKEDEX_PAGE_SIZE)
    #[arg(long)]
    pub(crate) page_size: Option<usize>,

    /// Color theme
    #[arg(long, default_value_t = ThemeName::Nord, value_enum)]
    pub(crate) theme: ThemeName,

    /// Log file (see POKEDEX_LOG_SINK)
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub(crate) log_file: PathBuf,
}

impl Args {
    /// Catalog configuration from the environment with command-line
    /// overrides applied.
    pub(crate) fn config(&self) -> CatalogConfig {
        self.config_from(CatalogConfig::from_env())
    }

    /// Applies explicitly passed flags on top of `base`.
    pub(crate) fn config_from(&self, mut config: CatalogConfig) -> CatalogConfig {
        if let Some(url) = &self.list_url {
            config.list_url = url.clone();
        }
        if let Some(url) = &self.detail_url {
            config.detail_url = url.clone();
        }
        if let Some(url) = &self.lookup_url {
            config.lookup_url = Some(url.clone());
        }
        match self.page_size {
            Some(0) => tracing::warn!(
                "ignoring --page-size 0; keeping page size {}",
                config.page_size
            ),
            Some(size) => config.page_size = size,
            None => {}
        }
        config
    }
}

/// All user-visible text in the TUI.
pub(crate) struct Labels {
    pub(crate) app_name: &'static str,
    pub(crate) separator: &'static str,
    pub(crate) selection_caret: &'static str,
    pub(crate) loading: &'static str,

    pub(crate) pane_table: &'static str,
    pub(crate) pane_filter: &'static str,
    pub(crate) filter_placeholder: &'static str,
    pub(crate) no_rows: &'static str,
    pub(crate) previous: &'static str,
    pub(crate) next: &'static str,

    pub(crate) loading_details: &'static str,
    pub(crate) abilities: &'static str,
    pub(crate) stats: &'static str,
    pub(crate) pane_error: &'static str,

    pub(crate) footer_help_text: &'static str,
    pub(crate) footer_help_editing: &'static str,
    pub(crate) footer_help_overlay: &'static str,
}

impl Labels {
    pub(crate) fn en() -> Self {
        Self {
            app_name: "pokedex",
            separator: " • ",
            selection_caret: "▸ ",
            loading: "Loading…",
            pane_table: "Pokémon",
            pane_filter: "Filter",
            filter_placeholder: "press / to search by exact name",
            no_rows: "No Pokémon",
            previous: "◀ Previous",
            next: "Next ▶",
            loading_details: "Loading Details",
            abilities: "Abilities",
            stats: "Stats",
            pane_error: "Error",
            footer_help_text: "q: quit | j/k: navigate | n/p: page | /: filter | x: clear | Enter: details | R: reset",
            footer_help_editing: "Enter: search | Esc: stop editing | Backspace: delete",
            footer_help_overlay: "Esc/q: close",
        }
    }
}

/// Color scheme for the TUI.
///
/// Each field is a semantic role; themes assign concrete colors.
pub(crate) struct ColorScheme {
    // UI chrome
    pub(crate) app_name: Style,
    pub(crate) border: Style,
    pub(crate) border_focused: Style,
    pub(crate) footer_help: Style,

    // Semantic states
    pub(crate) error: Style,
    pub(crate) info: Style,
    pub(crate) loading: Style,

    // Header
    pub(crate) stat_label: Style,
    pub(crate) stat_url: Style,

    // Table
    pub(crate) row: Style,
    pub(crate) row_selected: Style,
    pub(crate) nav_enabled: Style,
    pub(crate) nav_disabled: Style,

    // Overlay
    pub(crate) detail_label: Style,
    pub(crate) detail_value: Style,
}

impl ColorScheme {
    /// Nord color scheme (https://www.nordtheme.com/).
    pub(crate) fn nord() -> Self {
        let polar3 = Color::Rgb(76, 86, 106); // #4C566A
        let snow0 = Color::Rgb(216, 222, 233); // #D8DEE9
        let snow2 = Color::Rgb(236, 239, 244); // #ECEFF4
        let frost_cyan = Color::Rgb(136, 192, 208); // #88C0D0
        let frost_blue = Color::Rgb(129, 161, 193); // #81A1C1
        let aurora_red = Color::Rgb(191, 97, 106); // #BF616A
        let aurora_yellow = Color::Rgb(235, 203, 139); // #EBCB8B
        let aurora_green = Color::Rgb(163, 190, 140); // #A3BE8C
        let aurora_purple = Color::Rgb(180, 142, 173); // #B48EAD

        Self {
            app_name: Style::default().fg(frost_cyan).add_modifier(Modifier::BOLD),
            border: Style::default().fg(polar3),
            border_focused: Style::default().fg(frost_cyan),
            footer_help: Style::default().fg(polar3),

            error: Style::default().fg(aurora_red),
            info: Style::default().fg(frost_cyan),
            loading: Style::default().fg(aurora_yellow),

            stat_label: Style::default().fg(snow0),
            stat_url: Style::default().fg(polar3),

            row: Style::default().fg(frost_blue),
            row_selected: Style::default()
                .fg(aurora_purple)
                .add_modifier(Modifier::BOLD),
            nav_enabled: Style::default().fg(aurora_green),
            nav_disabled: Style::default().fg(polar3),

            detail_label: Style::default().fg(snow0),
            detail_value: Style::default().fg(snow2).add_modifier(Modifier::BOLD),
        }
    }

    /// Light color scheme (doom-nord-light accents).
    pub(crate) fn light() -> Self {
        let base7 = Color::Rgb(96, 114, 140); // #60728C
        let fg = Color::Rgb(59, 66, 82); // #3B4252
        let fg_alt = Color::Rgb(46, 52, 64); // #2E3440
        let red = Color::Rgb(153, 50, 75); // #99324B
        let green = Color::Rgb(79, 137, 76); // #4F894C
        let yellow = Color::Rgb(154, 117, 0); // #9A7500
        let blue = Color::Rgb(59, 110, 168); // #3B6EA8
        let teal = Color::Rgb(41, 131, 141); // #29838D
        let cyan = Color::Rgb(57, 142, 172); // #398EAC
        let violet = Color::Rgb(132, 40, 121); // #842879

        Self {
            app_name: Style::default().fg(teal).add_modifier(Modifier::BOLD),
            border: Style::default().fg(base7),
            border_focused: Style::default().fg(cyan),
            footer_help: Style::default().fg(base7),

            error: Style::default().fg(red),
            info: Style::default().fg(cyan),
            loading: Style::default().fg(yellow),

            stat_label: Style::default().fg(fg),
            stat_url: Style::default().fg(base7),

            row: Style::default().fg(blue),
            row_selected: Style::default().fg(violet).add_modifier(Modifier::BOLD),
            nav_enabled: Style::default().fg(green),
            nav_disabled: Style::default().fg(base7),

            detail_label: Style::default().fg(fg),
            detail_value: Style::default().fg(fg_alt).add_modifier(Modifier::BOLD),
        }
    }
}

/// Complete visual presentation: colors + text.
pub(crate) struct Theme {
    pub(crate) scheme: ColorScheme,
    pub(crate) labels: Labels,
}

impl Theme {
    pub(crate) fn new(theme_name: ThemeName) -> Self {
        let scheme = match theme_name {
            ThemeName::Nord => ColorScheme::nord(),
            ThemeName::Light => ColorScheme::light(),
        };
        Self {
            scheme,
            labels: Labels::en(),
        }
    }
}
