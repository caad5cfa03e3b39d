/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;

use crate::App;
use crate::InputMode;
use crate::ThemeName;

/// Render the top header: app name, endpoint, theme, and on the
/// second line either the most relevant error or the loading state.
pub(crate) fn render_header(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let l = &app.theme.labels;
    let scheme = &app.theme.scheme;

    let mut line1 = vec![
        Span::styled(l.app_name, scheme.app_name),
        Span::styled(l.separator, scheme.stat_label),
        Span::styled(&app.endpoint, scheme.stat_url),
    ];
    // Skip the default theme to reduce noise.
    if app.theme_name != ThemeName::Nord {
        line1.extend([
            Span::styled(l.separator, scheme.stat_label),
            Span::styled(format!("theme:{}", app.theme_name), scheme.stat_label),
        ]);
    }

    let error = app.error.as_deref().or(app.view.table_error());
    let line2 = if let Some(err) = error {
        Line::from(Span::styled(format!("ERROR: {}", err), scheme.error))
    } else if app.loading() {
        Line::from(Span::styled(l.loading, scheme.loading))
    } else {
        Line::from(Span::styled(
            format!("{} total", app.view.pagination().current().count),
            scheme.info,
        ))
    };

    let header = Paragraph::new(vec![Line::from(line1), line2]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(scheme.border),
    );
    frame.render_widget(header, area);
}

/// Render the filter input box.
pub(crate) fn render_filter_bar(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let l = &app.theme.labels;
    let scheme = &app.theme.scheme;
    let editing = app.input_mode == InputMode::EditFilter;

    let text = if app.view.filter_input().is_empty() && !editing {
        Span::styled(l.filter_placeholder, scheme.footer_help)
    } else if editing {
        Span::styled(format!("{}▏", app.view.filter_input()), scheme.stat_label)
    } else {
        Span::styled(app.view.filter_input(), scheme.stat_label)
    };
    let border = if editing {
        scheme.border_focused
    } else {
        scheme.border
    };
    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title(l.pane_filter)
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(input, area);
}

/// Render Previous / "Page i of n" / Next.
pub(crate) fn render_pagination(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let l = &app.theme.labels;
    let scheme = &app.theme.scheme;
    let pagination = app.view.pagination();
    let nav = |enabled: bool| {
        if enabled {
            scheme.nav_enabled
        } else {
            scheme.nav_disabled
        }
    };

    let line = Line::from(vec![
        Span::styled(l.previous, nav(pagination.has_previous())),
        Span::styled("   ", scheme.stat_label),
        Span::styled(app.view.page_label(), scheme.stat_label),
        Span::styled("   ", scheme.stat_label),
        Span::styled(l.next, nav(pagination.has_next())),
    ]);
    frame.render_widget(Paragraph::new(line).centered(), area);
}

/// Render the bottom help bar for the current input mode.
pub(crate) fn render_footer(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let l = &app.theme.labels;
    let help = if app.input_mode == InputMode::EditFilter {
        l.footer_help_editing
    } else if app.view.overlay_open() {
        l.footer_help_overlay
    } else {
        l.footer_help_text
    };
    let footer = Paragraph::new(help)
        .style(app.theme.scheme.footer_help)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}
