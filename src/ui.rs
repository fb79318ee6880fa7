//! UI rendering helpers for the terminal user interface.
//!
//! `draw` is pure given the session state: the same `App` renders the same
//! frame. It returns the screen regions the mouse handler needs for
//! hit-testing (progress bar, result rows, queue rows).

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, Drag, Pane};
use crate::config::{ControlsSettings, UiSettings};
use crate::player::{PlaybackState, progress_fraction};

/// Screen regions recorded while drawing, consumed by the mouse handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct HitAreas {
    /// Inner area of the progress bar.
    pub progress: Rect,
    /// Inner area of the result dropdown, one result per row.
    pub results: Option<Rect>,
    /// Index of the first visible result row.
    pub results_offset: usize,
    /// Inner area of the queue list, one track per row.
    pub queue_rows: Rect,
    /// Index of the first visible queue row.
    pub queue_offset: usize,
}

/// Whether a terminal cell lies inside `rect`.
pub fn in_rect(column: u16, row: u16, rect: Rect) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Visible window of a list: keeps `selected` centered when the list is
/// longer than `height` rows.
fn window_bounds(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        block
    }
}

fn controls_text(pane: Pane, seek_step_secs: u64) -> String {
    match pane {
        Pane::Search => {
            "[type] search | [↓/↑] results | [enter] add | [esc] close | [tab] queue | [ctrl-c] quit"
                .to_string()
        }
        Pane::Queue => format!(
            "[j/k] move | [ctrl-j/k] reorder | [enter] play now | [x] remove | [space] pause | [n] skip | [H/L] seek -/+{seek_step_secs}s | [tab] search | [q] quit"
        ),
    }
}

/// Render the entire UI and report the hit-test regions.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> HitAreas {
    let mut hit = HitAreas::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Search input
    {
        let focused = app.pane == Pane::Search;
        let mut text = app.search.input().to_string();
        if focused {
            text.push('█');
        }
        let title = if app.search.lookup_pending() {
            " search … "
        } else {
            " search "
        };
        let input = Paragraph::new(text).block(
            pane_block(title, focused).padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
        );
        frame.render_widget(input, chunks[1]);
    }

    // Now playing + progress bar
    {
        let block = Block::default().borders(Borders::ALL).title(" now playing ");
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let line = match (&app.player.name, app.player.state()) {
            (Some(name), state) => {
                let state_text = match state {
                    PlaybackState::Playing => "Playing",
                    PlaybackState::Paused => "Paused",
                    PlaybackState::Stopped => "Stopped",
                };
                let time = match app.player.duration {
                    Some(total) => format!(
                        "{} / {}",
                        format_mmss(app.player.elapsed),
                        format_mmss(total)
                    ),
                    None => format_mmss(app.player.elapsed),
                };
                format!("Song: {name} • {time} • {state_text}")
            }
            (None, _) => ui_settings.idle_text.clone(),
        };
        frame.render_widget(Paragraph::new(line), rows[0]);

        // A drag-in-progress previews its target instead of the tick value.
        let fraction = match app.drag {
            Some(Drag::Seek { fraction }) => Some(fraction),
            _ => progress_fraction(&app.player),
        };
        let gauge = Gauge::default()
            .ratio(fraction.unwrap_or(0.0).clamp(0.0, 1.0))
            .label("")
            .gauge_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_widget(gauge, rows[1]);
        hit.progress = rows[1];
    }

    // Queue list
    {
        let focused = app.pane == Pane::Queue;
        let title = format!(" queue ({}) ", app.queue.len());
        let block = pane_block(&title, focused);
        let inner = block.inner(chunks[3]);

        let total = app.queue.len();
        let (start, end) = window_bounds(total, inner.height as usize, app.queue_cursor);

        let items: Vec<ListItem> = app.queue.tracks()[start..end]
            .iter()
            .enumerate()
            .map(|(offset, name)| ListItem::new(format!("{}. {}", start + offset + 1, name)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 && app.queue_cursor >= start && app.queue_cursor < end {
            state.select(Some(app.queue_cursor - start));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);

        hit.queue_rows = inner;
        hit.queue_offset = start;
    }

    // Footer
    {
        let footer = Paragraph::new(controls_text(app.pane, controls_settings.seek_step_secs))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" controls ")
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, chunks[4]);
    }

    // Search-result dropdown, overlaid below the input
    if app.search.dropdown_shown() {
        let total = app.search.results().len();
        let visible = (ui_settings.results_rows as usize).max(1);
        let rows = total.clamp(1, visible);

        let area = frame.area();
        let y = chunks[1].y + chunks[1].height;
        let max_height = area.height.saturating_sub(y);
        let height = ((rows + 2) as u16).min(max_height);

        if height > 2 {
            let popup = Rect {
                x: chunks[1].x + 2,
                y,
                width: chunks[1].width.saturating_sub(4),
                height,
            };
            frame.render_widget(Clear, popup);

            let block = Block::default().borders(Borders::ALL).title(" results ");
            let inner = block.inner(popup);

            if app.search.no_results() {
                let placeholder = Paragraph::new("No results found")
                    .style(Style::default().add_modifier(Modifier::DIM))
                    .block(block);
                frame.render_widget(placeholder, popup);
                hit.results = None;
            } else {
                let selected = app.search.cursor().unwrap_or(0);
                let (start, end) = window_bounds(total, inner.height as usize, selected);

                let items: Vec<ListItem> = app.search.results()[start..end]
                    .iter()
                    .map(|name| ListItem::new(name.as_str()))
                    .collect();
                let list = List::new(items)
                    .block(block)
                    .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
                let mut state = ratatui::widgets::ListState::default();
                if let Some(cursor) = app.search.cursor() {
                    if cursor >= start && cursor < end {
                        state.select(Some(cursor - start));
                    }
                }
                frame.render_stateful_widget(list, popup, &mut state);

                hit.results = Some(inner);
                hit.results_offset = start;
            }
        }
    }

    // Transient error banner over the footer
    if let Some(message) = app.banner_message() {
        let area = chunks[4];
        frame.render_widget(Clear, area);
        let banner = Paragraph::new(message)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" error ")
                    .border_style(Style::default().add_modifier(Modifier::RAPID_BLINK)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(banner, area);
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    use crate::config::Settings;

    fn sample_app(settings: &Settings) -> App {
        let mut app = App::new(settings);
        app.queue.enqueue("abbey road".to_string());
        app.queue.enqueue("paranoid".to_string());
        app.queue_cursor = 1;
        app.search.apply_results(vec!["abba".to_string(), "abbey road".to_string()]);
        app
    }

    #[test]
    fn rendering_twice_without_mutation_is_identical() {
        let settings = Settings::default();
        let app = sample_app(&settings);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| {
                draw(frame, &app, &settings.ui, &settings.controls);
            })
            .unwrap();
        let first = terminal.backend().buffer().clone();

        terminal
            .draw(|frame| {
                draw(frame, &app, &settings.ui, &settings.controls);
            })
            .unwrap();
        assert_eq!(terminal.backend().buffer(), &first);
    }

    #[test]
    fn draw_reports_usable_hit_regions() {
        let settings = Settings::default();
        let app = sample_app(&settings);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        let mut hit = HitAreas::default();
        terminal
            .draw(|frame| {
                hit = draw(frame, &app, &settings.ui, &settings.controls);
            })
            .unwrap();

        assert!(hit.progress.width > 0);
        assert!(hit.queue_rows.height >= 2);
        assert_eq!(hit.queue_offset, 0);

        // Two results, dropdown shown.
        let results = hit.results.unwrap();
        assert_eq!(results.height, 2);

        // Queue rows hit-test where the list was drawn.
        assert!(in_rect(hit.queue_rows.x, hit.queue_rows.y, hit.queue_rows));
        assert!(!in_rect(
            hit.queue_rows.x,
            hit.queue_rows.y + hit.queue_rows.height,
            hit.queue_rows
        ));
    }

    #[test]
    fn window_bounds_keeps_the_selection_visible() {
        // Short lists are shown whole.
        assert_eq!(window_bounds(3, 10, 0), (0, 3));
        // Long lists center the selection.
        let (start, end) = window_bounds(100, 10, 50);
        assert!(start <= 50 && 50 < end);
        assert_eq!(end - start, 10);
        // The tail clamps instead of running past the end.
        assert_eq!(window_bounds(100, 10, 99), (90, 100));
        assert_eq!(window_bounds(100, 10, 0), (0, 10));
    }

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::from_secs(0)), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
        assert_eq!(format_mmss(Duration::from_secs(600)), "10:00");
    }
}
