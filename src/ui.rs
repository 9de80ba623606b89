//! Terminal rendering.
//!
//! Draws the header, one label plus progress bar per track, and the
//! controls footer. Everything drawn comes from [`TrackView`] snapshots.

use std::ops::Range;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap, canvas::Canvas},
};

use crate::audio::Sound;
use crate::config::UiSettings;
use crate::engine::{Playlist, TrackView};

mod bars;

const CONTROLS: [(&str, &str); 3] = [("up/k", "previous"), ("down/j", "next"), ("esc/q", "quit")];

const CURSOR: &str = "> ";
const CURSOR_WIDTH: u16 = 2;

const LABEL_PLAYING: Color = Color::Rgb(255, 255, 255);
const LABEL_STOPPED: Color = Color::Rgb(170, 170, 170);

/// Braille cells hold a 2x4 grid of dots.
const DOTS_PER_COLUMN: f64 = 2.0;
const DOTS_PER_ROW: f64 = 4.0;

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(keys, action)| format!("[{keys}] {action}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Rows used by one track: label, bar, spacer.
fn slot_height(bar_rows: u16) -> u16 {
    bar_rows.saturating_add(2)
}

/// Slice of `total` items to show in `capacity` rows, keeping `selected`
/// centred when the list does not fit.
fn visible_window(total: usize, capacity: usize, selected: usize) -> Range<usize> {
    let capacity = capacity.max(1);
    if total <= capacity {
        return 0..total;
    }
    let half = capacity / 2;
    let mut start = selected.saturating_sub(half);
    if start + capacity > total {
        start = total - capacity;
    }
    start..start + capacity
}

fn label_line(view: &TrackView) -> Line<'_> {
    let color = if view.playing { LABEL_PLAYING } else { LABEL_STOPPED };
    let mut style = Style::default().fg(color);
    if view.playing {
        style = style.add_modifier(Modifier::BOLD);
    }
    let cursor = if view.current { CURSOR } else { "  " };
    Line::from(vec![
        Span::styled(cursor, Style::default().fg(LABEL_PLAYING)),
        Span::styled(view.label.as_str(), style),
    ])
}

/// Render the whole screen for `playlist`.
pub fn draw<S: Sound>(frame: &mut Frame, playlist: &Playlist<S>, name: &str, ui: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" soundcue ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let title = if playlist.is_empty() {
        format!(" {name} ")
    } else {
        format!(" {name} • track {}/{} ", playlist.current_index() + 1, playlist.len())
    };
    let block = Block::bordered()
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
        .title(title);
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    if playlist.is_empty() {
        frame.render_widget(
            Paragraph::new("playlist is empty").style(Style::default().fg(LABEL_STOPPED)),
            inner,
        );
    } else {
        draw_tracks(frame, playlist, inner, ui.bar_rows);
    }

    let footer = Paragraph::new(controls_text())
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
    frame.render_widget(footer, chunks[2]);
}

fn draw_tracks<S: Sound>(frame: &mut Frame, playlist: &Playlist<S>, area: Rect, bar_rows: u16) {
    let slot = slot_height(bar_rows);
    let bar_columns = area.width.saturating_sub(CURSOR_WIDTH);
    let dots_wide = f64::from(bar_columns) * DOTS_PER_COLUMN;
    let dots_high = f64::from(bar_rows) * DOTS_PER_ROW;

    let views = playlist.views(dots_wide, dots_high);
    let capacity = usize::from(area.height / slot);
    let window = visible_window(views.len(), capacity, playlist.current_index());

    for (row, view) in views[window].iter().enumerate() {
        // `row` is bounded by `capacity`, itself derived from a u16.
        let top = area.y + row as u16 * slot;

        let label_area = Rect {
            x: area.x,
            y: top,
            width: area.width,
            height: 1,
        }
        .intersection(area);
        frame.render_widget(Paragraph::new(label_line(view)), label_area);

        let Some(bar) = &view.bar else {
            continue;
        };
        if bar_columns == 0 {
            continue;
        }

        let bar_area = Rect {
            x: area.x + CURSOR_WIDTH,
            y: top + 1,
            width: bar_columns,
            height: bar_rows,
        }
        .intersection(area);
        if bar_area.is_empty() {
            continue;
        }

        let playing = view.playing;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, dots_wide])
            .y_bounds([0.0, dots_high - 1.0])
            .paint(|ctx| bars::paint_bar(ctx, bar, playing));
        frame.render_widget(canvas, bar_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_shows_everything_when_it_fits() {
        assert_eq!(visible_window(3, 5, 2), 0..3);
        assert_eq!(visible_window(0, 5, 0), 0..0);
    }

    #[test]
    fn window_centres_the_selection_and_sticks_to_the_ends() {
        assert_eq!(visible_window(10, 3, 0), 0..3);
        assert_eq!(visible_window(10, 3, 5), 4..7);
        assert_eq!(visible_window(10, 3, 9), 7..10);
    }

    #[test]
    fn window_keeps_the_selection_when_the_screen_is_too_short() {
        assert_eq!(visible_window(4, 0, 2), 2..3);
    }

    #[test]
    fn slot_leaves_room_for_label_and_spacer() {
        assert_eq!(slot_height(2), 4);
        assert_eq!(slot_height(u16::MAX), u16::MAX);
    }

    #[test]
    fn controls_text_lists_every_key() {
        assert_eq!(
            controls_text(),
            "[up/k] previous | [down/j] next | [esc/q] quit"
        );
    }

    #[test]
    fn label_line_marks_the_cursor() {
        let view = TrackView {
            label: "Intro | 0:01.0 / 0:10.0".to_string(),
            playing: true,
            current: true,
            bar: None,
        };
        let line = label_line(&view);
        assert_eq!(line.spans[0].content, CURSOR);
        assert_eq!(line.spans[1].content, "Intro | 0:01.0 / 0:10.0");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }
}
