//! Progress bars drawn on a braille canvas.
//!
//! Bar geometry arrives in bar-local dots with y growing downward; the
//! canvas has y growing upward, so every point is flipped on the way in.

use ratatui::style::Color;
use ratatui::widgets::canvas::{Context, Line as Segment, Rectangle};

use crate::engine::{BarView, FadeGeometry, Point};

const FILL_PLAYING: Color = Color::Rgb(200, 200, 200);
const FILL_STOPPED: Color = Color::Rgb(145, 145, 145);
const BORDER_PLAYING: Color = Color::Rgb(255, 255, 255);
const BORDER_STOPPED: Color = Color::Rgb(170, 170, 170);
const FADE_IN: Color = Color::Rgb(100, 255, 100);
const FADE_OUT: Color = Color::Rgb(255, 100, 100);
const AUTO_END: Color = Color::Rgb(100, 100, 255);

/// One dot on a braille canvas.
const STEP: f64 = 1.0;

pub(super) fn paint_bar(ctx: &mut Context, bar: &BarView, playing: bool) {
    let bottom = bar.height - 1.0;
    let flip = |(x, y): Point| (x, bottom - y);

    let (fill, border) = if playing {
        (FILL_PLAYING, BORDER_PLAYING)
    } else {
        (FILL_STOPPED, BORDER_STOPPED)
    };

    let mut x = STEP / 2.0;
    while x < bar.filled {
        ctx.draw(&Segment::new(x, 0.0, x, bottom, fill));
        x += STEP;
    }
    ctx.layer();

    if let Some(fade) = &bar.fade_in {
        paint_fade(ctx, fade, FADE_IN, &flip);
    }
    if let Some(fade) = &bar.fade_out {
        paint_fade(ctx, fade, FADE_OUT, &flip);
    }

    if let Some(marker) = bar.auto_end_marker {
        ctx.draw(&Segment::new(marker, 0.0, marker, bottom, AUTO_END));
    }

    ctx.draw(&Rectangle {
        x: 0.0,
        y: 0.0,
        width: bar.width,
        height: bottom,
        color: border,
    });
}

fn paint_fade(ctx: &mut Context, fade: &FadeGeometry, color: Color, flip: &dyn Fn(Point) -> Point) {
    if let Some(fill) = &fade.fill {
        let flipped: Vec<Point> = fill.iter().copied().map(flip).collect();
        for (x, low, high) in vertical_spans(&flipped, STEP) {
            ctx.draw(&Segment::new(x, low, x, high, color));
        }
    }

    let outline: Vec<Point> = fade.outline.iter().copied().map(flip).collect();
    for (i, &(x1, y1)) in outline.iter().enumerate() {
        let (x2, y2) = outline[(i + 1) % outline.len()];
        ctx.draw(&Segment::new(x1, y1, x2, y2, color));
    }
}

/// Cover a convex polygon with vertical segments `step` apart.
/// Each item is `(x, y_low, y_high)`.
pub(super) fn vertical_spans(points: &[Point], step: f64) -> Vec<(f64, f64, f64)> {
    if points.len() < 3 || step <= 0.0 {
        return Vec::new();
    }

    let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);

    let mut spans = Vec::new();
    let mut x = min_x + step / 2.0;
    while x <= max_x {
        let mut low = f64::INFINITY;
        let mut high = f64::NEG_INFINITY;
        for (i, &(x1, y1)) in points.iter().enumerate() {
            let (x2, y2) = points[(i + 1) % points.len()];
            if (x < x1.min(x2)) || (x > x1.max(x2)) || x1 == x2 {
                continue;
            }
            let y = y1 + (y2 - y1) * (x - x1) / (x2 - x1);
            low = low.min(y);
            high = high.max(y);
        }
        if low <= high {
            spans.push((x, low, high));
        }
        x += step;
    }
    spans
}
