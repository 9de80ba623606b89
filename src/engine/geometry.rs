//! Fade triangle geometry for progress bars.
//!
//! Coordinates are renderer pixels with y growing downward. The bar's
//! bottom edge sits at `y + height - 1`, matching how an outlined rectangle
//! of `height` pixels is rasterised.

pub type Point = (f64, f64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

/// Where one track's progress bar is drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    /// Full width of this track's bar.
    pub width: f64,
    /// Width of the elapsed-time fill.
    pub filled: f64,
}

/// Outline of a fade plus the part of it already covered.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeGeometry {
    pub outline: Vec<Point>,
    pub fill: Option<Vec<Point>>,
}

/// Build the fade triangle for a fade lasting `fade_ms` on a track of
/// `duration_ms`.
///
/// `progress` is the fill ratio in `0..=1`, measured from the triangle's
/// point: for a fade-in that is the elapsed share of the fade, for a
/// fade-out it is the share still left to fade.
///
/// Returns `None` when there is nothing to draw (no fade, unknown or zero
/// duration, zero-width bar).
pub fn fade_triangle(
    bar: &BarRect,
    fade_ms: f64,
    duration_ms: f64,
    progress: f64,
    direction: FadeDirection,
) -> Option<FadeGeometry> {
    if !(fade_ms > 0.0 && duration_ms > 0.0 && bar.width > 0.0 && bar.height > 0.0) {
        return None;
    }

    let fade_width = fade_ms * bar.width / duration_ms;
    let bottom = bar.y + bar.height - 1.0;
    let edge = bar.x + bar.filled;

    let outline = match direction {
        FadeDirection::In => vec![
            (bar.x, bottom),
            (bar.x + fade_width, bottom),
            (bar.x + fade_width, bar.y),
        ],
        FadeDirection::Out => vec![
            (edge, bottom),
            (edge, bar.y),
            (edge + fade_width, bottom),
        ],
    };

    let progress = progress.clamp(0.0, 1.0);
    let fill = if progress > 0.0 && progress < 1.0 {
        let fill_width = fade_width * progress;
        // Similar triangles: height grows with width at the outline's slope.
        let fill_height = fill_width * (bar.height / fade_width);
        let fill_top = bar.y + bar.height - fill_height;

        Some(match direction {
            FadeDirection::In => vec![
                (bar.x, bottom),
                (bar.x + fill_width, bottom),
                (bar.x + fill_width, fill_top),
            ],
            FadeDirection::Out => {
                let reach = edge + (fade_width - fill_width);
                vec![(edge, bottom), (edge, bar.y), (reach, fill_top), (reach, bottom)]
            }
        })
    } else {
        let complete = match direction {
            FadeDirection::In => progress >= 1.0,
            FadeDirection::Out => progress <= 0.0,
        };
        complete.then(|| outline.clone())
    };

    Some(FadeGeometry { outline, fill })
}

/// Fill ratio of a fade-in `elapsed_ms` into playback.
pub fn fade_in_progress(elapsed_ms: f64, fade_in_ms: f64) -> f64 {
    if fade_in_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / fade_in_ms).clamp(0.0, 1.0)
}

/// Fill ratio of a fade-out `since_stop_ms` after the stop, or `None`
/// before any stop. Counts down from 1 (untouched) to 0 (faded).
pub fn fade_out_progress(since_stop_ms: Option<f64>, fade_out_ms: f64) -> f64 {
    match since_stop_ms {
        None => 1.0,
        Some(_) if fade_out_ms <= 0.0 => 0.0,
        Some(ms) => 1.0 - (ms / fade_out_ms).clamp(0.0, 1.0),
    }
}
