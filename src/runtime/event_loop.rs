use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::Sound;
use crate::config;
use crate::engine::Playlist;
use crate::runtime::frame::FrameLimiter;
use crate::runtime::input::{Action, action_for};
use crate::ui;

/// Main terminal loop. One pass per frame: wait for the tick, apply queued
/// key presses, advance past finished tracks, draw. Returns `Ok(())` when
/// the user quits.
pub fn run<S: Sound>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    playlist: &mut Playlist<S>,
    name: &str,
) -> anyhow::Result<()> {
    let mut limiter = FrameLimiter::new(settings.ui.frame_rate);
    log::debug!("frame period {:?}", limiter.period());

    loop {
        limiter.wait();

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match action_for(key) {
                Some(Action::Quit) => return Ok(()),
                Some(Action::Next) => playlist.next(),
                Some(Action::Previous) => playlist.previous(),
                None => {}
            }
        }

        playlist.check_auto_end();

        terminal.draw(|f| ui::draw(f, playlist, name, &settings.ui))?;
    }
}

/// How long to keep the process alive after the final stop so the last
/// fade-out is heard: the track's own fade, capped at `cap_ms`.
pub fn quit_grace(fade_out_ms: Option<u64>, cap_ms: u64) -> Duration {
    Duration::from_millis(fade_out_ms.unwrap_or(0).min(cap_ms))
}
