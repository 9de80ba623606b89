use std::path::PathBuf;
use std::thread;

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioBackend;
use crate::clock::MonotonicClock;
use crate::config::PlaylistBook;
use crate::engine::Playlist;

mod event_loop;
mod frame;
mod input;
mod settings;

/// Play a named playlist in the terminal.
#[derive(Parser, Debug)]
#[command(name = "soundcue", version, about)]
pub struct Cli {
    /// Name of the playlist to play
    pub playlist: String,

    /// Folder holding the playlist file and the sounds it names
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Playlist file, relative to the data folder unless absolute
    #[arg(long, value_name = "FILE")]
    pub playlists: Option<PathBuf>,
}

/// Log panics and put the terminal back before the default hook prints.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let current_thread = thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{thread_name}': {panic_info}");
        default_hook(panic_info);
    }));
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = settings::load_settings();
    if let Some(dir) = cli.data_dir {
        settings.paths.data_dir = dir;
    }
    if let Some(file) = cli.playlists {
        settings.paths.playlists_file = file;
    }

    let book_path = settings.paths.playlists_path();
    let book = PlaylistBook::from_path(&book_path)
        .with_context(|| format!("failed to read playlists from {}", book_path.display()))?;
    let configs = book.playlist(&cli.playlist)?;

    let backend = RodioBackend::open(&settings.audio).context("failed to open the audio output")?;
    let mut playlist = Playlist::load(
        configs,
        &backend,
        &settings.paths.data_dir,
        MonotonicClock::shared(),
    )
    .with_context(|| format!("failed to load playlist {:?}", cli.playlist))?;
    log::info!(
        "loaded playlist {:?}: {} tracks, longest {:.1}s",
        cli.playlist,
        playlist.len(),
        playlist.max_duration_ms() / 1000.0
    );

    playlist.play();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut playlist, &cli.playlist);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("shutting down");
    let fading = playlist
        .current()
        .filter(|track| track.is_playing())
        .map(|track| track.fade_out_ms());
    playlist.stop();
    let grace = event_loop::quit_grace(fading, settings.audio.quit_fade_out_ms);
    if !grace.is_zero() {
        log::info!("waiting {grace:?} for the last fade-out");
        thread::sleep(grace);
    }

    run_result
}
