use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::audio::{LoadError, Loops, Sound, SoundLoader};
use crate::clock::{ManualClock, SharedClock};
use crate::config::TrackConfig;

#[derive(Debug, Clone, PartialEq)]
enum SoundEvent {
    Volume(f32),
    Play(Loops, Duration),
    FadeOut(Duration),
}

struct FakeSound {
    length: Duration,
    events: Vec<SoundEvent>,
}

impl Sound for FakeSound {
    fn set_volume(&mut self, volume: f32) {
        self.events.push(SoundEvent::Volume(volume));
    }

    fn play(&mut self, loops: Loops, fade_in: Duration) {
        self.events.push(SoundEvent::Play(loops, fade_in));
    }

    fn fade_out(&mut self, fade: Duration) {
        self.events.push(SoundEvent::FadeOut(fade));
    }

    fn length(&self) -> Duration {
        self.length
    }
}

/// Knows a fixed set of files and their lengths; anything else fails to open.
#[derive(Default)]
struct FakeLoader {
    lengths_ms: HashMap<PathBuf, u64>,
}

impl FakeLoader {
    fn with(mut self, path: &str, length_ms: u64) -> Self {
        self.lengths_ms.insert(PathBuf::from(path), length_ms);
        self
    }
}

impl SoundLoader for FakeLoader {
    type Sound = FakeSound;

    fn load(&self, path: &Path) -> Result<FakeSound, LoadError> {
        match self.lengths_ms.get(path) {
            Some(ms) => Ok(FakeSound {
                length: Duration::from_millis(*ms),
                events: Vec::new(),
            }),
            None => Err(LoadError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }
}

fn file(name: &str, path: &str) -> TrackConfig {
    TrackConfig {
        file: Some(PathBuf::from(path)),
        ..TrackConfig::silence(name)
    }
}

fn silence(name: &str, end_ms: Option<u64>) -> TrackConfig {
    TrackConfig {
        end_ms,
        ..TrackConfig::silence(name)
    }
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(1_000_000_000))
}

fn shared(clock: &Arc<ManualClock>) -> SharedClock {
    clock.clone()
}

fn loader() -> FakeLoader {
    FakeLoader::default()
        .with("data/a.wav", 10_000)
        .with("data/b.wav", 4_000)
        .with("data/long.wav", 60_000)
}

fn track(config: &TrackConfig, clock: &Arc<ManualClock>) -> Track<FakeSound> {
    Track::new(config, &loader(), Path::new("data"), shared(clock)).unwrap()
}

fn playlist(configs: &[TrackConfig], clock: &Arc<ManualClock>) -> Playlist<FakeSound> {
    Playlist::load(configs, &loader(), Path::new("data"), shared(clock)).unwrap()
}

fn events(track: &Track<FakeSound>) -> Vec<SoundEvent> {
    track.sound().map(|s| s.events.clone()).unwrap_or_default()
}

#[test]
fn never_played_track_has_zero_elapsed() {
    let clock = clock();
    let t = track(&file("A", "a.wav"), &clock);
    clock.advance_ms(5_000);
    assert_eq!(t.elapsed_ns(), 0);
    assert!(!t.is_playing());
}

#[test]
fn elapsed_follows_the_clock_while_playing() {
    let clock = clock();
    let mut t = track(&file("A", "a.wav"), &clock);
    t.play();

    assert_eq!(t.elapsed_ns(), 0);
    clock.advance_ms(250);
    let first = t.elapsed_ns();
    assert_eq!(first, t.elapsed_ns());
    assert_eq!(first, 250_000_000);

    clock.advance_ns(1);
    assert!(t.elapsed_ns() > first);
    assert_eq!(t.elapsed_ms(), 250.000001);
}

#[test]
fn elapsed_freezes_after_stop() {
    let clock = clock();
    let mut t = track(&file("A", "a.wav"), &clock);
    t.play();
    clock.advance_ms(1_500);
    t.stop();

    clock.advance_ms(10_000);
    assert_eq!(t.elapsed_ns(), 1_500_000_000);
    assert!(!t.is_playing());

    // A second stop must not move the frozen time.
    t.stop();
    clock.advance_ms(10_000);
    assert_eq!(t.elapsed_ns(), 1_500_000_000);
}

#[test]
fn replay_restarts_the_timer() {
    let clock = clock();
    let mut t = track(&file("A", "a.wav"), &clock);
    t.play();
    clock.advance_ms(3_000);
    t.stop();
    clock.advance_ms(1_000);
    t.play();
    clock.advance_ms(200);
    assert_eq!(t.elapsed_ns(), 200_000_000);
    assert!(t.is_playing());
}

#[test]
fn construction_loads_from_data_dir_and_applies_volume() {
    let clock = clock();
    let config = TrackConfig {
        volume: 0.4,
        ..file("A", "a.wav")
    };
    let t = track(&config, &clock);
    assert!(!t.is_silent());
    assert_eq!(t.duration_ms(), Some(10_000.0));
    assert_eq!(events(&t), vec![SoundEvent::Volume(0.4)]);
}

#[test]
fn play_and_stop_drive_the_sound_with_loop_and_fades() {
    let clock = clock();
    let config = TrackConfig {
        looping: true,
        fade_in_ms: 2_000,
        fade_out_ms: 750,
        ..file("A", "a.wav")
    };
    let mut t = track(&config, &clock);
    t.play();
    t.stop();

    assert_eq!(
        events(&t),
        vec![
            SoundEvent::Volume(1.0),
            SoundEvent::Play(Loops::Forever, Duration::from_millis(2_000)),
            SoundEvent::FadeOut(Duration::from_millis(750)),
        ]
    );
}

#[test]
fn silent_tracks_time_without_a_sound() {
    let clock = clock();
    let mut t = track(&silence("Gap", None), &clock);
    assert!(t.is_silent());
    assert_eq!(t.duration_ms(), None);

    t.play();
    clock.advance_ms(700);
    assert_eq!(t.elapsed_ms(), 700.0);

    let timed = track(&silence("Gap", Some(5_000)), &clock);
    assert_eq!(timed.duration_ms(), Some(5_000.0));
}

#[test]
fn unloadable_track_fails_the_whole_playlist() {
    let clock = clock();
    let configs = [file("A", "a.wav"), file("Missing", "nope.wav")];
    let err = Playlist::load(&configs, &loader(), Path::new("data"), shared(&clock))
        .err()
        .unwrap();

    let PlaylistError::Track { index, name, source } = err;
    assert_eq!(index, 1);
    assert_eq!(name, "Missing");
    assert!(matches!(source, LoadError::Open { .. }));
}

#[test]
fn max_duration_ignores_unknown_durations() {
    let clock = clock();
    let p = playlist(
        &[
            file("A", "a.wav"),
            silence("Gap", None),
            file("Long", "long.wav"),
            silence("Timed", Some(90_000)),
        ],
        &clock,
    );
    assert_eq!(p.max_duration_ms(), 90_000.0);

    let none = playlist(&[silence("Gap", None)], &clock);
    assert_eq!(none.max_duration_ms(), 0.0);
}

#[test]
fn next_at_last_track_stops_without_starting_another() {
    let clock = clock();
    let mut p = playlist(&[file("A", "a.wav"), file("B", "b.wav")], &clock);
    p.play();
    p.next();
    assert_eq!(p.current_index(), 1);
    assert!(p.tracks()[1].is_playing());

    clock.advance_ms(100);
    p.next();
    assert_eq!(p.current_index(), 1);
    assert!(p.tracks().iter().all(|t| !t.is_playing()));
    assert_eq!(p.tracks()[1].elapsed_ns(), 100_000_000);
}

#[test]
fn previous_at_first_track_stops_without_starting_another() {
    let clock = clock();
    let mut p = playlist(&[file("A", "a.wav"), file("B", "b.wav")], &clock);
    p.play();
    p.previous();
    assert_eq!(p.current_index(), 0);
    assert!(!p.tracks()[0].is_playing());
    assert!(!p.tracks()[1].is_playing());
    assert_eq!(
        events(&p.tracks()[1]),
        vec![SoundEvent::Volume(1.0)],
        "B must never have been started"
    );
}

#[test]
fn previous_steps_back_and_replays() {
    let clock = clock();
    let mut p = playlist(&[file("A", "a.wav"), file("B", "b.wav")], &clock);
    p.play();
    p.next();
    p.previous();
    assert_eq!(p.current_index(), 0);
    assert!(p.tracks()[0].is_playing());
    assert!(!p.tracks()[1].is_playing());
}

#[test]
fn two_down_presses_on_a_two_track_playlist() {
    let clock = clock();
    let mut p = playlist(&[file("A", "a.wav"), silence("B", Some(5_000))], &clock);
    p.play();
    assert!(p.tracks()[0].is_playing());

    p.next();
    assert_eq!(p.current_index(), 1);
    assert!(!p.tracks()[0].is_playing());
    assert!(p.tracks()[1].is_playing());

    p.next();
    assert_eq!(p.current_index(), 1);
    assert!(!p.tracks()[1].is_playing());
}

#[test]
fn fade_in_geometry_halfway_through_the_fade() {
    let clock = clock();
    let config = TrackConfig {
        fade_in_ms: 2_000,
        ..file("A", "a.wav")
    };
    let mut t = track(&config, &clock);
    t.play();
    clock.advance_ms(1_000);

    let bar = BarRect {
        x: 0.0,
        y: 0.0,
        height: 32.0,
        width: 1_000.0,
        filled: 100.0,
    };
    let g = t.fade_geometry(&bar, FadeDirection::In).unwrap();
    assert_eq!(g.outline[1].0 - g.outline[0].0, 200.0);
    let fill = g.fill.unwrap();
    assert_eq!(fill[1].0 - fill[0].0, 100.0);
}

#[test]
fn fade_out_geometry_tracks_time_since_stop() {
    let clock = clock();
    let config = TrackConfig {
        fade_out_ms: 1_000,
        ..file("A", "a.wav")
    };
    let mut t = track(&config, &clock);
    let bar = BarRect {
        x: 0.0,
        y: 0.0,
        height: 8.0,
        width: 1_000.0,
        filled: 300.0,
    };

    t.play();
    clock.advance_ms(3_000);
    assert!(t.fade_geometry(&bar, FadeDirection::Out).unwrap().fill.is_none());

    t.stop();
    clock.advance_ms(250);
    let fill = t.fade_geometry(&bar, FadeDirection::Out).unwrap().fill.unwrap();
    // 100px fade, a quarter faded.
    assert_eq!(fill[2].0, 300.0 + 25.0);

    clock.advance_ms(5_000);
    let done = t.fade_geometry(&bar, FadeDirection::Out).unwrap();
    assert_eq!(done.fill.as_ref(), Some(&done.outline));
}

#[test]
fn fade_geometry_without_fade_or_duration_is_none() {
    let clock = clock();
    let bar = BarRect {
        x: 0.0,
        y: 0.0,
        height: 8.0,
        width: 500.0,
        filled: 0.0,
    };
    let plain = track(&file("A", "a.wav"), &clock);
    assert!(plain.fade_geometry(&bar, FadeDirection::In).is_none());

    let endless = track(
        &TrackConfig {
            fade_in_ms: 500,
            ..silence("Gap", None)
        },
        &clock,
    );
    assert!(endless.fade_geometry(&bar, FadeDirection::In).is_none());
}

#[test]
fn auto_end_fires_exactly_at_threshold() {
    let clock = clock();
    let config = TrackConfig {
        end_ms: Some(3_000),
        ..file("A", "a.wav")
    };
    let mut t = track(&config, &clock);
    assert!(!t.check_auto_end());

    t.play();
    clock.advance_ms(2_999);
    assert!(!t.check_auto_end());
    clock.advance_ms(1);
    assert!(t.check_auto_end());

    t.stop();
    assert!(!t.check_auto_end());
}

#[test]
fn silent_tracks_never_auto_end() {
    let clock = clock();
    let mut t = track(&silence("Gap", Some(1_000)), &clock);
    t.play();
    clock.advance_ms(60_000);
    assert!(!t.check_auto_end());
}

#[test]
fn playlist_auto_end_advances_to_next_track() {
    let clock = clock();
    let first = TrackConfig {
        end_ms: Some(2_000),
        ..file("A", "a.wav")
    };
    let mut p = playlist(&[first, file("B", "b.wav")], &clock);
    p.play();

    clock.advance_ms(1_000);
    assert!(!p.check_auto_end());
    assert_eq!(p.current_index(), 0);

    clock.advance_ms(1_000);
    assert!(p.check_auto_end());
    assert_eq!(p.current_index(), 1);
    assert!(p.tracks()[1].is_playing());
    assert_eq!(p.tracks()[0].elapsed_ns(), 2_000_000_000);
}

#[test]
fn display_label_appends_flags_and_times() {
    let clock = clock();
    let config = TrackConfig {
        looping: true,
        end_ms: Some(5_000),
        ..file("Overture", "a.wav")
    };
    let mut t = track(&config, &clock);
    assert_eq!(
        t.label(),
        "Overture | Looping | Ends automatically after 5.0 seconds"
    );

    t.play();
    clock.advance_ms(62_500);
    assert_eq!(
        t.display_label(),
        "Overture | Looping | Ends automatically after 5.0 seconds | 1:02.5 / 0:10.0"
    );

    let gap = track(&silence("Gap", None), &clock);
    assert_eq!(gap.display_label(), "Gap | 0:00.0");
}

#[test]
fn views_scale_bars_against_the_longest_track() {
    let clock = clock();
    let configs = [
        TrackConfig {
            end_ms: Some(1_000),
            fade_in_ms: 1_000,
            ..file("A", "a.wav")
        },
        file("Long", "long.wav"),
        silence("Gap", None),
    ];
    let mut p = playlist(&configs, &clock);
    p.play();
    clock.advance_ms(500);

    let views = p.views(600.0, 8.0);
    assert_eq!(views.len(), 3);
    assert!(views[0].current && views[0].playing);
    assert!(!views[1].current && !views[1].playing);

    let a = views[0].bar.as_ref().unwrap();
    assert_eq!(a.width, 100.0);
    assert_eq!(a.filled, 5.0);
    assert_eq!(a.auto_end_marker, Some(10.0));
    assert!(a.fade_in.is_some());
    assert!(a.fade_out.is_none());

    assert_eq!(views[1].bar.as_ref().unwrap().width, 600.0);
    assert!(views[2].bar.is_none());
}

#[test]
fn views_wrap_looping_tracks_and_clamp_finished_ones() {
    let clock = clock();
    let configs = [
        TrackConfig {
            looping: true,
            ..file("Loop", "b.wav")
        },
        file("Once", "b.wav"),
    ];
    let mut p = playlist(&configs, &clock);
    p.play();
    clock.advance_ms(5_000);
    let looped = p.views(400.0, 8.0)[0].bar.clone().unwrap();
    // 5s into a 4s loop is 1s into the second pass.
    assert_eq!(looped.filled, 100.0);

    p.next();
    clock.advance_ms(9_000);
    let once = p.views(400.0, 8.0)[1].bar.clone().unwrap();
    assert_eq!(once.filled, once.width);
}

#[test]
fn empty_playlist_ignores_every_command() {
    let clock = clock();
    let mut p = playlist(&[], &clock);
    p.play();
    p.next();
    p.previous();
    assert!(!p.check_auto_end());
    assert!(p.is_empty());
    assert!(p.current().is_none());
    assert!(p.views(100.0, 8.0).is_empty());
}
