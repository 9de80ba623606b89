//! Fade-out volume ramps.
//!
//! rodio sinks have no built-in fade-out, so the sink volume is stepped
//! down from a helper thread that owns a handle to the sink being faded.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rodio::Sink;

/// Volume after each of `steps` equal steps from `from` down to silence.
pub(super) fn ramp_down(from: f32, steps: u32) -> impl Iterator<Item = f32> {
    let steps = steps.max(1);
    (1..=steps).map(move |step| from * (1.0 - step as f32 / steps as f32))
}

/// Time to wait between two ramp steps.
pub(super) fn step_interval(fade: Duration, steps: u32) -> Duration {
    (fade / steps.max(1)).max(Duration::from_millis(1))
}

/// Fade `sink` out over `fade` without blocking the caller, then stop it.
pub(super) fn fade_out_detached(
    sink: Arc<Sink>,
    from: f32,
    fade: Duration,
    steps: u32,
) {
    if fade.is_zero() {
        sink.stop();
        return;
    }

    let spawned = thread::Builder::new()
        .name("soundcue-fade".to_string())
        .spawn({
            let sink = sink.clone();
            move || {
                let interval = step_interval(fade, steps);
                for volume in ramp_down(from, steps) {
                    sink.set_volume(volume);
                    thread::sleep(interval);
                }
                sink.stop();
            }
        });

    if let Err(e) = spawned {
        log::warn!("could not spawn fade thread, stopping immediately: {e}");
        sink.stop();
    }
}
