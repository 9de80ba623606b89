//! `rodio` implementation of the sound contract.
//!
//! Files are decoded fully into memory at load time. Each `play` connects a
//! fresh `Sink` to the shared mixer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rodio::buffer::SamplesBuffer;
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sample, Sink, Source};

use crate::config::AudioSettings;

use super::fade::fade_out_detached;
use super::types::{LoadError, Loops, Sound, SoundLoader};

/// Owns the output device; sounds loaded through it play on its mixer.
pub struct RodioBackend {
    stream: OutputStream,
    fade_steps: u32,
}

impl RodioBackend {
    pub fn open(settings: &AudioSettings) -> Result<Self, rodio::StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // The drop message would land on top of the restored terminal.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            fade_steps: settings.fade_steps.max(1),
        })
    }
}

impl SoundLoader for RodioBackend {
    type Sound = RodioSound;

    fn load(&self, path: &Path) -> Result<RodioSound, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<Sample> = decoder.collect();
        if samples.is_empty() || channels == 0 || sample_rate == 0 {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }

        let frames = samples.len() / usize::from(channels);
        let length = Duration::from_secs_f64(frames as f64 / f64::from(sample_rate));

        log::debug!(
            "decoded {} ({} ch, {} Hz, {:.1}s)",
            path.display(),
            channels,
            sample_rate,
            length.as_secs_f64()
        );

        Ok(RodioSound {
            mixer: self.stream.mixer().clone(),
            samples: samples.into(),
            channels,
            sample_rate,
            length,
            volume: 1.0,
            fade_steps: self.fade_steps,
            sink: None,
        })
    }
}

pub struct RodioSound {
    mixer: Mixer,
    samples: Arc<[Sample]>,
    channels: u16,
    sample_rate: u32,
    length: Duration,
    volume: f32,
    fade_steps: u32,
    /// The sink of the most recent `play`; handed to the fade thread on `fade_out`.
    sink: Option<Arc<Sink>>,
}

impl RodioSound {
    fn source(&self, loops: Loops, fade_in: Duration) -> Box<dyn Source + Send> {
        let clip = SamplesBuffer::new(self.channels, self.sample_rate, self.samples.to_vec());
        let source: Box<dyn Source + Send> = match loops {
            Loops::Once => Box::new(clip),
            Loops::Forever => Box::new(clip.repeat_infinite()),
        };

        if fade_in.is_zero() {
            source
        } else {
            Box::new(source.fade_in(fade_in))
        }
    }
}

impl Sound for RodioSound {
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn play(&mut self, loops: Loops, fade_in: Duration) {
        // Sinks handed to a fade thread are gone from `self.sink`, so a replay
        // during a fade-out never cuts the fade short.
        if let Some(previous) = self.sink.take() {
            previous.stop();
        }

        let sink = Sink::connect_new(&self.mixer);
        sink.set_volume(self.volume);
        sink.append(self.source(loops, fade_in));
        sink.play();
        self.sink = Some(Arc::new(sink));
    }

    fn fade_out(&mut self, fade: Duration) {
        if let Some(sink) = self.sink.take() {
            fade_out_detached(sink, self.volume, fade, self.fade_steps);
        }
    }

    fn length(&self) -> Duration {
        self.length
    }
}
