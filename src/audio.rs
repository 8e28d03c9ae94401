//! Background music and the crash sound.
//!
//! Playback is fire-and-forget: a failed request is logged and ignored, and
//! nothing in the game waits on audio.

use crate::error::Result;

/// The two sounds the game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Looping background track.
    Music,
    /// One-shot collision sound.
    Ouch,
}

/// A sound output the director can drive.
pub trait AudioBackend {
    /// Replace the clip for `cue`. A new music clip starts paused.
    fn load(&mut self, cue: Cue, bytes: Vec<u8>) -> Result<()>;
    /// Start or resume `cue`. One-shots restart from the beginning.
    fn play(&mut self, cue: Cue) -> Result<()>;
    fn pause(&mut self, cue: Cue);
}

/// Backend that plays nothing. Used when there is no device or the `audio`
/// feature is off.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn load(&mut self, _cue: Cue, _bytes: Vec<u8>) -> Result<()> {
        Ok(())
    }

    fn play(&mut self, _cue: Cue) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self, _cue: Cue) {}
}

/// Mute state and playback policy on top of a backend.
pub struct AudioDirector {
    backend: Box<dyn AudioBackend>,
    muted: bool,
}

impl AudioDirector {
    pub fn new(backend: Box<dyn AudioBackend>, muted: bool) -> Self {
        Self { backend, muted }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend), true)
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip mute. Muting pauses the music; unmuting resumes it.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.pause_music();
        } else {
            self.try_enable_music();
        }
        self.muted
    }

    /// Ask the music to play unless muted. Rejections are ignored.
    pub fn try_enable_music(&mut self) {
        if self.muted {
            return;
        }
        if let Err(e) = self.backend.play(Cue::Music) {
            tracing::debug!(error = %e, "music playback rejected");
        }
    }

    pub fn pause_music(&mut self) {
        self.backend.pause(Cue::Music);
    }

    /// Play the crash sound from the start unless muted.
    pub fn play_ouch(&mut self) {
        if self.muted {
            return;
        }
        if let Err(e) = self.backend.play(Cue::Ouch) {
            tracing::debug!(error = %e, "crash sound rejected");
        }
    }

    /// Swap the clip for `cue`. New music starts right away unless muted.
    pub fn replace(&mut self, cue: Cue, bytes: Vec<u8>) -> Result<()> {
        self.backend.load(cue, bytes)?;
        if cue == Cue::Music {
            self.try_enable_music();
        }
        Ok(())
    }
}

#[cfg(feature = "audio")]
pub use self::rodio_backend::RodioBackend;

#[cfg(feature = "audio")]
mod rodio_backend {
    use super::{AudioBackend, Cue};
    use crate::error::{FlapperError, Result};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::io::Cursor;

    fn audio_err(e: impl std::fmt::Display) -> FlapperError {
        FlapperError::Audio(e.to_string())
    }

    /// Plays clips on the default output device through rodio.
    pub struct RodioBackend {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Option<Sink>,
        ouch: Option<Vec<u8>>,
        music_volume: f32,
        effects_volume: f32,
    }

    impl RodioBackend {
        pub fn new(music_volume: f32, effects_volume: f32) -> Result<Self> {
            let (stream, handle) = OutputStream::try_default().map_err(audio_err)?;
            Ok(Self {
                _stream: stream,
                handle,
                music: None,
                ouch: None,
                music_volume,
                effects_volume,
            })
        }
    }

    impl AudioBackend for RodioBackend {
        fn load(&mut self, cue: Cue, bytes: Vec<u8>) -> Result<()> {
            match cue {
                Cue::Music => {
                    let source = Decoder::new_looped(Cursor::new(bytes)).map_err(audio_err)?;
                    let sink = Sink::try_new(&self.handle).map_err(audio_err)?;
                    sink.pause();
                    sink.set_volume(self.music_volume);
                    sink.append(source);
                    // Dropping the old sink stops the old track
                    self.music = Some(sink);
                }
                Cue::Ouch => {
                    Decoder::new(Cursor::new(bytes.clone())).map_err(audio_err)?;
                    self.ouch = Some(bytes);
                }
            }
            Ok(())
        }

        fn play(&mut self, cue: Cue) -> Result<()> {
            match cue {
                Cue::Music => {
                    let sink = self
                        .music
                        .as_ref()
                        .ok_or_else(|| audio_err("no music loaded"))?;
                    sink.play();
                }
                Cue::Ouch => {
                    let bytes = self
                        .ouch
                        .clone()
                        .ok_or_else(|| audio_err("no crash sound loaded"))?;
                    let source = Decoder::new(Cursor::new(bytes)).map_err(audio_err)?;
                    let sink = Sink::try_new(&self.handle).map_err(audio_err)?;
                    sink.set_volume(self.effects_volume);
                    sink.append(source);
                    sink.detach();
                }
            }
            Ok(())
        }

        fn pause(&mut self, cue: Cue) {
            if let (Cue::Music, Some(sink)) = (cue, self.music.as_ref()) {
                sink.pause();
            }
        }
    }
}
