use crate::api::models::FileDescriptor;
use crate::components::PlaybackEventKind;

/// Playback mirror for one bound file path.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceState {
    pub playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
    /// Last play attempt never reached the playing state.
    pub broken: bool,
}

impl VoiceState {
    /// Fresh state; the duration starts from the estimate carried by the message.
    pub fn new(provided_duration_ms: u64) -> Self {
        Self {
            playing: false,
            position_ms: 0,
            duration_ms: provided_duration_ms,
            broken: false,
        }
    }

    pub fn reset(&mut self, provided_duration_ms: u64) {
        *self = Self::new(provided_duration_ms);
    }

    pub fn apply(&mut self, event: &PlaybackEventKind) {
        match *event {
            PlaybackEventKind::Playing(playing) => {
                self.playing = playing;
                if playing {
                    self.broken = false;
                }
            }
            PlaybackEventKind::Position(position_ms) => {
                self.position_ms = position_ms;
            }
            PlaybackEventKind::Duration(duration_ms) => {
                self.duration_ms = duration_ms;
            }
            PlaybackEventKind::StartFailed => {
                self.playing = false;
                self.broken = true;
            }
        }
        if self.duration_ms > 0 {
            self.position_ms = self.position_ms.min(self.duration_ms);
        }
    }

    /// Optimistic local seek, shown before the player echoes it back.
    pub fn seek_locally(&mut self, target_ms: u64) {
        self.position_ms = if self.duration_ms > 0 {
            target_ms.min(self.duration_ms)
        } else {
            target_ms
        };
    }

    /// A play request that could not even be issued (no playable path).
    pub fn mark_start_failed(&mut self) {
        self.apply(&PlaybackEventKind::StartFailed);
    }

    pub fn has_progress(&self) -> bool {
        self.playing || self.position_ms > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    NoFile,
    /// Inbound transfer still running.
    Loading,
    /// Attached but not loaded and not transferring (failed, cancelled, not started).
    Unavailable,
    LoadedIdle,
    LoadedPlaying,
    Error,
}

impl DisplayState {
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            DisplayState::LoadedIdle | DisplayState::LoadedPlaying | DisplayState::Error
        )
    }
}

pub fn display_state(file: Option<&FileDescriptor>, state: &VoiceState) -> DisplayState {
    let Some(file) = file else {
        return DisplayState::NoFile;
    };
    if !file.loaded {
        return if file.status.is_inbound_pending() {
            DisplayState::Loading
        } else {
            DisplayState::Unavailable
        };
    }
    if state.playing {
        DisplayState::LoadedPlaying
    } else if state.broken {
        DisplayState::Error
    } else {
        DisplayState::LoadedIdle
    }
}
