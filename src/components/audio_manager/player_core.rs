// Single-track voice player state machine. Pure: callers feed it requests and
// backend snapshots, it answers with backend commands and per-path events.
use crate::db::FinishBehavior;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEventKind {
    Playing(bool),
    Position(u64),
    Duration(u64),
    /// A play request never reached the playing state.
    StartFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackEvent {
    pub path: String,
    pub kind: PlaybackEventKind,
}

impl PlaybackEvent {
    fn new(path: &str, kind: PlaybackEventKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendCommand {
    Load { src: String, position_ms: u64 },
    Pause,
    Seek { position_ms: u64 },
}

/// State read back from the platform audio element.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AudioSnapshot {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub position_ms: u64,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub ended: bool,
    #[serde(default)]
    pub error: bool,
}

#[derive(Debug, Default, PartialEq)]
pub struct Effects {
    pub commands: Vec<BackendCommand>,
    pub events: Vec<PlaybackEvent>,
}

impl Effects {
    fn event(&mut self, path: &str, kind: PlaybackEventKind) {
        self.events.push(PlaybackEvent::new(path, kind));
    }
}

#[derive(Debug, Clone)]
struct ActiveTrack {
    path: String,
    playing: bool,
    wants_play: bool,
    position_ms: u64,
    duration_ms: u64,
    pending_since: Option<i64>,
}

#[derive(Debug)]
pub struct PlayerCore {
    active: Option<ActiveTrack>,
    positions: HashMap<String, u64>,
    durations: HashMap<String, u64>,
    finish: FinishBehavior,
    confirm_ms: u64,
}

impl Default for PlayerCore {
    fn default() -> Self {
        Self::new(FinishBehavior::default(), 1500)
    }
}

impl PlayerCore {
    pub fn new(finish: FinishBehavior, confirm_ms: u64) -> Self {
        Self {
            active: None,
            positions: HashMap::new(),
            durations: HashMap::new(),
            finish,
            confirm_ms,
        }
    }

    pub fn configure(&mut self, finish: FinishBehavior, confirm_ms: u64) {
        self.finish = finish;
        self.confirm_ms = confirm_ms;
    }

    #[cfg(test)]
    fn active_path(&self) -> Option<&str> {
        self.active.as_ref().map(|track| track.path.as_str())
    }

    /// True while a start is pending or the active track is playing. Paused and
    /// finished tracks change only through user commands, so nothing needs reading.
    pub fn needs_polling(&self) -> bool {
        self.active
            .as_ref()
            .map(|track| track.wants_play || track.playing)
            .unwrap_or(false)
    }

    /// Events that bring a freshly bound view up to date with `path`.
    pub fn replay(&self, path: &str) -> Vec<PlaybackEventKind> {
        let mut kinds = Vec::new();
        match self.active.as_ref().filter(|track| track.path == path) {
            Some(track) => {
                if track.duration_ms > 0 {
                    kinds.push(PlaybackEventKind::Duration(track.duration_ms));
                }
                if track.position_ms > 0 {
                    kinds.push(PlaybackEventKind::Position(track.position_ms));
                }
                if track.playing {
                    kinds.push(PlaybackEventKind::Playing(true));
                }
            }
            None => {
                if let Some(duration) = self.durations.get(path).copied().filter(|d| *d > 0) {
                    kinds.push(PlaybackEventKind::Duration(duration));
                }
                if let Some(position) = self.positions.get(path).copied().filter(|p| *p > 0) {
                    kinds.push(PlaybackEventKind::Position(position));
                }
            }
        }
        kinds
    }

    /// Start (or resume) `path`. Another active track is paused first.
    pub fn play(&mut self, path: &str, start_from_beginning: bool, now_ms: i64) -> Effects {
        let mut fx = Effects::default();

        let previous = match self.active.take() {
            Some(track) if track.path == path => Some(track),
            Some(track) => {
                if track.playing || track.wants_play {
                    fx.commands.push(BackendCommand::Pause);
                }
                if track.playing {
                    fx.event(&track.path, PlaybackEventKind::Playing(false));
                }
                self.positions.insert(track.path.clone(), track.position_ms);
                None
            }
            None => None,
        };

        if let Some(track) = previous.as_ref().filter(|track| track.playing) {
            // Already running: a view that lost track of it only needs the state again.
            self.active = Some(track.clone());
            fx.event(path, PlaybackEventKind::Playing(true));
            return fx;
        }

        let duration_ms = previous
            .as_ref()
            .map(|track| track.duration_ms)
            .or_else(|| self.durations.get(path).copied())
            .unwrap_or(0);
        let mut position_ms = previous
            .as_ref()
            .map(|track| track.position_ms)
            .or_else(|| self.positions.get(path).copied())
            .unwrap_or(0);
        if start_from_beginning && duration_ms > 0 && position_ms >= duration_ms {
            position_ms = 0;
            fx.event(path, PlaybackEventKind::Position(0));
        }

        self.active = Some(ActiveTrack {
            path: path.to_string(),
            playing: false,
            wants_play: true,
            position_ms,
            duration_ms,
            pending_since: Some(now_ms),
        });
        fx.commands.push(BackendCommand::Load {
            src: path.to_string(),
            position_ms,
        });
        fx
    }

    pub fn pause(&mut self, path: &str) -> Effects {
        let mut fx = Effects::default();
        let Some(track) = self.active.as_mut().filter(|track| track.path == path) else {
            return fx;
        };
        let was_playing = track.playing;
        if was_playing || track.wants_play {
            fx.commands.push(BackendCommand::Pause);
        }
        track.playing = false;
        track.wants_play = false;
        track.pending_since = None;
        if was_playing {
            fx.event(path, PlaybackEventKind::Playing(false));
            fx.event(path, PlaybackEventKind::Position(track.position_ms));
        }
        fx
    }

    /// Jump to `target_ms`; allowed while paused and for tracks that are not active.
    pub fn seek(&mut self, path: &str, target_ms: u64) -> Effects {
        let mut fx = Effects::default();
        match self.active.as_mut().filter(|track| track.path == path) {
            Some(track) => {
                let target = clamp_to_duration(target_ms, track.duration_ms);
                track.position_ms = target;
                fx.commands.push(BackendCommand::Seek {
                    position_ms: target,
                });
                fx.event(path, PlaybackEventKind::Position(target));
            }
            None => {
                let duration = self.durations.get(path).copied().unwrap_or(0);
                let target = clamp_to_duration(target_ms, duration);
                self.positions.insert(path.to_string(), target);
                fx.event(path, PlaybackEventKind::Position(target));
            }
        }
        fx
    }

    /// The backend refused the load outright.
    pub fn fail_start(&mut self, path: &str) -> Effects {
        let mut fx = Effects::default();
        if let Some(track) = self.active.as_mut().filter(|track| track.path == path) {
            if track.playing {
                fx.event(path, PlaybackEventKind::Playing(false));
            }
            track.playing = false;
            track.wants_play = false;
            track.pending_since = None;
        }
        fx.event(path, PlaybackEventKind::StartFailed);
        fx
    }

    pub fn observe(&mut self, snapshot: &AudioSnapshot, now_ms: i64) -> Effects {
        let mut fx = Effects::default();
        let finish = self.finish;
        let confirm_ms = self.confirm_ms as i64;
        let Some(track) = self.active.as_mut() else {
            return fx;
        };
        let path = track.path.clone();

        if snapshot.src.as_deref() == Some(path.as_str()) {
            if snapshot.duration_ms > 0 && snapshot.duration_ms != track.duration_ms {
                track.duration_ms = snapshot.duration_ms;
                self.durations.insert(path.clone(), snapshot.duration_ms);
                fx.event(&path, PlaybackEventKind::Duration(snapshot.duration_ms));
            }

            if snapshot.error {
                if track.playing {
                    fx.event(&path, PlaybackEventKind::Playing(false));
                }
                track.playing = false;
                track.wants_play = false;
                if track.pending_since.take().is_some() {
                    fx.event(&path, PlaybackEventKind::StartFailed);
                }
                return fx;
            }

            if snapshot.ended && track.pending_since.is_none() {
                if track.playing {
                    fx.event(&path, PlaybackEventKind::Playing(false));
                }
                track.playing = false;
                track.wants_play = false;
                let rest = match finish {
                    FinishBehavior::ResetToStart => 0,
                    FinishBehavior::HoldAtEnd => track.duration_ms,
                };
                if track.position_ms != rest {
                    track.position_ms = rest;
                    fx.event(&path, PlaybackEventKind::Position(rest));
                    if finish == FinishBehavior::ResetToStart {
                        fx.commands.push(BackendCommand::Seek { position_ms: 0 });
                    }
                }
                return fx;
            }

            let reported_playing = !snapshot.paused && !snapshot.ended;
            if reported_playing && track.wants_play {
                track.pending_since = None;
                if !track.playing {
                    track.playing = true;
                    fx.event(&path, PlaybackEventKind::Playing(true));
                }
            } else if !reported_playing && track.playing && track.pending_since.is_none() {
                // Paused outside the app (media keys, OS interruption).
                track.playing = false;
                track.wants_play = false;
                fx.event(&path, PlaybackEventKind::Playing(false));
            }

            if track.wants_play || track.playing {
                let position = clamp_to_duration(snapshot.position_ms, track.duration_ms);
                if position != track.position_ms {
                    track.position_ms = position;
                    fx.event(&path, PlaybackEventKind::Position(position));
                }
            }
        }

        if let Some(since) = track.pending_since {
            if now_ms.saturating_sub(since) >= confirm_ms {
                track.pending_since = None;
                track.wants_play = false;
                fx.commands.push(BackendCommand::Pause);
                fx.event(&path, PlaybackEventKind::StartFailed);
            }
        }
        fx
    }
}

fn clamp_to_duration(position_ms: u64, duration_ms: u64) -> u64 {
    if duration_ms > 0 {
        position_ms.min(duration_ms)
    } else {
        position_ms
    }
}
