//! Audio Manager - Owns the shared voice player outside of the bubble render cycle.
//! Backends only touch the platform audio element; every signal write happens on the
//! UI runtime, either from an event handler or from the controller's polling task.

mod player_core;
mod registry;

pub use player_core::{
    AudioSnapshot, BackendCommand, Effects, PlaybackEvent, PlaybackEventKind, PlayerCore,
};
pub use registry::{SubscriberRegistry, Subscription};

// Shared imports for the included backend and controller files.
use crate::db::VoiceSettings;
use crate::diagnostics::log_perf;
use crate::error::VoiceError;
use crate::utils::{now_ms, sleep_ms};
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

// Browser (wasm) backend.
include!("web_backend.rs");
// Desktop/mobile webview bridge backend.
include!("webview_bridge.rs");
// Public playback API consumed by the voice views.
include!("playback_api.rs");
// Snapshot polling controller component.
include!("controller.rs");
