//! Voice message bubble: play/pause control with progress ring, scrubber, duration
//! label and the three layout arrangements.

mod duration;
mod gesture;
mod indicator;
mod layout;
mod meta;
mod scrubber;
mod state;

pub use meta::MetaView;

use duration::duration_label;
use indicator::{ring_angle, VoiceIndicator};
use layout::{select_layout, VoiceLayout};
use meta::MetaReserve;
use state::{display_state, DisplayState, VoiceState};

use crate::api::models::{loaded_file_path, playable_path, ChatItem, FileDescriptor};
use crate::components::{PlaybackEventKind, Subscription, VoicePlayer};
use crate::db::VoiceSettings;
use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

/// Playback mirror bound to `path`. Subscribes on mount and whenever the path
/// changes, resetting the state first; unsubscribes on path change and unmount.
pub fn use_voice_track(path: Option<String>, provided_duration_ms: u64) -> Signal<VoiceState> {
    let player = use_context::<VoicePlayer>();
    let mut state = use_signal(|| VoiceState::new(provided_duration_ms));
    let mut subscription = use_signal(|| None::<Subscription>);
    let on_event = use_callback(move |event: PlaybackEventKind| {
        state.write().apply(&event);
    });

    use_effect(use_reactive((&path,), move |(path,)| {
        if let Some(previous) = subscription.write().take() {
            player.unsubscribe(&previous);
        }
        state.write().reset(provided_duration_ms);
        if let Some(path) = path {
            subscription.set(Some(player.subscribe(&path, on_event)));
        }
    }));

    use_drop(move || {
        if let Some(previous) = subscription.write().take() {
            player.unsubscribe(&previous);
        }
    });

    state
}

/// Outer padding: a voice note sharing its bubble with text sits in more space
/// than a standalone one.
pub fn message_padding(has_text: bool) -> &'static str {
    if has_text {
        "14px 6px"
    } else {
        "4px 6px 6px"
    }
}

/// One voice message. Without a file it shows a disabled control and a blank
/// meta placeholder of matching width.
#[component]
pub fn VoiceMessage(
    provided_duration_secs: u32,
    file: Option<FileDescriptor>,
    edited: bool,
    sent: bool,
    has_text: bool,
    item: ChatItem,
    ttl_secs: Option<u32>,
    on_long_press: EventHandler<()>,
) -> Element {
    let class = if has_text {
        "voice-message voice-message-with-text"
    } else {
        "voice-message"
    };
    let padding = message_padding(has_text);

    match file {
        Some(file) => rsx! {
            div { class: "{class}", style: "padding: {padding};",
                VoiceTrack {
                    provided_duration_secs,
                    file,
                    sent,
                    has_text,
                    item,
                    ttl_secs,
                    on_long_press,
                }
            }
        },
        None => rsx! {
            div { class: "{class}", style: "padding: {padding};",
                VoiceIndicator {
                    display: DisplayState::NoFile,
                    sent,
                    compact: false,
                    angle: 0.0,
                    on_toggle: move |_| {},
                    on_long_press,
                }
                MetaReserve { edited }
            }
        },
    }
}

#[component]
fn VoiceTrack(
    provided_duration_secs: u32,
    file: FileDescriptor,
    sent: bool,
    has_text: bool,
    item: ChatItem,
    ttl_secs: Option<u32>,
    on_long_press: EventHandler<()>,
) -> Element {
    let player = use_context::<VoicePlayer>();
    let settings = use_context::<Signal<VoiceSettings>>();
    let provided_ms = provided_duration_secs as u64 * 1000;
    let path = use_memo(use_reactive((&file,), |(file,)| loaded_file_path(&file)));
    let mut state = use_voice_track(path(), provided_ms);

    let current = state();
    let display = display_state(Some(&file), &current);
    let angle = ring_angle(current.position_ms, current.duration_ms);
    let label = duration_label(&current);
    let kind = select_layout(has_text, sent);
    let font_px = settings().duration_font_px;

    let track = path().unwrap_or_default();
    let mut meta = item.meta.clone();
    meta.ttl_secs = ttl_secs.or(meta.ttl_secs);

    let toggle_file = file.clone();
    let on_toggle = move |_: ()| {
        let path = match playable_path(&toggle_file) {
            Ok(path) => path,
            Err(err) => {
                warn!("[voice] file {}: {err}", toggle_file.file_id);
                state.write().mark_start_failed();
                return;
            }
        };
        if state.peek().playing {
            player.pause(&path);
        } else {
            player.play(&path, true);
        }
    };

    let on_seek = move |target: u64| {
        state.write().seek_locally(target);
        if let Some(path) = path() {
            player.seek(&path, target);
        }
    };

    rsx! {
        VoiceLayout {
            kind,
            track,
            display,
            state: current,
            label,
            angle,
            sent,
            meta,
            font_px,
            on_toggle,
            on_seek,
            on_long_press,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_bubbles_get_the_roomier_padding() {
        assert_eq!(message_padding(true), "14px 6px");
        assert_eq!(message_padding(false), "4px 6px 6px");
    }
}
