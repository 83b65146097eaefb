use crate::api::models::ItemMeta;
use crate::components::voice::duration::{DurationLabel, LabelSide};
use crate::components::voice::indicator::VoiceIndicator;
use crate::components::voice::meta::MetaView;
use crate::components::voice::scrubber::Scrubber;
use crate::components::voice::{DisplayState, VoiceState};
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceLayoutKind {
    /// Bubble also carries text: indicator, then duration and scrubber, one row.
    Inline,
    /// Scrubber and duration on the left, indicator over meta on the right.
    Sent,
    /// Indicator over meta on the left, duration and scrubber on the right.
    Received,
}

impl VoiceLayoutKind {
    fn class(self) -> &'static str {
        match self {
            VoiceLayoutKind::Inline => "voice-layout-inline",
            VoiceLayoutKind::Sent => "voice-layout-sent",
            VoiceLayoutKind::Received => "voice-layout-received",
        }
    }
}

pub fn select_layout(has_text: bool, sent: bool) -> VoiceLayoutKind {
    if has_text {
        VoiceLayoutKind::Inline
    } else if sent {
        VoiceLayoutKind::Sent
    } else {
        VoiceLayoutKind::Received
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSlot {
    Indicator,
    IndicatorWithMeta,
    Duration,
    Scrubber,
}

/// Left-to-right order of the pieces for each arrangement.
pub fn layout_slots(kind: VoiceLayoutKind) -> &'static [LayoutSlot] {
    match kind {
        VoiceLayoutKind::Inline => &[
            LayoutSlot::Indicator,
            LayoutSlot::Duration,
            LayoutSlot::Scrubber,
        ],
        VoiceLayoutKind::Sent => &[
            LayoutSlot::Scrubber,
            LayoutSlot::Duration,
            LayoutSlot::IndicatorWithMeta,
        ],
        VoiceLayoutKind::Received => &[
            LayoutSlot::IndicatorWithMeta,
            LayoutSlot::Duration,
            LayoutSlot::Scrubber,
        ],
    }
}

/// Node key for a slot. Changing the arrangement or the bound track mounts fresh
/// slots, so scrubber drag state never carries over to another file.
pub fn slot_key(kind: VoiceLayoutKind, slot: LayoutSlot, track: &str) -> String {
    format!("{kind:?}-{slot:?}-{track}")
}

#[component]
pub fn VoiceLayout(
    kind: VoiceLayoutKind,
    track: String,
    display: DisplayState,
    state: VoiceState,
    label: String,
    angle: f64,
    sent: bool,
    meta: ItemMeta,
    font_px: u32,
    on_toggle: EventHandler<()>,
    on_seek: EventHandler<u64>,
    on_long_press: EventHandler<()>,
) -> Element {
    let compact = kind == VoiceLayoutKind::Inline;
    let layout_class = kind.class();
    let label_side = if kind == VoiceLayoutKind::Sent {
        LabelSide::End
    } else {
        LabelSide::Start
    };

    let slots = layout_slots(kind).iter().map(|slot| {
        let key = slot_key(kind, *slot, &track);
        match slot {
            LayoutSlot::Indicator => rsx! {
                div { key: "{key}", class: "voice-slot voice-slot-indicator",
                    VoiceIndicator {
                        display,
                        sent,
                        compact,
                        angle,
                        on_toggle,
                        on_long_press,
                    }
                }
            },
            LayoutSlot::IndicatorWithMeta => rsx! {
                div { key: "{key}", class: "voice-slot voice-slot-stack",
                    VoiceIndicator {
                        display,
                        sent,
                        compact,
                        angle,
                        on_toggle,
                        on_long_press,
                    }
                    div { class: "voice-slot-meta",
                        MetaView { meta: meta.clone() }
                    }
                }
            },
            LayoutSlot::Duration => rsx! {
                div { key: "{key}", class: "voice-slot",
                    DurationLabel { text: label.clone(), font_px, side: label_side }
                }
            },
            LayoutSlot::Scrubber => rsx! {
                div { key: "{key}", class: "voice-slot voice-slot-scrubber",
                    Scrubber {
                        playing: state.playing,
                        position_ms: state.position_ms,
                        duration_ms: state.duration_ms,
                        on_seek,
                    }
                }
            },
        }
    });

    rsx! {
        div { class: "voice-layout {layout_class}", {slots} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::voice::scrubber::{scrubber_visible, ScrubTracker};

    fn position(kind: VoiceLayoutKind, wanted: LayoutSlot) -> usize {
        layout_slots(kind)
            .iter()
            .position(|slot| *slot == wanted)
            .unwrap()
    }

    #[test]
    fn selector_is_exclusive() {
        assert_eq!(select_layout(true, true), VoiceLayoutKind::Inline);
        assert_eq!(select_layout(true, false), VoiceLayoutKind::Inline);
        assert_eq!(select_layout(false, true), VoiceLayoutKind::Sent);
        assert_eq!(select_layout(false, false), VoiceLayoutKind::Received);
    }

    #[test]
    fn sent_puts_scrubber_and_duration_left_of_indicator() {
        let kind = select_layout(false, true);
        let indicator = position(kind, LayoutSlot::IndicatorWithMeta);
        assert!(position(kind, LayoutSlot::Scrubber) < indicator);
        assert!(position(kind, LayoutSlot::Duration) < indicator);
    }

    #[test]
    fn received_puts_indicator_first() {
        let kind = select_layout(false, false);
        assert_eq!(layout_slots(kind)[0], LayoutSlot::IndicatorWithMeta);
    }

    #[test]
    fn inline_is_one_row_indicator_first_without_meta() {
        let slots = layout_slots(select_layout(true, true));
        assert_eq!(slots[0], LayoutSlot::Indicator);
        assert!(!slots.contains(&LayoutSlot::IndicatorWithMeta));
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn slot_keys_change_with_arrangement_and_track() {
        let kind = VoiceLayoutKind::Received;
        let first = slot_key(kind, LayoutSlot::Scrubber, "/voice/a.m4a");
        assert_eq!(first, slot_key(kind, LayoutSlot::Scrubber, "/voice/a.m4a"));
        assert_ne!(first, slot_key(kind, LayoutSlot::Scrubber, "/voice/b.m4a"));
        assert_ne!(
            first,
            slot_key(VoiceLayoutKind::Inline, LayoutSlot::Scrubber, "/voice/a.m4a")
        );
    }

    #[test]
    fn rebinding_to_another_file_drops_a_manual_scrub() {
        // Drag on the first file while paused.
        let mut old_tracker = ScrubTracker::new(false);
        old_tracker.moved_to(4_000);
        assert!(scrubber_visible(false, 0, old_tracker.state()));

        // The new key mounts a new scrubber, which starts from a fresh tracker.
        let old_key = slot_key(VoiceLayoutKind::Sent, LayoutSlot::Scrubber, "/voice/a.m4a");
        let new_key = slot_key(VoiceLayoutKind::Sent, LayoutSlot::Scrubber, "/voice/b.m4a");
        assert_ne!(old_key, new_key);
        let fresh = ScrubTracker::new(false);
        assert!(!scrubber_visible(false, 0, fresh.state()));
    }
}
