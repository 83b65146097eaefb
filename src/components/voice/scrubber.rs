use dioxus::prelude::*;

/// Last manual seek that has not yet been superseded by a playback change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrubOverride {
    #[default]
    Idle,
    MovedTo(u64),
}

/// Tracks the manual-seek override and clears it whenever `playing` flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrubTracker {
    state: ScrubOverride,
    last_playing: bool,
}

impl ScrubTracker {
    pub fn new(playing: bool) -> Self {
        Self {
            state: ScrubOverride::Idle,
            last_playing: playing,
        }
    }

    pub fn state(&self) -> ScrubOverride {
        self.state
    }

    pub fn moved_to(&mut self, target_ms: u64) {
        self.state = ScrubOverride::MovedTo(target_ms);
    }

    pub fn observe_playing(&mut self, playing: bool) {
        if playing != self.last_playing {
            self.last_playing = playing;
            self.state = ScrubOverride::Idle;
        }
    }
}

pub fn scrubber_visible(playing: bool, position_ms: u64, scrub: ScrubOverride) -> bool {
    playing || position_ms > 0 || matches!(scrub, ScrubOverride::MovedTo(_))
}

#[component]
pub fn Scrubber(
    playing: bool,
    position_ms: u64,
    duration_ms: u64,
    on_seek: EventHandler<u64>,
) -> Element {
    let mut tracker = use_signal(|| ScrubTracker::new(playing));

    use_effect(use_reactive((&playing,), move |(playing,)| {
        tracker.write().observe_playing(playing);
    }));

    if !scrubber_visible(playing, position_ms, tracker().state()) {
        return rsx! {};
    }

    let max = duration_ms.max(1);
    let value = position_ms.min(max);

    rsx! {
        input {
            r#type: "range",
            class: "voice-scrubber",
            min: "0",
            max: "{max}",
            step: "1",
            value: "{value}",
            oninput: move |e: Event<FormData>| {
                if let Ok(raw) = e.value().parse::<f64>() {
                    let target = raw.clamp(0.0, max as f64).round() as u64;
                    tracker.write().moved_to(target);
                    on_seek.call(target);
                }
            },
        }
    }
}
