use crate::api::models::format_duration_ms;
use crate::components::voice::VoiceState;
use dioxus::prelude::*;

/// Width reserved per pixel of font size; 45px at the default 16px.
const MIN_WIDTH_PER_FONT_PX: f64 = 45.0 / 16.0;

/// Elapsed time once playback has started or moved, total duration otherwise.
pub fn duration_label(state: &VoiceState) -> String {
    let millis = if state.has_progress() {
        state.position_ms
    } else {
        state.duration_ms
    };
    format_duration_ms(millis)
}

pub fn duration_min_width_px(font_px: u32) -> u32 {
    (font_px as f64 * MIN_WIDTH_PER_FONT_PX).ceil() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Start,
    End,
}

#[component]
pub fn DurationLabel(text: String, font_px: u32, side: LabelSide) -> Element {
    let min_width = duration_min_width_px(font_px);
    let padding = match side {
        LabelSide::Start => "padding-left: 12px;",
        LabelSide::End => "padding-right: 12px;",
    };

    rsx! {
        span {
            class: "voice-duration",
            style: "min-width: {min_width}px; font-size: {font_px}px; {padding}",
            "{text}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PlaybackEventKind;

    #[test]
    fn shows_total_until_progress_then_elapsed() {
        let mut state = VoiceState::new(65_000);
        assert_eq!(duration_label(&state), "1:05");

        state.apply(&PlaybackEventKind::Playing(true));
        assert_eq!(duration_label(&state), "0:00");

        state.apply(&PlaybackEventKind::Position(9_400));
        assert_eq!(duration_label(&state), "0:09");

        state.apply(&PlaybackEventKind::Playing(false));
        assert_eq!(duration_label(&state), "0:09");
    }

    #[test]
    fn min_width_scales_with_font() {
        assert_eq!(duration_min_width_px(16), 45);
        assert!(duration_min_width_px(20) > duration_min_width_px(16));
    }
}
