use crate::components::voice::gesture::{PressOutcome, PressTracker};
use crate::components::voice::DisplayState;
use crate::components::Icon;
use crate::db::VoiceSettings;
use crate::utils::sleep_ms;
use dioxus::prelude::*;
use std::f64::consts::PI;

/// Sweep of the progress ring in degrees, clamped to [0, 360]. Zero duration draws nothing.
pub fn ring_angle(position_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (360.0 * position_ms as f64 / duration_ms as f64).clamp(0.0, 360.0)
}

/// Circle geometry for a ring drawn inside a `size`-px square with a `stroke`-px line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center: f64,
    pub radius: f64,
    pub circumference: f64,
}

impl RingGeometry {
    pub fn new(size: f64, stroke: f64) -> Self {
        let radius = ((size - stroke) / 2.0).max(0.0);
        Self {
            center: size / 2.0,
            radius,
            circumference: 2.0 * PI * radius,
        }
    }

    /// Length of the visible dash for `angle` degrees.
    pub fn dash(&self, angle: f64) -> f64 {
        self.circumference * angle.clamp(0.0, 360.0) / 360.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorTint {
    Primary,
    Secondary,
    Warning,
}

impl IndicatorTint {
    pub fn resolve(enabled: bool, error: bool) -> Self {
        if error {
            IndicatorTint::Warning
        } else if !enabled {
            IndicatorTint::Secondary
        } else {
            IndicatorTint::Primary
        }
    }

    fn class(self) -> &'static str {
        match self {
            IndicatorTint::Primary => "voice-tint-primary",
            IndicatorTint::Secondary => "voice-tint-secondary",
            IndicatorTint::Warning => "voice-tint-warning",
        }
    }
}

#[component]
fn ProgressRing(angle: f64, size: u32, stroke: f64) -> Element {
    let geometry = RingGeometry::new(size as f64, stroke);
    let dash = geometry.dash(angle);
    let gap = geometry.circumference;
    let center = geometry.center;
    let radius = geometry.radius;

    rsx! {
        svg {
            class: "voice-ring",
            width: "{size}",
            height: "{size}",
            view_box: "0 0 {size} {size}",
            circle {
                cx: "{center}",
                cy: "{center}",
                r: "{radius}",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "{stroke}",
                stroke_linecap: "butt",
                stroke_dasharray: "{dash} {gap}",
                transform: "rotate(-90 {center} {center})",
            }
        }
    }
}

/// Round play/pause control with a progress ring. Tap toggles playback when enabled;
/// a held press or context-menu gesture calls `on_long_press` and never toggles.
#[component]
pub fn PlayPauseButton(
    playing: bool,
    sent: bool,
    angle: f64,
    enabled: bool,
    error: bool,
    surface: bool,
    on_toggle: EventHandler<()>,
    on_long_press: EventHandler<()>,
) -> Element {
    let settings = use_context::<Signal<VoiceSettings>>();
    let mut press = use_signal(PressTracker::default);
    let size = settings().indicator_size_px;
    let stroke = settings().ring_stroke_px;
    let long_press_ms = settings().long_press_ms;

    let tint = IndicatorTint::resolve(enabled, error).class();
    let surface_class = match (surface, sent) {
        (false, _) => "voice-control-bare",
        (true, true) => "voice-control-sent",
        (true, false) => "voice-control-received",
    };

    rsx! {
        div {
            class: "voice-control {surface_class}",
            style: "width: {size}px; height: {size}px;",
            role: "button",
            tabindex: "0",
            aria_disabled: "{!enabled}",
            aria_label: if playing { "Pause voice message" } else { "Play voice message" },
            onpointerdown: move |_| {
                let id = press.write().begin();
                spawn(async move {
                    sleep_ms(long_press_ms).await;
                    if press.write().hold_elapsed(id) == Some(PressOutcome::LongPress) {
                        on_long_press.call(());
                    }
                });
            },
            onpointerup: move |_| {
                if press.write().release() == Some(PressOutcome::Tap) && enabled {
                    on_toggle.call(());
                }
            },
            onpointerleave: move |_| press.write().cancel(),
            onpointercancel: move |_| press.write().cancel(),
            oncontextmenu: move |evt: MouseEvent| {
                evt.prevent_default();
                if press.write().context_menu() == Some(PressOutcome::LongPress) {
                    on_long_press.call(());
                }
            },
            onkeydown: move |evt: KeyboardEvent| {
                let activate = matches!(evt.key(), Key::Enter)
                    || matches!(evt.key(), Key::Character(ref c) if c == " ");
                if activate && enabled {
                    evt.prevent_default();
                    on_toggle.call(());
                }
            },
            if angle > 0.0 {
                ProgressRing { angle, size, stroke }
            }
            span { class: "voice-control-icon {tint}",
                Icon {
                    name: if playing { "pause".to_string() } else { "play".to_string() },
                    class: "voice-icon".to_string(),
                }
            }
        }
    }
}

#[component]
fn TransferSpinner() -> Element {
    let settings = use_context::<Signal<VoiceSettings>>();
    let size = settings().indicator_size_px;

    rsx! {
        div {
            class: "voice-control voice-control-loading",
            style: "width: {size}px; height: {size}px;",
            aria_busy: "true",
            Icon { name: "loader".to_string(), class: "voice-spinner".to_string() }
        }
    }
}

/// Picks the spinner, the disabled control or the live control for a display state.
#[component]
pub fn VoiceIndicator(
    display: DisplayState,
    sent: bool,
    compact: bool,
    angle: f64,
    on_toggle: EventHandler<()>,
    on_long_press: EventHandler<()>,
) -> Element {
    match display {
        DisplayState::Loading => rsx! {
            TransferSpinner {}
        },
        _ => {
            let enabled = display.is_interactive();
            rsx! {
                PlayPauseButton {
                    playing: display == DisplayState::LoadedPlaying,
                    sent,
                    angle: if enabled { angle } else { 0.0 },
                    enabled,
                    error: display == DisplayState::Error,
                    // Disabled controls keep their surface even inside a text bubble.
                    surface: !(compact && enabled),
                    on_toggle,
                    on_long_press,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_angle_is_proportional_and_clamped() {
        assert_eq!(ring_angle(0, 10_000), 0.0);
        assert_eq!(ring_angle(2_500, 10_000), 90.0);
        assert_eq!(ring_angle(10_000, 10_000), 360.0);
        assert_eq!(ring_angle(15_000, 10_000), 360.0);
    }

    #[test]
    fn zero_duration_draws_nothing() {
        assert_eq!(ring_angle(0, 0), 0.0);
        assert_eq!(ring_angle(4_000, 0), 0.0);
    }

    #[test]
    fn ring_dash_covers_the_swept_fraction() {
        let geometry = RingGeometry::new(56.0, 3.0);
        assert_eq!(geometry.center, 28.0);
        assert_eq!(geometry.radius, 26.5);
        assert_eq!(geometry.dash(0.0), 0.0);
        assert!((geometry.dash(180.0) - geometry.circumference / 2.0).abs() < 1e-9);
        assert!((geometry.dash(720.0) - geometry.circumference).abs() < 1e-9);
    }

    #[test]
    fn tint_prefers_warning_then_disabled() {
        assert_eq!(IndicatorTint::resolve(true, false), IndicatorTint::Primary);
        assert_eq!(IndicatorTint::resolve(false, false), IndicatorTint::Secondary);
        assert_eq!(IndicatorTint::resolve(true, true), IndicatorTint::Warning);
    }
}
