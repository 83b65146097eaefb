use dioxus::prelude::*;

/// Inline SVG icons used by the chat bubbles. Unknown names render a plain circle.
#[component]
pub fn Icon(name: String, class: String) -> Element {
    let svg_content = match name.as_str() {
        "play" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "currentColor",
                path { d: "M8 5.14v13.72a1 1 0 0 0 1.52.85l10.2-6.86a1 1 0 0 0 0-1.7L9.52 4.29A1 1 0 0 0 8 5.14z" }
            }
        },
        "pause" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "currentColor",
                rect {
                    x: "6",
                    y: "5",
                    width: "4",
                    height: "14",
                    rx: "1",
                }
                rect {
                    x: "14",
                    y: "5",
                    width: "4",
                    height: "14",
                    rx: "1",
                }
            }
        },
        "loader" => rsx! {
            svg {
                class: "{class} voice-spin",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "3",
                circle {
                    cx: "12",
                    cy: "12",
                    r: "10",
                    opacity: "0.25",
                }
                path { d: "M12 2a10 10 0 0 1 10 10", opacity: "0.85" }
            }
        },
        "timer" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                circle { cx: "12", cy: "13", r: "8" }
                polyline { points: "12 9 12 13 14.5 15" }
                path { d: "M9 2h6" }
            }
        },
        "pencil" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M12 20h9" }
                path { d: "M16.5 3.5a2.12 2.12 0 0 1 3 3L7 19l-4 1 1-4Z" }
            }
        },
        "mic" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                rect {
                    x: "9",
                    y: "2",
                    width: "6",
                    height: "12",
                    rx: "3",
                }
                path { d: "M5 10v1a7 7 0 0 0 14 0v-1" }
                path { d: "M12 18v4" }
            }
        },
        _ => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                circle { cx: "12", cy: "12", r: "10" }
            }
        },
    };

    svg_content
}
