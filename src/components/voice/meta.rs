use crate::api::models::ItemMeta;
use crate::components::Icon;
use crate::utils::sleep_ms;
use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;

/// Blank placeholder as wide as the meta line, keeping file-less bubbles the same height.
pub fn meta_reserve(edited: bool) -> &'static str {
    if edited {
        "                     "
    } else {
        "                 "
    }
}

/// Largest whole unit only: "45s", "5m", "2h", "3d".
pub fn short_span(seconds: i64) -> String {
    let seconds = seconds.max(0);
    match seconds {
        s if s < 60 => format!("{s}s"),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}

/// Countdown label for a timed message, or the configured TTL before a deadline exists.
pub fn ttl_label(meta: &ItemMeta, now: DateTime<Utc>) -> Option<String> {
    if let Some(delete_at) = meta.delete_at {
        return Some(short_span((delete_at - now).num_seconds()));
    }
    meta.ttl_secs.map(|ttl| short_span(ttl as i64))
}

/// Delay before the countdown label can next change; `None` once the deadline passed.
pub fn countdown_tick_ms(remaining_secs: i64) -> Option<u64> {
    match remaining_secs {
        s if s <= 0 => None,
        s if s < 60 => Some(1_000),
        s if s < 3_600 => Some(((s % 60) as u64 + 1) * 1_000),
        _ => Some(60_000),
    }
}

#[component]
pub fn MetaView(meta: ItemMeta) -> Element {
    let mut now = use_signal(Utc::now);
    let deadline = meta.delete_at;

    use_future(move || async move {
        let Some(deadline) = deadline else {
            return;
        };
        while let Some(delay) = countdown_tick_ms((deadline - Utc::now()).num_seconds()) {
            sleep_ms(delay).await;
            now.set(Utc::now());
        }
    });

    let time = meta
        .sent_at
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();
    let ttl = ttl_label(&meta, now());

    rsx! {
        div { class: "voice-meta",
            if let Some(ttl) = ttl {
                span { class: "voice-meta-ttl",
                    Icon { name: "timer".to_string(), class: "voice-meta-icon".to_string() }
                    "{ttl}"
                }
            }
            if meta.edited {
                Icon { name: "pencil".to_string(), class: "voice-meta-icon".to_string() }
            }
            span { "{time}" }
        }
    }
}

#[component]
pub fn MetaReserve(edited: bool) -> Element {
    let reserve = meta_reserve(edited);
    rsx! {
        span { class: "voice-meta-reserve", "{reserve}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn meta(ttl_secs: Option<u32>, delete_at: Option<DateTime<Utc>>) -> ItemMeta {
        ItemMeta {
            sent_at: Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap(),
            edited: false,
            ttl_secs,
            delete_at,
        }
    }

    #[test]
    fn reserve_is_wider_for_edited_messages() {
        assert_eq!(meta_reserve(false).len(), 17);
        assert_eq!(meta_reserve(true).len(), 21);
    }

    #[test]
    fn spans_use_the_largest_unit() {
        assert_eq!(short_span(-5), "0s");
        assert_eq!(short_span(45), "45s");
        assert_eq!(short_span(300), "5m");
        assert_eq!(short_span(7_200), "2h");
        assert_eq!(short_span(3 * 86_400 + 10), "3d");
    }

    #[test]
    fn countdown_uses_deadline_when_known() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 10, 0).unwrap();
        let deadline = Utc.with_ymd_and_hms(2026, 10, 17, 9, 16, 0).unwrap();
        assert_eq!(
            ttl_label(&meta(Some(600), Some(deadline)), now).as_deref(),
            Some("6m")
        );
        assert_eq!(ttl_label(&meta(Some(600), None), now).as_deref(), Some("10m"));
        assert_eq!(ttl_label(&meta(None, None), now), None);
    }

    #[test]
    fn countdown_ticks_faster_near_the_deadline() {
        assert_eq!(countdown_tick_ms(0), None);
        assert_eq!(countdown_tick_ms(-3), None);
        assert_eq!(countdown_tick_ms(45), Some(1_000));
        // "6m" turns into "5m" one second after the seconds part runs out.
        assert_eq!(countdown_tick_ms(6 * 60 + 20), Some(21_000));
        assert_eq!(countdown_tick_ms(6 * 60), Some(1_000));
        assert_eq!(countdown_tick_ms(2 * 3_600), Some(60_000));
    }

    #[test]
    fn label_moves_as_time_passes() {
        let deadline = Utc.with_ymd_and_hms(2026, 10, 17, 9, 16, 0).unwrap();
        let item = meta(Some(600), Some(deadline));
        let early = Utc.with_ymd_and_hms(2026, 10, 17, 9, 10, 0).unwrap();
        let delay = countdown_tick_ms((deadline - early).num_seconds()).unwrap();
        let later = early + chrono::Duration::milliseconds(delay as i64 + 1);
        assert_eq!(ttl_label(&item, early).as_deref(), Some("6m"));
        assert_eq!(ttl_label(&item, later).as_deref(), Some("5m"));
    }
}
