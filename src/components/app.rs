use crate::api::*;
use crate::components::{
    use_voice_player_provider, MetaView, VoiceMessage, VoicePlayerController,
};
use crate::db::{initialize_database, load_settings, save_settings, FinishBehavior, VoiceSettings};
use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

#[component]
pub fn ChatShell() -> Element {
    let mut settings = use_signal(VoiceSettings::default);
    let mut settings_loaded = use_signal(|| false);
    let transcript = use_signal(|| match demo_transcript() {
        Ok(items) => items,
        Err(err) => {
            warn!("[chat] failed to load transcript: {err}");
            Vec::new()
        }
    });
    let mut action_target = use_signal(|| None::<i64>);

    use_context_provider(|| settings);
    let _player = use_voice_player_provider(&settings.peek());

    use_future(move || async move {
        if let Err(err) = initialize_database().await {
            warn!("[settings] failed to initialize storage: {err}");
        }
        match load_settings().await {
            Ok(loaded) => {
                info!("[settings] loaded voice settings");
                settings.set(loaded);
            }
            Err(err) => warn!("[settings] falling back to defaults: {err}"),
        }
        settings_loaded.set(true);
    });

    let on_toggle_finish = move |_| {
        let mut next = settings();
        next.finish_behavior = match next.finish_behavior {
            FinishBehavior::ResetToStart => FinishBehavior::HoldAtEnd,
            FinishBehavior::HoldAtEnd => FinishBehavior::ResetToStart,
        };
        settings.set(next.clone());
        spawn(async move {
            if let Err(err) = save_settings(next).await {
                warn!("[settings] failed to save: {err}");
            }
        });
    };

    let theme = settings().theme;
    let finish_label = match settings().finish_behavior {
        FinishBehavior::ResetToStart => "Rewind when finished",
        FinishBehavior::HoldAtEnd => "Hold at end",
    };

    rsx! {
        VoicePlayerController {}
        div { class: "chat-shell theme-{theme}",
            header { class: "chat-header",
                h1 { class: "chat-title", "Voice notes" }
                button {
                    r#type: "button",
                    class: "chat-header-action",
                    disabled: !settings_loaded(),
                    onclick: on_toggle_finish,
                    "{finish_label}"
                }
            }
            div { class: "chat-transcript",
                for item in transcript() {
                    ChatBubble {
                        key: "{item.id}",
                        item: item.clone(),
                        on_long_press: move |id: i64| action_target.set(Some(id)),
                    }
                }
            }
            if let Some(id) = action_target() {
                div { class: "chat-actions",
                    span { "Message #{id}" }
                    button {
                        r#type: "button",
                        class: "chat-actions-close",
                        onclick: move |_| action_target.set(None),
                        "Close"
                    }
                }
            }
        }
    }
}

#[component]
fn ChatBubble(item: ChatItem, on_long_press: EventHandler<i64>) -> Element {
    let id = item.id;
    let sent = item.sent;
    let has_text = item.has_text();
    let text = item.text.clone().unwrap_or_default();
    let row_class = if sent {
        "bubble-row bubble-row-sent"
    } else {
        "bubble-row bubble-row-received"
    };
    let bubble_class = if sent {
        "bubble bubble-sent"
    } else {
        "bubble bubble-received"
    };

    match item.content.clone() {
        ItemContent::Voice {
            duration_secs,
            file,
        } => rsx! {
            div { class: "{row_class}",
                div { class: "{bubble_class}",
                    VoiceMessage {
                        provided_duration_secs: duration_secs,
                        file,
                        edited: item.meta.edited,
                        sent,
                        has_text,
                        item: item.clone(),
                        ttl_secs: None,
                        on_long_press: move |_| on_long_press.call(id),
                    }
                    if has_text {
                        p { class: "bubble-text", "{text}" }
                        div { class: "bubble-meta",
                            MetaView { meta: item.meta.clone() }
                        }
                    }
                }
            }
        },
        ItemContent::Text => rsx! {
            div { class: "{row_class}",
                div { class: "{bubble_class}",
                    p { class: "bubble-text", "{text}" }
                    div { class: "bubble-meta",
                        MetaView { meta: item.meta.clone() }
                    }
                }
            }
        },
    }
}
