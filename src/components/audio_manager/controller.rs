/// Polls the platform audio element while a voice message is active and forwards
/// snapshots to the shared player. Renders nothing.
#[component]
pub fn VoicePlayerController() -> Element {
    let player = use_context::<VoicePlayer>();
    let settings = use_context::<Signal<VoiceSettings>>();

    use_effect(move || {
        let current = settings();
        player.configure(&current);
    });

    use_future(move || async move {
        loop {
            let interval = settings.peek().poll_interval_ms;
            sleep_ms(interval).await;
            if !player.needs_polling() {
                continue;
            }

            let started = now_ms();
            let Some(snapshot) = backend_snapshot().await else {
                continue;
            };
            player.observe(&snapshot);
            let elapsed = std::time::Duration::from_millis(now_ms().saturating_sub(started).max(0) as u64);
            log_perf(
                "voice-player poll",
                elapsed,
                snapshot.src.as_deref().unwrap_or_default(),
            );
        }
    });

    rsx! {}
}
