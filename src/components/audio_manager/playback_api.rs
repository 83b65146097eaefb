// Public playback API consumed by the voice views.
/// Shared voice player. `Copy`, provided once by the chat shell through context.
///
/// `play`, `pause` and `seek` are fire-and-forget: results come back as
/// [`PlaybackEventKind`] values delivered to the subscribers of the affected path.
#[derive(Clone, Copy, PartialEq)]
pub struct VoicePlayer {
    core: Signal<PlayerCore>,
    registry: Signal<SubscriberRegistry<Callback<PlaybackEventKind>>>,
}

impl VoicePlayer {
    pub fn new(
        core: Signal<PlayerCore>,
        registry: Signal<SubscriberRegistry<Callback<PlaybackEventKind>>>,
    ) -> Self {
        Self { core, registry }
    }

    pub fn play(&self, path: &str, start_from_beginning: bool) {
        let mut core = self.core;
        let effects = core.write().play(path, start_from_beginning, now_ms());
        debug!("[voice-player] play {path}");
        self.run(effects);
    }

    pub fn pause(&self, path: &str) {
        let mut core = self.core;
        let effects = core.write().pause(path);
        self.run(effects);
    }

    pub fn seek(&self, path: &str, target_ms: u64) {
        let mut core = self.core;
        let effects = core.write().seek(path, target_ms);
        self.run(effects);
    }

    pub fn subscribe(&self, path: &str, handler: Callback<PlaybackEventKind>) -> Subscription {
        let mut registry = self.registry;
        let subscription = registry.write().subscribe(path, handler);
        debug!(
            "[voice-player] subscribed to {path} ({} listeners)",
            registry.peek().len()
        );
        // Bring the new view up to date; the path may already be playing.
        let current = self.core.peek().replay(path);
        for kind in current {
            handler.call(kind);
        }
        subscription
    }

    pub fn unsubscribe(&self, subscription: &Subscription) {
        let mut registry = self.registry;
        if registry.write().unsubscribe(subscription) {
            debug!("[voice-player] unsubscribed from {}", subscription.path());
        }
    }

    pub fn configure(&self, settings: &VoiceSettings) {
        let mut core = self.core;
        core.write()
            .configure(settings.finish_behavior, settings.play_confirm_ms);
    }

    pub fn needs_polling(&self) -> bool {
        self.core.peek().needs_polling()
    }

    fn observe(&self, snapshot: &AudioSnapshot) {
        let mut core = self.core;
        let effects = core.write().observe(snapshot, now_ms());
        self.run(effects);
    }

    fn run(&self, effects: Effects) {
        let Effects { commands, events } = effects;
        for event in events {
            self.dispatch(event);
        }
        for command in commands {
            let failed_src = match &command {
                BackendCommand::Load { src, .. } => Some(src.clone()),
                _ => None,
            };
            if let Err(err) = backend_apply(command) {
                warn!("[voice-player] backend command failed: {err}");
                if let Some(src) = failed_src {
                    let mut core = self.core;
                    let failure = core.write().fail_start(&src);
                    for event in failure.events {
                        self.dispatch(event);
                    }
                }
            }
        }
    }

    fn dispatch(&self, event: PlaybackEvent) {
        // Collect first so handlers never run while the registry is borrowed.
        let handlers = self.registry.peek().handlers_for(&event.path);
        for handler in handlers {
            handler.call(event.kind.clone());
        }
    }
}

/// Provide the shared player for the current scope and its children.
pub fn use_voice_player_provider(settings: &VoiceSettings) -> VoicePlayer {
    let finish = settings.finish_behavior;
    let confirm_ms = settings.play_confirm_ms;
    let core = use_signal(move || PlayerCore::new(finish, confirm_ms));
    let registry = use_signal(SubscriberRegistry::<Callback<PlaybackEventKind>>::default);
    use_context_provider(|| VoicePlayer::new(core, registry))
}
