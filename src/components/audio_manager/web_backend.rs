// Browser backend: one hidden <audio> element shared by every voice bubble.
#[cfg(target_arch = "wasm32")]
const AUDIO_ELEMENT_ID: &str = "voicenote-audio";
#[cfg(target_arch = "wasm32")]
const SRC_ATTRIBUTE: &str = "data-voice-src";

#[cfg(target_arch = "wasm32")]
thread_local! {
    // Source whose play() promise was rejected (autoplay policy, unsupported codec).
    static REJECTED_SRC: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Initialize the shared audio element once.
#[cfg(target_arch = "wasm32")]
fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

#[cfg(target_arch = "wasm32")]
fn backend_apply(command: BackendCommand) -> Result<(), VoiceError> {
    let audio = get_or_create_audio_element()
        .ok_or_else(|| VoiceError::Backend("audio element unavailable".to_string()))?;

    match command {
        BackendCommand::Load { src, position_ms } => {
            if audio.get_attribute(SRC_ATTRIBUTE).as_deref() != Some(src.as_str()) {
                audio.set_src(&src);
                audio
                    .set_attribute(SRC_ATTRIBUTE, &src)
                    .map_err(|e| VoiceError::Backend(format!("{e:?}")))?;
            }
            audio.set_current_time(position_ms as f64 / 1000.0);
            REJECTED_SRC.with(|rejected| rejected.borrow_mut().take());

            let promise = audio
                .play()
                .map_err(|e| VoiceError::Backend(format!("play() threw: {e:?}")))?;
            spawn(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    warn!("[voice-player] play() rejected for {src}: {err:?}");
                    REJECTED_SRC.with(|rejected| *rejected.borrow_mut() = Some(src));
                }
            });
        }
        BackendCommand::Pause => {
            audio
                .pause()
                .map_err(|e| VoiceError::Backend(format!("pause() threw: {e:?}")))?;
        }
        BackendCommand::Seek { position_ms } => {
            audio.set_current_time(position_ms as f64 / 1000.0);
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
async fn backend_snapshot() -> Option<AudioSnapshot> {
    let audio = get_or_create_audio_element()?;
    let src = audio.get_attribute(SRC_ATTRIBUTE);
    let rejected = REJECTED_SRC.with(|rejected| {
        rejected.borrow().is_some() && rejected.borrow().as_deref() == src.as_deref()
    });
    let duration = audio.duration();
    let duration_ms = if duration.is_finite() && duration > 0.0 {
        (duration * 1000.0) as u64
    } else {
        0
    };

    Some(AudioSnapshot {
        src,
        position_ms: (audio.current_time().max(0.0) * 1000.0) as u64,
        duration_ms,
        paused: audio.paused(),
        ended: audio.ended(),
        error: rejected || audio.error().is_some(),
    })
}
