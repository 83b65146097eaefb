// Desktop/mobile backend: drives an <audio> element inside the webview through
// document::eval. Snapshots are pulled by the controller on the UI runtime.
#[cfg(not(target_arch = "wasm32"))]
const VOICE_BRIDGE_BOOTSTRAP_JS: &str = r#"
(() => {
  if (window.__voicenoteAudioBridge) {
    return true;
  }

  const existing = document.getElementById("voicenote-audio-native");
  const audio = existing || document.createElement("audio");
  if (!existing) {
    audio.id = "voicenote-audio-native";
    audio.preload = "metadata";
    audio.style.display = "none";
    audio.setAttribute("playsinline", "true");
    document.body.appendChild(audio);
  }

  const bridge = {
    audio,
    src: null,
    rejected: null,
    apply(cmd) {
      if (!cmd || !cmd.type) return;

      switch (cmd.type) {
        case "load":
          if (cmd.src && bridge.src !== cmd.src) {
            audio.src = cmd.src;
            bridge.src = cmd.src;
          }
          bridge.rejected = null;
          try {
            audio.currentTime = Math.max(0, (cmd.position_ms || 0) / 1000);
          } catch (_err) {}
          audio.play().catch(() => {
            bridge.rejected = cmd.src;
          });
          break;
        case "pause":
          audio.pause();
          break;
        case "seek":
          try {
            audio.currentTime = Math.max(0, (cmd.position_ms || 0) / 1000);
          } catch (_err) {}
          break;
        default:
          break;
      }
    },
    snapshot() {
      const duration = Number.isFinite(audio.duration) ? audio.duration : 0;
      return {
        src: bridge.src,
        position_ms: Math.max(0, Math.floor((audio.currentTime || 0) * 1000)),
        duration_ms: Math.max(0, Math.floor(duration * 1000)),
        paused: !!audio.paused,
        ended: !!audio.ended,
        error: !!audio.error || (bridge.rejected !== null && bridge.rejected === bridge.src),
      };
    },
  };

  window.__voicenoteAudioBridge = bridge;
  return true;
})();
"#;

#[cfg(not(target_arch = "wasm32"))]
fn backend_apply(command: BackendCommand) -> Result<(), VoiceError> {
    let payload = serde_json::to_string(&command)?;
    let script = format!(
        r#"{VOICE_BRIDGE_BOOTSTRAP_JS}
        (function () {{
            const bridge = window.__voicenoteAudioBridge;
            if (!bridge) return false;
            bridge.apply({payload});
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
async fn backend_snapshot() -> Option<AudioSnapshot> {
    let script = format!(
        r#"{VOICE_BRIDGE_BOOTSTRAP_JS}
        return (function () {{
            const bridge = window.__voicenoteAudioBridge;
            return bridge ? bridge.snapshot() : {{}};
        }})();"#
    );
    let eval = document::eval(&script);
    match eval.join::<AudioSnapshot>().await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            debug!("[voice-player] snapshot unavailable: {err:?}");
            None
        }
    }
}
