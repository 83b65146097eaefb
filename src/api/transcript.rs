// Bundled conversation used by the chat shell.
use super::models::{ChatItem, ItemContent};
use crate::error::VoiceError;
use dioxus::prelude::*;

const DEMO_TRANSCRIPT: &str = include_str!("../../demos/transcript.json");

/// Clips shipped with the app, by the file path the transcript gives them.
const DEMO_CLIPS: [(&str, Asset); 3] = [
    ("voice_101.wav", asset!("/assets/voice/voice_101.wav")),
    ("voice_102.wav", asset!("/assets/voice/voice_102.wav")),
    ("voice_103.wav", asset!("/assets/voice/voice_103.wav")),
];

pub fn parse_transcript(raw: &str) -> Result<Vec<ChatItem>, VoiceError> {
    let mut items: Vec<ChatItem> = serde_json::from_str(raw)?;
    items.sort_by_key(|item| (item.meta.sent_at, item.id));
    Ok(items)
}

/// Point file paths that name a bundled clip at the served asset URL.
/// Unknown paths are left alone.
pub fn resolve_clips(items: &mut [ChatItem], clips: &[(&str, String)]) {
    for item in items.iter_mut() {
        let ItemContent::Voice {
            file: Some(file), ..
        } = &mut item.content
        else {
            continue;
        };
        let Some(path) = file.file_path.as_deref() else {
            continue;
        };
        if let Some((_, url)) = clips.iter().find(|(name, _)| *name == path) {
            file.file_path = Some(url.clone());
        }
    }
}

pub fn demo_transcript() -> Result<Vec<ChatItem>, VoiceError> {
    let mut items = parse_transcript(DEMO_TRANSCRIPT)?;
    let clips: Vec<(&str, String)> = DEMO_CLIPS
        .iter()
        .map(|(name, asset)| (*name, asset.to_string()))
        .collect();
    resolve_clips(&mut items, &clips);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::loaded_file_path;

    fn voice_path(items: &[ChatItem], id: i64) -> Option<String> {
        items.iter().find(|item| item.id == id).and_then(|item| match &item.content {
            ItemContent::Voice { file: Some(file), .. } => file.file_path.clone(),
            _ => None,
        })
    }

    #[test]
    fn bundled_transcript_parses_in_time_order() {
        let items = demo_transcript().unwrap();
        assert!(!items.is_empty());
        assert!(items
            .windows(2)
            .all(|pair| pair[0].meta.sent_at <= pair[1].meta.sent_at));
        assert!(items
            .iter()
            .any(|item| matches!(item.content, ItemContent::Voice { file: None, .. })));
    }

    #[test]
    fn malformed_transcript_is_a_serialization_error() {
        let err = parse_transcript("{ not json").unwrap_err();
        assert!(matches!(err, VoiceError::Serialization(_)));
    }

    #[test]
    fn bundled_clips_resolve_to_served_urls() {
        let mut items = parse_transcript(DEMO_TRANSCRIPT).unwrap();
        let clips = vec![("voice_101.wav", "/assets/voice_101-abc.wav".to_string())];
        resolve_clips(&mut items, &clips);

        assert_eq!(
            voice_path(&items, 1).as_deref(),
            Some("/assets/voice_101-abc.wav")
        );
        // The broken attachment stays broken.
        assert_eq!(voice_path(&items, 7).as_deref(), Some("/voice/missing.m4a"));
    }

    #[test]
    fn every_loaded_demo_clip_except_the_missing_one_is_bundled() {
        let items = parse_transcript(DEMO_TRANSCRIPT).unwrap();
        let bundled: Vec<&str> = DEMO_CLIPS.iter().map(|(name, _)| *name).collect();
        for item in &items {
            if let ItemContent::Voice { file: Some(file), .. } = &item.content {
                if let Some(path) = loaded_file_path(file) {
                    assert!(
                        bundled.contains(&path.as_str()) || path == "/voice/missing.m4a",
                        "unbundled clip {path}"
                    );
                }
            }
        }
    }
}
