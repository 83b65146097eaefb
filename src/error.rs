use thiserror::Error;

/// Errors raised by the settings store and the audio backends.
///
/// None of these reach the voice bubble itself: the player turns backend
/// failures into a `StartFailed` event and the shell falls back to default
/// settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoiceError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Audio backend error: {0}")]
    Backend(String),

    #[error("No playable file path for voice message")]
    MissingPath,
}

impl From<serde_json::Error> for VoiceError {
    fn from(error: serde_json::Error) -> Self {
        VoiceError::Serialization(error.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<rusqlite::Error> for VoiceError {
    fn from(error: rusqlite::Error) -> Self {
        VoiceError::Storage(error.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<gloo_storage::errors::StorageError> for VoiceError {
    fn from(error: gloo_storage::errors::StorageError) -> Self {
        VoiceError::Storage(error.to_string())
    }
}
